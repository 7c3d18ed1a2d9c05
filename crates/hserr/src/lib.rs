//! JVM fatal error log analysis.
//!
//! Parses the multi-section diagnostic text a JVM writes on an
//! unrecoverable native failure (`hs_err_pid*.log`) into a structured
//! [`CrashDocument`], then runs a rule engine over it to surface likely
//! root causes: memory exhaustion, resource limits, build/vendor
//! provenance, truncated or damaged reports.
//!
//! # Architecture
//!
//! - `units`: size/number/date extraction helpers
//! - `model`: the closed record taxonomy
//! - `classifier`: line → kind, with prior-record context for block
//!   continuation
//! - `parsers/`: one total parser per record family
//! - `document`: the append-only aggregate model and its derived queries
//! - `analysis/`: the finding rules
//! - `ingest`: the line loop that threads classification context
//!
//! # Guarantees
//!
//! Malformed input is never an error: unclassifiable lines become
//! `Unidentified` records, malformed fields degrade to explicit unknowns,
//! and missing sections surface as sentinels from the derived queries. The
//! only fallible call is analyzing a document that has not finished
//! ingestion.
//!
//! ```
//! use hserr::{analyze, ingest};
//!
//! let doc = ingest([
//!     "# A fatal error has been detected by the Java Runtime Environment:",
//!     "#  SIGSEGV (0xb) at pc=0x00007f6d0a0a0a0a, pid=8109, tid=8110",
//! ]);
//! assert!(doc.is_truncated());
//! let findings = analyze(&doc).unwrap();
//! assert!(!findings.is_empty());
//! ```

pub mod analysis;
pub mod classifier;
pub mod document;
pub mod ingest;
pub mod model;
pub mod parsers;
pub mod units;

pub use analysis::{analyze, Finding, FindingKey, Findings};
pub use classifier::classify;
pub use document::{CrashDocument, EstimatedTotal, UNKNOWN_THREAD};
pub use ingest::{ingest, DocumentBuilder};
pub use model::{
    CompressedOopsMode, DeviceCategory, Error, Kind, OsVersion, Record, Vendor,
};

//! Diagnostic rule engine.
//!
//! `analyze` runs every rule once over a completed [`CrashDocument`] and
//! collects the findings into an insertion-ordered map. Rules are
//! independent pure functions; none may depend on another rule having run.

pub mod rules;

use serde::Serialize;

use crate::document::CrashDocument;
use crate::model::Error;

/// Closed set of finding keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKey {
    PossibleRedHatBuild,
    BuildNotIdentified,
    VendorIdentified,
    OutOfMemoryRlimitMaxMapCount,
    PageFileSmallAtStartup,
    PageFileSmall,
    OutOfMemory,
    InsufficientMemory,
    SwappedOut,
    InternalError,
    CrashInNativeLibrary,
    ErrorOccurredDuringErrorReporting,
    UnidentifiedContent,
    TruncatedLog,
    JvmOptionsUnknown,
    JvmOptionsEmpty,
}

impl FindingKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKey::PossibleRedHatBuild => "possible-red-hat-build",
            FindingKey::BuildNotIdentified => "build-not-identified",
            FindingKey::VendorIdentified => "vendor-identified",
            FindingKey::OutOfMemoryRlimitMaxMapCount => "out-of-memory-rlimit-max-map-count",
            FindingKey::PageFileSmallAtStartup => "page-file-small-at-startup",
            FindingKey::PageFileSmall => "page-file-small",
            FindingKey::OutOfMemory => "out-of-memory",
            FindingKey::InsufficientMemory => "insufficient-memory",
            FindingKey::SwappedOut => "swapped-out",
            FindingKey::InternalError => "internal-error",
            FindingKey::CrashInNativeLibrary => "crash-in-native-library",
            FindingKey::ErrorOccurredDuringErrorReporting => {
                "error-occurred-during-error-reporting"
            }
            FindingKey::UnidentifiedContent => "unidentified-content",
            FindingKey::TruncatedLog => "truncated-log",
            FindingKey::JvmOptionsUnknown => "jvm-options-unknown",
            FindingKey::JvmOptionsEmpty => "jvm-options-empty",
        }
    }
}

/// A keyed diagnostic conclusion with its verbatim evidence text.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub key: FindingKey,
    pub evidence: String,
}

/// Insertion-ordered key → evidence mapping. First fire wins per key.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Findings {
    entries: Vec<Finding>,
}

impl Findings {
    fn insert(&mut self, finding: Finding) {
        if self.entries.iter().any(|f| f.key == finding.key) {
            return;
        }
        self.entries.push(finding);
    }

    pub fn get(&self, key: FindingKey) -> Option<&str> {
        self.entries
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.evidence.as_str())
    }

    pub fn contains(&self, key: FindingKey) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Evaluate every rule once. Errors only when the document is still being
/// ingested; malformed input never fails analysis.
pub fn analyze(doc: &CrashDocument) -> Result<Findings, Error> {
    if !doc.is_complete() {
        return Err(Error::IncompleteDocument);
    }
    let mut findings = Findings::default();
    for rule in rules::ALL {
        if let Some(finding) = rule(doc) {
            findings.insert(finding);
        }
    }
    Ok(findings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{ingest, DocumentBuilder};

    #[test]
    fn test_analyze_rejects_incomplete_document() {
        let mut builder = DocumentBuilder::new();
        builder.push_line("# A fatal error has been detected");
        assert!(matches!(
            analyze(builder.document()),
            Err(Error::IncompleteDocument)
        ));
        let doc = builder.finish();
        assert!(analyze(&doc).is_ok());
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let doc = ingest([
            "# A fatal error has been detected by the Java Runtime Environment:",
            "unrecognized line one",
            "unrecognized line two",
        ]);
        let first = analyze(&doc).unwrap();
        let second = analyze(&doc).unwrap();
        let a: Vec<_> = first.iter().map(|f| (f.key, f.evidence.clone())).collect();
        let b: Vec<_> = second.iter().map(|f| (f.key, f.evidence.clone())).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_finding_keys_are_unique() {
        let mut findings = Findings::default();
        findings.insert(Finding { key: FindingKey::TruncatedLog, evidence: "first".into() });
        findings.insert(Finding { key: FindingKey::TruncatedLog, evidence: "second".into() });
        assert_eq!(findings.len(), 1);
        assert_eq!(findings.get(FindingKey::TruncatedLog), Some("first"));
    }

    #[test]
    fn test_findings_serialize_with_kebab_keys() {
        let mut findings = Findings::default();
        findings.insert(Finding {
            key: FindingKey::PossibleRedHatBuild,
            evidence: "evidence line".into(),
        });
        let json = serde_json::to_string(&findings).unwrap();
        assert!(json.contains("possible-red-hat-build"));
    }
}

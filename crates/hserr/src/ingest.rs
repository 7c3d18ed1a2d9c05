//! Ingestion loop: the only place the prior-record context lives.
//!
//! Classification of line *n* depends on the resolved kind of line *n-1*,
//! so one document is strictly sequential. Separate documents share no
//! state and can be processed on independent threads.

use tracing::debug;

use crate::classifier::classify;
use crate::document::CrashDocument;
use crate::model::Kind;
use crate::parsers::parse;

/// Incremental ingestion. Feed lines in file order, then call
/// [`finish`](Self::finish) to obtain the completed document.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    doc: CrashDocument,
    prior: Option<Kind>,
    block_has_content: bool,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: &str) {
        let kind = classify(line, self.prior);
        if kind == Kind::Unidentified {
            debug!(line, "unidentified line");
        }
        self.doc.push(parse(kind, line));
        if kind == Kind::Blank {
            // Register/stack-slot blocks put one blank line between their
            // header and their content; that blank must not drop the open
            // block. Any blank after content closes it like other blocks.
            let keeps_block = self.prior.is_some_and(|p| p.spans_blank_lines())
                && !self.block_has_content;
            if !keeps_block {
                self.prior = Some(kind);
            }
        } else {
            // The second consecutive line of a blank-spanning block is its
            // first content line; the header itself is not content.
            self.block_has_content =
                kind.spans_blank_lines() && self.prior == Some(kind);
            self.prior = Some(kind);
        }
    }

    /// The in-progress document. Analysis refuses it until
    /// [`finish`](Self::finish) has run.
    pub fn document(&self) -> &CrashDocument {
        &self.doc
    }

    pub fn finish(mut self) -> CrashDocument {
        self.doc.mark_complete();
        self.doc
    }
}

/// Ingest a complete line sequence into a crash document.
pub fn ingest<I, S>(lines: I) -> CrashDocument
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = DocumentBuilder::new();
    for line in lines {
        builder.push_line(line.as_ref());
    }
    builder.finish()
}

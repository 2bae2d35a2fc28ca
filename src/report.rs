//! Outcome of a successful `write`.
//!
//! A write only fails with an [`Error`](crate::Error) when the output could not be created
//! or written to. Everything else that goes wrong with the data is recorded here as a
//! [`Warning`] and the document is still finished.

/// a recoverable problem found while writing a document
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Warning {
    #[error("property index {index} is out of range for an element with {count} properties")]
    PropertyOutOfRange { index: usize, count: usize },
    #[error("property {index} has a type that cannot be written, it was skipped")]
    SkippedProperty { index: usize },
    #[error("shape mismatch in {context}: expected {expected} values, found {found}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("NaN values were written for: {}", .properties.join(", "))]
    NanValues { properties: Vec<String> },
    #[error("patch {patch} of level {level} reaches outside the level, {skipped} vertices skipped")]
    OutsideLevel {
        level: usize,
        patch: usize,
        skipped: usize,
    },
    #[error("patch {patch} refers to level {level} which was never declared")]
    UndeclaredLevel { level: usize, patch: usize },
    #[error("legacy files are ascii only, binary encoding was ignored")]
    AsciiFallback,
    #[error("header attribute `{0}` is not a numeric key=value pair")]
    BadMetaEntry(String),
}

/// overall status of a write that produced a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Complete,
    CompleteWithWarnings,
}

/// What a finished write produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteReport {
    pub warnings: Vec<Warning>,
    /// points in the document
    pub points: usize,
    /// cells in the document
    pub cells: usize,
}

impl WriteReport {
    pub fn status(&self) -> WriteStatus {
        if self.warnings.is_empty() {
            WriteStatus::Complete
        } else {
            WriteStatus::CompleteWithWarnings
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status() == WriteStatus::Complete
    }

    /// record a warning and pass it to the logger
    pub(crate) fn warn(&mut self, warning: Warning) {
        match &warning {
            Warning::SkippedProperty { .. } | Warning::NanValues { .. } => {
                log::debug!("{}", warning)
            }
            _ => log::warn!("{}", warning),
        }
        self.warnings.push(warning);
    }
}

/// Collects the names of properties that produced NaN values during one write
#[derive(Debug, Default)]
pub(crate) struct NanAccumulator {
    properties: Vec<String>,
}

impl NanAccumulator {
    pub(crate) fn record(&mut self, name: &str) {
        if !self.properties.iter().any(|p| p == name) {
            self.properties.push(name.to_string());
        }
    }

    pub(crate) fn seen(&self) -> bool {
        !self.properties.is_empty()
    }

    /// consume the accumulator into `report`
    pub(crate) fn finish(self, report: &mut WriteReport) {
        if self.seen() {
            report.warn(Warning::NanValues {
                properties: self.properties,
            });
        }
    }
}

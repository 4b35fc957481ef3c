use std::collections::BTreeMap;

/// Verdict of a validation pass.
///
/// `passes` is `false` iff at least one error was recorded; warnings never fail a document.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ValidationReport {
    /// Overall verdict.
    pub passes: bool,
    /// Hard failures, in the order they were found.
    pub errors: Vec<String>,
    /// Advisory findings.
    pub warnings: Vec<String>,
    /// Structured facts extracted during validation.
    pub details: BTreeMap<String, serde_json::Value>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationReport {
    /// Empty, passing report.
    pub fn new() -> Self {
        Self {
            passes: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            details: BTreeMap::new(),
        }
    }

    pub(crate) fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
        self.passes = false;
    }

    pub(crate) fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub(crate) fn detail(&mut self, key: &str, value: impl Into<serde_json::Value>) {
        self.details.insert(key.to_owned(), value.into());
    }

    /// Append another report's findings; details from `other` win on key collisions.
    pub fn merge(&mut self, other: ValidationReport) {
        self.passes &= other.passes;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.details.extend(other.details);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/report/mod.rs"]
mod tests;

//! Non-fatal findings about building inputs and reference tables.
//!
//! The calculator accepts anything it can do arithmetic on: negative areas,
//! use types the limit table has never heard of, factor tables with holes.
//! Rather than rejecting such inputs, the validators collect issues here so
//! the server can log them and the CLI can print them.
//!
//! # Example
//!
//! ```
//! use ll97_core::diagnostics::{Diagnostics, Severity};
//!
//! let mut diag = Diagnostics::new();
//! diag.add_warning_with_entity("reference", "use type has no limit factors", "Spaceport");
//! diag.add_error("table", "negative factor");
//!
//! assert_eq!(diag.warning_count(), 1);
//! assert_eq!(diag.error_count(), 1);
//! assert_eq!(diag.issues[0].severity, Severity::Warning);
//! ```

use serde::Serialize;

/// Severity level for diagnostic issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Unusual but the calculation still runs (e.g., defaulted value)
    Warning,
    /// Reference data is unusable as written (e.g., negative factor)
    Error,
}

/// A single diagnostic issue
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticIssue {
    pub severity: Severity,
    /// Category for grouping (e.g., "input", "reference", "table")
    pub category: String,
    pub message: String,
    /// Optional entity reference (e.g., a use type or a period label)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
}

impl DiagnosticIssue {
    pub fn new(
        severity: Severity,
        category: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category: category.into(),
            message: message.into(),
            entity: None,
        }
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }
}

impl std::fmt::Display for DiagnosticIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };

        write!(f, "[{}:{}] {}", severity, self.category, self.message)?;

        if let Some(entity) = &self.entity {
            write!(f, " ({})", entity)?;
        }

        Ok(())
    }
}

/// Collection of diagnostic issues for one validation pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<DiagnosticIssue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, issue: DiagnosticIssue) {
        self.issues.push(issue);
    }

    pub fn add_warning(&mut self, category: &str, message: &str) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Warning, category, message));
    }

    pub fn add_warning_with_entity(&mut self, category: &str, message: &str, entity: &str) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Warning, category, message).with_entity(entity));
    }

    pub fn add_error(&mut self, category: &str, message: &str) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Error, category, message));
    }

    pub fn add_error_with_entity(&mut self, category: &str, message: &str, entity: &str) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Error, category, message).with_entity(entity));
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// Issues filtered by category
    pub fn issues_by_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a DiagnosticIssue> {
        self.issues.iter().filter(move |i| i.category == category)
    }

    pub fn merge(&mut self, other: Diagnostics) {
        self.issues.extend(other.issues);
    }

    pub fn summary(&self) -> String {
        let warnings = self.warning_count();
        let errors = self.error_count();

        match (warnings, errors) {
            (0, 0) => "No issues".to_string(),
            (w, 0) => format!("{} warning{}", w, if w == 1 { "" } else { "s" }),
            (0, e) => format!("{} error{}", e, if e == 1 { "" } else { "s" }),
            (w, e) => format!(
                "{} warning{}, {} error{}",
                w,
                if w == 1 { "" } else { "s" },
                e,
                if e == 1 { "" } else { "s" }
            ),
        }
    }
}

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Diagnostics: {}", self.summary())?;
        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_pluralization() {
        let mut diag = Diagnostics::new();
        assert_eq!(diag.summary(), "No issues");

        diag.add_warning("input", "negative area");
        assert_eq!(diag.summary(), "1 warning");

        diag.add_warning("input", "negative usage");
        diag.add_error("table", "negative factor");
        assert_eq!(diag.summary(), "2 warnings, 1 error");
    }

    #[test]
    fn test_issue_display_with_entity() {
        let issue = DiagnosticIssue::new(Severity::Warning, "reference", "no limit factors")
            .with_entity("Spaceport");
        assert_eq!(
            issue.to_string(),
            "[warning:reference] no limit factors (Spaceport)"
        );
    }

    #[test]
    fn test_merge_and_filter() {
        let mut a = Diagnostics::new();
        a.add_warning("input", "x");
        let mut b = Diagnostics::new();
        b.add_error_with_entity("table", "y", "2024-2029");
        a.merge(b);

        assert!(a.has_errors());
        assert_eq!(a.issues_by_category("table").count(), 1);
        assert_eq!(a.issues_by_category("input").count(), 1);
    }

    #[test]
    fn test_serialization_skips_empty() {
        let json = serde_json::to_string(&Diagnostics::new()).unwrap();
        assert_eq!(json, "{}");
    }
}

//! 문서 일관성 검사가 찾아낸 문제

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// 검사가 찾은 잘못
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    DuplicateEntry,
    ContradictoryGuidance,
    EmptyPurpose,
    ManifestUnlisted,
    ComparisonUnlisted,
    EmptyCategory,
    MissingCommand,
    ForeignTool,
    UnknownSubcommand,
    DuplicateCommand,
    MissingPolicy,
}

impl IssueKind {
    /// 이 종류의 문제가 갖는 심각도
    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::DuplicateEntry
            | IssueKind::ComparisonUnlisted
            | IssueKind::EmptyCategory
            | IssueKind::DuplicateCommand
            | IssueKind::MissingPolicy => Severity::Warning,
            IssueKind::ContradictoryGuidance
            | IssueKind::EmptyPurpose
            | IssueKind::ManifestUnlisted
            | IssueKind::MissingCommand
            | IssueKind::ForeignTool
            | IssueKind::UnknownSubcommand => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub kind: IssueKind,
    pub message: String,
    /// 문제가 가리키는 원문 줄 (1부터), 있을 때만
    pub line: Option<usize>,
}

impl Issue {
    pub fn new(kind: IssueKind, message: impl Into<String>, line: Option<usize>) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            message: message.into(),
            line,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{} (line {}): {}", self.severity, line, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

/// 문서 하나에서 찾은 문제
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub document: String,
    pub issues: Vec<Issue>,
}

impl Report {
    pub fn new(document: impl Into<String>, mut issues: Vec<Issue>) -> Self {
        issues.sort_by_key(|issue| issue.line.unwrap_or(0));
        Self {
            document: document.into(),
            issues,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_severity_follows_kind() {
        let issue = Issue::new(IssueKind::DuplicateEntry, "dup", Some(3));
        assert_eq!(issue.severity, Severity::Warning);

        let issue = Issue::new(IssueKind::ManifestUnlisted, "missing", None);
        assert_eq!(issue.severity, Severity::Error);
    }

    #[test]
    fn test_issue_display() {
        let issue = Issue::new(IssueKind::EmptyPurpose, "row has no purpose", Some(12));
        assert_eq!(issue.to_string(), "error (line 12): row has no purpose");

        let issue = Issue::new(IssueKind::MissingPolicy, "no policy", None);
        assert_eq!(issue.to_string(), "warning: no policy");
    }

    #[test]
    fn test_report_orders_by_line_and_counts() {
        let report = Report::new(
            "doc.md",
            vec![
                Issue::new(IssueKind::EmptyPurpose, "b", Some(9)),
                Issue::new(IssueKind::DuplicateEntry, "a", Some(2)),
            ],
        );
        assert_eq!(report.issues[0].line, Some(2));
        assert!(report.has_errors());
        assert_eq!(report.count(Severity::Warning), 1);
        assert_eq!(report.count(Severity::Error), 1);
    }

    #[test]
    fn test_report_without_errors() {
        let report = Report::new("doc.md", Vec::new());
        assert!(!report.has_errors());
    }
}

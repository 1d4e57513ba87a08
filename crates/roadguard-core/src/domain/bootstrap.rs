// ============================================================================
// RoadGuard Core - SQL Bootstrap
// File: crates/roadguard-core/src/domain/bootstrap.rs
// Description: Splitting and reporting of the database init script
// ============================================================================

use roadguard_shared::constants::SQL_PREVIEW_CHARS;
use roadguard_shared::utils::truncate_with_ellipsis;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementStatus {
    Success,
    Error,
}

/// Result of one statement of the init script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementOutcome {
    /// First 50 characters of the statement
    pub query: String,
    pub status: StatementStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatementOutcome {
    pub fn success(statement: &str) -> Self {
        Self {
            query: truncate_with_ellipsis(statement, SQL_PREVIEW_CHARS),
            status: StatementStatus::Success,
            message: None,
        }
    }

    pub fn error(statement: &str, message: String) -> Self {
        Self {
            query: truncate_with_ellipsis(statement, SQL_PREVIEW_CHARS),
            status: StatementStatus::Error,
            message: Some(message),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == StatementStatus::Success
    }
}

/// Drops `--` comments up to end of line, splits on `;` and keeps the
/// non-empty trimmed statements.
///
/// Statements must not contain `;` or `--` inside string literals.
pub fn split_sql_script(script: &str) -> Vec<String> {
    let without_comments: String = script
        .lines()
        .map(|line| match line.find("--") {
            Some(pos) => &line[..pos],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n");

    without_comments
        .split(';')
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
        .map(str::to_string)
        .collect()
}

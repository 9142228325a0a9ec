// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reported after the fact in scaffold reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Unknown {kind} '{value}'")]
    UnknownValue { kind: &'static str, value: String },

    // ========================================================================
    // Compatibility Errors
    // ========================================================================
    #[error("'{feature}' requires {requires}")]
    IncompatibleFeatures {
        feature: &'static str,
        requires: &'static str,
    },

    // ========================================================================
    // Source Errors
    // ========================================================================
    /// The file could not be tokenized. Mutations never write in this case.
    #[error("Syntax error at {line}:{column}: {reason}")]
    SourceParse {
        line: usize,
        column: usize,
        reason: String,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { .. } => vec![
                "Project names follow npm package naming rules".into(),
                "Use lowercase letters, digits, '-', '.', '_' and '~'".into(),
                "Examples: my-app, web.portal, @acme/site".into(),
            ],
            Self::UnknownValue { kind, .. } => match *kind {
                "package manager" => vec!["Supported: npm, pnpm, yarn, bun".into()],
                "orm" => vec!["Supported: prisma, drizzle, none".into()],
                "ui kit" => vec!["Supported: shadcn, heroui, both, none".into()],
                "auth provider" => vec!["Supported: next-auth, clerk, none".into()],
                "example set" => vec!["Supported: crud, auth, both, none".into()],
                "license" => vec!["Supported: mit, apache, none".into()],
                _ => vec!["Run with --help to see accepted values".into()],
            },
            Self::IncompatibleFeatures { feature, requires } => vec![
                format!("'{feature}' cannot be generated without {requires}"),
                "Enable the missing option or drop the feature".into(),
            ],
            Self::SourceParse { .. } => vec![
                "The generated file is not valid JavaScript/TypeScript".into(),
                "Fix the file by hand and re-run the affected step".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. } | Self::UnknownValue { .. } => {
                ErrorCategory::Validation
            }
            Self::IncompatibleFeatures { .. } => ErrorCategory::Compatibility,
            Self::SourceParse { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}

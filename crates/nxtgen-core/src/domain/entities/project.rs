use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{
    DomainError,
    value_objects::{AuthProvider, ExampleSet, License, Orm, UiKit},
};

const MAX_NAME_LEN: usize = 214;

/// A project name that is also a valid npm package name.
///
/// Invariant: lowercase, optionally scoped (`@scope/name`), characters limited
/// to `a-z 0-9 - . _ ~`, no leading `.` or `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let invalid = |reason: &str| DomainError::InvalidProjectName {
            name: name.clone(),
            reason: reason.into(),
        };

        if name.is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if name.len() > MAX_NAME_LEN {
            return Err(invalid("name cannot be longer than 214 characters"));
        }
        if name.trim() != name {
            return Err(invalid("name cannot have leading or trailing spaces"));
        }

        let package = match name.strip_prefix('@') {
            Some(scoped) => {
                let (scope, package) = scoped
                    .split_once('/')
                    .ok_or_else(|| invalid("scoped names look like @scope/name"))?;
                if !valid_segment(scope, |c| matches!(c, '-' | '*' | '~'), true) {
                    return Err(invalid("scope contains invalid characters"));
                }
                package
            }
            None => name.as_str(),
        };

        if package.starts_with('.') || package.starts_with('_') {
            return Err(invalid("name cannot start with '.' or '_'"));
        }
        if package.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(invalid("name must be lowercase"));
        }
        if !valid_segment(package, |c| matches!(c, '-' | '~'), false) {
            return Err(invalid(
                "only lowercase letters, digits, '-', '.', '_' and '~' are allowed",
            ));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The unscoped part of the name, used where a display name is needed.
    pub fn short_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

/// `first` restricts the leading character, the rest may also use `.` and `_`.
fn valid_segment(segment: &str, first: impl Fn(char) -> bool, star_in_body: bool) -> bool {
    let mut chars = segment.chars();
    let Some(head) = chars.next() else {
        return false;
    };
    let base = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    if !(base(head) || first(head)) {
        return false;
    }
    chars.all(|c| base(c) || matches!(c, '-' | '.' | '_' | '~') || (star_in_body && c == '*'))
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The feature selection for a new project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub orm: Orm,
    pub react_query: bool,
    pub axios: bool,
    /// Generate a typed API client with Orval (needs React Query and Axios).
    pub orval: bool,
    pub ui: UiKit,
    pub framer_motion: bool,
    pub lucide: bool,
    pub examples: ExampleSet,
    pub docker: bool,
    pub ci: bool,
    pub husky: bool,
    pub vitest: bool,
    pub playwright: bool,
    pub storybook: bool,
    pub forms: bool,
    pub intl: bool,
    pub auth: AuthProvider,
    pub license: License,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            orm: Orm::None,
            react_query: false,
            axios: false,
            orval: false,
            ui: UiKit::None,
            framer_motion: false,
            lucide: true,
            examples: ExampleSet::None,
            docker: false,
            ci: false,
            husky: false,
            vitest: false,
            playwright: false,
            storybook: false,
            forms: false,
            intl: false,
            auth: AuthProvider::None,
            license: License::None,
        }
    }
}

impl ProjectConfig {
    /// Whether any client-side provider has to wrap the root layout.
    pub fn needs_providers(&self) -> bool {
        self.react_query || self.ui.includes_heroui() || self.auth == AuthProvider::NextAuth
    }
}

use super::{DomainError, ProjectConfig};

pub struct DomainValidator;

impl DomainValidator {
    /// Reject feature combinations that would generate code referring to
    /// modules that are never installed.
    pub fn validate_config(config: &ProjectConfig) -> Result<(), DomainError> {
        if config.examples.includes_auth() && !config.auth.is_some() {
            return Err(DomainError::IncompatibleFeatures {
                feature: "auth examples",
                requires: "an auth provider (next-auth or clerk)",
            });
        }

        if config.orval && !(config.react_query && config.axios) {
            return Err(DomainError::IncompatibleFeatures {
                feature: "orval",
                requires: "both react-query and axios",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{AuthProvider, ExampleSet};

    #[test]
    fn auth_examples_need_a_provider() {
        let mut cfg = ProjectConfig {
            examples: ExampleSet::Both,
            ..ProjectConfig::default()
        };
        assert!(DomainValidator::validate_config(&cfg).is_err());

        cfg.auth = AuthProvider::Clerk;
        assert!(DomainValidator::validate_config(&cfg).is_ok());
    }

    #[test]
    fn orval_needs_query_and_axios() {
        let mut cfg = ProjectConfig {
            orval: true,
            react_query: true,
            ..ProjectConfig::default()
        };
        assert!(matches!(
            DomainValidator::validate_config(&cfg),
            Err(DomainError::IncompatibleFeatures { feature: "orval", .. })
        ));

        cfg.axios = true;
        assert!(DomainValidator::validate_config(&cfg).is_ok());
    }
}

use serde_json::{Map, Value};

use super::{Mutation, MutationOutcome, SkipReason};
use crate::domain::DomainError;

/// Add `scripts` entries whose names are not already taken.
///
/// Existing scripts are never overwritten and key order is preserved. The
/// output is pretty-printed with a trailing newline, the way package managers
/// write the file.
pub fn add_scripts(src: &str, scripts: &[(&str, &str)]) -> Result<Mutation, DomainError> {
    let mut manifest: Value = serde_json::from_str(src).map_err(|e| DomainError::SourceParse {
        line: e.line(),
        column: e.column(),
        reason: e.to_string(),
    })?;

    let Some(root) = manifest.as_object_mut() else {
        return Err(DomainError::SourceParse {
            line: 1,
            column: 1,
            reason: "package.json is not a JSON object".into(),
        });
    };
    let Value::Object(existing) = root
        .entry("scripts")
        .or_insert_with(|| Value::Object(Map::new()))
    else {
        return Ok(Mutation::skipped(src, SkipReason::ScriptsNotObject));
    };

    let mut added = Vec::new();
    for (name, command) in scripts {
        if !existing.contains_key(*name) {
            existing.insert((*name).to_string(), Value::String((*command).to_string()));
            added.push(format!("script {name}"));
        }
    }
    if added.is_empty() {
        return Ok(Mutation::unchanged(src));
    }

    let mut text = serde_json::to_string_pretty(&manifest).map_err(|e| DomainError::SourceParse {
        line: 0,
        column: 0,
        reason: e.to_string(),
    })?;
    text.push('\n');

    Ok(Mutation {
        text,
        outcome: MutationOutcome::Applied { edits: added },
    })
}

//! Implementation of the `nxtgen list` command.

use nxtgen_adapters::{MemoryFilesystem, RecordingRunner, builtin_features};
use nxtgen_core::application::{FeatureInfo, ScaffoldService};

use crate::{
    cli::{ListArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    // Listing never touches the disk or spawns anything.
    let service = ScaffoldService::new(
        Box::new(MemoryFilesystem::new()),
        Box::new(RecordingRunner::new()),
        builtin_features(),
    );
    let features = service.features();

    // `--output-format json` forces JSON whatever `--format` says.
    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header("Feature modules (in execution order):")?;
            let width = features.iter().map(|f| f.name.len()).max().unwrap_or(0);
            for (i, feature) in features.iter().enumerate() {
                output.print(&format!(
                    "  {:>2}. {:<width$}  {}",
                    i + 1,
                    feature.name,
                    feature.description
                ))?;
            }
        }
        ListFormat::Json => output.json(&features)?,
        ListFormat::List => {
            for feature in &features {
                output.print(&feature.name)?;
            }
        }
        ListFormat::Csv => {
            output.print("name,description")?;
            for feature in &features {
                output.print(&csv_row(feature))?;
            }
        }
    }

    Ok(())
}

fn csv_row(feature: &FeatureInfo) -> String {
    let escape = |field: &str| {
        if field.contains([',', '"', '\n']) {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    };
    format!("{},{}", escape(&feature.name), escape(&feature.description))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_quotes_fields_with_commas() {
        let row = csv_row(&FeatureInfo {
            name: "docs".into(),
            description: "README, LICENSE".into(),
        });
        assert_eq!(row, "docs,\"README, LICENSE\"");
    }
}

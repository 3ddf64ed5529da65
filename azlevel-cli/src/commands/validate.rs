//! Validate command implementation

use crate::commands::classify::load_rubric_file;
use crate::config::CliConfig;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
#[group(required = true, multiple = true)]
pub struct ValidateArgs {
    /// Path to a configuration file to validate
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to a rubric (CSV or XLSX) to validate
    #[arg(short, long, value_name = "FILE")]
    pub rubric: Option<PathBuf>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        let mut failures = 0;

        if let Some(path) = &self.config {
            println!("Validating configuration: {}", path.display());
            match CliConfig::from_file(path) {
                Ok(config) => {
                    println!("✓ Configuration is valid!");
                    println!("  Language: {}", config.classification.language()?);
                    println!("  Output format: {}", config.output.format);
                    println!(
                        "  Band bounds: {:?}",
                        config.heuristics.bands.upper_bounds()
                    );
                }
                Err(e) => {
                    println!("✗ Configuration is invalid!");
                    println!("  Error: {e:#}");
                    failures += 1;
                }
            }
        }

        if let Some(path) = &self.rubric {
            println!("Validating rubric: {}", path.display());
            match load_rubric_file(path) {
                Ok(rubric) => {
                    println!("✓ Rubric is valid!");
                    let levels: String = rubric.rows().map(|row| row.level.letter()).collect();
                    println!("  Levels described: {} ({})", rubric.len(), levels);
                }
                Err(e) => {
                    println!("✗ Rubric is invalid!");
                    println!("  Error: {e}");
                    failures += 1;
                }
            }
        }

        if failures > 0 {
            anyhow::bail!("Validation failed for {failures} file(s)");
        }
        Ok(())
    }
}

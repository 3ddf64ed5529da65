//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite the output file if it exists
    #[arg(long)]
    pub force: bool,
}

/// Commented configuration with every default spelled out
pub const TEMPLATE: &str = r#"# azlevel configuration

[classification]
# Language of the justifications: "english" or "portuguese"
language = "english"
# Rubric (CSV or XLSX) used when --rubric is not given (columns: level, structure,
# vocabulary, images; Portuguese headers such as "Nível" are accepted)
# rubric = "rubrica.csv"

[output]
# Default output format: "text", "json", "markdown", "csv" or "xlsx"
# (xlsx needs --output)
format = "text"
pretty_json = true

[performance]
# Classify books on a thread pool; results keep input order
parallel = false
# Worker threads for parallel runs (0 = one per CPU)
worker_threads = 0

[heuristics]
# Characters sampled from each book after whitespace normalization
max_sample_chars = 50000
# Words of at least this many characters count as long
long_word_min_chars = 9

# Inclusive upper bounds of average words per sentence for each band;
# longer sentences fall into T-Z
[heuristics.bands]
a_to_d = 6.0
e_to_i = 10.0
j_to_m = 14.0
n_to_s = 19.0

# Composite score picking the letter inside a band. Each term is
# weight * min(1, feature * scale) or weight * min(1, feature / saturation)
[heuristics.weights]
long_words = 0.8
long_word_scale = 5.0
lexical_diversity = 0.6
lexical_diversity_scale = 2.0
commas = 0.7
comma_saturation = 2.0
connectives = 0.5
connective_saturation = 10.0

# Cut points used when wording the justification
[heuristics.justification]
high_complexity_min = 15.0
low_complexity_max = 6.0
compound_commas_above = 0.3
compound_connectives_min = 2
long_vocabulary_min = 0.08
"#;

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        if self.output.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, TEMPLATE)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the configuration file to set your rubric and defaults");
        println!("2. Validate your configuration:");
        println!("   azlevel validate --config {}", self.output.display());
        println!("3. Use it for classification:");
        println!(
            "   azlevel classify -i 'books/*.txt' --config {}",
            self.output.display()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use tempfile::TempDir;

    #[test]
    fn test_template_matches_defaults() {
        let config = CliConfig::from_toml_str(TEMPLATE).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_execute_success() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("azlevel.toml");

        let args = GenerateConfigArgs {
            output: output_path.clone(),
            force: false,
        };

        assert!(args.execute().is_ok());
        let content = std::fs::read_to_string(&output_path).unwrap();
        assert!(content.contains("[heuristics.bands]"));
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("azlevel.toml");
        std::fs::write(&output_path, "# mine").unwrap();

        let args = GenerateConfigArgs {
            output: output_path.clone(),
            force: false,
        };
        assert!(args.execute().is_err());
        assert_eq!(std::fs::read_to_string(&output_path).unwrap(), "# mine");

        let args = GenerateConfigArgs {
            output: output_path.clone(),
            force: true,
        };
        assert!(args.execute().is_ok());
    }
}

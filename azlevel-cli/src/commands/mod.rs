//! CLI command implementations

use crate::config::CliConfig;
use crate::output::OutputFormat;
use anyhow::Result;
use azlevel_core::{BandThresholds, Language, BANDS};
use clap::Subcommand;
use std::path::PathBuf;

pub mod classify;
pub mod generate_config;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Assign an A-Z reading level to each book
    Classify(classify::ClassifyArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Validate a configuration file or rubric
    Validate(validate::ValidateArgs),

    /// Generate a configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List available output formats
    Formats,

    /// List level bands and their sentence length ranges
    Bands {
        /// Configuration file whose [heuristics.bands] to show
        /// (default: the standard thresholds)
        #[arg(short, long, value_name = "FILE", env = "AZLEVEL_CONFIG")]
        config: Option<PathBuf>,
    },

    /// List justification languages
    Languages,
}

impl ListCommands {
    /// Print the requested listing to stdout
    pub fn execute(&self) -> Result<()> {
        for line in self.lines()? {
            println!("{line}");
        }
        Ok(())
    }

    fn lines(&self) -> Result<Vec<String>> {
        let lines = match self {
            ListCommands::Formats => {
                let mut lines = vec!["Available output formats:".to_string()];
                lines.extend(
                    OutputFormat::ALL
                        .iter()
                        .map(|f| format!("  {:<10} {}", f.as_str(), f.description())),
                );
                lines
            }
            ListCommands::Bands { config: Some(path) } => {
                let config = CliConfig::from_file(path)?;
                let mut lines = band_lines(&config.heuristics.bands);
                lines[0] = format!("{} from {}:", lines[0].trim_end_matches(':'), path.display());
                lines
            }
            ListCommands::Bands { config: None } => {
                let mut lines = band_lines(&BandThresholds::default());
                lines[0] = format!("{}, standard thresholds:", lines[0].trim_end_matches(':'));
                lines
            }
            ListCommands::Languages => {
                let mut lines = vec!["Available justification languages:".to_string()];
                lines.extend(
                    [Language::English, Language::Portuguese]
                        .iter()
                        .map(|l| format!("  {:<10} {}", l.code(), l)),
                );
                lines
            }
        };
        Ok(lines)
    }
}

fn band_lines(thresholds: &BandThresholds) -> Vec<String> {
    let bounds = thresholds.upper_bounds();
    let mut lines = vec!["Level bands (average words per sentence):".to_string()];
    for (i, band) in BANDS.iter().enumerate() {
        let range = match (i.checked_sub(1).map(|j| bounds[j]), bounds.get(i)) {
            (None, Some(upper)) => format!("<= {upper}"),
            (Some(lower), Some(upper)) => format!("> {lower} and <= {upper}"),
            (Some(lower), None) => format!("> {lower}"),
            (None, None) => String::new(),
        };
        lines.push(format!("  {:<5} {range}", band.to_string()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_commands_debug_format() {
        let list_cmd = Commands::List {
            subcommand: ListCommands::Bands { config: None },
        };

        let debug_str = format!("{:?}", list_cmd);
        assert!(debug_str.contains("List"));
        assert!(debug_str.contains("Bands"));
    }

    #[test]
    fn test_band_listing() {
        let lines = ListCommands::Bands { config: None }.lines().unwrap();
        assert_eq!(lines.len(), 6);
        assert_eq!(
            lines[0],
            "Level bands (average words per sentence), standard thresholds:"
        );
        assert_eq!(lines[1], "  A-D   <= 6");
        assert_eq!(lines[2], "  E-I   > 6 and <= 10");
        assert_eq!(lines[5], "  T-Z   > 19");
    }

    #[test]
    fn test_band_listing_from_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("azlevel.toml");
        fs::write(&path, "[heuristics.bands]
a_to_d = 5.0
n_to_s = 20.5
").unwrap();

        let lines = ListCommands::Bands {
            config: Some(path.clone()),
        }
        .lines()
        .unwrap();
        assert!(lines[0].ends_with(&format!("from {}:", path.display())));
        assert_eq!(lines[1], "  A-D   <= 5");
        assert_eq!(lines[2], "  E-I   > 5 and <= 10");
        assert_eq!(lines[5], "  T-Z   > 20.5");
    }

    #[test]
    fn test_band_listing_rejects_bad_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("azlevel.toml");
        fs::write(&path, "[heuristics.bands]
e_to_i = 3.0
").unwrap();
        assert!(ListCommands::Bands { config: Some(path) }.lines().is_err());
    }

    #[test]
    fn test_format_listing_covers_all_formats() {
        let lines = ListCommands::Formats.lines().unwrap();
        for format in OutputFormat::ALL {
            assert!(lines.iter().any(|l| l.contains(format.as_str())));
        }
    }

    #[test]
    fn test_language_listing() {
        let lines = ListCommands::Languages.lines().unwrap();
        assert!(lines.iter().any(|l| l.contains("en") && l.contains("English")));
        assert!(lines.iter().any(|l| l.contains("pt") && l.contains("Portuguese")));
    }
}

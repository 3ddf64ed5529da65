//! Classify command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{collect_documents, non_isbn_names, resolve_patterns};
use crate::output::{create_formatter, OutputFormat};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use azlevel_core::{BookExtractor, ExecutionMode, LevelError, Leveler, Rubric};
use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

/// Arguments for the classify command
#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Book files (.txt, .pdf, .epub) or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Rubric (CSV or XLSX) with level, structure, vocabulary and images columns
    #[arg(short, long, value_name = "FILE")]
    pub rubric: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Language of the justifications (default: from config, else english)
    #[arg(short, long, value_enum)]
    pub language: Option<Language>,

    /// Classify books in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "AZLEVEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported justification languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Language {
    /// English wording
    English,
    /// Portuguese wording
    Portuguese,
}

impl From<Language> for azlevel_core::Language {
    fn from(language: Language) -> Self {
        match language {
            Language::English => azlevel_core::Language::English,
            Language::Portuguese => azlevel_core::Language::Portuguese,
        }
    }
}

impl ClassifyArgs {
    /// Execute the classify command
    pub fn execute(&self) -> Result<()> {
        // Initialize logging based on verbosity
        self.init_logging()?;

        log::info!("Starting classification");
        log::debug!("Arguments: {:?}", self);

        let config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };

        let language = match self.language {
            Some(language) => language.into(),
            None => config.classification.language()?,
        };
        let format = match self.format {
            Some(format) => format,
            None => OutputFormat::from_name(&config.output.format).ok_or_else(|| {
                CliError::ConfigError(format!("unknown output format '{}'", config.output.format))
            })?,
        };
        if format.is_binary() && self.output.is_none() {
            return Err(CliError::ConfigError(format!(
                "{} output needs a file; pass --output",
                format.as_str()
            ))
            .into());
        }
        let parallel = self.parallel || config.performance.parallel;
        let threads = match config.performance.worker_threads {
            0 => None,
            n => Some(n),
        };

        let rubric = self.load_rubric(&config)?;

        let paths = resolve_patterns(&self.input)?;
        log::info!("Found {} books", paths.len());
        self.warn_non_isbn_names(&paths);
        let documents = collect_documents(&paths);

        let leveler = Leveler::builder()
            .heuristics(config.heuristics.clone())
            .language(language)
            .threads(threads)
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        let extractor = BookExtractor::new(config.heuristics.max_sample_chars);

        let mode = if parallel {
            log::info!(
                "Parallel mode: {} worker threads",
                threads.unwrap_or_else(num_cpus::get)
            );
            ExecutionMode::Parallel
        } else {
            ExecutionMode::Sequential
        };

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_books(documents.len() as u64);
        let results = leveler
            .classify_batch_mode(&documents, &extractor, &rubric, mode, |result| {
                progress.book_completed(&result.source, &result.level_label());
            })
            .map_err(|e| CliError::ProcessingError(e.to_string()))?;
        progress.finish();

        let leveled = results.iter().filter(|r| r.is_leveled()).count();
        log::info!("Leveled {} of {} books", leveled, results.len());

        let mut formatter = match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                create_formatter(format, BufWriter::new(file), config.output.pretty_json)
            }
            None => create_formatter(format, io::stdout(), config.output.pretty_json),
        };
        for result in &results {
            formatter.format_result(result)?;
        }
        formatter.finish()?;

        Ok(())
    }

    /// Load the rubric from `--rubric` or the config file
    fn load_rubric(&self, config: &CliConfig) -> Result<Rubric> {
        let path = self.rubric.as_ref().or(config.classification.rubric.as_ref());
        match path {
            Some(path) => load_rubric_file(path),
            None => {
                log::warn!("No rubric given; justifications will not cite rubric rows");
                Ok(Rubric::default())
            }
        }
    }

    fn warn_non_isbn_names(&self, paths: &[PathBuf]) {
        let names = non_isbn_names(paths);
        if names.is_empty() {
            return;
        }
        log::warn!("{} file names do not look like an ISBN", names.len());
        if !self.quiet {
            eprintln!(
                "Warning: these file names do not look like an ISBN (e.g. 9788535914849.txt): {}",
                names.join(", ")
            );
        }
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .try_init()
                .ok();
        }

        Ok(())
    }
}

/// Load a rubric CSV or XLSX, mapping failures to CLI errors
pub fn load_rubric_file(path: &Path) -> Result<Rubric> {
    if !path.is_file() {
        return Err(CliError::FileNotFound(path.display().to_string()).into());
    }
    let rubric = Rubric::from_path(path).map_err(|e| match e {
        malformed @ LevelError::MalformedRubric { .. } => {
            CliError::RubricError(format!("{}: {malformed}", path.display()))
        }
        other => CliError::RubricError(format!("failed to read {}: {other}", path.display())),
    })?;
    log::info!("Loaded rubric with {} levels", rubric.len());
    Ok(rubric)
}

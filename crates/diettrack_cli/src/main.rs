//! Console entry point for the diet tracker.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Start logging, then hand stdin/stdout to the menu loop.

mod menu;
mod prompt;

use clap::{Parser, ValueEnum};
use diettrack_core::{
    init_logging, FeatureSet, JsonEntryStore, TrackerConfig, TrackerService,
};
use log::info;
use prompt::{Console, PromptError};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Clone, Parser)]
#[command(name = "diettrack", version, about = "Track daily diet, get feedback and weight predictions")]
struct Cli {
    /// JSON file holding all diet entries.
    #[arg(long, env = "DIETTRACK_DATA_FILE")]
    data_file: Option<PathBuf>,
    /// Directory for rolling log files.
    #[arg(long, env = "DIETTRACK_LOG_DIR")]
    log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,
    /// Columns used to predict weight.
    #[arg(long, value_enum)]
    features: Option<FeatureChoice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FeatureChoice {
    Macros,
    MacrosWithActivity,
}

impl From<FeatureChoice> for FeatureSet {
    fn from(value: FeatureChoice) -> Self {
        match value {
            FeatureChoice::Macros => FeatureSet::Macros,
            FeatureChoice::MacrosWithActivity => FeatureSet::MacrosWithActivity,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let base_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("cannot resolve working directory: {err}");
            return ExitCode::FAILURE;
        }
    };
    let config = match build_config(cli, &base_dir) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("logging disabled: {err}");
    }
    info!(
        "event=cli_start module=cli status=ok data_file={}",
        config.data_file.display()
    );

    let service = TrackerService::new(JsonEntryStore::new(&config.data_file), config.feature_set);
    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
    match menu::run_menu(&service, &mut console) {
        Ok(()) | Err(PromptError::Closed) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Applies flags over defaults; relative paths resolve against `base_dir`.
fn build_config(cli: Cli, base_dir: &Path) -> Result<TrackerConfig, diettrack_core::ConfigError> {
    let mut config = TrackerConfig::with_base_dir(base_dir);
    if let Some(data_file) = cli.data_file {
        config.data_file = base_dir.join(data_file);
    }
    if let Some(log_dir) = cli.log_dir {
        config.log_dir = base_dir.join(log_dir);
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(features) = cli.features {
        config.feature_set = features.into();
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::{build_config, Cli};
    use clap::Parser;
    use diettrack_core::FeatureSet;
    use std::path::Path;

    #[test]
    fn relative_flags_resolve_against_base_dir() {
        let cli = Cli::parse_from([
            "diettrack",
            "--data-file",
            "data/diet.json",
            "--log-level",
            "WARN",
            "--features",
            "macros",
        ]);
        let config = build_config(cli, Path::new("/home/user")).unwrap();

        assert_eq!(config.data_file, Path::new("/home/user/data/diet.json"));
        assert_eq!(config.log_dir, Path::new("/home/user/logs"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.feature_set, FeatureSet::Macros);
    }

    #[test]
    fn absolute_log_dir_is_kept() {
        let cli = Cli::parse_from(["diettrack", "--log-dir", "/var/log/diettrack"]);
        let config = build_config(cli, Path::new("/home/user")).unwrap();
        assert_eq!(config.log_dir, Path::new("/var/log/diettrack"));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let cli = Cli::parse_from(["diettrack", "--log-level", "chatty"]);
        assert!(build_config(cli, Path::new("/home/user")).is_err());
    }
}

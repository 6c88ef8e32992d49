use std::env;
use std::path::PathBuf;
use clap::Parser;
use crate::config::io::ConfigIO;
use crate::config::types::ThemeMode;
use crate::gui::application::run_application;
use crate::error::AppRunError;

pub mod config;
pub mod dashboard;
pub mod device;
pub mod error;
pub mod gui;
pub mod measure;

#[derive(Parser, Debug)]
#[command(version, about = "Pulse oximeter dashboard with a simulated device")]
pub struct Cli {
    /// Seed for the simulated oximeter, makes measurements repeatable
    #[arg(long)]
    pub seed: Option<u64>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Theme to start with, overrides the stored theme for this run
    #[arg(long, value_enum)]
    pub theme: Option<ThemeMode>,
}

pub fn init_logging() {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339(std::time::SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stderr());

    if let Ok(log_file) = env::var("LOG_FILE") {
        match fern::log_file(&log_file) {
            Ok(file) => dispatch = dispatch.chain(file),
            Err(err) => eprintln!("Failed to open LOG_FILE {}: {}", log_file, err),
        }
    }

    if let Err(err) = dispatch.apply() {
        eprintln!("Failed to initialize logger: {}", err);
    }
}

pub fn run(args: env::Args) -> Result<(), AppRunError> {
    let cli = Cli::parse_from(args);

    let config_io = match &cli.config {
        Some(path) => ConfigIO::open_sync(path)?,
        None => ConfigIO::new_sync()?,
    };

    run_application(config_io, cli.seed, cli.theme)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let cli = Cli::parse_from(["oximeter-dashboard", "--seed", "42", "--config", "/tmp/oxi.json", "--theme", "dark"]);

        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/oxi.json")));
        assert_eq!(cli.theme, Some(ThemeMode::Dark));
    }

    #[test]
    fn flags_are_optional() {
        let cli = Cli::parse_from(["oximeter-dashboard"]);

        assert_eq!(cli.seed, None);
        assert_eq!(cli.config, None);
        assert_eq!(cli.theme, None);
    }

    #[test]
    fn unknown_theme_is_rejected() {
        assert!(Cli::try_parse_from(["oximeter-dashboard", "--theme", "sepia"]).is_err());
    }
}

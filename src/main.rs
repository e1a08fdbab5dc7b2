//! Entry point, command line and window configuration

mod app;
mod config;
mod logging;
mod model;
mod quiz;
mod strings;
mod styles;
mod update;
mod view;

use std::path::PathBuf;

use clap::Parser;
use iced::Size;
use tracing::{error, info};

use crate::config::QuizConfig;
use crate::model::{LogLevel, Settings};
use crate::quiz::CatalogSource;

/// Guess the country from its flag.
#[derive(Debug, Parser)]
#[command(name = "flag-quiz", version, about)]
struct Cli {
    /// JSON catalog to use instead of the bundled one
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Number of questions per round
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    questions: Option<u16>,

    /// Delay before moving on after a correct or skipped answer
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Seed for deterministic shuffles
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,

    /// Validate the catalog and exit without opening a window
    #[arg(long)]
    check_catalog: bool,

    /// Write the effective settings to the config file
    #[arg(long)]
    save_config: bool,
}

impl Cli {
    /// Command line values win over the config file.
    fn apply(&self, mut config: QuizConfig) -> QuizConfig {
        if let Some(path) = &self.catalog {
            config.catalog_path = Some(path.clone());
        }
        if let Some(questions) = self.questions {
            config.questions_per_round = usize::from(questions);
        }
        if let Some(delay) = self.delay_ms {
            config.auto_advance_ms = delay;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        config
    }
}

fn catalog_source(config: &QuizConfig) -> CatalogSource {
    match &config.catalog_path {
        Some(path) => CatalogSource::File(path.clone()),
        None => CatalogSource::Bundled,
    }
}

fn main() -> iced::Result {
    let cli = Cli::parse();
    let config = cli.apply(config::load());
    let _log_guard = logging::init(config.log_level);

    if cli.save_config {
        match config::save(&config) {
            Ok(path) => eprintln!("Settings saved to {}", path.display()),
            Err(e) => {
                error!(error = %e, "Failed to save settings");
                std::process::exit(1);
            }
        }
    }

    let source = catalog_source(&config);

    if cli.check_catalog {
        match quiz::load_catalog(&source) {
            Ok(records) => {
                println!("{source}: {} countries", records.len());
                return Ok(());
            }
            Err(e) => {
                eprintln!("{source}: {e}");
                std::process::exit(1);
            }
        }
    }

    let (catalog, load_error) = quiz::load_catalog_or_fallback(&source);
    let settings = Settings::new(&config, cli.seed, catalog.len(), load_error.is_some());
    info!(?settings, "Starting flag quiz");

    iced::application(
        move || app::new(catalog.clone(), settings.clone()),
        app::update,
        app::view,
    )
    .title(app::title)
    .theme(app::theme)
    .window_size(Size::new(520.0, 760.0))
    .run()
}

//! Application state and messages

use std::time::Duration;

use iced::task;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::QuizConfig;
use crate::quiz::{CountryRecord, RoundEngine};
use crate::strings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Outcome shown under the flag after an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect { canonical: String },
    Skipped { canonical: String },
}

/// Which screen the window shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Waiting for an answer. `prompt` is set after a blank submit.
    Question { prompt: Option<&'static str> },
    /// Answer given, waiting for the timer or the "next" button.
    Feedback(Feedback),
    Summary,
    /// The round could not be started.
    Error(String),
}

#[derive(Debug, Clone)]
pub enum Message {
    InputChanged(String),
    Submit,
    Skip,
    Next,
    /// Auto-advance timer fired for the round with this generation.
    AutoAdvance(u64),
    Restart,
}

/// Settings the UI needs at runtime.
#[derive(Debug, Clone)]
pub struct Settings {
    pub questions_per_round: usize,
    pub auto_advance: Duration,
    pub seed: Option<u64>,
    /// Set when the catalog failed to load and the fallback list is in use.
    pub catalog_notice: Option<String>,
}

impl Settings {
    /// Build runtime settings for a catalog of `catalog_len` countries.
    ///
    /// With the fallback catalog the round is shortened to fit so the quiz
    /// stays playable. A user catalog that is too small is left alone and
    /// reported when the round starts.
    pub fn new(config: &QuizConfig, seed: Option<u64>, catalog_len: usize, fallback: bool) -> Self {
        let mut questions_per_round = config.questions_per_round;
        if fallback && questions_per_round > catalog_len {
            warn!(
                requested = questions_per_round,
                available = catalog_len,
                "Shortening round to fit the fallback catalog"
            );
            questions_per_round = catalog_len;
        }
        Self {
            questions_per_round,
            auto_advance: Duration::from_millis(config.auto_advance_ms),
            seed,
            catalog_notice: fallback.then(|| strings::FALLBACK_NOTICE.to_string()),
        }
    }
}

/// Application state.
///
/// Does not derive `Clone` because the pending timer handle is unique.
pub struct App {
    pub catalog: Vec<CountryRecord>,
    pub engine: RoundEngine,
    pub rng: StdRng,
    pub settings: Settings,
    pub screen: Screen,
    pub input: String,
    /// Incremented on every round start; stale timer messages are ignored.
    pub generation: u64,
    pub pending_advance: Option<task::Handle>,
}

impl App {
    pub fn new(catalog: Vec<CountryRecord>, settings: Settings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            catalog,
            engine: RoundEngine::new(),
            rng,
            settings,
            screen: Screen::Question { prompt: None },
            input: String::new(),
            generation: 0,
            pending_advance: None,
        }
    }

    /// Whether the text field and "check" button accept input.
    pub fn accepts_answer(&self) -> bool {
        matches!(self.screen, Screen::Question { .. })
    }
}

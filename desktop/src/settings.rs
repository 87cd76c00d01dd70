use directories::ProjectDirs;
use ms_core::{Configuration, InputPolicy, MaxFactor, Pacing, QuestionCount};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const APP_NAME: &str = "math_smash";
const ORG_NAME: &str = "practice";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Start-up options. Read once, never written back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    pub config: Configuration,
    pub pacing: Pacing,
    pub policy: InputPolicy,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SettingsFile {
    max_factor: Option<MaxFactor>,
    question_count: Option<QuestionCount>,
    feedback_ms: Option<u64>,
    pause_ms: Option<u64>,
    lock_input_during_feedback: Option<bool>,
}

impl SettingsFile {
    fn into_settings(self) -> Settings {
        let defaults = Settings::default();
        Settings {
            config: Configuration::new(
                self.max_factor.unwrap_or(defaults.config.max_factor),
                self.question_count.unwrap_or(defaults.config.question_count),
            ),
            pacing: Pacing::new(
                self.feedback_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.pacing.feedback),
                self.pause_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.pacing.pause),
            ),
            policy: InputPolicy {
                lock_during_feedback: self
                    .lock_input_during_feedback
                    .unwrap_or(defaults.policy.lock_during_feedback),
            },
        }
    }
}

fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from("com", ORG_NAME, APP_NAME).map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
}

pub fn parse(json: &str) -> Result<Settings, SettingsError> {
    let file: SettingsFile = serde_json::from_str(json)?;
    Ok(file.into_settings())
}

/// `Ok(None)` when there is no settings file.
pub fn load() -> Result<Option<Settings>, SettingsError> {
    let path = settings_path().ok_or(SettingsError::NoConfigDir)?;

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(SettingsError::Io { path, source }),
    };

    let settings = parse(&content)?;
    tracing::info!(path = %path.display(), "loaded settings");
    Ok(Some(settings))
}

pub fn load_or_default() -> Settings {
    match load() {
        Ok(Some(settings)) => settings,
        Ok(None) => Settings::default(),
        Err(err) => {
            tracing::warn!(%err, "falling back to default settings");
            Settings::default()
        }
    }
}

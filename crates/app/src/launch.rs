//! Startup configuration: the optional `weatherfx.json` settings file plus
//! console commands given on the command line.

use std::fmt;
use std::path::Path;

use bevy::prelude::*;

use simulation::{InvalidSetting, WorldEffectsSettings};

pub const SETTINGS_FILE: &str = "weatherfx.json";

/// Weather to start with when neither the file nor the command line asks for any.
const DEFAULT_STARTUP_COMMANDS: &[&str] = &["snow init 2000", "snow fog"];

#[derive(Debug)]
pub enum SettingsFileError {
    Read(std::io::Error),
    Parse(serde_json::Error),
    Invalid(InvalidSetting),
}

impl fmt::Display for SettingsFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsFileError::Read(e) => write!(f, "could not read settings: {e}"),
            SettingsFileError::Parse(e) => write!(f, "invalid settings: {e}"),
            SettingsFileError::Invalid(e) => write!(f, "invalid settings: {e}"),
        }
    }
}

impl std::error::Error for SettingsFileError {}

/// Where the settings came from, logged once the log subscriber is up.
#[derive(Resource, Debug)]
pub enum SettingsSource {
    File(String),
    Defaults,
    Fallback { path: String, reason: String },
}

/// `Ok(None)` when the file does not exist. Parsed values are validated
/// before they are accepted.
pub fn read_settings(path: &Path) -> Result<Option<WorldEffectsSettings>, SettingsFileError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(SettingsFileError::Read(e)),
    };
    let settings: WorldEffectsSettings =
        serde_json::from_str(&text).map_err(SettingsFileError::Parse)?;
    settings.validate().map_err(SettingsFileError::Invalid)?;
    Ok(Some(settings))
}

/// Loads the settings file (if any) and appends the command-line lines to
/// its startup commands.
pub fn resolve_settings(
    path: &Path,
    cli_commands: impl IntoIterator<Item = String>,
) -> (WorldEffectsSettings, SettingsSource) {
    let display = path.display().to_string();
    let (mut settings, source) = match read_settings(path) {
        Ok(Some(settings)) => (settings, SettingsSource::File(display)),
        Ok(None) => (WorldEffectsSettings::default(), SettingsSource::Defaults),
        Err(e) => (
            WorldEffectsSettings::default(),
            SettingsSource::Fallback {
                path: display,
                reason: e.to_string(),
            },
        ),
    };

    settings.startup_commands.extend(cli_commands);
    if settings.startup_commands.is_empty() {
        settings.startup_commands = DEFAULT_STARTUP_COMMANDS
            .iter()
            .map(|line| line.to_string())
            .collect();
    }
    (settings, source)
}

pub fn report_settings_source(source: Res<SettingsSource>) {
    match &*source {
        SettingsSource::File(path) => info!("WeatherFX: settings loaded from {path}"),
        SettingsSource::Defaults => info!("WeatherFX: using default settings"),
        SettingsSource::Fallback { path, reason } => {
            warn!("WeatherFX: {path}: {reason}; using default settings")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("weatherfx_{}_{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_uses_default_weather() {
        let path = Path::new("/nonexistent/weatherfx.json");
        let (settings, source) = resolve_settings(path, Vec::new());
        assert!(matches!(source, SettingsSource::Defaults));
        assert_eq!(settings.startup_commands, ["snow init 2000", "snow fog"]);
    }

    #[test]
    fn test_cli_commands_follow_file_commands() {
        let path = temp_file("cli.json", r#"{ "startup_commands": ["rain init 500"], "rng_seed": 9 }"#);
        let (settings, source) = resolve_settings(&path, vec!["rain fog".to_string()]);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(source, SettingsSource::File(_)));
        assert_eq!(settings.rng_seed, 9);
        assert_eq!(settings.startup_commands, ["rain init 500", "rain fog"]);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let path = temp_file("bad.json", "{ not json");
        let (settings, source) = resolve_settings(&path, vec!["snow init 10".to_string()]);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(source, SettingsSource::Fallback { .. }));
        assert_eq!(settings.startup_commands, ["snow init 10"]);
    }

    #[test]
    fn test_zero_width_snow_spread_is_rejected() {
        let path = temp_file(
            "flat.json",
            r#"{ "snow": { "min_spread": [-50, -50, 0], "max_spread": [50, 50, 0] } }"#,
        );
        let read = read_settings(&path);
        let (settings, source) = resolve_settings(&path, Vec::new());
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(read, Err(SettingsFileError::Invalid(ref e)) if e.field == "snow.max_spread"));
        let SettingsSource::Fallback { reason, .. } = source else {
            panic!("expected fallback, got {source:?}");
        };
        assert!(reason.contains("snow.max_spread"), "{reason}");
        assert_eq!(settings.snow, WorldEffectsSettings::default().snow);
    }
}

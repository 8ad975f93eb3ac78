//! Source-tagged settings payloads as loaded from a storage backend.

use serde::{Deserialize, Serialize};

use super::{SETTINGS_VERSION, Settings, SettingsError, validate_settings};

/// A not-yet-materialized settings payload: where the settings came from and
/// how to turn them into a [`Settings`] value. Produced by a repository's
/// `load`, consumed immediately by the resolution flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettingData {
    /// Schema version the payload was written with. Absent on hand-authored
    /// or pre-versioning payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(flatten)]
    pub source: SettingSource,
}

/// The concrete shape the payload is stored in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum SettingSource {
    /// Raw JSON text, edited by the user as a single document.
    Json { json: String },
    /// Structured settings as saved from the form editor.
    Form { form: Settings },
}

/// Failure to turn a payload into a valid [`Settings`].
#[derive(Debug, thiserror::Error)]
pub enum SettingDataError {
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] SettingsError),
}

impl SettingData {
    /// A JSON-sourced payload for the given settings, stamped with the
    /// current schema version.
    pub fn from_settings(settings: &Settings) -> Result<Self, SettingDataError> {
        let json = serde_json::to_string(settings)?;
        Ok(Self {
            version: Some(SETTINGS_VERSION.to_string()),
            source: SettingSource::Json { json },
        })
    }

    /// Parse and validate this payload into a complete [`Settings`].
    /// Fields omitted in a JSON source are filled from defaults.
    pub fn materialize(&self) -> Result<Settings, SettingDataError> {
        let settings = match &self.source {
            SettingSource::Json { json } => serde_json::from_str(json)?,
            SettingSource::Form { form } => form.clone(),
        };
        validate_settings(&settings)?;
        Ok(settings)
    }

    /// The stored version when it differs from [`SETTINGS_VERSION`]. Payloads
    /// without a version are not reported as mismatched.
    pub fn version_mismatch(&self) -> Option<&str> {
        self.version
            .as_deref()
            .filter(|version| *version != SETTINGS_VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_json_source() {
        let mut settings = Settings::with_defaults();
        settings.properties.hintchars = "abcd1234".to_string();

        let data = SettingData::from_settings(&settings).unwrap();
        assert_eq!(data.version.as_deref(), Some(SETTINGS_VERSION));
        assert_eq!(data.version_mismatch(), None);
        assert_eq!(data.materialize().unwrap(), settings);
    }

    #[test]
    fn test_json_source_fills_omitted_fields() {
        let data = SettingData {
            version: None,
            source: SettingSource::Json {
                json: r#"{"properties":{"hintchars":"abcd1234"}}"#.to_string(),
            },
        };
        let settings = data.materialize().unwrap();
        assert_eq!(settings.properties.hintchars, "abcd1234");
        assert_eq!(settings.search, Settings::with_defaults().search);
    }

    #[test]
    fn test_form_source() {
        let mut form = Settings::with_defaults();
        form.properties.smoothscroll = true;
        let data = SettingData {
            version: Some(SETTINGS_VERSION.to_string()),
            source: SettingSource::Form { form: form.clone() },
        };
        assert_eq!(data.materialize().unwrap(), form);
    }

    #[test]
    fn test_malformed_json_fails() {
        let data = SettingData {
            version: None,
            source: SettingSource::Json {
                json: "{not json".to_string(),
            },
        };
        assert!(matches!(
            data.materialize(),
            Err(SettingDataError::Json(_))
        ));
    }

    #[test]
    fn test_schema_violation_fails() {
        let data = SettingData {
            version: None,
            source: SettingSource::Json {
                json: r#"{"properties":{"hintchars":"a"}}"#.to_string(),
            },
        };
        assert!(matches!(
            data.materialize(),
            Err(SettingDataError::Invalid(SettingsError::TooFewHintchars(_)))
        ));
    }

    #[test]
    fn test_version_mismatch() {
        let data = SettingData {
            version: Some("1.0".to_string()),
            source: SettingSource::Json {
                json: "{}".to_string(),
            },
        };
        assert_eq!(data.version_mismatch(), Some("1.0"));
    }

    #[test]
    fn test_envelope_wire_format() {
        let data = SettingData {
            version: Some("2.1".to_string()),
            source: SettingSource::Json {
                json: "{}".to_string(),
            },
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["source"], "json");
        assert_eq!(json["json"], "{}");
        assert_eq!(json["version"], "2.1");

        let parsed: SettingData = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, data);
    }
}

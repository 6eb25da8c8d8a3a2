use serde::{Deserialize, Serialize};

/// Feature flags controlling which optional integrations are active.
///
/// Loaded from `config.toml` at server startup and exposed to clients
/// via a server function. Every field defaults to `false`, so a missing
/// config file stores uploads on the local disk and skips OTLP export.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    /// Store case files in S3 instead of `UPLOAD_DIR`.
    #[serde(default)]
    pub s3: bool,
    /// Export traces and logs over OTLP.
    #[serde(default)]
    pub telemetry: bool,
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags_all_false() {
        let flags = FeatureFlags::default();
        assert!(!flags.s3);
        assert!(!flags.telemetry);
    }

    #[test]
    fn deserialize_empty_toml_defaults_all_false() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.features, FeatureFlags::default());
    }

    #[test]
    fn deserialize_partial_toml_defaults_missing_fields() {
        let config: AppConfig = toml::from_str(
            r#"
            [features]
            s3 = true
            "#,
        )
        .unwrap();
        assert!(config.features.s3);
        assert!(!config.features.telemetry);
    }

    #[test]
    fn unknown_flags_are_ignored() {
        let config: AppConfig = toml::from_str(
            r#"
            [features]
            telemetry = true
            sms_reminders = true
            "#,
        )
        .unwrap();
        assert!(config.features.telemetry);
        assert!(!config.features.s3);
    }

    #[test]
    fn deserialize_json_with_missing_fields_defaults() {
        let flags: FeatureFlags = serde_json::from_str("{}").unwrap();
        assert_eq!(flags, FeatureFlags::default());
    }
}

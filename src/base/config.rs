//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc};

use serde::Deserialize;

use super::{rules::RuleTable, types::Res};

/// Default address to bind.
fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default port to listen on.
fn default_port() -> u16 {
    3000
}

/// Default timeout for the outbound Slack call, in seconds.
fn default_slack_timeout_secs() -> u64 {
    10
}

/// Configuration for the relay.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared, immutable settings.
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<ConfigInner> for Config {
    fn from(inner: ConfigInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

/// Settings as read from the environment and the config file.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// GitHub webhook signing secret (`SECRET`).
    /// When empty, signatures are not checked.
    #[serde(default)]
    pub secret: String,
    /// Slack incoming webhook URL (`SLACK_WEBHOOK_URL`).
    pub slack_webhook_url: String,
    /// Address to bind (`HOST`).
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on (`PORT`).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Timeout for the outbound Slack call (`SLACK_TIMEOUT_SECS`).
    #[serde(default = "default_slack_timeout_secs")]
    pub slack_timeout_secs: u64,
    /// Also require a valid signature on `project_card` deliveries (`VERIFY_PROJECT_CARD_SIGNATURE`).
    ///
    /// Off by default, which leaves project card deliveries unauthenticated.
    #[serde(default)]
    pub verify_project_card_signature: bool,
    /// Subscription rules; only settable from the config file.
    #[serde(default)]
    pub rules: RuleTable,
}

impl Config {
    /// Loads settings from the environment, then `explicit_path` or `.hidden/config.toml`.
    ///
    /// File values override environment values.
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default());

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        result.validate()?;

        Ok(result)
    }

    /// Checks values that `serde` cannot.
    pub fn validate(&self) -> Res<()> {
        if self.slack_webhook_url.is_empty() {
            return Err(anyhow::anyhow!("Slack webhook URL must be set."));
        }

        reqwest::Url::parse(&self.slack_webhook_url).map_err(|e| anyhow::anyhow!("Slack webhook URL is invalid: {e}"))?;

        if self.slack_timeout_secs == 0 {
            return Err(anyhow::anyhow!("Slack timeout must be at least one second."));
        }

        Ok(())
    }

    /// Whether inbound signatures are checked at all.
    pub fn verifies_signatures(&self) -> bool {
        !self.secret.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Serializes tests that read the process environment through `Config::load`.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_VARS: [(&str, &str); 5] = [
        ("SECRET", "s3"),
        ("SLACK_WEBHOOK_URL", "https://hooks.slack.com/services/T/B/ENV"),
        ("SLACK_TIMEOUT_SECS", "3"),
        ("PORT", "8081"),
        ("VERIFY_PROJECT_CARD_SIGNATURE", "true"),
    ];

    fn config(url: &str, timeout: u64) -> Config {
        Config::from(ConfigInner {
            slack_webhook_url: url.to_string(),
            slack_timeout_secs: timeout,
            ..Default::default()
        })
    }

    #[test]
    fn validate_accepts_good_config() {
        assert!(config("https://hooks.slack.com/services/T/B/X", 10).validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_url() {
        assert!(config("", 10).validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_url() {
        assert!(config("not a url", 10).validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        assert!(config("https://hooks.slack.com/services/T/B/X", 0).validate().is_err());
    }

    #[test]
    fn empty_secret_disables_verification() {
        let cfg = config("https://hooks.slack.com/services/T/B/X", 10);
        assert!(!cfg.verifies_signatures());

        let cfg = Config::from(ConfigInner {
            secret: "s3cr3t".to_string(),
            ..(*cfg.inner).clone()
        });
        assert!(cfg.verifies_signatures());
    }

    #[test]
    fn loads_from_environment() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        // SAFETY: every test touching these variables holds `ENV_LOCK`.
        unsafe {
            for (key, value) in ENV_VARS {
                std::env::set_var(key, value);
            }
        }

        let cfg = Config::load(None);

        // SAFETY: as above.
        unsafe {
            for (key, _) in ENV_VARS {
                std::env::remove_var(key);
            }
        }

        let cfg = cfg.unwrap();

        assert_eq!(cfg.secret, "s3");
        assert_eq!(cfg.slack_webhook_url, "https://hooks.slack.com/services/T/B/ENV");
        assert_eq!(cfg.slack_timeout_secs, 3);
        assert_eq!(cfg.port, 8081);
        assert!(cfg.verify_project_card_signature);
        assert!(cfg.verifies_signatures());
        assert_eq!(cfg.rules, RuleTable::default());
    }

    #[test]
    fn loads_rules_from_toml_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        let path = std::env::temp_dir().join(format!("notify-relay-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            r##"
slack_webhook_url = "https://hooks.slack.com/services/T/B/X"
port = 8080

[[rules.mentions]]
mention = "@octocat"
channel = "#octo"

[[rules.project_columns]]
project_id = 7
column_id = 42
column_name = "Done"
channel = "#done"
"##,
        )
        .unwrap();

        let cfg = Config::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.slack_timeout_secs, 10);
        assert_eq!(cfg.rules.mentions[0].mention, "@octocat");
        assert_eq!(cfg.rules.project_columns[0].column_id, 42);
    }
}

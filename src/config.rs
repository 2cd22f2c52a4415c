use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::env_vars;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Submission endpoint listener
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    7010
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

/// Where the terminal wizard sends applications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_client_endpoint")]
    pub endpoint: String,
    /// Request timeout for a submission
    #[serde(default = "default_client_timeout")]
    pub timeout_secs: u64,
}

fn default_client_endpoint() -> String {
    format!(
        "http://{}:{}/api/submit-application",
        default_server_host(),
        default_server_port()
    )
}

fn default_client_timeout() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_client_endpoint(),
            timeout_secs: default_client_timeout(),
        }
    }
}

/// SMTP relay used by the mail dispatcher.
///
/// Required values are optional here so the server can start without them;
/// the dispatcher reports what is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// Implicit TLS; STARTTLS when false
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Sender address, e.g. "Heubert <noreply@heubert.com>"
    #[serde(default)]
    pub from: Option<String>,
    /// Inbox receiving the full application details
    #[serde(default)]
    pub admin_email: Option<String>,
}

fn default_smtp_port() -> u16 {
    587
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: default_smtp_port(),
            secure: false,
            username: None,
            password: None,
            from: None,
            admin_email: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for runtime state such as log files
    #[serde(default = "default_state_path")]
    pub state: String,
}

fn default_state_path() -> String {
    ".jobready".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state: default_state_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

impl Config {
    /// Project-local config file
    pub fn project_config_path() -> PathBuf {
        PathBuf::from("jobready.toml")
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        Self::load_with_env(config_path, |name| std::env::var(name).ok())
    }

    /// Load configuration, reading the unprefixed SMTP variables through
    /// `lookup`.
    pub fn load_with_env(
        config_path: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        // Start with embedded defaults so the wizard works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        let project_config = Self::project_config_path();
        if project_config.exists() {
            builder = builder.add_source(config::File::from(project_config));
        }

        // User config in ~/.config/jobready/ (optional global overrides)
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("jobready").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with JOBREADY_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("JOBREADY")
                .separator("__")
                .try_parsing(true),
        );

        // SMTP_HOST, SMTP_USER, ... as used by existing deployments
        for (key, value) in env_vars::legacy_overrides(lookup) {
            builder = builder
                .set_override(key, value)
                .with_context(|| format!("Failed to apply override for {key}"))?;
        }

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Copy safe to print, with the SMTP password masked
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.smtp.password.is_some() {
            copy.smtp.password = Some("********".to_string());
        }
        copy
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }

    /// Get absolute path to state directory
    pub fn state_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.state);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    /// Get absolute path to logs directory
    pub fn logs_path(&self) -> PathBuf {
        self.state_path().join("logs")
    }

    /// Listen address for the submission endpoint
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 7010);
        assert_eq!(config.smtp.port, 587);
        assert!(!config.smtp.secure);
        assert_eq!(config.client.timeout_secs, 30);
        assert_eq!(
            config.client.endpoint,
            "http://127.0.0.1:7010/api/submit-application"
        );
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8080

[smtp]
host = "smtp.example.com"
secure = true
port = 465
admin_email = "admin@example.com"
"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let config = Config::load_with_env(Some(path), no_env).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.smtp.host.as_deref(), Some("smtp.example.com"));
        assert_eq!(config.smtp.port, 465);
        assert!(config.smtp.secure);
        assert_eq!(config.smtp.admin_email.as_deref(), Some("admin@example.com"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_legacy_variables_override_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[smtp]\nhost = \"from-file.example.com\"").unwrap();

        let env: HashMap<&str, &str> = HashMap::from([
            ("SMTP_HOST", "smtp.heubert.com"),
            ("SMTP_PORT", "2525"),
            ("SMTP_SECURE", "true"),
            ("SMTP_USER", "mailer"),
            ("SMTP_PASS", "hunter2"),
            ("ADMIN_EMAIL", "admin@heubert.com"),
        ]);
        let lookup = |name: &str| env.get(name).map(|v| (*v).to_string());

        let path = file.path().to_str().unwrap();
        let config = Config::load_with_env(Some(path), lookup).unwrap();

        assert_eq!(config.smtp.host.as_deref(), Some("smtp.heubert.com"));
        assert_eq!(config.smtp.port, 2525);
        assert!(config.smtp.secure);
        assert_eq!(config.smtp.username.as_deref(), Some("mailer"));
        assert_eq!(config.smtp.password.as_deref(), Some("hunter2"));
        assert_eq!(config.smtp.admin_email.as_deref(), Some("admin@heubert.com"));
        assert_eq!(config.smtp.from, None);
    }

    #[test]
    fn test_redacted_hides_password() {
        let mut config = Config::default();
        config.smtp.password = Some("hunter2".to_string());

        let printed = config.redacted().to_toml().unwrap();
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("********"));
        assert_eq!(config.smtp.password.as_deref(), Some("hunter2"));
    }

    #[test]
    fn test_logs_path_is_under_state() {
        let mut config = Config::default();
        config.paths.state = "/var/lib/jobready".to_string();
        assert_eq!(config.logs_path(), PathBuf::from("/var/lib/jobready/logs"));
    }
}

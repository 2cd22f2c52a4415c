//! Centralized environment variable registry.
//!
//! Every setting can be supplied with the `JOBREADY_` prefix and `__`
//! separator for nested config paths (e.g., `JOBREADY_SMTP__HOST`). The
//! unprefixed SMTP variables of existing deployments (`SMTP_HOST`, ...) are
//! honored too and take precedence.

/// An environment variable definition
#[derive(Debug, Clone)]
pub struct EnvVar {
    /// Environment variable name (e.g., "JOBREADY_SMTP__HOST")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Category for grouping in `jobready env`
    pub category: EnvVarCategory,
    /// Whether this variable is required for operation
    pub required: bool,
    /// Default value if not set
    pub default: Option<&'static str>,
    /// Example value for documentation
    pub example: Option<&'static str>,
}

/// Categories for organizing environment variables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvVarCategory {
    /// Outbound mail relay
    Smtp,
    /// Unprefixed SMTP variables
    Legacy,
    /// Submission endpoint listener
    Server,
    /// Terminal wizard submission target
    Client,
    /// File path configuration
    Paths,
    /// Logging configuration
    Logging,
}

impl EnvVarCategory {
    /// Display name for this category
    pub fn display_name(&self) -> &'static str {
        match self {
            EnvVarCategory::Smtp => "SMTP",
            EnvVarCategory::Legacy => "SMTP (unprefixed)",
            EnvVarCategory::Server => "Server",
            EnvVarCategory::Client => "Client",
            EnvVarCategory::Paths => "Paths",
            EnvVarCategory::Logging => "Logging",
        }
    }

    /// All categories in display order
    pub fn all() -> &'static [EnvVarCategory] {
        &[
            EnvVarCategory::Smtp,
            EnvVarCategory::Legacy,
            EnvVarCategory::Server,
            EnvVarCategory::Client,
            EnvVarCategory::Paths,
            EnvVarCategory::Logging,
        ]
    }
}

/// Static registry of all documented environment variables
pub static ENV_VARS: &[EnvVar] = &[
    // === SMTP ===
    EnvVar {
        name: "JOBREADY_SMTP__HOST",
        description: "SMTP relay host name",
        category: EnvVarCategory::Smtp,
        required: true,
        default: None,
        example: Some("smtp.office365.com"),
    },
    EnvVar {
        name: "JOBREADY_SMTP__PORT",
        description: "SMTP relay port",
        category: EnvVarCategory::Smtp,
        required: false,
        default: Some("587"),
        example: Some("465"),
    },
    EnvVar {
        name: "JOBREADY_SMTP__SECURE",
        description: "Use implicit TLS instead of STARTTLS",
        category: EnvVarCategory::Smtp,
        required: false,
        default: Some("false"),
        example: Some("true"),
    },
    EnvVar {
        name: "JOBREADY_SMTP__USERNAME",
        description: "SMTP login user",
        category: EnvVarCategory::Smtp,
        required: true,
        default: None,
        example: Some("applications@heubert.com"),
    },
    EnvVar {
        name: "JOBREADY_SMTP__PASSWORD",
        description: "SMTP login password",
        category: EnvVarCategory::Smtp,
        required: true,
        default: None,
        example: None,
    },
    EnvVar {
        name: "JOBREADY_SMTP__FROM",
        description: "Sender address for both notification emails",
        category: EnvVarCategory::Smtp,
        required: true,
        default: None,
        example: Some("Heubert <noreply@heubert.com>"),
    },
    EnvVar {
        name: "JOBREADY_SMTP__ADMIN_EMAIL",
        description: "Inbox that receives the full application details",
        category: EnvVarCategory::Smtp,
        required: true,
        default: None,
        example: Some("admissions@heubert.com"),
    },
    // === Legacy ===
    EnvVar {
        name: "SMTP_HOST",
        description: "Same as JOBREADY_SMTP__HOST",
        category: EnvVarCategory::Legacy,
        required: false,
        default: None,
        example: Some("smtp.office365.com"),
    },
    EnvVar {
        name: "SMTP_PORT",
        description: "Same as JOBREADY_SMTP__PORT",
        category: EnvVarCategory::Legacy,
        required: false,
        default: None,
        example: Some("587"),
    },
    EnvVar {
        name: "SMTP_SECURE",
        description: "Implicit TLS only when exactly \"true\"",
        category: EnvVarCategory::Legacy,
        required: false,
        default: None,
        example: Some("true"),
    },
    EnvVar {
        name: "SMTP_USER",
        description: "Same as JOBREADY_SMTP__USERNAME",
        category: EnvVarCategory::Legacy,
        required: false,
        default: None,
        example: None,
    },
    EnvVar {
        name: "SMTP_PASS",
        description: "Same as JOBREADY_SMTP__PASSWORD",
        category: EnvVarCategory::Legacy,
        required: false,
        default: None,
        example: None,
    },
    EnvVar {
        name: "SMTP_FROM",
        description: "Same as JOBREADY_SMTP__FROM",
        category: EnvVarCategory::Legacy,
        required: false,
        default: None,
        example: None,
    },
    EnvVar {
        name: "ADMIN_EMAIL",
        description: "Same as JOBREADY_SMTP__ADMIN_EMAIL",
        category: EnvVarCategory::Legacy,
        required: false,
        default: None,
        example: None,
    },
    // === Server ===
    EnvVar {
        name: "JOBREADY_SERVER__HOST",
        description: "Address the submission endpoint binds to",
        category: EnvVarCategory::Server,
        required: false,
        default: Some("127.0.0.1"),
        example: Some("0.0.0.0"),
    },
    EnvVar {
        name: "JOBREADY_SERVER__PORT",
        description: "Port the submission endpoint listens on",
        category: EnvVarCategory::Server,
        required: false,
        default: Some("7010"),
        example: Some("8080"),
    },
    // === Client ===
    EnvVar {
        name: "JOBREADY_CLIENT__ENDPOINT",
        description: "URL the terminal wizard posts applications to",
        category: EnvVarCategory::Client,
        required: false,
        default: Some("http://127.0.0.1:7010/api/submit-application"),
        example: Some("https://apply.heubert.com/api/submit-application"),
    },
    EnvVar {
        name: "JOBREADY_CLIENT__TIMEOUT_SECS",
        description: "Submission request timeout in seconds",
        category: EnvVarCategory::Client,
        required: false,
        default: Some("30"),
        example: Some("10"),
    },
    // === Paths ===
    EnvVar {
        name: "JOBREADY_PATHS__STATE",
        description: "Directory for runtime state such as logs",
        category: EnvVarCategory::Paths,
        required: false,
        default: Some(".jobready"),
        example: Some("/var/lib/jobready"),
    },
    // === Logging ===
    EnvVar {
        name: "JOBREADY_LOGGING__LEVEL",
        description: "Log level filter (trace, debug, info, warn, error)",
        category: EnvVarCategory::Logging,
        required: false,
        default: Some("info"),
        example: Some("debug"),
    },
    EnvVar {
        name: "JOBREADY_LOGGING__TO_FILE",
        description: "Write logs to a file while the terminal wizard runs",
        category: EnvVarCategory::Logging,
        required: false,
        default: Some("true"),
        example: Some("false"),
    },
];

/// Unprefixed variable name and the config key it overrides
const LEGACY_KEYS: &[(&str, &str)] = &[
    ("SMTP_HOST", "smtp.host"),
    ("SMTP_PORT", "smtp.port"),
    ("SMTP_SECURE", "smtp.secure"),
    ("SMTP_USER", "smtp.username"),
    ("SMTP_PASS", "smtp.password"),
    ("SMTP_FROM", "smtp.from"),
    ("ADMIN_EMAIL", "smtp.admin_email"),
];

/// Config overrides from the unprefixed SMTP variables that are set.
///
/// `SMTP_SECURE` enables TLS only for the exact value `true`.
pub fn legacy_overrides(
    lookup: impl Fn(&str) -> Option<String>,
) -> Vec<(&'static str, String)> {
    LEGACY_KEYS
        .iter()
        .filter_map(|(name, key)| {
            let value = lookup(name)?;
            let value = if *name == "SMTP_SECURE" {
                (value == "true").to_string()
            } else {
                value
            };
            Some((*key, value))
        })
        .collect()
}

/// Get all environment variables for a given category
pub fn env_vars_for_category(category: EnvVarCategory) -> impl Iterator<Item = &'static EnvVar> {
    ENV_VARS.iter().filter(move |v| v.category == category)
}

/// Get environment variables grouped by category
pub fn env_vars_by_category() -> Vec<(EnvVarCategory, Vec<&'static EnvVar>)> {
    EnvVarCategory::all()
        .iter()
        .map(|cat| {
            let vars: Vec<&EnvVar> = env_vars_for_category(*cat).collect();
            (*cat, vars)
        })
        .filter(|(_, vars)| !vars.is_empty())
        .collect()
}

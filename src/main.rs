use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use jobready::app::App;
use jobready::application::intake::{format_intake, intake_candidates, intake_value};
use jobready::application::options::{Course, OptionSet};
use jobready::config::Config;
use jobready::env_vars;
use jobready::logging;
use jobready::mailer::transport::RecordingTransport;
use jobready::mailer::MailDispatcher;
use jobready::rest::{self, ApiDoc, ApiState};
use jobready::ui::install_panic_hook;

#[derive(Parser)]
#[command(name = "jobready")]
#[command(about = "Application wizard and submission service for Heubert's Job Ready Program")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the submission endpoint that sends the notification emails
    Serve {
        /// Port to listen on (default: server.port, 7010)
        #[arg(short, long)]
        port: Option<u16>,

        /// Log emails instead of sending them
        #[arg(long)]
        dry_run: bool,
    },

    /// List upcoming intake dates
    Intakes {
        /// Course code (helpdesk-l1, support-l2, cyber-security)
        #[arg(short, long)]
        course: Option<String>,

        /// Count from this date instead of today (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
    },

    /// Print the OpenAPI document for the submission endpoint
    Openapi {
        /// Emit YAML instead of JSON
        #[arg(long)]
        yaml: bool,
    },

    /// List supported environment variables
    Env,

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    // No subcommand runs the wizard, which owns the terminal
    let is_tui_mode = cli.command.is_none();

    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Serve { port, dry_run }) => {
            cmd_serve(config, port, dry_run).await?;
        }
        Some(Commands::Intakes { course, from }) => {
            cmd_intakes(course.as_deref(), from)?;
        }
        Some(Commands::Openapi { yaml }) => {
            cmd_openapi(yaml)?;
        }
        Some(Commands::Env) => cmd_env(),
        Some(Commands::Config) => {
            print!("{}", config.redacted().to_toml()?);
        }
        None => {
            run_tui(&config, logging_handle.log_file_path).await?;
        }
    }

    Ok(())
}

async fn run_tui(config: &Config, log_file_path: Option<PathBuf>) -> Result<()> {
    install_panic_hook();

    let mut app = App::new(config)?;
    let result = app.run().await;

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if log_path.metadata().is_ok_and(|m| m.len() > 0) {
            eprintln!("Session log: {}", log_path.display());
        }
    }

    result
}

async fn cmd_serve(mut config: Config, port: Option<u16>, dry_run: bool) -> Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }

    let dispatcher = if dry_run {
        MailDispatcher::with_transport(&config.smtp, Arc::new(RecordingTransport::new()))?
    } else {
        MailDispatcher::from_config(&config.smtp)?
    };

    if let Some(err) = dispatcher.configuration_error() {
        tracing::warn!(error = %err, "Email settings incomplete, submissions will fail");
    }

    let addr = config.bind_address();
    println!("Starting submission endpoint...");
    println!("  Address: http://{addr}");
    if dry_run {
        println!("  Dry run: emails are logged, not sent");
    }
    println!("  Endpoints:");
    println!("    POST /api/submit-application  Submit an application");
    println!("    GET  /api/v1/health           Health check");
    println!("    GET  /success.html            Confirmation page");
    println!();

    let state = ApiState::new(dispatcher);
    rest::serve(state, &addr).await
}

fn cmd_intakes(course: Option<&str>, from: Option<NaiveDate>) -> Result<()> {
    if let Some(code) = course {
        if Course::from_code(code).is_none() {
            let known: Vec<_> = Course::all().iter().map(Course::code).collect();
            anyhow::bail!("Unknown course '{}' (expected one of: {})", code, known.join(", "));
        }
    }

    let today = from.unwrap_or_else(|| Local::now().date_naive());
    let label = course
        .map_or_else(|| "any course".to_string(), Course::display_label);
    println!("Upcoming intakes for {label}:");
    for date in intake_candidates(today, course) {
        println!("  {}  {}", intake_value(date), format_intake(date));
    }
    Ok(())
}

fn cmd_openapi(yaml: bool) -> Result<()> {
    let document = if yaml {
        ApiDoc::yaml().context("Failed to render OpenAPI YAML")?
    } else {
        ApiDoc::json().context("Failed to render OpenAPI JSON")?
    };
    println!("{document}");
    Ok(())
}

fn cmd_env() {
    for (category, vars) in env_vars::env_vars_by_category() {
        println!("{}", category.display_name());
        println!("{}", "─".repeat(60));
        for var in vars {
            let required = if var.required { " (required)" } else { "" };
            println!("  {}{}", var.name, required);
            println!("      {}", var.description);
            if let Some(default) = var.default {
                println!("      default: {default}");
            }
            if let Some(example) = var.example {
                println!("      example: {example}");
            }
        }
        println!();
    }
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use wpguard::{
    config::Config,
    model::TargetDescriptor,
    output::{format_result_to_string, print_result, OutputFormat},
    session::ScanSession,
};

/// Exit codes for CI integration
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
    pub const LOW_SCORE: u8 = 2;
}

#[derive(Parser)]
#[command(name = "wpguard")]
#[command(
    author,
    version,
    about = "Run a security scan against a WordPress site and score the result"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan one site and print the security report
    Scan {
        /// Site origin, e.g. https://example.com
        url: String,

        /// Remote-management API key (enables the vulnerability probe)
        #[arg(short, long)]
        api_key: Option<String>,

        /// Website record id attached to the report
        #[arg(long, default_value_t = 0)]
        website_id: u64,

        /// User record id attached to the report
        #[arg(long, default_value_t = 0)]
        user_id: u64,

        /// Output format (table, json)
        #[arg(short, long)]
        format: Option<String>,

        /// Write output to file
        #[arg(short, long)]
        output: Option<String>,

        /// Exit with an error when the overall score is below this value
        #[arg(long)]
        fail_under: Option<u8>,
    },

    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

async fn run() -> Result<u8> {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_default();

    match cli.command {
        Commands::Scan {
            url,
            api_key,
            website_id,
            user_id,
            format,
            output,
            fail_under,
        } => {
            let format = format
                .as_deref()
                .unwrap_or(&config.default_format)
                .parse::<OutputFormat>()
                .map_err(anyhow::Error::msg)?;

            let mut target = TargetDescriptor::new(url, website_id, user_id);
            if let Some(key) = api_key.or_else(|| config.api_key.clone()) {
                target = target.with_api_key(key);
            }

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::default_spinner());
            spinner.set_message(format!("Scanning {}...", target.url));
            spinner.enable_steady_tick(Duration::from_millis(100));

            let session = ScanSession::new(&config.user_agent)?;
            let report = session.run(&target).await;

            spinner.finish_and_clear();

            match output {
                Some(path) => {
                    let content = format_result_to_string(&report, format)?;
                    std::fs::write(&path, content)?;
                    println!("Report written to {}", path);
                }
                None => print_result(&report, format)?,
            }

            if let Some(threshold) = fail_under {
                if report.overall_score < threshold {
                    eprintln!(
                        "Score {} is below threshold {}",
                        report.overall_score, threshold
                    );
                    return Ok(exit_codes::LOW_SCORE);
                }
            }

            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { init, path } => {
            if path {
                println!("{}", Config::config_path().display());
            } else if init {
                let config = Config::default();
                config.save()?;
                println!("Config written to {}", Config::config_path().display());
            } else {
                println!("{}", Config::generate_default_config());
            }
            Ok(exit_codes::SUCCESS)
        }
    }
}

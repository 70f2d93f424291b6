//! CLI definition, config resolution, and tracing setup.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use filingdigest_core::pipeline::{DigestConfig, DigestResult, ProgressReporter};
use filingdigest_shared::{AppConfig, load_config, load_config_from};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// filingdigest: flatten filing XML documents into a CSV summary.
#[derive(Parser)]
#[command(
    name = "filingdigest",
    version,
    about = "Fetch the XML filing documents listed in a CSV table and write a flattened summary table.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Source table with a "Source File" column of document URLs.
    pub input: Option<PathBuf>,

    /// Output table to write.
    pub output: Option<PathBuf>,

    /// Config file to use instead of ~/.filingdigest/filingdigest.toml.
    #[arg(long, env = "FILINGDIGEST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Column holding document URLs.
    #[arg(long)]
    pub source_column: Option<String>,

    /// User-Agent header sent with every request.
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the resolved configuration and exit.
    #[arg(long)]
    pub show_config: bool,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
///
/// Logs go to stderr; stdout carries only the completion summary.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "filingdigest=info",
        1 => "filingdigest=debug",
        _ => "filingdigest=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Config resolution
// ---------------------------------------------------------------------------

/// Merge the config file with CLI overrides. CLI values win.
fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    if let Some(input) = &cli.input {
        config.defaults.input_path = input.to_string_lossy().into_owned();
    }
    if let Some(output) = &cli.output {
        config.defaults.output_path = output.to_string_lossy().into_owned();
    }
    if let Some(column) = &cli.source_column {
        config.table.source_column = column.clone();
    }
    if let Some(user_agent) = &cli.user_agent {
        config.http.user_agent = user_agent.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.http.timeout_secs = timeout;
    }

    Ok(config)
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;

    if cli.show_config {
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let digest_config = DigestConfig::try_from(&config)?;

    info!(
        input = %digest_config.input_path.display(),
        output = %digest_config.output_path.display(),
        column = %digest_config.source_column,
        "digesting filing documents"
    );

    let reporter = CliProgress::new();
    let result = filingdigest_core::run_digest(&digest_config, &reporter).await?;

    println!(
        "Wrote {} rows to {}",
        result.records_written,
        result.output_path.display()
    );

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner on stderr.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn document_started(&self, url: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Fetching [{current}/{total}] {url}"));
    }

    fn done(&self, _result: &DigestResult) {
        self.spinner.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_paths_are_optional() {
        let cli = Cli::try_parse_from(["filingdigest"]).unwrap();
        assert!(cli.input.is_none());
        assert!(cli.output.is_none());

        let cli = Cli::try_parse_from(["filingdigest", "in.csv", "out.csv"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("in.csv")));
        assert_eq!(cli.output, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn cli_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("filingdigest.toml");
        std::fs::write(
            &config_path,
            "[defaults]\ninput_path = \"from-file.csv\"\noutput_path = \"file-out.csv\"\n\n[http]\ntimeout_secs = 5\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "filingdigest",
            "cli-in.csv",
            "--config",
            config_path.to_str().unwrap(),
            "--timeout",
            "7",
        ])
        .unwrap();
        let config = resolve_config(&cli).unwrap();

        assert_eq!(config.defaults.input_path, "cli-in.csv");
        assert_eq!(config.defaults.output_path, "file-out.csv");
        assert_eq!(config.http.timeout_secs, 7);
        assert_eq!(config.table.source_column, "Source File");
    }
}

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use phishscope::cli;
use phishscope::acquisition::page_fetcher::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use phishscope::config::{fetch_timeout_from_secs, Config};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "phishscope", version, about = "Classify URLs as phishing or legitimate")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    settings: Settings,

    /// Machine-readable JSON output on stdout.
    #[arg(long, global = true)]
    json: bool,

    /// Suppress headers and hints.
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Debug logging and extra detail.
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Args)]
struct Settings {
    /// Feature-name manifest (JSON array, model column order).
    #[arg(long, global = true, env = "PHISHSCOPE_SCHEMA")]
    schema: Option<PathBuf>,

    /// Model artifact (JSON logistic model).
    #[arg(long, global = true, env = "PHISHSCOPE_MODEL")]
    model: Option<PathBuf>,

    /// Page fetch timeout in seconds.
    #[arg(long, global = true, env = "PHISHSCOPE_TIMEOUT", default_value_t = DEFAULT_TIMEOUT.as_secs_f64())]
    timeout: f64,

    /// User-Agent header for the page fetch.
    #[arg(long, global = true, env = "PHISHSCOPE_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Skip the page fetch; HTML signals stay 0.
    #[arg(long, global = true)]
    no_fetch: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a URL
    Classify {
        url: String,
        /// Also print the extracted feature table.
        #[arg(long)]
        debug: bool,
    },
    /// Print the feature vector for a URL without classifying it
    Features { url: String },
    /// Check that the manifest and model load and line up
    Check,
}

impl Settings {
    fn into_config(self) -> Result<Config> {
        let fetch_timeout = fetch_timeout_from_secs(self.timeout)?;
        let defaults = Config::default();
        Ok(Config {
            schema_path: self.schema.unwrap_or(defaults.schema_path),
            model_path: self.model.unwrap_or(defaults.model_path),
            fetch_timeout,
            user_agent: self.user_agent,
            fetch: !self.no_fetch,
        })
    }
}

fn init_tracing(verbose: bool, json: bool) {
    let default = if verbose { "phishscope=debug" } else { "phishscope=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.json {
        std::env::set_var("PHISHSCOPE_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("PHISHSCOPE_QUIET", "1");
    }
    if cli.verbose {
        std::env::set_var("PHISHSCOPE_VERBOSE", "1");
    }
    if cli.no_color {
        std::env::set_var("PHISHSCOPE_NO_COLOR", "1");
    }

    init_tracing(cli.verbose, cli.json);

    if let Err(e) = run(cli.command, cli.settings).await {
        eprintln!("  Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(command: Commands, settings: Settings) -> Result<()> {
    let config = settings.into_config()?;
    match command {
        Commands::Classify { url, debug } => cli::classify_cmd::run(&config, &url, debug).await,
        Commands::Features { url } => cli::features_cmd::run(&config, &url).await,
        Commands::Check => cli::check_cmd::run(&config),
    }
}

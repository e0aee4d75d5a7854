use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use nawy_scout::{logging, ChromeLauncher, Extractor, ListingKind, ListingScraper, ScoutConfig, ToolRegistry};
use nawy_scout::writer::BatchWriter;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "nawy-scout", version, about = "Scrape Nawy compound and property listings to JSON")]
struct Cli {
    /// TOML configuration file; built-in defaults otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory for the JSON output files
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available tools as JSON
    Tools,

    /// Call tools one after another, printing one JSON result per line
    Run {
        /// Tool names, in call order
        #[arg(required_unless_present = "all")]
        tools: Vec<String>,

        /// Run every configured tool in order
        #[arg(long, conflicts_with = "tools")]
        all: bool,
    },

    /// Re-extract records from a saved page without a browser
    Extract {
        /// Saved page HTML
        #[arg(long)]
        html: PathBuf,

        #[arg(long, value_parser = parse_kind)]
        kind: ListingKind,

        /// Output file name, written under the output directory
        #[arg(long)]
        output: String,

        /// Leading cards to drop
        #[arg(long, default_value_t = 0)]
        skip: usize,
    },
}

fn parse_kind(value: &str) -> Result<ListingKind, String> {
    match value {
        "compound" => Ok(ListingKind::Compound),
        "property" => Ok(ListingKind::Property),
        other => Err(format!("unknown kind `{}` (expected compound or property)", other)),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<ScoutConfig> {
    let mut config = match &cli.config {
        Some(path) => ScoutConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ScoutConfig::default(),
    };
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = load_config(&cli)?;

    match &cli.command {
        Command::Tools => {
            let launcher = ChromeLauncher::new(config.loader.max_total_wait());
            let registry = ToolRegistry::for_targets(ListingScraper::new(launcher, config)?);
            println!("{}", serde_json::to_string_pretty(&registry.definitions())?);
        }
        Command::Run { tools, all } => {
            let names: Vec<String> = if *all {
                config.targets.iter().map(|t| t.tool_name.clone()).collect()
            } else {
                tools.clone()
            };

            let launcher = ChromeLauncher::new(config.loader.max_total_wait());
            let registry = ToolRegistry::for_targets(ListingScraper::new(launcher, config)?);

            info!("🏠 Running {} tool(s)", names.len());
            let invocations = registry.run_sequence(names.as_slice()).await;
            for invocation in &invocations {
                println!("{}", serde_json::to_string(invocation)?);
            }

            let failed = invocations.iter().filter(|i| !i.response.is_success()).count();
            if failed > 0 {
                bail!("{} of {} tool call(s) failed", failed, invocations.len());
            }
        }
        Command::Extract { html, kind, output, skip } => {
            let page = tokio::fs::read_to_string(html)
                .await
                .with_context(|| format!("Failed to read {}", html.display()))?;

            let extractor = Extractor::new(&config.selectors, config.base_url()?)?;
            let records = extractor.extract(&page, *kind, *skip)?;
            let summary = BatchWriter::new(&config.output_dir).write(*kind, output, &records)?;

            println!("{}", serde_json::to_string(&summary)?);
        }
    }

    Ok(())
}

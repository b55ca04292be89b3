// Page copy CLI
//
// Reads a page snapshot from a file, stdin or a URL and runs one action
// against it: print Markdown/text/HTML to stdout or write files to the
// output directory.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use url::Url;

use kodegen_tools_pagecopy::utils::USER_AGENT;
use kodegen_tools_pagecopy::{Action, ActionInput, ActionOutcome, ActionRunner, ExtractionConfig};

#[derive(Parser, Debug)]
#[command(name = "kodegen-pagecopy", version, about = "Copy a web page as clean Markdown")]
struct Cli {
    /// HTML snapshot to read; `-` or absent reads stdin unless --url fetches
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Page location, used to resolve links and fetched when no input is given
    #[arg(short, long, global = true)]
    url: Option<Url>,

    /// JSON extraction config
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory for downloaded files
    #[arg(short, long, global = true, default_value = ".")]
    out_dir: PathBuf,

    /// CSS selector for the selection action
    #[arg(short, long, global = true)]
    selector: Option<String>,

    /// Never touch the network (notebook cells are not fetched)
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Full Markdown document (default)
    Markdown,
    /// Plain text of the page body
    Text,
    /// Clean HTML of the main content
    Html,
    /// Markdown of the element matching --selector
    Selection,
    /// Expand collapsed sections, then the full Markdown document
    Expand,
    /// Save the Markdown document to the output directory
    DownloadMd,
    /// Save the page's Jupyter notebook
    DownloadIpynb,
    /// Save every file next to the page's Jupyter notebook
    DownloadNbAll,
}

impl From<Command> for Action {
    fn from(command: Command) -> Self {
        match command {
            Command::Markdown => Action::Markdown,
            Command::Text => Action::Text,
            Command::Html => Action::Html,
            Command::Selection => Action::Selection,
            Command::Expand => Action::ExpandAndCopy,
            Command::DownloadMd => Action::DownloadMarkdown,
            Command::DownloadIpynb => Action::DownloadNotebook,
            Command::DownloadNbAll => Action::DownloadNotebookFiles,
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<ExtractionConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            Ok(ExtractionConfig::from_json(&json)?)
        }
        None => Ok(ExtractionConfig::standard()?),
    }
}

async fn load_html(cli: &Cli, config: &ExtractionConfig) -> Result<String> {
    match (&cli.input, &cli.url) {
        (Some(path), _) if path.as_os_str() != "-" => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display())),
        (None, Some(url)) if !cli.offline => {
            tracing::info!("Fetching {url}");
            let client = reqwest::Client::builder()
                .timeout(config.request_timeout())
                .user_agent(USER_AGENT)
                .build()?;
            let response = client.get(url.as_str()).send().await?.error_for_status()?;
            Ok(response.text().await?)
        }
        (None, Some(_)) => bail!("--offline needs --input or stdin"),
        _ => {
            let mut html = String::new();
            std::io::stdin()
                .read_to_string(&mut html)
                .context("Failed to read stdin")?;
            Ok(html)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    let html = load_html(&cli, &config).await?;

    let runner = if cli.offline {
        ActionRunner::offline(config, &cli.out_dir)
    } else {
        ActionRunner::new(config, &cli.out_dir)?
    };

    let action = cli.command.map_or(Action::Markdown, Action::from);
    let input = ActionInput::new(&html, cli.url.as_ref()).with_selector(cli.selector.as_deref());

    match runner.run(action, input).await {
        Ok(ActionOutcome::Text(text)) => print!("{text}"),
        Ok(ActionOutcome::Files(paths)) => {
            for path in paths {
                println!("{}", path.display());
            }
        }
        Err(e) => bail!("✗ {} ({})", e, e.indicator()),
    }
    Ok(())
}

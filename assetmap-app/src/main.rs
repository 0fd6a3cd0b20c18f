use anyhow::Context;
use assetmap::prelude::*;
use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(name = "assetmap-app", about = "Load a catalog and print its located assets")]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Override MAP_STYLE (standard, light, dark)
    #[arg(short, long)]
    style: Option<MapStyle>,

    /// Retry transient page failures this many times
    #[arg(long, default_value_t = 0)]
    max_retries: u32,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Summary,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = AppConfig::from_env().context("invalid configuration")?;
    config.fetch = config.fetch.with_max_retries(cli.max_retries);
    if let Some(style) = cli.style {
        config.map.style = style;
    }

    let service = AssetMapService::from_config(config)?;

    // Ctrl-C supersedes the run instead of publishing a half-finished map
    let runs = service.runs().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            runs.cancel();
        }
    });

    let view = match service.load().await {
        RunOutcome::Completed(view) => view,
        RunOutcome::Superseded { generation } => {
            anyhow::bail!("run {} was cancelled before it finished", generation)
        }
    };

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Summary => print_summary(&view),
    }

    Ok(())
}

fn print_summary(view: &MapView) {
    if !view.title.is_empty() {
        println!("{}", view.title);
    }

    match &view.fetch.stop {
        StopReason::Complete => {}
        StopReason::PageCeiling { max_pages } => println!(
            "warning: stopped at the {}-page limit; the catalog may hold more assets",
            max_pages
        ),
        StopReason::Failed { page, error } => {
            println!("warning: page {} failed ({}); showing partial results", page, error)
        }
        StopReason::Cancelled => println!("warning: run was cancelled"),
    }

    if let Some(message) = view.empty_message() {
        println!("{}", message);
        return;
    }

    println!(
        "{} of {} assets located | center {:.4}, {:.4} | zoom {} | {} tiles",
        view.summary.located,
        view.summary.total_assets,
        view.center.lat,
        view.center.lng,
        view.zoom,
        view.style
    );
    for asset in &view.assets {
        println!(
            "  {:<40} {:>11.6} {:>12.6}",
            truncate(asset.title(), 40),
            asset.latitude(),
            asset.longitude()
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}

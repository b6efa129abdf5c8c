// tunestall - terminal music marketplace client
// Browse the storefront, buy songs, build playlists and keep listening -
// everything backed by an in-process mock of the real services

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tunestall::ui::App;
use tunestall::Config;

#[derive(Parser)]
#[command(name = "tunestall")]
#[command(about = "A terminal music marketplace client backed by a mock backend")]
struct Args {
    /// Enable developer logging (debug output to the log file)
    #[arg(long)]
    dev: bool,

    /// Override the data directory (player state, sessions, playlists)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn init_logging(data_dir: &PathBuf, dev: bool) -> Result<()> {
    let log_dir = data_dir.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    // Daily rotating file appender; the terminal stays clean for the TUI
    let file_appender = tracing_appender::rolling::daily(&log_dir, "tunestall.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let default_filter = if dev {
        "info,tunestall=debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = tracing_subscriber::fmt()
        .with_writer(file_writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(filter)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Keep the appender alive for the whole run
    std::mem::forget(guard);

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load config - falls back to defaults if missing
    let mut config = Config::load()?;
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    init_logging(&config.data_dir, args.dev)?;

    let mut app = App::new(config).await?;
    app.run().await?;

    Ok(())
}

use explore_cards::{ExploreConfig, ExploreScreen, NetworkService};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// Headless: every card gets its own slot
const VISIBLE_ROWS: usize = usize::MAX;

fn main() {
    // Initialize logger. Set RUST_LOG environment variable to control log level.
    // Examples: RUST_LOG=info, RUST_LOG=warn, RUST_LOG=explore_cards=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting Explore Cards");

    if let Err(e) = run() {
        log::error!("Application error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    let service = Arc::new(NetworkService::new(&ExploreConfig::default())?);
    let mut screen = ExploreScreen::new(service, runtime.handle().clone(), VISIBLE_ROWS);

    loop {
        screen.load();
        let stats = runtime.block_on(screen.settle());
        log::info!(
            "Images: {} shown, {} unavailable, {} discarded",
            stats.applied,
            stats.unavailable,
            stats.stale
        );

        println!("{}", screen.render());

        if screen.alert().is_none() || !prompt_retry()? {
            break;
        }
    }

    Ok(())
}

fn prompt_retry() -> io::Result<bool> {
    print!("Retry? [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

//! Sortscope Visualization Server
//!
//! Serve a sorting session to the browser.
//!
//! Usage: `sortscope-vis [length] [port]`

use std::env;

use sortscope_engine::{Session, SessionConfig};
use sortscope_vis::{VisConfig, VisServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sortscope_vis=info,sortscope_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command line args
    let args: Vec<String> = env::args().collect();

    let mut session_config = SessionConfig::from_env()?;
    if let Some(length) = args.get(1).and_then(|s| s.parse().ok()) {
        session_config.length = length;
    }

    let mut vis_config = VisConfig::from_env()?;
    if let Some(port) = args.get(2).and_then(|s| s.parse().ok()) {
        vis_config.port = port;
    }

    println!("Sortscope");
    println!("=========");
    println!();
    println!("  Values:    {} in [{}, {}]", session_config.length, session_config.min_value, session_config.max_value);
    println!("  Algorithm: {} ({})", session_config.algorithm, session_config.direction);
    println!("  Speed:     {} steps/s", vis_config.ticks_per_second);
    println!();
    println!("Open http://localhost:{} in a browser.", vis_config.port);
    println!("Q - Quit | R - Reset | SPACE - Start/Pause/Resume | A - Ascending | D - Descending");
    println!("I - Insertion Sort | B - Bubble Sort | S - Selection Sort | H - Heap Sort");
    println!();

    let session = Session::new(session_config)?;
    VisServer::new(session, vis_config).serve().await?;

    Ok(())
}

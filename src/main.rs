use clap::Parser;
use rand::Rng;

use molecula::config::AppConfig;
use molecula::App;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for the cosmetic brush randomness (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = AppConfig::load()?;
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());

    log::info!("Starting Molecula (seed {})", seed);

    pollster::block_on(run(config, seed))
}

async fn run(config: AppConfig, seed: u64) -> anyhow::Result<()> {
    let (app, event_loop) = App::new(config, seed).await?;
    App::run(event_loop, app)
}

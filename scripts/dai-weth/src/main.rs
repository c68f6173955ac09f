use dex_swap::{config::Config, helpers::build_venue, SwapPlan, Swapper};
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv().ok();

    let env_filter = EnvFilter::from_default_env();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_line_number(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env()?;
    info!(?config, "Loaded config");

    let venue = build_venue(&config).await?;
    let swapper = Swapper::new(venue, config.token_in.clone(), config.token_out.clone())?;
    let plan = SwapPlan::from_config(&config)?;

    let report = swapper.run(&plan, &mut std::io::stdout()).await?;
    if let Some(swap) = report.swap {
        info!(tx_hash = %swap.tx_hash, "Done");
    }

    Ok(())
}

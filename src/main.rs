use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use headline::app::AppContext;
use headline::cli::{commands, Cli, Commands, FavoritesAction};
use headline::config::Config;
use headline::news::LatencyPolicy;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if cli.no_delay {
        config.latency = LatencyPolicy::none();
    }

    let ctx = AppContext::new(&config)?;

    match cli.command {
        Commands::Home { more } => {
            commands::show_home(&ctx, more).await?;
        }
        Commands::Search { term, more } => {
            commands::search(&ctx, &term, more).await?;
        }
        Commands::Categories => {
            commands::list_categories();
        }
        Commands::Favorites { action } => match action {
            FavoritesAction::List => commands::list_favorites(&ctx),
            FavoritesAction::Add { url } => commands::add_favorite(&ctx, &url)?,
            FavoritesAction::Remove { url } => commands::remove_favorite(&ctx, &url),
        },
    }

    Ok(())
}

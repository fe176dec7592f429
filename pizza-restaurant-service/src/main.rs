use clap::{Parser, Subcommand};
use pizza_restaurant_service::{database_url, establish_connection, run_migrations, seed};
use tracing::info;

#[derive(Parser)]
#[command(version)]
struct Cli {
    /// SQLite database path; falls back to DATABASE_URL, then `app.db`
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// Replace all rows with the sample restaurants and pizzas
    Seed,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let database_url = cli.database_url.unwrap_or_else(database_url);

    let conn = &mut establish_connection(&database_url)?;
    run_migrations(conn)?;

    match &cli.command {
        Commands::Migrate => info!(%database_url, "database is up to date"),
        Commands::Seed => {
            let summary = seed::seed(conn)?;
            info!(
                %database_url,
                restaurants = summary.restaurants,
                pizzas = summary.pizzas,
                restaurant_pizzas = summary.restaurant_pizzas,
                "seed complete"
            );
        }
    }

    Ok(())
}

use env_logger::Env;
use std::path::PathBuf;
use trivia_api::config::Settings;
use trivia_api::seed::SeedData;
use trivia_api::store::{PgStore, TriviaStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let settings = Settings::from_env()?;

    let database_url = settings.database_url.as_deref().ok_or("DATABASE_URL must be set")?;
    // An explicit path argument wins over SEED_FILE.
    let seed_file = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or(settings.seed_file.clone());

    println!("Connecting to database...");
    let store = PgStore::connect(database_url, settings.max_connections).await?;
    store.migrate().await?;

    let seed = SeedData::from_file(&seed_file)?;
    println!("Seeding from file: {:?}", seed_file);
    store.load_seed(&seed).await?;

    store.close().await;
    println!("Seeding completed successfully.");
    Ok(())
}

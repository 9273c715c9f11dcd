use trivia_api::config::Settings;
use trivia_api::store::{PgStore, TriviaStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    let database_url = settings.database_url.as_deref().ok_or("DATABASE_URL must be set")?;

    let store = PgStore::connect(database_url, 1).await?;

    println!("Resetting database...");
    store.reset().await?;
    store.close().await;

    println!("Database reset successfully!");
    Ok(())
}

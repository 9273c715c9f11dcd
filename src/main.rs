use env_logger::Env;
use std::net::TcpListener;
use std::sync::Arc;
use trivia_api::config::Settings;
use trivia_api::run;
use trivia_api::seed::SeedData;
use trivia_api::store::{MemoryStore, PgStore, TriviaStore};

async fn open_store(settings: &Settings) -> Result<Arc<dyn TriviaStore>, Box<dyn std::error::Error>> {
    match &settings.database_url {
        Some(url) => {
            log::info!("Connecting to database...");
            let store = PgStore::connect(url, settings.max_connections).await?;
            store.migrate().await?;
            Ok(Arc::new(store))
        }
        None => {
            log::warn!("DATABASE_URL not set, serving from an in-memory store");
            let store = MemoryStore::new();
            if settings.seed_file.exists() {
                let seed = SeedData::from_file(&settings.seed_file)?;
                store.load_seed(&seed).await?;
                log::info!(
                    "Loaded {} categories and {} questions",
                    seed.categories.len(),
                    seed.questions.len()
                );
            } else {
                log::warn!("Seed file {:?} not found, starting empty", settings.seed_file);
            }
            Ok(Arc::new(store))
        }
    }
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let settings = Settings::from_env()?;
    let store = open_store(&settings).await?;

    let listener = TcpListener::bind(settings.address())?;
    log::info!("Starting server at http://{}", settings.address());
    log::info!("Swagger UI available at http://{}/swagger-ui/", settings.address());

    run(listener, store.clone())?.await?;

    store.close().await;
    log::info!("Server stopped");
    Ok(())
}

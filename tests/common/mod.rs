use std::net::TcpListener;
use std::sync::Arc;
use trivia_api::run;
use trivia_api::seed::{SeedCategory, SeedData, SeedQuestion};
use trivia_api::store::{MemoryStore, TriviaStore};

#[allow(dead_code)]
pub struct TestApp {
    pub address: String,
    pub store: Arc<MemoryStore>,
    pub api_client: reqwest::Client,
}

#[allow(dead_code)]
impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(fixture()).await
}

pub async fn spawn_app_with(seed: SeedData) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    store.load_seed(&seed).await.expect("Failed to seed store");

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let server = run(listener, store.clone()).expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        store,
        api_client: reqwest::Client::new(),
    }
}

fn question(question: &str, answer: &str, category: usize, difficulty: i32) -> SeedQuestion {
    SeedQuestion {
        question: question.to_string(),
        answer: answer.to_string(),
        category,
        difficulty,
    }
}

/// Categories 1 Science, 2 Art, 3 Sports, 4 History (empty).
/// Questions 1-5 are Science, 6-9 Art, 10-12 Sports.
pub fn fixture() -> SeedData {
    SeedData {
        categories: ["Science", "Art", "Sports", "History"]
            .iter()
            .map(|kind| SeedCategory { kind: kind.to_string() })
            .collect(),
        questions: vec![
            question("What is the heaviest organ in the human body?", "The Liver", 1, 4),
            question("Who discovered penicillin?", "Alexander Fleming", 1, 3),
            question("Hematology is a branch of medicine involving the study of what?", "Blood", 1, 4),
            question("What is the chemical symbol for gold?", "Au", 1, 2),
            question("Is distilled water 100% pure H2O?", "Nearly", 1, 5),
            question("Which Dutch graphic artist, initials M C, was a creator of optical illusions?", "Escher", 2, 1),
            question("La Giaconda is better known as what?", "Mona Lisa", 2, 3),
            question("How many paintings did Van Gogh sell in his lifetime?", "One", 2, 4),
            question("What is the title of Munch's most famous painting?", "The Scream", 2, 2),
            question("Which is the only team to play in every soccer World Cup tournament?", "Brazil", 3, 3),
            question("Which country won the first ever soccer World Cup in 1930?", "Uruguay", 3, 4),
            question("What boxer's original name is Cassius Clay?", "Muhammad Ali", 3, 1),
        ],
    }
}

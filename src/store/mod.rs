use async_trait::async_trait;

use crate::models::{Category, CreateQuestionRequest, Question};
use crate::pagination::Page;
use crate::seed::SeedData;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("category {0} does not exist")]
    MissingCategory(i32),
    #[error("constraint violated: {0}")]
    Constraint(&'static str),
    #[error("store lock poisoned")]
    Poisoned,
}

/// Row filter shared by listing, category browsing and search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    pub category: Option<i32>,
    /// Case-insensitive substring of the question text.
    pub search: Option<String>,
}

impl QuestionFilter {
    pub fn category(id: i32) -> Self {
        QuestionFilter { category: Some(id), search: None }
    }

    pub fn search(term: impl Into<String>) -> Self {
        QuestionFilter { category: None, search: Some(term.into()) }
    }
}

/// Handle to the relational store. One instance is opened at startup and
/// shared by every request.
#[async_trait]
pub trait TriviaStore: Send + Sync {
    /// All categories ordered by id.
    async fn categories(&self) -> Result<Vec<Category>, StoreError>;

    async fn category(&self, id: i32) -> Result<Option<Category>, StoreError>;

    /// One page of matching questions ordered by id.
    async fn questions(&self, filter: &QuestionFilter, page: Page) -> Result<Vec<Question>, StoreError>;

    async fn count_questions(&self, filter: &QuestionFilter) -> Result<i64, StoreError>;

    async fn question(&self, id: i32) -> Result<Option<Question>, StoreError>;

    async fn insert_question(&self, new: &CreateQuestionRequest) -> Result<Question, StoreError>;

    /// Returns whether a row was removed.
    async fn delete_question(&self, id: i32) -> Result<bool, StoreError>;

    /// One question chosen uniformly at random among rows in `category` (any
    /// category when `None`) whose id is not in `excluded`.
    async fn random_question(
        &self,
        category: Option<i32>,
        excluded: &[i32],
    ) -> Result<Option<Question>, StoreError>;

    /// Inserts every category and question of `seed` atomically.
    async fn load_seed(&self, seed: &SeedData) -> Result<(), StoreError>;

    async fn close(&self) {}
}

/// Escapes `\`, `%` and `_` and wraps the term for a substring `LIKE` match.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub(crate) fn check_difficulty(difficulty: i32) -> Result<(), StoreError> {
    if (1..=5).contains(&difficulty) {
        Ok(())
    } else {
        Err(StoreError::Constraint("difficulty must be between 1 and 5"))
    }
}

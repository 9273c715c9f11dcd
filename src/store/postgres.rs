use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{like_pattern, QuestionFilter, StoreError, TriviaStore};
use crate::models::{Category, CreateQuestionRequest, Question};
use crate::pagination::Page;
use crate::seed::SeedData;

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

// Both filters are optional: a NULL bind disables that predicate.
const FILTER_CLAUSE: &str = r#"
    WHERE ($1::INT IS NULL OR category = $1)
      AND ($2::TEXT IS NULL OR question ILIKE $2 ESCAPE '\')
"#;

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Empties both tables and restarts id generation.
    pub async fn reset(&self) -> Result<(), StoreError> {
        sqlx::query("TRUNCATE TABLE questions, categories RESTART IDENTITY CASCADE")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl TriviaStore for PgStore {
    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        let categories = sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    async fn category(&self, id: i32) -> Result<Option<Category>, StoreError> {
        let category = sqlx::query_as::<_, Category>("SELECT id, type FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }

    async fn questions(&self, filter: &QuestionFilter, page: Page) -> Result<Vec<Question>, StoreError> {
        let sql = format!(
            "SELECT {} FROM questions {} ORDER BY id LIMIT $3 OFFSET $4",
            QUESTION_COLUMNS, FILTER_CLAUSE
        );
        let questions = sqlx::query_as::<_, Question>(&sql)
            .bind(filter.category)
            .bind(filter.search.as_deref().map(like_pattern))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(questions)
    }

    async fn count_questions(&self, filter: &QuestionFilter) -> Result<i64, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM questions {}", FILTER_CLAUSE);
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .bind(filter.category)
            .bind(filter.search.as_deref().map(like_pattern))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn question(&self, id: i32) -> Result<Option<Question>, StoreError> {
        let sql = format!("SELECT {} FROM questions WHERE id = $1", QUESTION_COLUMNS);
        let question = sqlx::query_as::<_, Question>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(question)
    }

    async fn insert_question(&self, new: &CreateQuestionRequest) -> Result<Question, StoreError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "INSERT INTO questions (question, answer, category, difficulty) VALUES ($1, $2, $3, $4) RETURNING {}",
            QUESTION_COLUMNS
        );
        // Dropping `tx` on the error path rolls the insert back.
        let question = sqlx::query_as::<_, Question>(&sql)
            .bind(&new.question)
            .bind(&new.answer)
            .bind(new.category)
            .bind(new.difficulty)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(question)
    }

    async fn delete_question(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn random_question(
        &self,
        category: Option<i32>,
        excluded: &[i32],
    ) -> Result<Option<Question>, StoreError> {
        let sql = format!(
            r#"
            SELECT {}
            FROM questions
            WHERE ($1::INT IS NULL OR category = $1)
              AND NOT (id = ANY($2))
            ORDER BY RANDOM()
            LIMIT 1
            "#,
            QUESTION_COLUMNS
        );
        let question = sqlx::query_as::<_, Question>(&sql)
            .bind(category)
            .bind(excluded.to_vec())
            .fetch_optional(&self.pool)
            .await?;
        Ok(question)
    }

    async fn load_seed(&self, seed: &SeedData) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        let mut category_ids = Vec::with_capacity(seed.categories.len());
        for category in &seed.categories {
            let id: i32 = sqlx::query_scalar("INSERT INTO categories (type) VALUES ($1) RETURNING id")
                .bind(&category.kind)
                .fetch_one(&mut *tx)
                .await?;
            category_ids.push(id);
        }

        for question in &seed.questions {
            let category = seed.resolve_category(&category_ids, question.category)?;
            sqlx::query(
                "INSERT INTO questions (question, answer, category, difficulty) VALUES ($1, $2, $3, $4)",
            )
            .bind(&question.question)
            .bind(&question.answer)
            .bind(category)
            .bind(question.difficulty)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        log::info!(
            "Seeded {} categories and {} questions",
            seed.categories.len(),
            seed.questions.len()
        );
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use rand::seq::IteratorRandom;

use super::{check_difficulty, QuestionFilter, StoreError, TriviaStore};
use crate::models::{Category, CreateQuestionRequest, Question};
use crate::pagination::Page;
use crate::seed::SeedData;

#[derive(Default, Clone)]
struct Tables {
    categories: Vec<Category>,
    // Kept in ascending id order: ids only grow and rows are appended.
    questions: Vec<Question>,
    last_category_id: i32,
    last_question_id: i32,
}

impl Tables {
    fn insert_category(&mut self, kind: &str) -> Result<i32, StoreError> {
        if kind.is_empty() {
            return Err(StoreError::Constraint("category type must not be empty"));
        }
        self.last_category_id += 1;
        self.categories.push(Category {
            id: self.last_category_id,
            kind: kind.to_string(),
        });
        Ok(self.last_category_id)
    }

    fn insert_question(
        &mut self,
        question: &str,
        answer: &str,
        category: i32,
        difficulty: i32,
    ) -> Result<Question, StoreError> {
        if !self.categories.iter().any(|c| c.id == category) {
            return Err(StoreError::MissingCategory(category));
        }
        check_difficulty(difficulty)?;

        self.last_question_id += 1;
        let row = Question {
            id: self.last_question_id,
            question: question.to_string(),
            answer: answer.to_string(),
            category,
            difficulty,
        };
        self.questions.push(row.clone());
        Ok(row)
    }
}

fn matches_filter(question: &Question, filter: &QuestionFilter) -> bool {
    if let Some(category) = filter.category {
        if question.category != category {
            return false;
        }
    }
    match &filter.search {
        Some(term) => question.question.to_lowercase().contains(&term.to_lowercase()),
        None => true,
    }
}

/// In-process store used by tests and by the server when no database is
/// configured. Mirrors the constraints of the SQL schema.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables.write().map_err(|_| StoreError::Poisoned)
    }
}

#[async_trait]
impl TriviaStore for MemoryStore {
    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.read()?.categories.clone())
    }

    async fn category(&self, id: i32) -> Result<Option<Category>, StoreError> {
        Ok(self.read()?.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn questions(&self, filter: &QuestionFilter, page: Page) -> Result<Vec<Question>, StoreError> {
        let tables = self.read()?;
        let questions = tables
            .questions
            .iter()
            .filter(|q| matches_filter(q, filter))
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect();
        Ok(questions)
    }

    async fn count_questions(&self, filter: &QuestionFilter) -> Result<i64, StoreError> {
        let tables = self.read()?;
        Ok(tables.questions.iter().filter(|q| matches_filter(q, filter)).count() as i64)
    }

    async fn question(&self, id: i32) -> Result<Option<Question>, StoreError> {
        Ok(self.read()?.questions.iter().find(|q| q.id == id).cloned())
    }

    async fn insert_question(&self, new: &CreateQuestionRequest) -> Result<Question, StoreError> {
        self.write()?
            .insert_question(&new.question, &new.answer, new.category, new.difficulty)
    }

    async fn delete_question(&self, id: i32) -> Result<bool, StoreError> {
        let mut tables = self.write()?;
        let before = tables.questions.len();
        tables.questions.retain(|q| q.id != id);
        Ok(tables.questions.len() < before)
    }

    async fn random_question(
        &self,
        category: Option<i32>,
        excluded: &[i32],
    ) -> Result<Option<Question>, StoreError> {
        let tables = self.read()?;
        let question = tables
            .questions
            .iter()
            .filter(|q| category.map_or(true, |c| q.category == c))
            .filter(|q| !excluded.contains(&q.id))
            .choose(&mut rand::thread_rng())
            .cloned();
        Ok(question)
    }

    async fn load_seed(&self, seed: &SeedData) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        // Work on a copy so a failing row leaves the store untouched.
        let mut staged = tables.clone();

        let mut category_ids = Vec::with_capacity(seed.categories.len());
        for category in &seed.categories {
            category_ids.push(staged.insert_category(&category.kind)?);
        }
        for question in &seed.questions {
            let category = seed.resolve_category(&category_ids, question.category)?;
            staged.insert_question(&question.question, &question.answer, category, question.difficulty)?;
        }

        *tables = staged;
        Ok(())
    }
}

//! Picks the next question of a quiz round.
//!
//! The selector keeps no state between calls: the caller passes the ids it
//! has already shown, and the store does the filtering and the random pick
//! (`ORDER BY RANDOM() LIMIT 1` on PostgreSQL), so the eligible set is never
//! loaded into the process.

use std::collections::HashSet;

use crate::error::ApiError;
use crate::models::{Question, QuizCategory};
use crate::store::TriviaStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Category(i32),
}

/// `{ "type": "ALL" }` without an id is the only way to ask for every
/// category. Any supplied id, 0 included, must name an existing category.
impl TryFrom<&QuizCategory> for CategoryFilter {
    type Error = ApiError;

    fn try_from(category: &QuizCategory) -> Result<Self, Self::Error> {
        match (category.id, category.kind.as_deref()) {
            (Some(id), _) => Ok(CategoryFilter::Category(id)),
            (None, Some(kind)) if kind.eq_ignore_ascii_case("all") => Ok(CategoryFilter::All),
            (None, _) => Err(ApiError::BadRequest),
        }
    }
}

/// Returns a random question matching `filter` whose id is not in `excluded`,
/// or `None` once every eligible question has been asked.
///
/// A concrete category that does not exist is `NotFound`; it is checked
/// before any question is queried.
pub async fn select_quiz_question(
    store: &dyn TriviaStore,
    filter: CategoryFilter,
    excluded: &HashSet<i32>,
) -> Result<Option<Question>, ApiError> {
    let category = match filter {
        CategoryFilter::All => None,
        CategoryFilter::Category(id) => {
            store.category(id).await?.ok_or(ApiError::NotFound)?;
            Some(id)
        }
    };

    let excluded: Vec<i32> = excluded.iter().copied().collect();
    let question = store.random_question(category, &excluded).await?;

    match &question {
        Some(q) => log::debug!("Quiz picked question {} ({:?})", q.id, filter),
        None => log::debug!("Quiz exhausted after {} questions ({:?})", excluded.len(), filter),
    }
    Ok(question)
}

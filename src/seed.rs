use std::path::Path;

use serde::Deserialize;

use crate::store::StoreError;

/// Contents of a seed file.
///
/// A question's `category` is the 1-based position of its category in
/// `categories`; loaders map it to the id the store generates.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedData {
    pub categories: Vec<SeedCategory>,
    pub questions: Vec<SeedQuestion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedCategory {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedQuestion {
    pub question: String,
    pub answer: String,
    pub category: usize,
    pub difficulty: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SeedData {
    pub fn from_file(path: &Path) -> Result<Self, SeedError> {
        log::info!("Loading seed data from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let seed = serde_json::from_str(&content)?;
        Ok(seed)
    }

    /// Maps a seed-file category position to the id generated for it.
    pub fn resolve_category(&self, generated: &[i32], position: usize) -> Result<i32, StoreError> {
        position
            .checked_sub(1)
            .and_then(|idx| generated.get(idx))
            .copied()
            .ok_or(StoreError::MissingCategory(i32::try_from(position).unwrap_or(i32::MAX)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = r#"{
        "categories": [{ "type": "Science" }, { "type": "Art" }],
        "questions": [
            { "question": "Who painted the Mona Lisa?", "answer": "Da Vinci", "category": 2, "difficulty": 3 }
        ]
    }"#;

    #[test]
    fn parses_seed_json() {
        let seed: SeedData = serde_json::from_str(SEED).unwrap();
        assert_eq!(seed.categories.len(), 2);
        assert_eq!(seed.categories[1].kind, "Art");
        assert_eq!(seed.questions[0].category, 2);
    }

    #[test]
    fn resolves_positions_to_generated_ids() {
        let seed: SeedData = serde_json::from_str(SEED).unwrap();
        assert_eq!(seed.resolve_category(&[10, 11], 1).unwrap(), 10);
        assert_eq!(seed.resolve_category(&[10, 11], 2).unwrap(), 11);
        assert!(matches!(
            seed.resolve_category(&[10, 11], 0),
            Err(StoreError::MissingCategory(0))
        ));
        assert!(matches!(
            seed.resolve_category(&[10, 11], 3),
            Err(StoreError::MissingCategory(3))
        ));
    }

    #[test]
    fn bundled_seed_file_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("seed/seed_data.json");
        let seed = SeedData::from_file(&path).unwrap();
        let ids: Vec<i32> = (1..=seed.categories.len() as i32).collect();
        for question in &seed.questions {
            assert!(seed.resolve_category(&ids, question.category).is_ok());
            assert!((1..=5).contains(&question.difficulty));
        }
    }
}

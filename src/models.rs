use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, FromRow, ToSchema)]
pub struct Category {
    pub id: i32,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

/// Public view of a question row. Nothing beyond the stored columns is exposed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, FromRow, ToSchema)]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

#[derive(Debug, Deserialize, Clone, ToSchema)]
pub struct CreateQuestionRequest {
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
}

/// `{ "type": "ALL" }` selects every category; otherwise `id` names one.
#[derive(Debug, Deserialize, Clone, ToSchema)]
pub struct QuizCategory {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuizRequest {
    pub quiz_category: QuizCategory,
    #[serde(default)]
    pub previous_questions: Vec<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// 1-based page number, defaults to 1.
    pub page: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionsPage {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: i64,
    /// Labels of every category.
    pub categories: Vec<String>,
    pub current_category: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionList {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub current_category: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub success: bool,
    pub created: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuizResponse {
    pub success: bool,
    /// `null` once every eligible question has been asked.
    pub question: Option<Question>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

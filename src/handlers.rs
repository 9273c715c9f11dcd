use std::collections::HashSet;

use actix_web::{web, HttpResponse, Responder};

use crate::error::ApiError;
use crate::models::{
    CategoriesResponse, CreateQuestionRequest, CreatedResponse, DeletedResponse, ErrorResponse,
    PageParams, QuestionList, QuestionsPage, QuizRequest, QuizResponse, SearchRequest,
};
use crate::pagination::Page;
use crate::quiz::{self, CategoryFilter};
use crate::store::{QuestionFilter, TriviaStore};

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health Check", body = String)
    )
)]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "List Categories", body = CategoriesResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    )
)]
pub async fn list_categories(store: web::Data<dyn TriviaStore>) -> Result<HttpResponse, ApiError> {
    let categories = store.categories().await?;
    Ok(HttpResponse::Ok().json(CategoriesResponse {
        success: true,
        categories,
    }))
}

#[utoipa::path(
    get,
    path = "/questions",
    params(PageParams),
    responses(
        (status = 200, description = "One page of questions", body = QuestionsPage),
        (status = 400, description = "Invalid page number", body = ErrorResponse),
        (status = 404, description = "Page past the last question", body = ErrorResponse)
    )
)]
pub async fn list_questions(
    store: web::Data<dyn TriviaStore>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, ApiError> {
    let page = Page::new(query.page)?;
    let filter = QuestionFilter::default();

    let questions = store.questions(&filter, page).await?;
    page.ensure_in_range(questions.len())?;
    let total_questions = store.count_questions(&filter).await?;
    let categories = store.categories().await?.into_iter().map(|c| c.kind).collect();

    Ok(HttpResponse::Ok().json(QuestionsPage {
        success: true,
        questions,
        total_questions,
        categories,
        current_category: None,
    }))
}

#[utoipa::path(
    get,
    path = "/categories/{id}/questions",
    params(
        ("id" = i32, Path, description = "Category ID"),
        PageParams
    ),
    responses(
        (status = 200, description = "Questions of one category", body = QuestionList),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
pub async fn list_category_questions(
    store: web::Data<dyn TriviaStore>,
    path: web::Path<i32>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, ApiError> {
    let category_id = path.into_inner();
    let page = Page::new(query.page)?;

    let category = store.category(category_id).await?.ok_or(ApiError::NotFound)?;
    let filter = QuestionFilter::category(category.id);

    let questions = store.questions(&filter, page).await?;
    page.ensure_in_range(questions.len())?;
    let total_questions = store.count_questions(&filter).await?;

    Ok(HttpResponse::Ok().json(QuestionList {
        success: true,
        questions,
        total_questions,
        current_category: Some(category.kind),
    }))
}

#[utoipa::path(
    post,
    path = "/questions/search",
    request_body = SearchRequest,
    params(PageParams),
    responses(
        (status = 200, description = "Questions containing the search term", body = QuestionList),
        (status = 400, description = "Missing searchTerm", body = ErrorResponse)
    )
)]
pub async fn search_questions(
    store: web::Data<dyn TriviaStore>,
    query: web::Query<PageParams>,
    req: web::Json<SearchRequest>,
) -> Result<HttpResponse, ApiError> {
    let page = Page::new(query.page)?;
    let filter = QuestionFilter::search(req.into_inner().search_term);

    let questions = store.questions(&filter, page).await?;
    page.ensure_in_range(questions.len())?;
    let total_questions = store.count_questions(&filter).await?;

    Ok(HttpResponse::Ok().json(QuestionList {
        success: true,
        questions,
        total_questions,
        current_category: None,
    }))
}

#[utoipa::path(
    post,
    path = "/questions",
    request_body = CreateQuestionRequest,
    responses(
        (status = 201, description = "Question created", body = CreatedResponse),
        (status = 400, description = "Invalid question", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 422, description = "Insert failed", body = ErrorResponse)
    )
)]
pub async fn create_question(
    store: web::Data<dyn TriviaStore>,
    req: web::Json<CreateQuestionRequest>,
) -> Result<HttpResponse, ApiError> {
    let mut new = req.into_inner();
    new.question = new.question.trim().to_string();
    new.answer = new.answer.trim().to_string();

    if new.question.is_empty() || new.answer.is_empty() || !(1..=5).contains(&new.difficulty) {
        return Err(ApiError::BadRequest);
    }
    store.category(new.category).await?.ok_or(ApiError::NotFound)?;

    let question = store
        .insert_question(&new)
        .await
        .map_err(ApiError::unprocessable)?;
    log::info!("Created question {} in category {}", question.id, question.category);

    Ok(HttpResponse::Created().json(CreatedResponse {
        success: true,
        created: question.id,
    }))
}

#[utoipa::path(
    delete,
    path = "/questions/{id}",
    params(
        ("id" = i32, Path, description = "Question ID")
    ),
    responses(
        (status = 200, description = "Question deleted", body = DeletedResponse),
        (status = 404, description = "Question not found", body = ErrorResponse),
        (status = 422, description = "Delete failed", body = ErrorResponse)
    )
)]
pub async fn delete_question(
    store: web::Data<dyn TriviaStore>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let question_id = path.into_inner();
    store.question(question_id).await?.ok_or(ApiError::NotFound)?;

    let deleted = store
        .delete_question(question_id)
        .await
        .map_err(ApiError::unprocessable)?;
    // Lost a race with a concurrent delete.
    if !deleted {
        return Err(ApiError::NotFound);
    }
    log::info!("Deleted question {}", question_id);

    Ok(HttpResponse::Ok().json(DeletedResponse {
        success: true,
        deleted: question_id,
    }))
}

#[utoipa::path(
    post,
    path = "/quizzes",
    request_body = QuizRequest,
    responses(
        (status = 200, description = "Next quiz question, or null when none are left", body = QuizResponse),
        (status = 400, description = "Missing quiz_category, or no id and no \"ALL\" type", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
pub async fn play_quiz(
    store: web::Data<dyn TriviaStore>,
    req: web::Json<QuizRequest>,
) -> Result<HttpResponse, ApiError> {
    let filter = CategoryFilter::try_from(&req.quiz_category)?;
    let excluded: HashSet<i32> = req.previous_questions.iter().copied().collect();

    let question = quiz::select_quiz_question(store.get_ref(), filter, &excluded).await?;

    Ok(HttpResponse::Ok().json(QuizResponse {
        success: true,
        question,
    }))
}

pub async fn preflight() -> impl Responder {
    HttpResponse::NoContent().finish()
}

pub async fn method_not_allowed() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MethodNotAllowed)
}

pub async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound)
}

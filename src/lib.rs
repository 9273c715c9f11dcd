use actix_web::dev::Server;
use actix_web::{guard, middleware, web, App, HttpServer, Resource};
use std::net::TcpListener;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod quiz;
pub mod seed;
pub mod store;

use store::TriviaStore;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health_check,
        handlers::list_categories,
        handlers::list_questions,
        handlers::list_category_questions,
        handlers::search_questions,
        handlers::create_question,
        handlers::delete_question,
        handlers::play_quiz,
    ),
    components(
        schemas(
            models::Category, models::Question, models::CreateQuestionRequest,
            models::SearchRequest, models::QuizCategory, models::QuizRequest,
            models::QuizResponse, models::CategoriesResponse, models::QuestionsPage,
            models::QuestionList, models::CreatedResponse, models::DeletedResponse,
            models::ErrorResponse
        )
    ),
    tags(
        (name = "Trivia", description = "Trivia questions, categories and quiz play")
    )
)]
pub struct ApiDoc;

// Answers CORS preflight and turns unsupported methods into the JSON 405 envelope.
fn resource(path: &str) -> Resource {
    web::resource(path)
        .route(web::route().guard(guard::Options()).to(handlers::preflight))
        .default_service(web::to(handlers::method_not_allowed))
}

pub fn run(listener: TcpListener, store: Arc<dyn TriviaStore>) -> Result<Server, std::io::Error> {
    let data: web::Data<dyn TriviaStore> = web::Data::from(store);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .app_data(web::JsonConfig::default().error_handler(error::json_error))
            .app_data(web::QueryConfig::default().error_handler(error::query_error))
            .app_data(web::PathConfig::default().error_handler(error::path_error))
            .wrap(middleware::Logger::default())
            .wrap(
                middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "Content-Type, Authorization"))
                    .add(("Access-Control-Allow-Methods", "GET,POST,DELETE,OPTIONS")),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi())
            )
            .route("/health", web::get().to(handlers::health_check))
            .service(
                web::scope("/categories")
                    .service(resource("").route(web::get().to(handlers::list_categories)))
                    .service(
                        resource("/{id}/questions")
                            .route(web::get().to(handlers::list_category_questions)),
                    )
            )
            .service(
                web::scope("/questions")
                    .service(
                        resource("")
                            .route(web::get().to(handlers::list_questions))
                            .route(web::post().to(handlers::create_question)),
                    )
                    .service(resource("/search").route(web::post().to(handlers::search_questions)))
                    .service(resource("/{id}").route(web::delete().to(handlers::delete_question)))
            )
            .service(resource("/quizzes").route(web::post().to(handlers::play_quiz)))
            .default_service(web::to(handlers::not_found))
    })
    .listen(listener)?
    .run();

    Ok(server)
}

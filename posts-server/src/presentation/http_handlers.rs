use crate::application::PostService;
use crate::domain::post::CreatePostRequest;
use crate::domain::DomainError;
use actix_web::{error, web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;
use uuid::Uuid;

// Преобразование DomainError в HttpResponse
fn error_to_response(err: DomainError) -> HttpResponse {
    let status_code = err.to_status_code();
    let message = err.to_string();

    match status_code {
        400 => HttpResponse::BadRequest().json(serde_json::json!({ "error": message })),
        404 => HttpResponse::NotFound().json(serde_json::json!({ "error": message })),
        _ => {
            tracing::error!("Request failed: {}", message);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "Internal server error" }))
        }
    }
}

fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response =
        HttpResponse::BadRequest().json(serde_json::json!({ "error": err.to_string() }));
    error::InternalError::from_response(err, response).into()
}

// Невалидный id не может совпасть ни с одним постом
fn path_error_handler(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::NotFound()
        .json(serde_json::json!({ "error": DomainError::PostNotFound.to_string() }));
    error::InternalError::from_response(err, response).into()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(
            web::scope("/posts")
                .route("", web::get().to(list_posts))
                .route("", web::post().to(create_post))
                .route("/{id}", web::get().to(get_post)),
        );
}

pub async fn list_posts(post_service: web::Data<Arc<PostService>>) -> impl Responder {
    tracing::info!("Listing posts");

    match post_service.list_posts().await {
        Ok(posts) => HttpResponse::Ok().json(posts),
        Err(err) => error_to_response(err),
    }
}

pub async fn get_post(
    post_service: web::Data<Arc<PostService>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let post_id = path.into_inner();

    tracing::info!("Getting post with id={}", post_id);

    match post_service.get_post(post_id).await {
        Ok(post) => HttpResponse::Ok().json(post),
        Err(err) => error_to_response(err),
    }
}

pub async fn create_post(
    post_service: web::Data<Arc<PostService>>,
    post_data: web::Json<CreatePostRequest>,
) -> impl Responder {
    tracing::info!("Creating post");

    match post_service.create_post(post_data.into_inner()).await {
        Ok(post) => HttpResponse::Created().json(post),
        Err(err) => error_to_response(err),
    }
}

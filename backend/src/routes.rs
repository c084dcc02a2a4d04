use axum::{
    extract::{Path, State},
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde_json::{json, Value};
use shared::Task;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::debug;

use crate::error::TaskError;
use crate::payload::decode_task_request;
use crate::service::SharedService;

pub const API_PREFIX: &str = "/api/tasks";

/// Full application: task API, front-end assets for everything else.
pub fn app(service: SharedService, static_dir: &str) -> Router {
    Router::new()
        .nest(API_PREFIX, task_routes(service))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub fn task_routes(service: SharedService) -> Router {
    Router::new()
        .route("/getall", get(get_tasks))
        .route("/getbyid/:id", get(get_task))
        .route("/create", post(create_task))
        .route("/update", put(update_task))
        .route("/delete", delete(delete_task_by_body))
        .route("/delete/:id", delete(delete_task))
        .with_state(service)
}

async fn get_tasks(State(service): State<SharedService>) -> Result<Json<Vec<Task>>, TaskError> {
    Ok(Json(service.list().await?))
}

async fn get_task(
    Path(id): Path<i64>,
    State(service): State<SharedService>,
) -> Result<Json<Task>, TaskError> {
    Ok(Json(service.get(id).await?))
}

async fn create_task(
    State(service): State<SharedService>,
    body: String,
) -> Result<Json<Task>, TaskError> {
    debug!(%body, "create request");
    let input = decode_task_request(&body)?;
    Ok(Json(service.create(input).await?))
}

async fn update_task(
    State(service): State<SharedService>,
    body: String,
) -> Result<Json<Task>, TaskError> {
    debug!(%body, "update request");
    let input = decode_task_request(&body)?;
    Ok(Json(service.update(input).await?))
}

async fn delete_task(
    Path(id): Path<i64>,
    State(service): State<SharedService>,
) -> Result<Json<Value>, TaskError> {
    service.delete(id).await?;
    Ok(deleted())
}

/// Older clients send the whole task; only its id is used.
async fn delete_task_by_body(
    State(service): State<SharedService>,
    body: String,
) -> Result<Json<Value>, TaskError> {
    debug!(%body, "delete request");
    let task = decode_task_request(&body)?;
    service.delete(task.target_id()).await?;
    Ok(deleted())
}

fn deleted() -> Json<Value> {
    Json(json!({ "message": "Task deleted successfully" }))
}

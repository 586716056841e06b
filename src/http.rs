use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::envelope::Envelope;
use crate::error::AppError;
use crate::model::{TodoChanges, TodoInput};
use crate::repository::TodoRepository;
use crate::service::TodoService;

const INTERNAL_ERROR: &str = "Internal server error";

pub fn router<R: TodoRepository>(service: TodoService<R>) -> Router {
    Router::new()
        .route("/todos", get(list_todos::<R>).post(create_todo::<R>))
        .route("/todos/incoming/{days}", get(incoming_todos::<R>))
        .route(
            "/todos/{id}",
            get(get_todo::<R>)
                .put(update_todo::<R>)
                .delete(delete_todo::<R>),
        )
        .route("/todos/{id}/markasdone", put(mark_as_done::<R>))
        .route(
            "/todos/{id}/setpercentage/{percentage}",
            put(set_percentage::<R>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidInput(message) => {
                tracing::debug!(%message, "storage rejected input");
                envelope_response(StatusCode::BAD_REQUEST, Envelope::<()>::error([message]))
            }
            err => {
                tracing::error!(error = %err, "request failed");
                envelope_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Envelope::<()>::error([INTERNAL_ERROR]),
                )
            }
        }
    }
}

fn envelope_response<T: Serialize>(status: StatusCode, envelope: Envelope<T>) -> Response {
    (status, Json(envelope)).into_response()
}

fn ok_or_not_found<T: Serialize>(envelope: Envelope<T>) -> Response {
    let status = if envelope.is_success() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    envelope_response(status, envelope)
}

async fn create_todo<R: TodoRepository>(
    State(service): State<TodoService<R>>,
    Json(input): Json<TodoInput>,
) -> Result<Response, AppError> {
    let envelope = service.create_todo(input).await?;
    if !envelope.is_success() {
        return Ok(envelope_response(StatusCode::BAD_REQUEST, envelope));
    }
    let location = envelope
        .result()
        .map(|id| format!("/todos/{id}"))
        .unwrap_or_default();
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(envelope),
    )
        .into_response())
}

async fn delete_todo<R: TodoRepository>(
    State(service): State<TodoService<R>>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    Ok(ok_or_not_found(service.delete_todo(id).await?))
}

async fn list_todos<R: TodoRepository>(
    State(service): State<TodoService<R>>,
) -> Result<Response, AppError> {
    Ok(envelope_response(
        StatusCode::OK,
        service.get_all_todos().await?,
    ))
}

// Invalid day counts are still answered with 200; the envelope carries the error.
// A non-integer segment does not name a route and gets 404.
async fn incoming_todos<R: TodoRepository>(
    State(service): State<TodoService<R>>,
    Path(days): Path<String>,
) -> Result<Response, AppError> {
    let Ok(days) = days.parse::<i32>() else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };
    Ok(envelope_response(
        StatusCode::OK,
        service.get_incoming_todos(days).await?,
    ))
}

async fn get_todo<R: TodoRepository>(
    State(service): State<TodoService<R>>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let envelope = service.get_specified_todo(id).await?;
    let status = match envelope.result() {
        Some(Some(_)) if envelope.is_success() => StatusCode::OK,
        _ => StatusCode::NOT_FOUND,
    };
    Ok(envelope_response(status, envelope))
}

async fn mark_as_done<R: TodoRepository>(
    State(service): State<TodoService<R>>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    Ok(ok_or_not_found(service.mark_as_done(id).await?))
}

async fn set_percentage<R: TodoRepository>(
    State(service): State<TodoService<R>>,
    Path((id, percentage)): Path<(Uuid, String)>,
) -> Result<Response, AppError> {
    let Ok(percentage) = percentage.parse::<i32>() else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };
    Ok(ok_or_not_found(
        service.set_todo_percentage(id, percentage).await?,
    ))
}

async fn update_todo<R: TodoRepository>(
    State(service): State<TodoService<R>>,
    Path(id): Path<Uuid>,
    Json(changes): Json<TodoChanges>,
) -> Result<Response, AppError> {
    Ok(ok_or_not_found(service.update_todo(id, changes).await?))
}

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::envelope::Envelope;
use crate::error::AppError;
use crate::mapper;
use crate::model::{IncomingWindow, Todo, TodoChanges, TodoInput};
use crate::repository::TodoRepository;

pub const INVALID_PERCENT: &str = "Percent value should be between 0 and 100";
pub const EXPIRY_IN_PAST: &str = "Expire date can not be past";
pub const INVALID_DAYS: &str = "Invalid selected days type";
pub const TODO_NOT_FOUND: &str = "Todo not found";
pub const UPDATE_FAILED: &str = "Failed to update";
pub const DELETE_FAILED: &str = "Failed to delete";

pub type ServiceResult<T> = Result<Envelope<T>, AppError>;

pub struct TodoService<R> {
    repository: Arc<R>,
}

impl<R> Clone for TodoService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: TodoRepository> TodoService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub async fn get_all_todos(&self) -> ServiceResult<Vec<Todo>> {
        let todos = self.repository.get_all().await?;
        tracing::debug!(count = todos.len(), "listed todos");
        Ok(Envelope::success(todos))
    }

    /// Absence is reported as a successful `None`, not as an error.
    pub async fn get_specified_todo(&self, id: Uuid) -> ServiceResult<Option<Todo>> {
        let todo = self.repository.get_by_id(id).await?;
        tracing::debug!(%id, found = todo.is_some(), "fetched todo");
        Ok(Envelope::success(todo))
    }

    pub async fn get_incoming_todos(&self, days: i32) -> ServiceResult<Vec<Todo>> {
        let Some(window) = IncomingWindow::from_days(days) else {
            tracing::debug!(days, "rejected incoming window");
            return Ok(Envelope::error([INVALID_DAYS]));
        };
        let todos = self.repository.get_incoming(window).await?;
        tracing::debug!(?window, count = todos.len(), "listed incoming todos");
        Ok(Envelope::success(todos))
    }

    pub async fn create_todo(&self, input: TodoInput) -> ServiceResult<Uuid> {
        if let Some(message) = validate(input.percent_complete, input.expiry_date, Utc::now()) {
            tracing::debug!(reason = message, "rejected todo creation");
            return Ok(Envelope::error([message]));
        }

        let todo = mapper::from_create_payload(input);
        let id = self.repository.add(todo).await?;
        tracing::info!(%id, "created todo");
        Ok(Envelope::success(id))
    }

    pub async fn update_todo(&self, id: Uuid, changes: TodoChanges) -> ServiceResult<bool> {
        if let Some(message) = validate(changes.percent_complete, changes.expiry_date, Utc::now())
        {
            tracing::debug!(%id, reason = message, "rejected todo update");
            return Ok(Envelope::error([message]));
        }

        let Some(mut todo) = self.repository.get_by_id(id).await? else {
            return Ok(Envelope::error([TODO_NOT_FOUND]));
        };
        mapper::apply_update_payload(changes, &mut todo);

        if !self.repository.update(todo).await? {
            tracing::warn!(%id, "todo vanished before update");
            return Ok(Envelope::error([UPDATE_FAILED]));
        }
        tracing::info!(%id, "updated todo");
        Ok(Envelope::success(true))
    }

    pub async fn set_todo_percentage(&self, id: Uuid, percentage: i32) -> ServiceResult<bool> {
        if !percent_in_range(percentage) {
            return Ok(Envelope::error([INVALID_PERCENT]));
        }

        let Some(todo) = self.repository.get_by_id(id).await? else {
            return Ok(Envelope::error([TODO_NOT_FOUND]));
        };

        if !self.repository.set_completion(todo, percentage).await? {
            tracing::warn!(%id, "todo vanished before percentage update");
            return Ok(Envelope::error([UPDATE_FAILED]));
        }
        tracing::info!(%id, percentage, "set todo percentage");
        Ok(Envelope::success(true))
    }

    pub async fn delete_todo(&self, id: Uuid) -> ServiceResult<bool> {
        let Some(todo) = self.repository.get_by_id(id).await? else {
            return Ok(Envelope::error([TODO_NOT_FOUND]));
        };

        if !self.repository.delete(todo).await? {
            tracing::warn!(%id, "todo vanished before delete");
            return Ok(Envelope::error([DELETE_FAILED]));
        }
        tracing::info!(%id, "deleted todo");
        Ok(Envelope::success(true))
    }

    pub async fn mark_as_done(&self, id: Uuid) -> ServiceResult<bool> {
        let Some(todo) = self.repository.get_by_id(id).await? else {
            return Ok(Envelope::error([TODO_NOT_FOUND]));
        };

        if !self.repository.mark_as_done(todo).await? {
            tracing::warn!(%id, "todo vanished before completion");
            return Ok(Envelope::error([UPDATE_FAILED]));
        }
        tracing::info!(%id, "marked todo as done");
        Ok(Envelope::success(true))
    }
}

fn percent_in_range(percent: i32) -> bool {
    (0..=100).contains(&percent)
}

// First failing check wins; percentage is checked before expiry.
fn validate(percent: i32, expiry_date: DateTime<Utc>, now: DateTime<Utc>) -> Option<&'static str> {
    if !percent_in_range(percent) {
        return Some(INVALID_PERCENT);
    }
    if expiry_date < now {
        return Some(EXPIRY_IN_PAST);
    }
    None
}

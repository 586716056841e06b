use std::future::Future;

use uuid::Uuid;

use crate::error::AppError;
use crate::model::{IncomingWindow, Todo, MAX_TITLE_LEN};

mod in_memory;
mod sqlite;

pub use in_memory::InMemoryTodoRepository;
pub use sqlite::SqliteTodoRepository;

/// Storage primitives consumed by the todo service.
///
/// Write operations report `false` when the targeted row no longer exists.
pub trait TodoRepository: Send + Sync + 'static {
    fn get_all(&self) -> impl Future<Output = Result<Vec<Todo>, AppError>> + Send;

    fn get_by_id(&self, id: Uuid) -> impl Future<Output = Result<Option<Todo>, AppError>> + Send;

    fn get_incoming(
        &self,
        window: IncomingWindow,
    ) -> impl Future<Output = Result<Vec<Todo>, AppError>> + Send;

    fn add(&self, todo: Todo) -> impl Future<Output = Result<Uuid, AppError>> + Send;

    fn update(&self, todo: Todo) -> impl Future<Output = Result<bool, AppError>> + Send;

    fn delete(&self, todo: Todo) -> impl Future<Output = Result<bool, AppError>> + Send;

    fn mark_as_done(&self, todo: Todo) -> impl Future<Output = Result<bool, AppError>> + Send;

    fn set_completion(
        &self,
        todo: Todo,
        percent_complete: i32,
    ) -> impl Future<Output = Result<bool, AppError>> + Send;
}

pub(crate) fn ensure_title_fits(title: &str) -> Result<(), AppError> {
    let len = title.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(AppError::InvalidInput(format!(
            "title is {len} characters; at most {MAX_TITLE_LEN} are allowed"
        )));
    }
    Ok(())
}

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ensure_title_fits, TodoRepository};
use crate::error::AppError;
use crate::model::{IncomingWindow, Todo};

/// Map-backed repository for tests and throwaway servers.
#[derive(Clone, Debug, Default)]
pub struct InMemoryTodoRepository {
    todos: Arc<RwLock<HashMap<Uuid, Todo>>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.todos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.todos.read().await.is_empty()
    }

    async fn modify(&self, id: Uuid, apply: impl FnOnce(&mut Todo)) -> bool {
        let mut todos = self.todos.write().await;
        match todos.get_mut(&id) {
            Some(stored) => {
                apply(stored);
                true
            }
            None => false,
        }
    }
}

fn sorted(mut todos: Vec<Todo>) -> Vec<Todo> {
    todos.sort_by(|a, b| a.expiry_date.cmp(&b.expiry_date).then(a.id.cmp(&b.id)));
    todos
}

impl TodoRepository for InMemoryTodoRepository {
    async fn get_all(&self) -> Result<Vec<Todo>, AppError> {
        let todos = self.todos.read().await;
        Ok(sorted(todos.values().cloned().collect()))
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Todo>, AppError> {
        Ok(self.todos.read().await.get(&id).cloned())
    }

    async fn get_incoming(&self, window: IncomingWindow) -> Result<Vec<Todo>, AppError> {
        let now = Utc::now();
        let todos = self.todos.read().await;
        Ok(sorted(
            todos
                .values()
                .filter(|todo| window.contains(now, todo.expiry_date))
                .cloned()
                .collect(),
        ))
    }

    async fn add(&self, todo: Todo) -> Result<Uuid, AppError> {
        ensure_title_fits(&todo.title)?;
        let id = todo.id;
        self.todos.write().await.insert(id, todo);
        Ok(id)
    }

    async fn update(&self, todo: Todo) -> Result<bool, AppError> {
        ensure_title_fits(&todo.title)?;
        let id = todo.id;
        Ok(self.modify(id, |stored| *stored = todo).await)
    }

    async fn delete(&self, todo: Todo) -> Result<bool, AppError> {
        Ok(self.todos.write().await.remove(&todo.id).is_some())
    }

    async fn mark_as_done(&self, todo: Todo) -> Result<bool, AppError> {
        self.set_completion(todo, 100).await
    }

    async fn set_completion(&self, todo: Todo, percent_complete: i32) -> Result<bool, AppError> {
        Ok(self
            .modify(todo.id, |stored| stored.percent_complete = percent_complete)
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn set_completion_touches_only_percentage() {
        let repo = InMemoryTodoRepository::new();
        let todo = Todo::new(
            "Read".to_string(),
            "chapter 3".to_string(),
            Utc::now() + Duration::days(1),
            10,
        );
        repo.add(todo.clone()).await.expect("add");

        let mut stale = todo.clone();
        stale.title = "Ignored".to_string();
        assert!(repo.set_completion(stale, 70).await.expect("set"));

        let stored = repo.get_by_id(todo.id).await.expect("get").expect("present");
        assert_eq!(stored.title, "Read");
        assert_eq!(stored.percent_complete, 70);
    }

    #[tokio::test]
    async fn missing_rows_report_false() {
        let repo = InMemoryTodoRepository::new();
        let ghost = Todo::new("Ghost".to_string(), String::new(), Utc::now(), 0);
        assert!(!repo.update(ghost.clone()).await.expect("update"));
        assert!(!repo.delete(ghost.clone()).await.expect("delete"));
        assert!(!repo.mark_as_done(ghost).await.expect("done"));
        assert!(repo.is_empty().await);
    }
}

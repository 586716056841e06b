pub mod cli;
pub mod db;
pub mod entities;
pub mod envelope;
pub mod error;
pub mod http;
pub mod mapper;
pub mod model;
pub mod repository;
pub mod service;

pub use envelope::Envelope;
pub use error::AppError;
pub use model::{IncomingWindow, Todo, TodoChanges, TodoInput};
pub use repository::{InMemoryTodoRepository, SqliteTodoRepository, TodoRepository};
pub use service::TodoService;

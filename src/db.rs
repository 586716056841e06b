use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use url::Url;

use crate::entities::todo;
use crate::error::AppError;

pub fn resolve_db_path(data_dir: &Path) -> PathBuf {
    data_dir.join("todos.db")
}

pub fn ensure_parent_dir(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Lock file guarding a database against a second server process.
pub fn open_lock(path: &Path) -> Result<fd_lock::RwLock<File>, AppError> {
    let lock_path = path.with_extension("lock");
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .read(true)
        .write(true)
        .open(lock_path)?;
    Ok(fd_lock::RwLock::new(file))
}

pub async fn connect(path: &Path) -> Result<DatabaseConnection, AppError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    let mut url = Url::from_file_path(&absolute).map_err(|_| {
        AppError::Config(format!("invalid sqlite path: {}", absolute.display()))
    })?;
    url.set_query(Some("mode=rwc"));
    let sqlite_url = url.as_str().replacen("file://", "sqlite://", 1);
    tracing::debug!(url = %sqlite_url, "connecting to database");
    Ok(Database::connect(&sqlite_url).await?)
}

pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), AppError> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut todo_stmt = schema.create_table_from_entity(todo::Entity);
    todo_stmt.if_not_exists();
    db.execute(builder.build(&todo_stmt)).await?;

    let mut expiry_index = Index::create()
        .name("idx_todos_expiry_date")
        .table(todo::Entity)
        .col(todo::Column::ExpiryDate)
        .to_owned();
    expiry_index.if_not_exists();
    db.execute(builder.build(&expiry_index)).await?;

    tracing::debug!("database schema ready");
    Ok(())
}

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::{ensure_title_fits, TodoRepository};
use crate::entities::todo;
use crate::error::AppError;
use crate::model::{IncomingWindow, Todo};

#[derive(Clone, Debug)]
pub struct SqliteTodoRepository {
    db: DatabaseConnection,
}

impl SqliteTodoRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn write(&self, active: todo::ActiveModel) -> Result<bool, AppError> {
        match active.update(&self.db).await {
            Ok(_) => Ok(true),
            Err(sea_orm::DbErr::RecordNotFound(_)) | Err(sea_orm::DbErr::RecordNotUpdated) => {
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }
}

impl TodoRepository for SqliteTodoRepository {
    async fn get_all(&self) -> Result<Vec<Todo>, AppError> {
        let models = todo::Entity::find()
            .order_by_asc(todo::Column::ExpiryDate)
            .order_by_asc(todo::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Todo::from).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Todo>, AppError> {
        let model = todo::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Todo::from))
    }

    async fn get_incoming(&self, window: IncomingWindow) -> Result<Vec<Todo>, AppError> {
        let (start, end) = window.bounds(Utc::now());
        let models = todo::Entity::find()
            .filter(todo::Column::ExpiryDate.gte(start))
            .filter(todo::Column::ExpiryDate.lte(end))
            .order_by_asc(todo::Column::ExpiryDate)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Todo::from).collect())
    }

    async fn add(&self, todo: Todo) -> Result<Uuid, AppError> {
        ensure_title_fits(&todo.title)?;
        let id = todo.id;
        todo::Entity::insert(todo::ActiveModel::from(todo))
            .exec_without_returning(&self.db)
            .await?;
        Ok(id)
    }

    async fn update(&self, todo: Todo) -> Result<bool, AppError> {
        ensure_title_fits(&todo.title)?;
        self.write(todo::ActiveModel::from(todo)).await
    }

    async fn delete(&self, todo: Todo) -> Result<bool, AppError> {
        let result = todo::Entity::delete_by_id(todo.id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn mark_as_done(&self, todo: Todo) -> Result<bool, AppError> {
        self.set_completion(todo, 100).await
    }

    async fn set_completion(&self, todo: Todo, percent_complete: i32) -> Result<bool, AppError> {
        let active = todo::ActiveModel {
            id: Set(todo.id),
            percent_complete: Set(percent_complete),
            ..Default::default()
        };
        self.write(active).await
    }
}

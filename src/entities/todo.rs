use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::model::Todo;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub expiry_date: DateTimeUtc,
    pub percent_complete: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Todo {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            expiry_date: model.expiry_date,
            percent_complete: model.percent_complete,
        }
    }
}

impl From<Todo> for ActiveModel {
    fn from(todo: Todo) -> Self {
        Self {
            id: Set(todo.id),
            title: Set(todo.title),
            description: Set(todo.description),
            expiry_date: Set(todo.expiry_date),
            percent_complete: Set(todo.percent_complete),
        }
    }
}

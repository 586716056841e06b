use crate::model::{Todo, TodoChanges, TodoInput};

pub fn from_create_payload(input: TodoInput) -> Todo {
    Todo::new(
        input.title,
        input.description,
        input.expiry_date,
        input.percent_complete,
    )
}

pub fn apply_update_payload(changes: TodoChanges, target: &mut Todo) {
    target.title = changes.title;
    target.description = changes.description;
    target.expiry_date = changes.expiry_date;
    target.percent_complete = changes.percent_complete;
}

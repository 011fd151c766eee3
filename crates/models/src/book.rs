use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Status applied when a book is created without one.
pub const DEFAULT_STATUS: &str = "Not Read";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub author: String,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_new(title: &str, author: &str) -> Result<(), ModelError> {
    if title.trim().is_empty() || author.trim().is_empty() {
        return Err(ModelError::Validation("Title and author are required".into()));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    title: &str,
    author: &str,
    status: Option<&str>,
) -> Result<Model, ModelError> {
    validate_new(title, author)?;
    let am = ActiveModel {
        id: NotSet,
        title: Set(title.to_string()),
        author: Set(author.to_string()),
        status: Set(status.unwrap_or(DEFAULT_STATUS).to_string()),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_title_or_author() {
        assert!(validate_new("", "Jane Doe").is_err());
        assert!(validate_new("The Great Escape", "").is_err());
        assert!(validate_new("   ", "Jane Doe").is_err());
    }

    #[test]
    fn accepts_complete_input() {
        assert!(validate_new("The Great Escape", "Jane Doe").is_ok());
    }
}

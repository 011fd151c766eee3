use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_new(title: &str) -> Result<(), ModelError> {
    if title.trim().is_empty() {
        return Err(ModelError::Validation("Title is required".into()));
    }
    Ok(())
}

/// New tasks start incomplete; description defaults to the empty string.
pub async fn create(
    db: &DatabaseConnection,
    title: &str,
    description: Option<&str>,
) -> Result<Model, ModelError> {
    validate_new(title)?;
    let am = ActiveModel {
        id: NotSet,
        title: Set(title.to_string()),
        description: Set(description.unwrap_or_default().to_string()),
        completed: Set(false),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_title() {
        assert!(validate_new("").is_err());
        assert!(validate_new("  ").is_err());
    }

    #[test]
    fn accepts_title() {
        assert!(validate_new("Buy milk").is_ok());
    }
}

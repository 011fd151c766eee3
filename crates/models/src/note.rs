use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub content: String,
    // Assigned once at insert; updates never touch it
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_new(title: &str, content: &str) -> Result<(), ModelError> {
    if title.trim().is_empty() || content.trim().is_empty() {
        return Err(ModelError::Validation("Both title and content are required".into()));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, title: &str, content: &str) -> Result<Model, ModelError> {
    validate_new(title, content)?;
    let am = ActiveModel {
        id: NotSet,
        title: Set(title.to_string()),
        content: Set(content.to_string()),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_fields() {
        assert!(validate_new("", "body").is_err());
        assert!(validate_new("heading", "").is_err());
    }

    #[test]
    fn accepts_complete_input() {
        assert!(validate_new("heading", "body").is_ok());
    }
}

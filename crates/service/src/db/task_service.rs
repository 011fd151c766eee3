use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order, Set,
};
use serde::Serialize;

use crate::errors::ServiceError;
use crate::query;
use models::task::{self, Entity as Tasks};

#[derive(Debug, Serialize)]
pub struct TaskStats {
    pub total_tasks: u64,
    pub completed: u64,
    pub pending: u64,
    pub completion_rate: String,
}

pub async fn list_tasks(db: &DatabaseConnection) -> Result<Vec<task::Model>, ServiceError> {
    query::list_where::<Tasks>(db, None, None).await
}

pub async fn create_task(
    db: &DatabaseConnection,
    title: &str,
    description: Option<&str>,
) -> Result<task::Model, ServiceError> {
    // validations are in models::task
    let created = task::create(db, title, description).await?;
    Ok(created)
}

pub async fn get_task(db: &DatabaseConnection, id: i32) -> Result<Option<task::Model>, ServiceError> {
    let found = Tasks::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Update a task with optional fields; `created_at` is never touched.
pub async fn update_task(
    db: &DatabaseConnection,
    id: i32,
    title: Option<&str>,
    description: Option<&str>,
    completed: Option<bool>,
) -> Result<task::Model, ServiceError> {
    let current = Tasks::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let Some(existing) = current else { return Err(ServiceError::not_found("Task")); };
    let mut am: task::ActiveModel = existing.into();
    if let Some(t) = title { am.title = Set(t.to_string()); }
    if let Some(d) = description { am.description = Set(d.to_string()); }
    if let Some(c) = completed { am.completed = Set(c); }
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated)
}

pub async fn delete_task(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = Tasks::delete_by_id(id).exec(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

pub async fn search_tasks(db: &DatabaseConnection, q: &str) -> Result<Vec<task::Model>, ServiceError> {
    let cond = query::contains_any(&[task::Column::Title, task::Column::Description], q);
    query::list_where::<Tasks>(db, Some(cond), None).await
}

pub async fn tasks_by_completed(db: &DatabaseConnection, flag: bool) -> Result<Vec<task::Model>, ServiceError> {
    let cond = Condition::all().add(task::Column::Completed.eq(flag));
    query::list_where::<Tasks>(db, Some(cond), None).await
}

/// Flip one task's completed flag; returns the updated record.
pub async fn toggle_task(db: &DatabaseConnection, id: i32) -> Result<task::Model, ServiceError> {
    let current = Tasks::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let Some(existing) = current else { return Err(ServiceError::not_found("Task")); };
    let flipped = !existing.completed;
    let mut am: task::ActiveModel = existing.into();
    am.completed = Set(flipped);
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated)
}

pub async fn clear_completed(db: &DatabaseConnection) -> Result<u64, ServiceError> {
    let cond = Condition::all().add(task::Column::Completed.eq(true));
    query::delete_where::<Tasks>(db, Some(cond)).await
}

pub async fn random_task(db: &DatabaseConnection) -> Result<Option<task::Model>, ServiceError> {
    query::random_one::<Tasks>(db, None).await
}

/// Totals plus completed/pending split and a formatted completion percentage.
pub async fn task_stats(db: &DatabaseConnection) -> Result<TaskStats, ServiceError> {
    let total = query::count_where::<Tasks>(db, None).await?;
    let completed = query::count_where::<Tasks>(
        db,
        Some(Condition::all().add(task::Column::Completed.eq(true))),
    )
    .await?;
    let completion_rate = if total > 0 {
        format!("{:.1}%", completed as f64 / total as f64 * 100.0)
    } else {
        "0%".to_string()
    };
    Ok(TaskStats { total_tasks: total, completed, pending: total - completed, completion_rate })
}

/// Tasks created within the last `days` days, newest first.
pub async fn recent_tasks(db: &DatabaseConnection, days: i64) -> Result<Vec<task::Model>, ServiceError> {
    let cond = Condition::all().add(task::Column::CreatedAt.gte(query::days_ago(days)));
    query::list_where::<Tasks>(db, Some(cond), Some((task::Column::CreatedAt, Order::Desc))).await
}

/// Set every task's completed flag; returns the affected count.
pub async fn toggle_all(db: &DatabaseConnection, flag: bool) -> Result<u64, ServiceError> {
    query::set_where::<Tasks>(db, task::Column::Completed, Expr::value(flag), None).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, skip_db_tests};
    use uuid::Uuid;

    #[tokio::test]
    async fn task_defaults_and_partial_update() -> Result<(), anyhow::Error> {
        if skip_db_tests() { return Ok(()); }
        let db = get_db().await?;

        let title = format!("Buy milk {}", Uuid::new_v4().simple());
        let created = create_task(&db, &title, None).await?;
        assert_eq!(created.description, "");
        assert!(!created.completed);

        let fetched = get_task(&db, created.id).await?.unwrap();
        assert_eq!(fetched, created);

        // Only the supplied field changes
        let updated = update_task(&db, created.id, None, None, Some(true)).await?;
        assert!(updated.completed);
        assert_eq!(updated.title, title);
        assert_eq!(updated.description, "");
        assert_eq!(updated.created_at, created.created_at);

        delete_task(&db, created.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn toggle_flips_back_and_forth() -> Result<(), anyhow::Error> {
        if skip_db_tests() { return Ok(()); }
        let db = get_db().await?;

        let t = create_task(&db, "toggle me", None).await?;
        let once = toggle_task(&db, t.id).await?;
        assert!(once.completed);
        let twice = toggle_task(&db, t.id).await?;
        assert!(!twice.completed);

        delete_task(&db, t.id).await?;
        let gone = toggle_task(&db, t.id).await;
        assert!(matches!(gone, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn recent_window_filters_by_created_at() -> Result<(), anyhow::Error> {
        if skip_db_tests() { return Ok(()); }
        let db = get_db().await?;

        let marker = format!("recent {}", Uuid::new_v4().simple());
        let t = create_task(&db, &marker, None).await?;

        let within = recent_tasks(&db, 7).await?;
        assert!(within.iter().any(|x| x.id == t.id));

        // A zero-day window ends now, so a just-created task is inside it;
        // verify ordering instead: newest first
        if within.len() >= 2 {
            assert!(within[0].created_at >= within[1].created_at);
        }

        delete_task(&db, t.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn stats_rate_formats_one_decimal() -> Result<(), anyhow::Error> {
        if skip_db_tests() { return Ok(()); }
        let db = get_db().await?;

        let stats = task_stats(&db).await?;
        assert_eq!(stats.total_tasks, stats.completed + stats.pending);
        assert!(stats.completion_rate.ends_with('%'));
        Ok(())
    }
}

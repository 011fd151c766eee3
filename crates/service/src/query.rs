//! Query shapes shared by all three entity services.
//!
//! Every endpoint in the collection is one of a handful of recurring queries:
//! a case-insensitive substring filter, an equality filter, a temporal cutoff,
//! a predicate count, a bulk column update, a bulk delete, or a uniform random
//! pick. They are written once here, generic over the entity, and instantiated
//! by the per-entity modules in `db`.

use chrono::{Duration, Utc};
use rand::Rng;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::errors::ServiceError;

/// OR-combined `LOWER(col) LIKE '%needle%'` across the given columns.
/// Lowering both sides makes the match case-insensitive on any backend.
pub fn contains_any<C: ColumnTrait>(columns: &[C], needle: &str) -> Condition {
    let pattern = format!("%{}%", needle.to_lowercase());
    columns.iter().fold(Condition::any(), |cond, col| {
        cond.add(Expr::expr(Func::lower(Expr::col(*col))).like(pattern.clone()))
    })
}

/// Case-insensitive exact match on one column.
pub fn equals_ci<C: ColumnTrait>(column: C, value: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).eq(value.to_lowercase())
}

/// Timestamp cutoff for "within the last N days" windows.
pub fn days_ago(days: i64) -> chrono::DateTime<chrono::FixedOffset> {
    (Utc::now() - Duration::days(days)).into()
}

pub async fn list_where<E>(
    db: &DatabaseConnection,
    filter: Option<Condition>,
    order: Option<(E::Column, Order)>,
) -> Result<Vec<E::Model>, ServiceError>
where
    E: EntityTrait,
{
    let mut finder = E::find();
    if let Some(f) = filter {
        finder = finder.filter(f);
    }
    if let Some((col, ord)) = order {
        finder = finder.order_by(col, ord);
    }
    finder.all(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn count_where<E>(db: &DatabaseConnection, filter: Option<Condition>) -> Result<u64, ServiceError>
where
    E: EntityTrait,
    E::Model: Sync,
{
    let mut finder = E::find();
    if let Some(f) = filter {
        finder = finder.filter(f);
    }
    finder.count(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Set one column to a fixed value across all matching rows; returns the count.
pub async fn set_where<E>(
    db: &DatabaseConnection,
    column: E::Column,
    value: SimpleExpr,
    filter: Option<Condition>,
) -> Result<u64, ServiceError>
where
    E: EntityTrait,
{
    let mut update = E::update_many().col_expr(column, value);
    if let Some(f) = filter {
        update = update.filter(f);
    }
    let res = update.exec(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}

/// Delete all matching rows; returns the count. Zero matches is a success.
pub async fn delete_where<E>(db: &DatabaseConnection, filter: Option<Condition>) -> Result<u64, ServiceError>
where
    E: EntityTrait,
{
    let mut delete = E::delete_many();
    if let Some(f) = filter {
        delete = delete.filter(f);
    }
    let res = delete.exec(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}

/// Uniform pick over the full matching set; `None` when the set is empty.
pub async fn random_one<E>(
    db: &DatabaseConnection,
    filter: Option<Condition>,
) -> Result<Option<E::Model>, ServiceError>
where
    E: EntityTrait,
{
    let mut rows = list_where::<E>(db, filter, None).await?;
    if rows.is_empty() {
        return Ok(None);
    }
    let idx = rand::thread_rng().gen_range(0..rows.len());
    Ok(Some(rows.swap_remove(idx)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::book;
    use sea_orm::{DbBackend, QueryTrait};

    fn select_sql(condition: Condition) -> String {
        book::Entity::find()
            .filter(condition)
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn contains_any_lowers_both_sides() {
        let sql = select_sql(contains_any(&[book::Column::Title, book::Column::Author], "ESCAPE"));
        assert!(sql.contains("LOWER(\"title\") LIKE '%escape%'"), "sql was: {sql}");
        assert!(sql.contains("LOWER(\"author\") LIKE '%escape%'"), "sql was: {sql}");
        assert!(sql.contains(" OR "), "sql was: {sql}");
    }

    #[test]
    fn equals_ci_is_exact_not_substring() {
        let sql = select_sql(Condition::all().add(equals_ci(book::Column::Status, "Read")));
        assert!(sql.contains("LOWER(\"status\") = 'read'"), "sql was: {sql}");
        assert!(!sql.contains("LIKE"), "sql was: {sql}");
    }

    #[test]
    fn days_ago_moves_backwards() {
        let week = days_ago(7);
        let month = days_ago(30);
        assert!(month < week);
        assert!(week < Utc::now());
    }
}

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult,
    QuerySelect, Set,
};
use serde::Serialize;

use crate::errors::ServiceError;
use crate::query;
use models::book::{self, Entity as Books};

const READ_STATUS: &str = "Read";

#[derive(Debug, Serialize)]
pub struct BookStats {
    pub total_books: u64,
    pub read: u64,
    pub not_read: u64,
}

#[derive(Debug, Serialize, FromQueryResult)]
pub struct AuthorCount {
    pub author: String,
    pub book_count: i64,
}

pub async fn list_books(db: &DatabaseConnection) -> Result<Vec<book::Model>, ServiceError> {
    query::list_where::<Books>(db, None, None).await
}

/// Create a book after validation; status defaults to "Not Read".
pub async fn create_book(
    db: &DatabaseConnection,
    title: &str,
    author: &str,
    status: Option<&str>,
) -> Result<book::Model, ServiceError> {
    // validations are in models::book
    let created = book::create(db, title, author, status).await?;
    Ok(created)
}

pub async fn get_book(db: &DatabaseConnection, id: i32) -> Result<Option<book::Model>, ServiceError> {
    let found = Books::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Update a book with optional fields; unspecified fields stay as stored.
pub async fn update_book(
    db: &DatabaseConnection,
    id: i32,
    title: Option<&str>,
    author: Option<&str>,
    status: Option<&str>,
) -> Result<book::Model, ServiceError> {
    let current = Books::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let Some(existing) = current else { return Err(ServiceError::not_found("Book")); };
    let mut am: book::ActiveModel = existing.into();
    if let Some(t) = title { am.title = Set(t.to_string()); }
    if let Some(a) = author { am.author = Set(a.to_string()); }
    if let Some(s) = status { am.status = Set(s.to_string()); }
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated)
}

/// Delete a book; returns true if deleted.
pub async fn delete_book(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = Books::delete_by_id(id).exec(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

/// Case-insensitive substring search over title and author.
pub async fn search_books(db: &DatabaseConnection, q: &str) -> Result<Vec<book::Model>, ServiceError> {
    let cond = query::contains_any(&[book::Column::Title, book::Column::Author], q);
    query::list_where::<Books>(db, Some(cond), None).await
}

pub async fn books_by_author(db: &DatabaseConnection, author: &str) -> Result<Vec<book::Model>, ServiceError> {
    let cond = query::contains_any(&[book::Column::Author], author);
    query::list_where::<Books>(db, Some(cond), None).await
}

pub async fn books_by_status(db: &DatabaseConnection, status: &str) -> Result<Vec<book::Model>, ServiceError> {
    let cond = Condition::all().add(query::equals_ci(book::Column::Status, status));
    query::list_where::<Books>(db, Some(cond), None).await
}

/// Mark every book as read; returns the affected count.
pub async fn mark_all_read(db: &DatabaseConnection) -> Result<u64, ServiceError> {
    query::set_where::<Books>(db, book::Column::Status, Expr::value(READ_STATUS), None).await
}

/// Mark all books by an author (substring match) as read.
pub async fn mark_author_read(db: &DatabaseConnection, author: &str) -> Result<u64, ServiceError> {
    let cond = query::contains_any(&[book::Column::Author], author);
    query::set_where::<Books>(db, book::Column::Status, Expr::value(READ_STATUS), Some(cond)).await
}

pub async fn delete_by_author(db: &DatabaseConnection, author: &str) -> Result<u64, ServiceError> {
    let cond = query::contains_any(&[book::Column::Author], author);
    query::delete_where::<Books>(db, Some(cond)).await
}

/// Totals plus the read/unread split; `read` counts the exact "Read" status.
pub async fn book_stats(db: &DatabaseConnection) -> Result<BookStats, ServiceError> {
    let total = query::count_where::<Books>(db, None).await?;
    let read = query::count_where::<Books>(
        db,
        Some(Condition::all().add(book::Column::Status.eq(READ_STATUS))),
    )
    .await?;
    Ok(BookStats { total_books: total, read, not_read: total - read })
}

pub async fn random_book(db: &DatabaseConnection) -> Result<Option<book::Model>, ServiceError> {
    query::random_one::<Books>(db, None).await
}

/// Authors with how many books each, via group-by count.
pub async fn top_authors(db: &DatabaseConnection) -> Result<Vec<AuthorCount>, ServiceError> {
    Books::find()
        .select_only()
        .column(book::Column::Author)
        .column_as(book::Column::Id.count(), "book_count")
        .group_by(book::Column::Author)
        .into_model::<AuthorCount>()
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, skip_db_tests};
    use uuid::Uuid;

    #[tokio::test]
    async fn book_crud_service() -> Result<(), anyhow::Error> {
        if skip_db_tests() { return Ok(()); }
        let db = get_db().await?;

        let author = format!("svc author {}", Uuid::new_v4());
        let a = create_book(&db, "The Great Escape", &author, None).await?;
        assert_eq!(a.status, "Not Read");
        let found = get_book(&db, a.id).await?.unwrap();
        assert_eq!(found, a);

        // Partial update leaves the other fields alone
        let updated = update_book(&db, a.id, None, None, Some("Read")).await?;
        assert_eq!(updated.status, "Read");
        assert_eq!(updated.title, "The Great Escape");
        assert_eq!(updated.author, author);

        let deleted = delete_book(&db, a.id).await?;
        assert!(deleted);
        assert!(get_book(&db, a.id).await?.is_none());

        // Missing ids are reported, not silently dropped
        let err = update_book(&db, a.id, Some("x"), None, None).await;
        assert!(matches!(err, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() -> Result<(), anyhow::Error> {
        if skip_db_tests() { return Ok(()); }
        let db = get_db().await?;

        let marker = Uuid::new_v4().simple().to_string();
        let title = format!("The Great {marker} Escape");
        let a = create_book(&db, &title, "Jane Doe", None).await?;

        let by_lower = search_books(&db, &marker.to_lowercase()).await?;
        assert!(by_lower.iter().any(|b| b.id == a.id));
        let by_upper = search_books(&db, &marker.to_uppercase()).await?;
        assert!(by_upper.iter().any(|b| b.id == a.id));

        delete_book(&db, a.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn bulk_author_update_and_delete() -> Result<(), anyhow::Error> {
        if skip_db_tests() { return Ok(()); }
        let db = get_db().await?;

        let author = format!("Bulk Author {}", Uuid::new_v4().simple());
        create_book(&db, "one", &author, None).await?;
        create_book(&db, "two", &author, None).await?;

        let updated = mark_author_read(&db, &author).await?;
        assert_eq!(updated, 2);
        let rows = books_by_author(&db, &author).await?;
        assert!(rows.iter().all(|b| b.status == "Read"));

        let removed = delete_by_author(&db, &author).await?;
        assert_eq!(removed, 2);

        // A second pass matches nothing and still succeeds
        assert_eq!(delete_by_author(&db, &author).await?, 0);
        assert_eq!(mark_author_read(&db, &author).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn status_filter_is_exact_but_case_insensitive() -> Result<(), anyhow::Error> {
        if skip_db_tests() { return Ok(()); }
        let db = get_db().await?;

        let author = format!("Status Author {}", Uuid::new_v4().simple());
        let a = create_book(&db, "one", &author, Some("Reading")).await?;

        let hits = books_by_status(&db, "reading").await?;
        assert!(hits.iter().any(|b| b.id == a.id));
        // Substrings must not match
        let misses = books_by_status(&db, "read").await?;
        assert!(!misses.iter().any(|b| b.id == a.id));

        delete_book(&db, a.id).await?;
        Ok(())
    }
}

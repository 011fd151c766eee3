use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order, Set};
use serde::Serialize;

use crate::errors::ServiceError;
use crate::query;
use models::note::{self, Entity as Notes};

#[derive(Debug, Serialize)]
pub struct NoteWordCount {
    pub note_count: u64,
    pub total_words: u64,
    pub average_words: f64,
}

#[derive(Debug, Serialize)]
pub struct NoteSummary {
    pub note_count: u64,
    pub avg_characters: f64,
    pub total_characters: u64,
}

/// All notes, newest first.
pub async fn list_notes(db: &DatabaseConnection) -> Result<Vec<note::Model>, ServiceError> {
    query::list_where::<Notes>(db, None, Some((note::Column::CreatedAt, Order::Desc))).await
}

pub async fn create_note(db: &DatabaseConnection, title: &str, content: &str) -> Result<note::Model, ServiceError> {
    // validations are in models::note
    let created = note::create(db, title, content).await?;
    Ok(created)
}

pub async fn get_note(db: &DatabaseConnection, id: i32) -> Result<Option<note::Model>, ServiceError> {
    let found = Notes::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Update a note's title and/or content; `created_at` is immutable.
pub async fn update_note(
    db: &DatabaseConnection,
    id: i32,
    title: Option<&str>,
    content: Option<&str>,
) -> Result<note::Model, ServiceError> {
    let current = Notes::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let Some(existing) = current else { return Err(ServiceError::not_found("Note")); };
    let mut am: note::ActiveModel = existing.into();
    if let Some(t) = title { am.title = Set(t.to_string()); }
    if let Some(c) = content { am.content = Set(c.to_string()); }
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated)
}

pub async fn delete_note(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = Notes::delete_by_id(id).exec(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

pub async fn search_notes(db: &DatabaseConnection, q: &str) -> Result<Vec<note::Model>, ServiceError> {
    let cond = query::contains_any(&[note::Column::Title, note::Column::Content], q);
    query::list_where::<Notes>(db, Some(cond), None).await
}

/// Notes created within the last `days` days, newest first.
pub async fn recent_notes(db: &DatabaseConnection, days: i64) -> Result<Vec<note::Model>, ServiceError> {
    let cond = Condition::all().add(note::Column::CreatedAt.gte(query::days_ago(days)));
    query::list_where::<Notes>(db, Some(cond), Some((note::Column::CreatedAt, Order::Desc))).await
}

pub async fn sorted_notes(db: &DatabaseConnection, order: Order) -> Result<Vec<note::Model>, ServiceError> {
    query::list_where::<Notes>(db, None, Some((note::Column::CreatedAt, order))).await
}

/// Whitespace-separated word totals over every note's content.
pub async fn note_wordcount(db: &DatabaseConnection) -> Result<NoteWordCount, ServiceError> {
    let notes = query::list_where::<Notes>(db, None, None).await?;
    let note_count = notes.len() as u64;
    let total_words: u64 = notes.iter().map(|n| n.content.split_whitespace().count() as u64).sum();
    let average_words = if note_count > 0 { total_words as f64 / note_count as f64 } else { 0.0 };
    Ok(NoteWordCount { note_count, total_words, average_words })
}

pub async fn clear_all(db: &DatabaseConnection) -> Result<u64, ServiceError> {
    query::delete_where::<Notes>(db, None).await
}

pub async fn random_note(db: &DatabaseConnection) -> Result<Option<note::Model>, ServiceError> {
    query::random_one::<Notes>(db, None).await
}

/// Character totals over every note's content.
pub async fn note_summary(db: &DatabaseConnection) -> Result<NoteSummary, ServiceError> {
    let notes = query::list_where::<Notes>(db, None, None).await?;
    let note_count = notes.len() as u64;
    let total_characters: u64 = notes.iter().map(|n| n.content.chars().count() as u64).sum();
    let avg_characters = if note_count > 0 { total_characters as f64 / note_count as f64 } else { 0.0 };
    Ok(NoteSummary { note_count, avg_characters, total_characters })
}

/// Notes whose content contains the keyword, case-insensitively.
pub async fn notes_containing(db: &DatabaseConnection, keyword: &str) -> Result<Vec<note::Model>, ServiceError> {
    let cond = query::contains_any(&[note::Column::Content], keyword);
    query::list_where::<Notes>(db, Some(cond), None).await
}

/// Delete notes older than `days` days; returns the count.
pub async fn cleanup_old_notes(db: &DatabaseConnection, days: i64) -> Result<u64, ServiceError> {
    let cond = Condition::all().add(note::Column::CreatedAt.lt(query::days_ago(days)));
    query::delete_where::<Notes>(db, Some(cond)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, skip_db_tests};
    use uuid::Uuid;

    #[tokio::test]
    async fn note_crud_and_immutable_created_at() -> Result<(), anyhow::Error> {
        if skip_db_tests() { return Ok(()); }
        let db = get_db().await?;

        let a = create_note(&db, "first", "alpha beta").await?;
        let fetched = get_note(&db, a.id).await?.unwrap();
        assert_eq!(fetched, a);

        let updated = update_note(&db, a.id, None, Some("alpha beta gamma")).await?;
        assert_eq!(updated.content, "alpha beta gamma");
        assert_eq!(updated.title, "first");
        assert_eq!(updated.created_at, a.created_at);

        assert!(delete_note(&db, a.id).await?);
        assert!(get_note(&db, a.id).await?.is_none());
        let gone = update_note(&db, a.id, Some("x"), None).await;
        assert!(matches!(gone, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn wordcount_counts_whitespace_separated_words() -> Result<(), anyhow::Error> {
        if skip_db_tests() { return Ok(()); }
        let db = get_db().await?;

        let before = note_wordcount(&db).await?;
        let a = create_note(&db, "wc", "one two three four").await?;
        let b = create_note(&db, "wc", "five six").await?;

        let after = note_wordcount(&db).await?;
        assert_eq!(after.note_count, before.note_count + 2);
        assert_eq!(after.total_words, before.total_words + 6);

        delete_note(&db, a.id).await?;
        delete_note(&db, b.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn keyword_filter_matches_content_only() -> Result<(), anyhow::Error> {
        if skip_db_tests() { return Ok(()); }
        let db = get_db().await?;

        let marker = Uuid::new_v4().simple().to_string();
        let in_content = create_note(&db, "plain title", &format!("body with {marker}")).await?;
        let in_title = create_note(&db, &format!("title with {marker}"), "plain body").await?;

        let hits = notes_containing(&db, &marker.to_uppercase()).await?;
        assert!(hits.iter().any(|n| n.id == in_content.id));
        assert!(!hits.iter().any(|n| n.id == in_title.id));

        delete_note(&db, in_content.id).await?;
        delete_note(&db, in_title.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn cleanup_ignores_fresh_notes() -> Result<(), anyhow::Error> {
        if skip_db_tests() { return Ok(()); }
        let db = get_db().await?;

        let a = create_note(&db, "fresh", "kept").await?;
        // A 30-day cutoff cannot catch a note created just now
        let _ = cleanup_old_notes(&db, 30).await?;
        assert!(get_note(&db, a.id).await?.is_some());

        delete_note(&db, a.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn sorted_notes_respects_direction() -> Result<(), anyhow::Error> {
        if skip_db_tests() { return Ok(()); }
        let db = get_db().await?;

        let a = create_note(&db, "older", "x").await?;
        // Keep the two timestamps distinct
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        let b = create_note(&db, "newer", "y").await?;

        let desc = sorted_notes(&db, Order::Desc).await?;
        let pos = |id: i32, rows: &[note::Model]| rows.iter().position(|n| n.id == id);
        let (pa, pb) = (pos(a.id, &desc).unwrap(), pos(b.id, &desc).unwrap());
        assert!(pb < pa, "newer note should come first in desc order");

        let asc = sorted_notes(&db, Order::Asc).await?;
        let (pa, pb) = (pos(a.id, &asc).unwrap(), pos(b.id, &asc).unwrap());
        assert!(pa < pb, "older note should come first in asc order");

        delete_note(&db, a.id).await?;
        delete_note(&db, b.id).await?;
        Ok(())
    }
}

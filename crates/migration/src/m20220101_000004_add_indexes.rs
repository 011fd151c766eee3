use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Books: author is hit by by-author reads, bulk updates and deletes
        manager
            .create_index(
                Index::create()
                    .name("idx_books_author")
                    .table(Books::Table)
                    .col(Books::Author)
                    .to_owned(),
            )
            .await?;

        // Books: status equality filters and stats
        manager
            .create_index(
                Index::create()
                    .name("idx_books_status")
                    .table(Books::Table)
                    .col(Books::Status)
                    .to_owned(),
            )
            .await?;

        // Tasks: completed/pending splits and bulk clears
        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_completed")
                    .table(Tasks::Table)
                    .col(Tasks::Completed)
                    .to_owned(),
            )
            .await?;

        // Tasks and notes: created_at drives recency windows and cleanup
        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_created_at")
                    .table(Tasks::Table)
                    .col(Tasks::CreatedAt)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_notes_created_at")
                    .table(Notes::Table)
                    .col(Notes::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_books_author").table(Books::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_books_status").table(Books::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_tasks_completed").table(Tasks::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_tasks_created_at").table(Tasks::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_notes_created_at").table(Notes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Books { Table, Author, Status }

#[derive(DeriveIden)]
enum Tasks { Table, Completed, CreatedAt }

#[derive(DeriveIden)]
enum Notes { Table, CreatedAt }

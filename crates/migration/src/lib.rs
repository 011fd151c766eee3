//! Migrator registering table migrations in creation order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20220101_000001_create_books;
mod m20220101_000002_create_tasks;
mod m20220101_000003_create_notes;
mod m20220101_000004_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20220101_000001_create_books::Migration),
            Box::new(m20220101_000002_create_tasks::Migration),
            Box::new(m20220101_000003_create_notes::Migration),
            // Indexes should always be applied last
            Box::new(m20220101_000004_add_indexes::Migration),
        ]
    }
}

use anyhow::Result;
use dotenvy::dotenv;
use migration::MigratorTrait;
use rand::Rng;
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

const TITLE_WORDS: &[&str] = &[
    "quiet", "storm", "garden", "winter", "paper", "river", "copper", "orbit",
    "signal", "harbor", "midnight", "letters", "glass", "echo", "meridian",
];

const AUTHORS: &[&str] = &[
    "Jane Doe", "Frank Herbert", "Maya Chen", "Louis Okafor", "Ada Byrne",
    "Tomas Ruiz", "Hana Sato", "Peter Kovacs",
];

const BOOK_STATUSES: &[&str] = &["Not Read", "Reading", "Completed"];

fn init_logging() {
    dotenv().ok();
    common::utils::logging::init_logging_default();
}

fn pick<'a>(rng: &mut impl Rng, from: &[&'a str]) -> &'a str {
    from[rng.gen_range(0..from.len())]
}

fn sentence(rng: &mut impl Rng, words: usize) -> String {
    let picked: Vec<&str> = (0..words).map(|_| pick(rng, TITLE_WORDS)).collect();
    let mut s = picked.join(" ");
    if let Some(first) = s.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    s
}

fn paragraph(rng: &mut impl Rng, sentences: usize) -> String {
    (0..sentences)
        .map(|_| sentence(rng, rng.gen_range(5..10)))
        .collect::<Vec<_>>()
        .join(". ")
}

async fn seed_books(db: &DatabaseConnection, n: usize) -> Result<usize> {
    let mut rng = rand::thread_rng();
    for _ in 0..n {
        let title = sentence(&mut rng, 3);
        let author = pick(&mut rng, AUTHORS);
        let status = pick(&mut rng, BOOK_STATUSES);
        service::db::book_service::create_book(db, &title, author, Some(status)).await?;
    }
    Ok(n)
}

async fn seed_tasks(db: &DatabaseConnection, n: usize) -> Result<usize> {
    let mut rng = rand::thread_rng();
    for _ in 0..n {
        let title = sentence(&mut rng, 4);
        let description = paragraph(&mut rng, 2);
        let task = service::db::task_service::create_task(db, &title, Some(description.as_str())).await?;
        // Roughly a third of seeded tasks start out done
        if rng.gen_bool(0.3) {
            service::db::task_service::toggle_task(db, task.id).await?;
        }
    }
    Ok(n)
}

async fn seed_notes(db: &DatabaseConnection, n: usize) -> Result<usize> {
    let mut rng = rand::thread_rng();
    for _ in 0..n {
        let title = sentence(&mut rng, 4);
        let content = paragraph(&mut rng, 3);
        service::db::note_service::create_note(db, &title, &content).await?;
    }
    Ok(n)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    info!(service = "seed", event = "start", "seeding database");

    let db = models::db::connect().await?;

    // Dropping every table is destructive; only do it when explicitly asked
    if std::env::var("SEED_RESET").as_deref() == Ok("1") {
        warn!(service = "seed", event = "reset", "dropping all tables before seeding");
        migration::Migrator::down(&db, None).await?;
    }
    migration::Migrator::up(&db, None).await?;

    let books = seed_books(&db, 10).await?;
    let tasks = seed_tasks(&db, 15).await?;
    let notes = seed_notes(&db, 12).await?;

    info!(service = "seed", event = "done", books, tasks, notes, "seeding complete");
    Ok(())
}

use sea_orm::DatabaseConnection;

/// Shared request state: the database handle opened once at startup and
/// closed when the process exits.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

//! Runtime environment helpers
//!
//! Keeps binary crates importing `service::runtime` without depending
//! directly on `common`, `models` or the SeaORM repositories.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::residence::repo::seaorm::{SeaOrmBlocRepository, SeaOrmChambreRepository, SeaOrmFoyerRepository};
use crate::residence::BlocService;

pub type SeaOrmBlocService = BlocService<SeaOrmBlocRepository, SeaOrmChambreRepository, SeaOrmFoyerRepository>;

/// Install the tracing subscriber for the configured format.
pub fn init_logging(cfg: &configs::LoggingConfig) {
    common::utils::logging::init_logging(&cfg.format);
}

/// Connect to the configured database and apply pending migrations.
pub async fn connect(cfg: &configs::DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    models::db::connect_and_migrate(cfg).await
}

/// `BlocService` wired to SeaORM repositories sharing one pool.
pub fn bloc_service(db: &DatabaseConnection) -> SeaOrmBlocService {
    BlocService::new(
        Arc::new(SeaOrmBlocRepository { db: db.clone() }),
        Arc::new(SeaOrmChambreRepository { db: db.clone() }),
        Arc::new(SeaOrmFoyerRepository { db: db.clone() }),
    )
}

//! Storage layer - database entities and repositories

pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod repositories;

pub use migrations::Migrator;
pub use repositories::{
    SeaOrmCatalogRepository, SeaOrmGroupRepository, SeaOrmPriceRepository,
    SeaOrmProjectRepository, SeaOrmTemplateRepository,
};

use crate::domain::Repositories;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Build every SeaORM repository over one connection
pub fn repositories(db: Arc<DatabaseConnection>) -> Repositories {
    Repositories {
        catalog: Arc::new(SeaOrmCatalogRepository::new(db.clone())),
        prices: Arc::new(SeaOrmPriceRepository::new(db.clone())),
        groups: Arc::new(SeaOrmGroupRepository::new(db.clone())),
        templates: Arc::new(SeaOrmTemplateRepository::new(db.clone())),
        projects: Arc::new(SeaOrmProjectRepository::new(db)),
    }
}

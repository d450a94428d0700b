//! Module declaration and lifecycle implementation

use crate::api::native::NativeClient;
use crate::config::Config;
use crate::contract::FpackApi;
use crate::domain::Service;
use anyhow::Result;
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// F-Pack service module
#[derive(Default)]
pub struct FpackServiceModule {
    service: RwLock<Option<Arc<Service>>>,
}

impl FpackServiceModule {
    /// Build the domain service over SeaORM repositories
    pub fn init(&self, config: Config, db: Arc<DatabaseConnection>) -> Result<()> {
        let repos = crate::infra::storage::repositories(db);
        self.init_with(config, repos)
    }

    /// Build the domain service over any repository set
    pub fn init_with(&self, config: Config, repos: crate::domain::Repositories) -> Result<()> {
        if config.price_scale > 28 {
            anyhow::bail!("price_scale must be at most 28, got {}", config.price_scale);
        }

        let service = Arc::new(Service::new(repos, &config));
        *self.service.write() = Some(service);

        tracing::info!(
            price_scale = config.price_scale,
            validate_references = config.validate_references,
            "F-Pack service initialized"
        );
        Ok(())
    }

    /// Run database migrations
    pub async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        use crate::infra::storage::Migrator;
        use sea_orm_migration::MigratorTrait;

        Migrator::up(db, None).await?;
        tracing::info!("F-Pack service migrations completed");
        Ok(())
    }

    pub fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    /// In-process client for other modules
    pub fn client(&self) -> Result<Arc<dyn FpackApi>> {
        Ok(Arc::new(NativeClient::new(self.service()?)))
    }

    /// REST routes of the module
    pub fn router(&self) -> Result<axum::Router> {
        let service = self.service()?;
        tracing::info!("Registering F-Pack service REST routes");
        Ok(crate::api::rest::routes::register_routes(service))
    }
}

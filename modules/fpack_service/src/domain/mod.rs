//! Domain layer - business logic and services

pub mod quote;
pub mod repository;
pub mod service;
pub mod validation;

pub use repository::{
    CatalogRepository, GroupRepository, PriceRepository, ProjectRepository, Repositories,
    TemplateRepository,
};
pub use service::Service;

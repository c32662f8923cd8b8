pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::memory::{InMemoryDomains, InMemoryOrganizations, InMemoryRoutes};
pub use config::RegistryConfig;
pub use core::lifecycle::{DomainLifecycle, DomainUpdate};
pub use core::shared::SharedDomains;
pub use domain::model::{
    Domain, DomainId, DomainSummary, OrganizationId, Route, RouteId, Space, SpaceId,
};
pub use utils::error::{RegistryError, Result};

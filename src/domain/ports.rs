use crate::domain::model::{Domain, DomainId, OrganizationId, Route, SpaceId};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Persistence collaborator for registered domains.
///
/// `find_by_name` is case-insensitive. Mutations are expected to be
/// transactional; implementations surface serialization conflicts as
/// `RegistryError::TransactionConflict`.
#[async_trait]
pub trait DomainStore: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<Domain>>;
    async fn list(&self) -> Result<Vec<Domain>>;
    async fn insert(&self, domain: Domain) -> Result<()>;
    async fn update(&self, domain: Domain) -> Result<()>;
    async fn delete(&self, id: &DomainId) -> Result<()>;
    async fn domains_for_organization(&self, organization: &OrganizationId)
        -> Result<Vec<Domain>>;
    async fn domains_for_space(&self, space: &SpaceId) -> Result<Vec<Domain>>;
}

/// Route bookkeeping collaborator. The registry reads route existence and
/// host labels, and bulk-deletes on domain destruction; it does not own
/// route business logic.
#[async_trait]
pub trait RouteStore: Send + Sync {
    async fn routes_for_domain(&self, domain: &DomainId) -> Result<Vec<Route>>;

    /// Deletes every route scoped to the domain, returning how many were removed.
    async fn delete_by_domain(&self, domain: &DomainId) -> Result<usize>;
}

/// Identity collaborator for organizations and spaces.
#[async_trait]
pub trait OrganizationDirectory: Send + Sync {
    async fn organization_of_space(&self, space: &SpaceId) -> Result<Option<OrganizationId>>;
    async fn all_organizations(&self) -> Result<Vec<OrganizationId>>;
}

use crate::domain::model::{Domain, DomainId, OrganizationId, Route, RouteId, SpaceId};
use crate::domain::ports::{DomainStore, OrganizationDirectory, RouteStore};
use crate::utils::error::{RegistryError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

/// In-memory domain store. Mutation ordering is the lifecycle's concern;
/// this adapter only guarantees that individual operations are consistent.
#[derive(Default)]
pub struct InMemoryDomains {
    inner: RwLock<HashMap<DomainId, Domain>>,
}

impl InMemoryDomains {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DomainStore for InMemoryDomains {
    async fn find_by_name(&self, name: &str) -> Result<Option<Domain>> {
        let key = name.to_lowercase();
        let inner = self.inner.read().await;
        Ok(inner.values().find(|domain| domain.name_key() == key).cloned())
    }

    async fn list(&self) -> Result<Vec<Domain>> {
        let inner = self.inner.read().await;
        Ok(inner.values().cloned().collect())
    }

    async fn insert(&self, domain: Domain) -> Result<()> {
        let mut inner = self.inner.write().await;
        let key = domain.name_key();
        if inner.values().any(|existing| existing.name_key() == key) {
            return Err(RegistryError::DuplicateName { name: domain.name });
        }
        inner.insert(domain.id.clone(), domain);
        Ok(())
    }

    async fn update(&self, domain: Domain) -> Result<()> {
        let mut inner = self.inner.write().await;
        if !inner.contains_key(&domain.id) {
            return Err(RegistryError::DomainNotFound { name: domain.name });
        }
        inner.insert(domain.id.clone(), domain);
        Ok(())
    }

    async fn delete(&self, id: &DomainId) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.remove(id).is_none() {
            return Err(RegistryError::DomainNotFound {
                name: id.to_string(),
            });
        }
        Ok(())
    }

    async fn domains_for_organization(
        &self,
        organization: &OrganizationId,
    ) -> Result<Vec<Domain>> {
        let inner = self.inner.read().await;
        Ok(inner
            .values()
            .filter(|domain| {
                domain.owning_organization.as_ref() == Some(organization)
                    || domain.organizations.contains(organization)
            })
            .cloned()
            .collect())
    }

    async fn domains_for_space(&self, space: &SpaceId) -> Result<Vec<Domain>> {
        let inner = self.inner.read().await;
        Ok(inner
            .values()
            .filter(|domain| domain.spaces.contains(space))
            .cloned()
            .collect())
    }
}

/// In-memory route collaborator. Routes are created by the embedder (the
/// registry only reads and bulk-deletes them).
#[derive(Default)]
pub struct InMemoryRoutes {
    inner: RwLock<HashMap<RouteId, Route>>,
}

impl InMemoryRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, route: Route) {
        let mut inner = self.inner.write().await;
        inner.insert(route.id.clone(), route);
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[async_trait]
impl RouteStore for InMemoryRoutes {
    async fn routes_for_domain(&self, domain: &DomainId) -> Result<Vec<Route>> {
        let inner = self.inner.read().await;
        Ok(inner
            .values()
            .filter(|route| &route.domain_id == domain)
            .cloned()
            .collect())
    }

    async fn delete_by_domain(&self, domain: &DomainId) -> Result<usize> {
        let mut inner = self.inner.write().await;
        let before = inner.len();
        inner.retain(|_, route| &route.domain_id != domain);
        Ok(before - inner.len())
    }
}

/// In-memory organization and space directory.
#[derive(Default)]
pub struct InMemoryOrganizations {
    organizations: RwLock<HashSet<OrganizationId>>,
    spaces: RwLock<HashMap<SpaceId, OrganizationId>>,
}

impl InMemoryOrganizations {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_organization(&self, organization: OrganizationId) {
        let mut organizations = self.organizations.write().await;
        organizations.insert(organization);
    }

    pub async fn add_space(&self, space: SpaceId, organization: OrganizationId) {
        let mut spaces = self.spaces.write().await;
        spaces.insert(space, organization);
    }
}

#[async_trait]
impl OrganizationDirectory for InMemoryOrganizations {
    async fn organization_of_space(&self, space: &SpaceId) -> Result<Option<OrganizationId>> {
        let spaces = self.spaces.read().await;
        Ok(spaces.get(space).cloned())
    }

    async fn all_organizations(&self) -> Result<Vec<OrganizationId>> {
        let organizations = self.organizations.read().await;
        Ok(organizations.iter().cloned().collect())
    }
}

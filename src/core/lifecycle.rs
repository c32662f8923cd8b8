use crate::config::RegistryConfig;
use crate::core::guards::{
    check_organization_association, check_space_association, check_wildcard_transition,
};
use crate::core::name::validate_name;
use crate::core::overlap::check_overlap;
use crate::core::shared::SharedDomains;
use crate::domain::model::{Domain, DomainSummary, OrganizationId, Space, SpaceId};
use crate::domain::ports::{DomainStore, OrganizationDirectory, RouteStore};
use crate::utils::error::{RegistryError, Result};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Field changes accepted by [`DomainLifecycle::update`]. A wildcard change
/// is gated against route usage; absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct DomainUpdate {
    pub wildcard: Option<bool>,
}

/// Orchestrates create / update / association / destroy for registered
/// domains against the storage, route, and directory collaborators.
///
/// Every mutation serializes on one registry-wide lock held across its
/// read-check-write span, so concurrent creates cannot both pass the overlap
/// check, and a wildcard write cannot interleave with the route read it
/// depends on. Reads go straight to the store.
pub struct DomainLifecycle<D, R, O>
where
    D: DomainStore,
    R: RouteStore,
    O: OrganizationDirectory,
{
    domains: Arc<D>,
    routes: Arc<R>,
    organizations: Arc<O>,
    shared: SharedDomains<D>,
    write_lock: Arc<Mutex<()>>,
    max_name_length: Option<usize>,
    reserved_names: Vec<String>,
}

impl<D, R, O> DomainLifecycle<D, R, O>
where
    D: DomainStore,
    R: RouteStore,
    O: OrganizationDirectory,
{
    pub fn new(domains: Arc<D>, routes: Arc<R>, organizations: Arc<O>) -> Self {
        let write_lock = Arc::new(Mutex::new(()));
        let shared = SharedDomains::new(domains.clone(), write_lock.clone());
        Self {
            domains,
            routes,
            organizations,
            shared,
            write_lock,
            max_name_length: None,
            reserved_names: Vec::new(),
        }
    }

    /// Applies registry limits and seeds the default serving name from
    /// configuration.
    pub fn with_config(
        domains: Arc<D>,
        routes: Arc<R>,
        organizations: Arc<O>,
        config: &RegistryConfig,
    ) -> Self {
        let mut lifecycle = Self::new(domains, routes, organizations);
        lifecycle.max_name_length = config.max_name_length();
        lifecycle.reserved_names = config
            .reserved_names()
            .iter()
            .map(|name| name.to_lowercase())
            .collect();
        if let Some(name) = config.default_serving_name() {
            lifecycle.shared.set_default_serving_name(name);
        }
        lifecycle
    }

    /// The shared/system subset of the registry.
    pub fn shared(&self) -> &SharedDomains<D> {
        &self.shared
    }

    /// Registers a new domain. Unowned creation requires a privileged actor;
    /// owned creation associates the owning organization. Any initial
    /// wildcard value is accepted.
    pub async fn create(
        &self,
        name: &str,
        owner: Option<OrganizationId>,
        wildcard: bool,
        actor_is_privileged: bool,
    ) -> Result<Domain> {
        validate_name(name)?;
        self.check_limits(name)?;

        let Some(organization) = owner else {
            return self
                .shared
                .create_unowned(name, wildcard, actor_is_privileged)
                .await;
        };

        let _guard = self.write_lock.lock().await;

        if let Some(existing) = self.domains.find_by_name(name).await? {
            return Err(RegistryError::DuplicateName {
                name: existing.name,
            });
        }
        check_overlap(name, Some(&organization), &self.domains.list().await?)?;

        let domain = Domain::new(name, Some(organization.clone()), wildcard);
        self.domains.insert(domain.clone()).await?;
        tracing::info!(
            "Registered domain {} for organization {}",
            domain.name,
            organization
        );
        Ok(domain)
    }

    /// Applies field changes all-or-nothing; a rejected wildcard transition
    /// aborts the whole update.
    pub async fn update(&self, name: &str, changes: DomainUpdate) -> Result<Domain> {
        let _guard = self.write_lock.lock().await;
        let mut domain = self.require(name).await?;

        if let Some(wildcard) = changes.wildcard {
            let routes = self.routes.routes_for_domain(&domain.id).await?;
            check_wildcard_transition(&domain, wildcard, &routes)?;
            domain.wildcard = wildcard;
        }

        domain.updated_at = chrono::Utc::now();
        self.domains.update(domain.clone()).await?;
        tracing::debug!("Updated domain {}", domain.name);
        Ok(domain)
    }

    /// Attaches a space to the domain, subject to the association guard.
    pub async fn add_space(&self, name: &str, space_id: &SpaceId) -> Result<Domain> {
        let _guard = self.write_lock.lock().await;
        let mut domain = self.require(name).await?;

        let organization_id = self
            .organizations
            .organization_of_space(space_id)
            .await?
            .ok_or_else(|| RegistryError::SpaceNotFound {
                space: space_id.to_string(),
            })?;
        let space = Space {
            id: space_id.clone(),
            organization_id,
        };
        check_space_association(&domain, &space)?;

        if domain.spaces.insert(space.id) {
            domain.updated_at = chrono::Utc::now();
            self.domains.update(domain.clone()).await?;
        }
        Ok(domain)
    }

    /// Detaching a space is always permitted.
    pub async fn remove_space(&self, name: &str, space_id: &SpaceId) -> Result<Domain> {
        let _guard = self.write_lock.lock().await;
        let mut domain = self.require(name).await?;

        if domain.spaces.remove(space_id) {
            domain.updated_at = chrono::Utc::now();
            self.domains.update(domain.clone()).await?;
        }
        Ok(domain)
    }

    /// Associates an organization with the domain, subject to the
    /// association guard.
    pub async fn add_organization(
        &self,
        name: &str,
        organization: &OrganizationId,
    ) -> Result<Domain> {
        let _guard = self.write_lock.lock().await;
        let mut domain = self.require(name).await?;

        check_organization_association(&domain, organization)?;

        if domain.organizations.insert(organization.clone()) {
            domain.updated_at = chrono::Utc::now();
            self.domains.update(domain.clone()).await?;
        }
        Ok(domain)
    }

    /// Detaches an organization. The owning organization stays associated
    /// for the domain's whole lifetime.
    pub async fn remove_organization(
        &self,
        name: &str,
        organization: &OrganizationId,
    ) -> Result<Domain> {
        let _guard = self.write_lock.lock().await;
        let mut domain = self.require(name).await?;

        if domain.owning_organization.as_ref() == Some(organization) {
            return Err(RegistryError::InvalidOrganizationRelation {
                name: domain.name,
                organization: organization.to_string(),
            });
        }

        if domain.organizations.remove(organization) {
            domain.updated_at = chrono::Utc::now();
            self.domains.update(domain.clone()).await?;
        }
        Ok(domain)
    }

    /// Destroys the domain as one logical unit: delete every route under it,
    /// detach all organization and space associations, drop the record.
    /// Returns the number of routes removed.
    pub async fn destroy(&self, name: &str) -> Result<usize> {
        let _guard = self.write_lock.lock().await;
        let domain = self.require(name).await?;

        let removed_routes = self.routes.delete_by_domain(&domain.id).await?;
        // Associations live on the record; dropping it detaches every
        // organization and space listing derived from it.
        self.domains.delete(&domain.id).await?;

        tracing::info!(
            "Destroyed domain {} ({} routes removed, {} organizations and {} spaces detached)",
            domain.name,
            removed_routes,
            domain.organizations.len(),
            domain.spaces.len()
        );
        Ok(removed_routes)
    }

    /// Organization-creation hook; see
    /// [`SharedDomains::organization_created`].
    pub async fn organization_created(&self, organization: &OrganizationId) -> Result<()> {
        self.shared.organization_created(organization).await
    }

    pub async fn find(&self, name: &str) -> Result<Option<Domain>> {
        self.domains.find_by_name(name).await
    }

    /// Domains visible to an organization: owned plus associated.
    pub async fn list_for_organization(
        &self,
        organization: &OrganizationId,
    ) -> Result<Vec<Domain>> {
        self.domains.domains_for_organization(organization).await
    }

    /// The presentation record for API responses.
    pub async fn summary(&self, name: &str) -> Result<DomainSummary> {
        Ok(self.require(name).await?.summary())
    }

    async fn require(&self, name: &str) -> Result<Domain> {
        self.domains
            .find_by_name(name)
            .await?
            .ok_or_else(|| RegistryError::DomainNotFound {
                name: name.to_string(),
            })
    }

    fn check_limits(&self, name: &str) -> Result<()> {
        if let Some(max) = self.max_name_length {
            if name.len() > max {
                return Err(RegistryError::InvalidNameFormat {
                    name: name.to_string(),
                });
            }
        }
        if self.reserved_names.contains(&name.to_lowercase()) {
            return Err(RegistryError::InvalidNameFormat {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

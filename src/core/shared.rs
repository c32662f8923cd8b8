use crate::core::name::validate_name;
use crate::core::overlap::check_overlap;
use crate::domain::model::{Domain, OrganizationId};
use crate::domain::ports::DomainStore;
use crate::utils::error::{RegistryError, Result};
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;

/// The unowned (shared/system) subset of the registry: lookup, idempotent
/// creation, privileged direct creation, and the default serving name.
///
/// Shares the registry write lock with [`DomainLifecycle`], so shared-domain
/// creation serializes with every other mutation.
///
/// [`DomainLifecycle`]: crate::core::lifecycle::DomainLifecycle
pub struct SharedDomains<D: DomainStore> {
    domains: Arc<D>,
    write_lock: Arc<Mutex<()>>,
    // Process-wide setting with shared-read / exclusive-write discipline.
    default_serving_name: RwLock<Option<String>>,
}

impl<D: DomainStore> SharedDomains<D> {
    pub fn new(domains: Arc<D>, write_lock: Arc<Mutex<()>>) -> Self {
        Self {
            domains,
            write_lock,
            default_serving_name: RwLock::new(None),
        }
    }

    /// Returns the existing shared domain with this name, or validates and
    /// creates one with no owner and wildcard off. Idempotent.
    ///
    /// A freshly created shared domain starts with an empty organization
    /// set; organizations created afterwards pick it up through
    /// [`organization_created`](Self::organization_created). Existing
    /// organizations are never associated retroactively.
    pub async fn find_or_create(&self, name: &str) -> Result<Domain> {
        let _guard = self.write_lock.lock().await;

        if let Some(existing) = self.domains.find_by_name(name).await? {
            if existing.is_shared() {
                tracing::debug!("Shared domain {} already registered", existing.name);
                return Ok(existing);
            }
            // An owned registration occupies the name.
            return Err(RegistryError::DuplicateName {
                name: existing.name,
            });
        }

        self.create_shared_locked(name, false).await
    }

    /// Direct creation of a shared domain. Restricted to privileged actors.
    pub async fn create_unowned(
        &self,
        name: &str,
        wildcard: bool,
        actor_is_privileged: bool,
    ) -> Result<Domain> {
        if !actor_is_privileged {
            tracing::warn!("Unprivileged actor attempted to create shared domain {}", name);
            return Err(RegistryError::UnauthorizedSharedDomainCreation);
        }

        let _guard = self.write_lock.lock().await;

        if let Some(existing) = self.domains.find_by_name(name).await? {
            return Err(RegistryError::DuplicateName {
                name: existing.name,
            });
        }

        self.create_shared_locked(name, wildcard).await
    }

    /// Caller must hold the registry write lock.
    async fn create_shared_locked(&self, name: &str, wildcard: bool) -> Result<Domain> {
        validate_name(name)?;
        check_overlap(name, None, &self.domains.list().await?)?;

        let domain = Domain::new(name, None, wildcard);
        self.domains.insert(domain.clone()).await?;
        tracing::info!("Created shared domain {}", domain.name);
        Ok(domain)
    }

    pub async fn list_shared(&self) -> Result<Vec<Domain>> {
        let domains = self.domains.list().await?;
        Ok(domains.into_iter().filter(Domain::is_shared).collect())
    }

    /// Organization-creation hook: associates every currently shared domain
    /// with the new organization.
    pub async fn organization_created(&self, organization: &OrganizationId) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let shared: Vec<Domain> = self
            .domains
            .list()
            .await?
            .into_iter()
            .filter(Domain::is_shared)
            .collect();

        for mut domain in shared {
            if domain.organizations.insert(organization.clone()) {
                domain.updated_at = chrono::Utc::now();
                self.domains.update(domain).await?;
            }
        }

        tracing::debug!("Associated shared domains with organization {}", organization);
        Ok(())
    }

    pub fn set_default_serving_name(&self, name: &str) {
        let mut slot = self.default_serving_name.write().unwrap();
        *slot = Some(name.to_lowercase());
    }

    pub fn clear_default_serving_name(&self) {
        let mut slot = self.default_serving_name.write().unwrap();
        *slot = None;
    }

    pub fn default_serving_name(&self) -> Option<String> {
        self.default_serving_name.read().unwrap().clone()
    }

    /// The shared domain matching the configured default serving name, if
    /// the setting is present and such a domain is registered.
    pub async fn default_serving_domain(&self) -> Result<Option<Domain>> {
        let Some(name) = self.default_serving_name() else {
            return Ok(None);
        };

        match self.domains.find_by_name(&name).await? {
            Some(domain) if domain.is_shared() => Ok(Some(domain)),
            _ => Ok(None),
        }
    }
}

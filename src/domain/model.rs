use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DomainId(Uuid);

impl DomainId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DomainId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganizationId(Uuid);

impl OrganizationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OrganizationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpaceId(Uuid);

impl SpaceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SpaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteId(Uuid);

impl RouteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RouteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered DNS-style name with ownership and serving-flag state.
///
/// `name` keeps the case the caller registered; every comparison in the
/// registry runs on the lowercase form (see [`Domain::name_key`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    pub id: DomainId,
    pub name: String,
    pub owning_organization: Option<OrganizationId>,
    pub wildcard: bool,
    pub organizations: HashSet<OrganizationId>,
    pub spaces: HashSet<SpaceId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Domain {
    /// An owned domain always carries its owner in the association set.
    pub fn new(name: &str, owning_organization: Option<OrganizationId>, wildcard: bool) -> Self {
        let now = Utc::now();
        let mut organizations = HashSet::new();
        if let Some(owner) = &owning_organization {
            organizations.insert(owner.clone());
        }
        Self {
            id: DomainId::new(),
            name: name.to_string(),
            owning_organization,
            wildcard,
            organizations,
            spaces: HashSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Lowercase form used for uniqueness and overlap comparisons.
    pub fn name_key(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn is_shared(&self) -> bool {
        self.owning_organization.is_none()
    }

    pub fn summary(&self) -> DomainSummary {
        DomainSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            owning_organization_id: self.owning_organization.clone(),
        }
    }
}

/// Summary view of a domain used by API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainSummary {
    pub id: DomainId,
    pub name: String,
    pub owning_organization_id: Option<OrganizationId>,
}

/// A space belongs to exactly one organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    pub id: SpaceId,
    pub organization_id: OrganizationId,
}

/// A route scoped to a domain. An empty `host` serves the bare name;
/// a non-empty host depends on wildcard-style matching beneath it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub domain_id: DomainId,
    pub space_id: SpaceId,
    pub host: String,
}

impl Route {
    pub fn new(domain_id: DomainId, space_id: SpaceId, host: &str) -> Self {
        Self {
            id: RouteId::new(),
            domain_id,
            space_id,
            host: host.to_string(),
        }
    }

    pub fn is_hosted(&self) -> bool {
        !self.host.is_empty()
    }
}

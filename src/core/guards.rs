use crate::domain::model::{Domain, OrganizationId, Route, Space};
use crate::utils::error::{RegistryError, Result};

/// Gates a wildcard-flag transition against current route usage.
///
/// Disabling the flag while any route under the name carries a non-empty
/// host fails: such a route matches beneath the bare name and would be
/// stranded. Enabling always passes. Creation is never gated; this runs at
/// update time only.
pub fn check_wildcard_transition(domain: &Domain, new_value: bool, routes: &[Route]) -> Result<()> {
    if new_value {
        return Ok(());
    }

    if let Some(route) = routes.iter().find(|route| route.is_hosted()) {
        tracing::warn!(
            "Rejected wildcard disable on {}: hosted route '{}' still present",
            domain.name,
            route.host
        );
        return Err(RegistryError::WildcardInUse {
            name: domain.name.clone(),
        });
    }

    Ok(())
}

/// A space may attach to an owned domain only when it belongs to the owning
/// organization. Shared domains accept any space.
pub fn check_space_association(domain: &Domain, space: &Space) -> Result<()> {
    if let Some(owner) = &domain.owning_organization {
        if &space.organization_id != owner {
            return Err(RegistryError::InvalidSpaceRelation {
                name: domain.name.clone(),
                space: space.id.to_string(),
            });
        }
    }
    Ok(())
}

/// An owned domain may never be associated with a second organization;
/// shared domains accept any organization.
pub fn check_organization_association(
    domain: &Domain,
    organization: &OrganizationId,
) -> Result<()> {
    if let Some(owner) = &domain.owning_organization {
        if organization != owner {
            return Err(RegistryError::InvalidOrganizationRelation {
                name: domain.name.clone(),
                organization: organization.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SpaceId;

    fn routes_with_hosts(domain: &Domain, hosts: &[&str]) -> Vec<Route> {
        hosts
            .iter()
            .map(|host| Route::new(domain.id.clone(), SpaceId::new(), host))
            .collect()
    }

    #[test]
    fn test_wildcard_disable_blocked_by_hosted_route() {
        let domain = Domain::new("example.com", Some(OrganizationId::new()), true);
        let routes = routes_with_hosts(&domain, &["", "api"]);
        let result = check_wildcard_transition(&domain, false, &routes);
        assert!(matches!(result, Err(RegistryError::WildcardInUse { .. })));
    }

    #[test]
    fn test_wildcard_disable_allowed_with_bare_routes_only() {
        let domain = Domain::new("example.com", Some(OrganizationId::new()), true);
        let routes = routes_with_hosts(&domain, &["", ""]);
        assert!(check_wildcard_transition(&domain, false, &routes).is_ok());
    }

    #[test]
    fn test_wildcard_enable_always_allowed() {
        let domain = Domain::new("example.com", Some(OrganizationId::new()), false);
        let routes = routes_with_hosts(&domain, &["api", "www"]);
        assert!(check_wildcard_transition(&domain, true, &routes).is_ok());
    }

    #[test]
    fn test_space_from_other_organization_rejected() {
        let owner = OrganizationId::new();
        let domain = Domain::new("example.com", Some(owner), false);
        let space = Space {
            id: SpaceId::new(),
            organization_id: OrganizationId::new(),
        };
        let result = check_space_association(&domain, &space);
        assert!(matches!(
            result,
            Err(RegistryError::InvalidSpaceRelation { .. })
        ));
    }

    #[test]
    fn test_space_from_owning_organization_accepted() {
        let owner = OrganizationId::new();
        let domain = Domain::new("example.com", Some(owner.clone()), false);
        let space = Space {
            id: SpaceId::new(),
            organization_id: owner,
        };
        assert!(check_space_association(&domain, &space).is_ok());
    }

    #[test]
    fn test_shared_domain_accepts_any_space() {
        let domain = Domain::new("shared.example.com", None, false);
        let space = Space {
            id: SpaceId::new(),
            organization_id: OrganizationId::new(),
        };
        assert!(check_space_association(&domain, &space).is_ok());
    }

    #[test]
    fn test_second_organization_rejected_on_owned_domain() {
        let owner = OrganizationId::new();
        let domain = Domain::new("example.com", Some(owner), false);
        let result = check_organization_association(&domain, &OrganizationId::new());
        assert!(matches!(
            result,
            Err(RegistryError::InvalidOrganizationRelation { .. })
        ));
    }

    #[test]
    fn test_owner_and_shared_associations_accepted() {
        let owner = OrganizationId::new();
        let owned = Domain::new("example.com", Some(owner.clone()), false);
        assert!(check_organization_association(&owned, &owner).is_ok());

        let shared = Domain::new("shared.example.com", None, false);
        assert!(check_organization_association(&shared, &OrganizationId::new()).is_ok());
    }
}

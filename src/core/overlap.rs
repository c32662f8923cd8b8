use crate::core::name::suffix_chain;
use crate::domain::model::{Domain, OrganizationId};
use crate::utils::error::{RegistryError, Result};

/// Decides whether a candidate name may join the registered set.
///
/// Two names overlap when they are case-insensitively equal or when one is a
/// member of the other's suffix chain. Exact equality surfaces as
/// `DuplicateName`; a suffix-relation conflict surfaces as
/// `OverlappingDomain` unless both sides are owned by the same organization.
/// Shared (unowned) domains block everyone, and an unowned candidate is
/// blocked by every overlapping registration.
///
/// Stops at the first conflicting domain. The caller must hold the registry
/// write lock so the set cannot change between this check and the insert.
pub fn check_overlap(
    candidate: &str,
    candidate_owner: Option<&OrganizationId>,
    existing: &[Domain],
) -> Result<()> {
    let candidate_key = candidate.to_lowercase();
    let candidate_chain = suffix_chain(candidate);

    for domain in existing {
        let existing_key = domain.name_key();

        if existing_key == candidate_key {
            return Err(RegistryError::DuplicateName {
                name: domain.name.clone(),
            });
        }

        let related = candidate_chain.contains(&existing_key)
            || suffix_chain(&domain.name).contains(&candidate_key);
        if !related {
            continue;
        }

        let same_owner = match (candidate_owner, domain.owning_organization.as_ref()) {
            (Some(candidate_org), Some(existing_org)) => candidate_org == existing_org,
            _ => false,
        };

        if !same_owner {
            tracing::debug!(
                "Domain {} conflicts with registered domain {}",
                candidate,
                domain.name
            );
            return Err(RegistryError::OverlappingDomain {
                name: candidate.to_string(),
                existing: domain.name.clone(),
            });
        }
    }

    Ok(())
}

use domain_registry::domain::ports::DomainStore;
use domain_registry::{
    DomainLifecycle, InMemoryDomains, InMemoryOrganizations, InMemoryRoutes, OrganizationId,
};
use std::sync::Arc;

type Registry = DomainLifecycle<InMemoryDomains, InMemoryRoutes, InMemoryOrganizations>;

fn registry() -> (Arc<Registry>, Arc<InMemoryDomains>) {
    let domains = Arc::new(InMemoryDomains::new());
    let lifecycle = Arc::new(DomainLifecycle::new(
        domains.clone(),
        Arc::new(InMemoryRoutes::new()),
        Arc::new(InMemoryOrganizations::new()),
    ));
    (lifecycle, domains)
}

#[tokio::test]
async fn test_racing_overlapping_creates_admit_exactly_one() {
    let (lifecycle, domains) = registry();

    let parent = {
        let lifecycle = lifecycle.clone();
        tokio::spawn(async move {
            lifecycle
                .create("race.com", Some(OrganizationId::new()), false, false)
                .await
        })
    };
    let child = {
        let lifecycle = lifecycle.clone();
        tokio::spawn(async move {
            lifecycle
                .create("app.race.com", Some(OrganizationId::new()), false, false)
                .await
        })
    };

    let outcomes = [parent.await.unwrap(), child.await.unwrap()];
    let successes = outcomes.iter().filter(|outcome| outcome.is_ok()).count();

    assert_eq!(successes, 1);
    assert_eq!(domains.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_racing_identical_creates_admit_exactly_one() {
    let (lifecycle, domains) = registry();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let lifecycle = lifecycle.clone();
        handles.push(tokio::spawn(async move {
            lifecycle
                .create("race.com", Some(OrganizationId::new()), false, false)
                .await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(domains.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_racing_shared_find_or_create_yields_one_record() {
    let (lifecycle, domains) = registry();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let lifecycle = lifecycle.clone();
        handles.push(tokio::spawn(async move {
            lifecycle.shared().find_or_create("shared.io").await
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().id);
    }
    let first = ids[0].clone();
    assert!(ids.iter().all(|id| *id == first));
    assert_eq!(domains.list().await.unwrap().len(), 1);
}

pub mod guards;
pub mod lifecycle;
pub mod name;
pub mod overlap;
pub mod shared;

pub use crate::domain::model::{Domain, DomainSummary, OrganizationId, Route, Space, SpaceId};
pub use crate::domain::ports::{DomainStore, OrganizationDirectory, RouteStore};
pub use crate::utils::error::Result;

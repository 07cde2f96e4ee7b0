use crate::catalog::categories::GeCategory;
use crate::catalog::domain::CourseRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One named bucket of a degree's requirements, e.g. "Major Qualification".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementGroup {
    pub name: String,
    pub courses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeRequirements {
    pub degree: String,
    pub groups: Vec<RequirementGroup>,
}

/// Store for the most recent catalog sweep. Implementations own their interior
/// mutability; the service only ever replaces whole snapshots.
pub trait CatalogRepository: Send + Sync {
    fn replace_listings(&self, records: Vec<CourseRecord>) -> Result<(), RepositoryError>;

    /// Listings for one category; the `AnyGe` wildcard returns everything.
    fn listings(&self, category: GeCategory) -> Result<Vec<CourseRecord>, RepositoryError>;

    fn set_last_update(&self, at: DateTime<Utc>) -> Result<(), RepositoryError>;

    fn last_update(&self) -> Result<Option<DateTime<Utc>>, RepositoryError>;

    fn replace_requirements(
        &self,
        requirements: Vec<DegreeRequirements>,
    ) -> Result<(), RepositoryError>;

    fn degrees(&self) -> Result<Vec<String>, RepositoryError>;

    fn requirements(&self, degree: &str) -> Result<Option<DegreeRequirements>, RepositoryError>;
}

#[derive(Debug)]
pub enum RepositoryError {
    Unavailable(String),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::Unavailable(reason) => {
                write!(f, "catalog store unavailable: {}", reason)
            }
        }
    }
}

impl std::error::Error for RepositoryError {}

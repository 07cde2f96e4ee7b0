pub mod categories;
pub mod domain;
pub mod filter;
pub mod freshness;
pub mod links;
pub mod repository;
pub mod router;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use categories::{sort_categories, GeCategory};
pub use domain::{
    availability_color, classify_availability, classify_type, AvailabilityTier, ClassType,
    CourseRecord,
};
pub use filter::{filter_courses, AvailabilityFilter, ClassTypeFilter, FilterState};
pub use freshness::time_ago;
pub use repository::{CatalogRepository, DegreeRequirements, RepositoryError, RequirementGroup};
pub use router::catalog_router;
pub use service::{CatalogService, RefreshSummary, ServiceError};
pub use views::{course_views, CourseView};

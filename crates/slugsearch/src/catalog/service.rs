use crate::catalog::categories::{compare_categories, GeCategory};
use crate::catalog::filter::{filter_courses, FilterState};
use crate::catalog::repository::{CatalogRepository, DegreeRequirements, RepositoryError};
use crate::catalog::views::{course_views, CourseView};
use crate::client::{CatalogClient, ClientError};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Orchestrates the upstream client, the local store, and the filtering
/// engine. All catalog reads served to callers come out of the store; the
/// client is touched only by refresh sweeps and live class searches.
pub struct CatalogService<R, C> {
    repository: Arc<R>,
    client: Arc<C>,
    term: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSummary {
    pub categories: usize,
    pub courses: usize,
}

impl<R, C> CatalogService<R, C>
where
    R: CatalogRepository,
    C: CatalogClient,
{
    pub fn new(repository: Arc<R>, client: Arc<C>, term: impl Into<String>) -> Self {
        Self {
            repository,
            client,
            term: term.into(),
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Re-pulls every GE category and swaps the stored listings wholesale.
    /// A category that fails to fetch is skipped; the sweep only fails when
    /// no category at all could be pulled, so a flaky upstream can thin the
    /// snapshot but never wipe it.
    pub async fn refresh_listings(&self) -> Result<RefreshSummary, ServiceError> {
        let mut records = Vec::new();
        let mut fetched = 0usize;
        for category in GeCategory::ordered() {
            match self.client.fetch_courses(category).await {
                Ok(mut batch) => {
                    for record in &mut batch {
                        record.ge = Some(category);
                    }
                    records.append(&mut batch);
                    fetched += 1;
                }
                Err(err) => {
                    warn!(category = category.code(), "skipping category: {err}");
                }
            }
        }

        if fetched == 0 {
            return Err(ServiceError::RefreshFailed);
        }

        let courses = records.len();
        self.repository.replace_listings(records)?;
        self.repository.set_last_update(Utc::now())?;
        info!(categories = fetched, courses, "catalog listings refreshed");
        Ok(RefreshSummary {
            categories: fetched,
            courses,
        })
    }

    /// Re-pulls the degree list and each degree's requirement groups. Follows
    /// the same skip-on-failure policy as the listings sweep.
    pub async fn refresh_requirements(&self) -> Result<usize, ServiceError> {
        let degrees = self.client.fetch_degrees().await?;
        let mut all = Vec::with_capacity(degrees.len());
        for degree in degrees {
            match self.client.fetch_major_requirements(&degree).await {
                Ok(requirements) => all.push(requirements),
                Err(err) => warn!(%degree, "skipping degree: {err}"),
            }
        }
        let count = all.len();
        self.repository.replace_requirements(all)?;
        info!(degrees = count, "degree requirements refreshed");
        Ok(count)
    }

    /// Stored listings for a category, narrowed by the filter state.
    pub fn search(
        &self,
        category: GeCategory,
        filter: &FilterState,
    ) -> Result<Vec<CourseView>, ServiceError> {
        let listings = self.repository.listings(category)?;
        Ok(course_views(&filter_courses(&listings, filter)))
    }

    /// Live search against the registrar. A query containing a space is taken
    /// as subject + catalog number ("cse 13s" finds CSE 13S); anything else
    /// searches titles. Results run through the same filter pass as stored
    /// listings.
    pub async fn class_search(
        &self,
        query: &str,
        filter: &FilterState,
    ) -> Result<Vec<CourseView>, ServiceError> {
        let query = query.trim();
        let classes = match query.split_once(' ') {
            Some((subject, number)) => {
                self.client
                    .fetch_classes_by_subject(
                        &subject.to_uppercase(),
                        &number.trim().to_uppercase(),
                        &self.term,
                    )
                    .await?
            }
            None => {
                self.client
                    .fetch_classes_by_title(query, &self.term)
                    .await?
            }
        };
        Ok(course_views(&filter_courses(&classes, filter)))
    }

    pub fn degrees(&self) -> Result<Vec<String>, ServiceError> {
        Ok(self.repository.degrees()?)
    }

    /// Requirement groups for one degree, in presentation order.
    pub fn major_requirements(
        &self,
        degree: &str,
    ) -> Result<Option<DegreeRequirements>, ServiceError> {
        let Some(mut requirements) = self.repository.requirements(degree)? else {
            return Ok(None);
        };
        requirements
            .groups
            .sort_by(|a, b| compare_categories(&a.name, &b.name));
        Ok(Some(requirements))
    }

    pub fn last_updated(&self) -> Result<Option<DateTime<Utc>>, ServiceError> {
        Ok(self.repository.last_update()?)
    }
}

#[derive(Debug)]
pub enum ServiceError {
    Repository(RepositoryError),
    Client(ClientError),
    RefreshFailed,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Repository(err) => write!(f, "catalog store error: {}", err),
            ServiceError::Client(err) => write!(f, "upstream catalog error: {}", err),
            ServiceError::RefreshFailed => {
                write!(f, "no catalog category could be refreshed")
            }
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Repository(err) => Some(err),
            ServiceError::Client(err) => Some(err),
            ServiceError::RefreshFailed => None,
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        Self::Repository(value)
    }
}

impl From<ClientError> for ServiceError {
    fn from(value: ClientError) -> Self {
        Self::Client(value)
    }
}

use crate::catalog::categories::GeCategory;
use crate::catalog::domain::CourseRecord;
use crate::catalog::repository::{
    CatalogRepository, DegreeRequirements, RepositoryError, RequirementGroup,
};
use crate::client::{CatalogClient, ClientError};
use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use std::sync::Mutex;

pub(crate) fn in_person(
    code: &str,
    title: &str,
    instructor: &str,
    enrolled: u32,
    capacity: u32,
) -> CourseRecord {
    CourseRecord {
        code: code.to_string(),
        title: title.to_string(),
        instructor: instructor.to_string(),
        schedule: "MWF 10:40AM-11:45AM".to_string(),
        location: "Soc Sci 1 110".to_string(),
        start_time: "10:40AM".to_string(),
        enrolled,
        capacity,
        enroll_id: format!("9{:04}", enrolled),
        ge: None,
        link: String::new(),
    }
}

pub(crate) fn online(
    code: &str,
    title: &str,
    start_time: &str,
    enrolled: u32,
    capacity: u32,
) -> CourseRecord {
    CourseRecord {
        code: code.to_string(),
        title: title.to_string(),
        instructor: "Tantalo, Patrick".to_string(),
        schedule: "TuTh 01:30PM-03:05PM".to_string(),
        location: "Online".to_string(),
        start_time: start_time.to_string(),
        enrolled,
        capacity,
        enroll_id: format!("8{:04}", enrolled),
        ge: None,
        link: String::new(),
    }
}

pub(crate) fn tagged(mut record: CourseRecord, category: GeCategory) -> CourseRecord {
    record.ge = Some(category);
    record
}

pub(crate) fn cs_requirements() -> DegreeRequirements {
    DegreeRequirements {
        degree: "Computer Science B.S.".to_string(),
        groups: vec![
            RequirementGroup {
                name: "Electives".to_string(),
                courses: vec!["CSE 140".to_string(), "CSE 160".to_string()],
            },
            RequirementGroup {
                name: "Capstone".to_string(),
                courses: vec!["CSE 115D".to_string()],
            },
            RequirementGroup {
                name: "Major Qualification".to_string(),
                courses: vec!["CSE 12".to_string(), "CSE 16".to_string()],
            },
        ],
    }
}

#[derive(Default)]
pub(crate) struct FakeCatalogRepository {
    listings: Mutex<Vec<CourseRecord>>,
    last_update: Mutex<Option<DateTime<Utc>>>,
    requirements: Mutex<Vec<DegreeRequirements>>,
}

impl CatalogRepository for FakeCatalogRepository {
    fn replace_listings(&self, records: Vec<CourseRecord>) -> Result<(), RepositoryError> {
        *self.listings.lock().expect("listings mutex poisoned") = records;
        Ok(())
    }

    fn listings(&self, category: GeCategory) -> Result<Vec<CourseRecord>, RepositoryError> {
        let guard = self.listings.lock().expect("listings mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| category.is_wildcard() || record.ge == Some(category))
            .cloned()
            .collect())
    }

    fn set_last_update(&self, at: DateTime<Utc>) -> Result<(), RepositoryError> {
        *self.last_update.lock().expect("stamp mutex poisoned") = Some(at);
        Ok(())
    }

    fn last_update(&self) -> Result<Option<DateTime<Utc>>, RepositoryError> {
        Ok(*self.last_update.lock().expect("stamp mutex poisoned"))
    }

    fn replace_requirements(
        &self,
        requirements: Vec<DegreeRequirements>,
    ) -> Result<(), RepositoryError> {
        *self.requirements.lock().expect("requirements mutex poisoned") = requirements;
        Ok(())
    }

    fn degrees(&self) -> Result<Vec<String>, RepositoryError> {
        let guard = self.requirements.lock().expect("requirements mutex poisoned");
        Ok(guard.iter().map(|entry| entry.degree.clone()).collect())
    }

    fn requirements(&self, degree: &str) -> Result<Option<DegreeRequirements>, RepositoryError> {
        let guard = self.requirements.lock().expect("requirements mutex poisoned");
        Ok(guard.iter().find(|entry| entry.degree == degree).cloned())
    }
}

/// Client fake serving canned data, with selected categories rigged to fail.
#[derive(Default)]
pub(crate) struct ScriptedCatalogClient {
    pub(crate) courses: Vec<CourseRecord>,
    pub(crate) failing: Vec<GeCategory>,
    pub(crate) degrees: Vec<DegreeRequirements>,
    pub(crate) classes: Vec<CourseRecord>,
    pub(crate) last_update: Option<DateTime<Utc>>,
}

fn upstream_error() -> ClientError {
    ClientError::UnexpectedStatus {
        url: "scripted".to_string(),
        status: StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[async_trait]
impl CatalogClient for ScriptedCatalogClient {
    async fn fetch_courses(&self, category: GeCategory) -> Result<Vec<CourseRecord>, ClientError> {
        if self.failing.contains(&category) {
            return Err(upstream_error());
        }
        Ok(self
            .courses
            .iter()
            .filter(|record| record.ge == Some(category))
            .cloned()
            .collect())
    }

    async fn fetch_last_update(&self) -> Result<DateTime<Utc>, ClientError> {
        self.last_update.ok_or_else(upstream_error)
    }

    async fn fetch_degrees(&self) -> Result<Vec<String>, ClientError> {
        Ok(self.degrees.iter().map(|entry| entry.degree.clone()).collect())
    }

    async fn fetch_major_requirements(
        &self,
        degree: &str,
    ) -> Result<DegreeRequirements, ClientError> {
        self.degrees
            .iter()
            .find(|entry| entry.degree == degree)
            .cloned()
            .ok_or(ClientError::NotFound)
    }

    async fn fetch_classes_by_subject(
        &self,
        subject: &str,
        number: &str,
        _term: &str,
    ) -> Result<Vec<CourseRecord>, ClientError> {
        let code = format!("{subject}{number}");
        Ok(self
            .classes
            .iter()
            .filter(|record| record.code == code)
            .cloned()
            .collect())
    }

    async fn fetch_classes_by_title(
        &self,
        title: &str,
        _term: &str,
    ) -> Result<Vec<CourseRecord>, ClientError> {
        let needle = title.to_lowercase();
        Ok(self
            .classes
            .iter()
            .filter(|record| record.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use slugsearch::catalog::repository::{
    CatalogRepository, DegreeRequirements, RepositoryError, RequirementGroup,
};
use slugsearch::catalog::{CourseRecord, GeCategory};
use slugsearch::client::{CatalogClient, ClientError};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Whole-snapshot store backing the service; the refresher replaces its
/// contents wholesale, readers clone what they need.
#[derive(Default)]
pub(crate) struct InMemoryCatalogRepository {
    listings: Mutex<Vec<CourseRecord>>,
    last_update: Mutex<Option<DateTime<Utc>>>,
    requirements: Mutex<Vec<DegreeRequirements>>,
}

impl CatalogRepository for InMemoryCatalogRepository {
    fn replace_listings(&self, records: Vec<CourseRecord>) -> Result<(), RepositoryError> {
        *self.listings.lock().expect("catalog mutex poisoned") = records;
        Ok(())
    }

    fn listings(&self, category: GeCategory) -> Result<Vec<CourseRecord>, RepositoryError> {
        let guard = self.listings.lock().expect("catalog mutex poisoned");
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
        *self
            .requirements
            .lock()
            .expect("requirements mutex poisoned") = requirements;
        Ok(())
    }

    fn degrees(&self) -> Result<Vec<String>, RepositoryError> {
        let guard = self
            .requirements
            .lock()
            .expect("requirements mutex poisoned");
        Ok(guard.iter().map(|entry| entry.degree.clone()).collect())
    }

    fn requirements(&self, degree: &str) -> Result<Option<DegreeRequirements>, RepositoryError> {
        let guard = self
            .requirements
            .lock()
            .expect("requirements mutex poisoned");
        Ok(guard.iter().find(|entry| entry.degree == degree).cloned())
    }
}

/// Offline stand-in for the upstream APIs, used by the demo command and the
/// route tests. The data is a plausible slice of a fall-quarter catalog.
pub(crate) struct FixtureCatalogClient {
    seeded_at: DateTime<Utc>,
}

impl FixtureCatalogClient {
    pub(crate) fn new() -> Self {
        Self {
            seeded_at: Utc::now(),
        }
    }
}

fn fixture_record(
    category: Option<GeCategory>,
    code: &str,
    title: &str,
    instructor: &str,
    schedule: &str,
    location: &str,
    start_time: &str,
    enrolled: u32,
    capacity: u32,
    enroll_id: &str,
) -> CourseRecord {
    CourseRecord {
        code: code.to_string(),
        title: title.to_string(),
        instructor: instructor.to_string(),
        schedule: schedule.to_string(),
        location: location.to_string(),
        start_time: start_time.to_string(),
        enrolled,
        capacity,
        enroll_id: enroll_id.to_string(),
        ge: category,
        link: slugsearch::catalog::links::class_detail_url("2248", enroll_id),
    }
}

fn fixture_listings() -> Vec<CourseRecord> {
    vec![
        fixture_record(
            Some(GeCategory::Cc),
            "ANTH 130",
            "Political Anthropology",
            "Gomez, Maria",
            "TuTh 09:50AM-11:25AM",
            "Soc Sci 2 071",
            "09:50AM",
            58,
            75,
            "62549",
        ),
        fixture_record(
            Some(GeCategory::Cc),
            "HIS 12",
            "Early Modern Europe",
            "Burke, Nathan",
            "MWF 10:40AM-11:45AM",
            "Hum Lecture 206",
            "10:40AM",
            56,
            60,
            "62723",
        ),
        fixture_record(
            Some(GeCategory::Si),
            "PHYS 5A",
            "Introduction to Physics I",
            "Liu, Wei",
            "MWF 08:00AM-09:05AM",
            "Thim Lecture 3",
            "08:00AM",
            170,
            180,
            "61042",
        ),
        fixture_record(
            Some(GeCategory::Mf),
            "CSE 16",
            "Applied Discrete Mathematics",
            "Tantalo, Patrick",
            "TuTh 01:30PM-03:05PM",
            "Online",
            "01:30PM",
            95,
            120,
            "60881",
        ),
        fixture_record(
            Some(GeCategory::PeT),
            "CSE 80A",
            "Universal Access: Disability, Technology, and Society",
            "Kurniawan, Sri",
            "Asynchronous",
            "Online",
            "TBA",
            40,
            120,
            "61577",
        ),
        fixture_record(
            Some(GeCategory::Im),
            "MUSC 80N",
            "Music of the Beatles",
            "Pearson, Anna",
            "TuTh 11:40AM-01:15PM",
            "Music 131",
            "11:40AM",
            120,
            120,
            "62210",
        ),
    ]
}

fn fixture_classes() -> Vec<CourseRecord> {
    vec![
        fixture_record(
            None,
            "CSE13S",
            "Computer Systems and C Programming",
            "Dunne, Colleen",
            "MWF 01:20PM-02:25PM",
            "Online",
            "01:20PM",
            244,
            250,
            "30155",
        ),
        fixture_record(
            None,
            "CSE13E",
            "Embedded Systems and C Programming",
            "Petersen, Max",
            "TuTh 09:50AM-11:25AM",
            "Baskin Aud 101",
            "09:50AM",
            80,
            120,
            "30412",
        ),
        fixture_record(
            None,
            "MATH19B",
            "Calculus for Science, Engineering, and Mathematics II",
            "Sanchez, Elena",
            "MWF 09:20AM-10:25AM",
            "McHenry 1240",
            "09:20AM",
            118,
            120,
            "31007",
        ),
    ]
}

fn fixture_requirements() -> Vec<DegreeRequirements> {
    vec![
        DegreeRequirements {
            degree: "Computer Science B.S.".to_string(),
            groups: vec![
                RequirementGroup {
                    name: "Upper-Division Courses".to_string(),
                    courses: vec![
                        "CSE 101".to_string(),
                        "CSE 103".to_string(),
                        "CSE 120".to_string(),
                    ],
                },
                RequirementGroup {
                    name: "Major Qualification".to_string(),
                    courses: vec![
                        "CSE 12".to_string(),
                        "CSE 16".to_string(),
                        "CSE 30".to_string(),
                        "MATH 19B".to_string(),
                    ],
                },
                RequirementGroup {
                    name: "Disciplinary Communications (DC) Requirements".to_string(),
                    courses: vec!["CSE 115A".to_string(), "CSE 185E".to_string()],
                },
                RequirementGroup {
                    name: "Electives".to_string(),
                    courses: vec!["CSE 140".to_string(), "CSE 160".to_string()],
                },
            ],
        },
        DegreeRequirements {
            degree: "Economics B.A.".to_string(),
            groups: vec![
                RequirementGroup {
                    name: "Lower-Division Courses".to_string(),
                    courses: vec!["ECON 1".to_string(), "ECON 2".to_string()],
                },
                RequirementGroup {
                    name: "Major Qualification".to_string(),
                    courses: vec!["ECON 11A".to_string(), "ECON 11B".to_string()],
                },
            ],
        },
    ]
}

#[async_trait]
impl CatalogClient for FixtureCatalogClient {
    async fn fetch_courses(&self, category: GeCategory) -> Result<Vec<CourseRecord>, ClientError> {
        Ok(fixture_listings()
            .into_iter()
            .filter(|record| record.ge == Some(category))
            .collect())
    }

    async fn fetch_last_update(&self) -> Result<DateTime<Utc>, ClientError> {
        Ok(self.seeded_at)
    }

    async fn fetch_degrees(&self) -> Result<Vec<String>, ClientError> {
        Ok(fixture_requirements()
            .into_iter()
            .map(|entry| entry.degree)
            .collect())
    }

    async fn fetch_major_requirements(
        &self,
        degree: &str,
    ) -> Result<DegreeRequirements, ClientError> {
        fixture_requirements()
            .into_iter()
            .find(|entry| entry.degree == degree)
            .ok_or(ClientError::NotFound)
    }

    async fn fetch_classes_by_subject(
        &self,
        subject: &str,
        number: &str,
        _term: &str,
    ) -> Result<Vec<CourseRecord>, ClientError> {
        let code = format!("{subject}{number}");
        Ok(fixture_classes()
            .into_iter()
            .filter(|record| record.code == code)
            .collect())
    }

    async fn fetch_classes_by_title(
        &self,
        title: &str,
        _term: &str,
    ) -> Result<Vec<CourseRecord>, ClientError> {
        let needle = title.to_lowercase();
        Ok(fixture_classes()
            .into_iter()
            .filter(|record| record.title.to_lowercase().contains(&needle))
            .collect())
    }
}

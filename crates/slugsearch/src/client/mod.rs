pub mod dto;

use crate::catalog::categories::GeCategory;
use crate::catalog::domain::CourseRecord;
use crate::catalog::repository::{DegreeRequirements, RequirementGroup};
use crate::config::CatalogConfig;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("catalog request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("catalog endpoint {url} returned {status}")]
    UnexpectedStatus { url: String, status: StatusCode },

    #[error("not found upstream")]
    NotFound,

    #[error("invalid catalog URL: {0}")]
    BadUrl(String),
}

/// Everything the service needs from the outside world: the aggregated
/// catalog API (GE listings, degrees, last-update stamp) and the registrar's
/// live class-search API.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn fetch_courses(&self, category: GeCategory) -> Result<Vec<CourseRecord>, ClientError>;

    async fn fetch_last_update(&self) -> Result<DateTime<Utc>, ClientError>;

    async fn fetch_degrees(&self) -> Result<Vec<String>, ClientError>;

    async fn fetch_major_requirements(
        &self,
        degree: &str,
    ) -> Result<DegreeRequirements, ClientError>;

    async fn fetch_classes_by_subject(
        &self,
        subject: &str,
        number: &str,
        term: &str,
    ) -> Result<Vec<CourseRecord>, ClientError>;

    async fn fetch_classes_by_title(
        &self,
        title: &str,
        term: &str,
    ) -> Result<Vec<CourseRecord>, ClientError>;
}

#[derive(Debug)]
pub struct HttpCatalogClient {
    client: Client,
    api_base: Url,
    search_base: Url,
}

impl HttpCatalogClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, ClientError> {
        let api_base = Url::parse(&config.api_base_url)
            .map_err(|err| ClientError::BadUrl(format!("{}: {err}", config.api_base_url)))?;
        let search_base = Url::parse(&config.search_api_url)
            .map_err(|err| ClientError::BadUrl(format!("{}: {err}", config.search_api_url)))?;
        Ok(Self {
            client: Client::new(),
            api_base,
            search_base,
        })
    }

    fn api_url(&self, path: &str) -> Result<Url, ClientError> {
        self.api_base
            .join(path)
            .map_err(|err| ClientError::BadUrl(format!("{path}: {err}")))
    }

    /// `/api/courses/{degree}`, with slashes in the degree name flattened to
    /// dashes the way the upstream expects them.
    fn degree_url(&self, degree: &str) -> Result<Url, ClientError> {
        let mut url = self.api_url("/api/courses")?;
        let slug = degree.replace('/', "-");
        url.path_segments_mut()
            .map_err(|_| ClientError::BadUrl("catalog URL cannot be a base".to_string()))?
            .push(&slug);
        Ok(url)
    }

    fn search_url(&self, term: &str) -> Result<Url, ClientError> {
        let mut url = self.search_base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::BadUrl("search URL cannot be a base".to_string()))?
            .push(term);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound);
        }
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                url: url.to_string(),
                status,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_courses(&self, category: GeCategory) -> Result<Vec<CourseRecord>, ClientError> {
        let mut url = self.api_url("/api/courses")?;
        url.query_pairs_mut().append_pair("course", category.code());
        let body: dto::CoursesResponse = self.get_json(url).await?;
        Ok(body
            .data
            .into_iter()
            .map(dto::CourseDto::into_record)
            .collect())
    }

    async fn fetch_last_update(&self) -> Result<DateTime<Utc>, ClientError> {
        let url = self.api_url("/api/last_update")?;
        let body: dto::LastUpdateResponse = self.get_json(url).await?;
        Ok(body.last_update)
    }

    async fn fetch_degrees(&self) -> Result<Vec<String>, ClientError> {
        let url = self.api_url("/api/degrees")?;
        self.get_json(url).await
    }

    async fn fetch_major_requirements(
        &self,
        degree: &str,
    ) -> Result<DegreeRequirements, ClientError> {
        let url = self.degree_url(degree)?;
        let body: BTreeMap<String, Vec<String>> = self.get_json(url).await?;
        Ok(DegreeRequirements {
            degree: degree.to_string(),
            groups: body
                .into_iter()
                .map(|(name, courses)| RequirementGroup { name, courses })
                .collect(),
        })
    }

    async fn fetch_classes_by_subject(
        &self,
        subject: &str,
        number: &str,
        term: &str,
    ) -> Result<Vec<CourseRecord>, ClientError> {
        let mut url = self.search_url(term)?;
        url.query_pairs_mut()
            .append_pair("subject", subject)
            .append_pair("catalog_nbr", number);
        let body: dto::ClassSearchResponse = self.get_json(url).await?;
        // The registrar matches catalog numbers by prefix; keep exact hits only.
        Ok(body
            .classes
            .into_iter()
            .filter(|class| class.catalog_nbr == number)
            .map(dto::ClassDto::into_record)
            .collect())
    }

    async fn fetch_classes_by_title(
        &self,
        title: &str,
        term: &str,
    ) -> Result<Vec<CourseRecord>, ClientError> {
        let mut url = self.search_url(term)?;
        url.query_pairs_mut().append_pair("title", title);
        let body: dto::ClassSearchResponse = self.get_json(url).await?;
        Ok(body
            .classes
            .into_iter()
            .map(dto::ClassDto::into_record)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config() -> CatalogConfig {
        CatalogConfig {
            api_base_url: "http://127.0.0.1:5001".to_string(),
            search_api_url: "https://example.edu/class_list/v1".to_string(),
            term: "2248".to_string(),
            refresh_interval: Duration::from_secs(60),
        }
    }

    #[test]
    fn degree_url_flattens_and_encodes_the_name() {
        let client = HttpCatalogClient::new(&config()).expect("client builds");
        let url = client
            .degree_url("Art & Design: Games/Playable Media B.A.")
            .expect("degree URL builds");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:5001/api/courses/Art%20&%20Design:%20Games-Playable%20Media%20B.A."
        );
    }

    #[test]
    fn search_url_appends_the_term_segment() {
        let client = HttpCatalogClient::new(&config()).expect("client builds");
        let url = client.search_url("2248").expect("search URL builds");
        assert_eq!(url.as_str(), "https://example.edu/class_list/v1/2248");
    }

    #[test]
    fn rejects_unparseable_base_urls() {
        let mut bad = config();
        bad.api_base_url = "not a url".to_string();
        let err = HttpCatalogClient::new(&bad).expect_err("bad base URL is rejected");
        assert!(matches!(err, ClientError::BadUrl(_)));
    }
}

use crate::catalog::categories::GeCategory;
use crate::catalog::domain::{parse_count, CourseRecord, ONLINE_LOCATION, TBA_START_TIME};
use crate::catalog::links::class_detail_url;
use chrono::{DateTime, Utc};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
pub(crate) struct CoursesResponse {
    #[serde(default)]
    pub(crate) data: Vec<CourseDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LastUpdateResponse {
    pub(crate) last_update: DateTime<Utc>,
}

/// Row served by the aggregated catalog API. Enrollment is packed as a
/// "current/capacity" string and the delivery mode arrives pre-tagged.
#[derive(Debug, Deserialize)]
pub(crate) struct CourseDto {
    #[serde(default)]
    pub(crate) ge: Option<GeCategory>,
    pub(crate) code: String,
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) instructor: String,
    #[serde(default)]
    pub(crate) link: String,
    #[serde(default, deserialize_with = "stringly")]
    pub(crate) class_count: String,
    #[serde(default, deserialize_with = "stringly")]
    pub(crate) enroll_num: String,
    #[serde(default)]
    pub(crate) class_type: String,
    #[serde(default)]
    pub(crate) schedule: String,
    #[serde(default)]
    pub(crate) location: String,
}

impl CourseDto {
    pub(crate) fn into_record(self) -> CourseRecord {
        let (enrolled, capacity) = split_class_count(&self.class_count);
        // Catalog rows carry no start time, only a precomputed mode tag;
        // normalize the tag back into the sentinels the classifier reads.
        let (location, start_time) = match self.class_type.as_str() {
            "Asynchronous Online" => (ONLINE_LOCATION.to_string(), TBA_START_TIME.to_string()),
            "Synchronous Online" => (ONLINE_LOCATION.to_string(), String::new()),
            _ => (self.location, String::new()),
        };
        CourseRecord {
            code: self.code,
            title: self.name,
            instructor: self.instructor,
            schedule: self.schedule,
            location,
            start_time,
            enrolled,
            capacity,
            enroll_id: self.enroll_num,
            ge: self.ge,
            link: self.link,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClassSearchResponse {
    #[serde(default)]
    pub(crate) classes: Vec<ClassDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InstructorDto {
    #[serde(default)]
    pub(crate) name: String,
}

/// Row served by the registrar's live class-search API.
#[derive(Debug, Deserialize)]
pub(crate) struct ClassDto {
    #[serde(default)]
    pub(crate) strm: String,
    #[serde(default, deserialize_with = "stringly")]
    pub(crate) class_nbr: String,
    pub(crate) subject: String,
    pub(crate) catalog_nbr: String,
    #[serde(default)]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) title_long: String,
    #[serde(default)]
    pub(crate) start_time: String,
    #[serde(default)]
    pub(crate) end_time: String,
    #[serde(default)]
    pub(crate) location: String,
    #[serde(default)]
    pub(crate) meeting_days: String,
    #[serde(default, deserialize_with = "stringly")]
    pub(crate) enrl_capacity: String,
    #[serde(default, deserialize_with = "stringly")]
    pub(crate) enrl_total: String,
    #[serde(default)]
    pub(crate) instructors: Vec<InstructorDto>,
}

impl ClassDto {
    pub(crate) fn into_record(self) -> CourseRecord {
        let title = if self.title_long.is_empty() {
            self.title
        } else {
            self.title_long
        };
        let instructor = self
            .instructors
            .first()
            .map(|instructor| instructor.name.clone())
            .unwrap_or_default();
        CourseRecord {
            code: format!("{}{}", self.subject, self.catalog_nbr),
            title,
            instructor,
            schedule: format!(
                "{} {}-{}",
                self.meeting_days, self.start_time, self.end_time
            ),
            location: self.location,
            start_time: self.start_time,
            enrolled: parse_count(&self.enrl_total),
            capacity: parse_count(&self.enrl_capacity),
            enroll_id: self.class_nbr.clone(),
            ge: None,
            link: class_detail_url(&self.strm, &self.class_nbr),
        }
    }
}

/// Both upstreams are loose about numeric fields: the same column can arrive
/// as a JSON string or a number depending on the row.
fn stringly<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(value) => Ok(value),
        serde_json::Value::Number(value) => Ok(value.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

fn split_class_count(raw: &str) -> (u32, u32) {
    match raw.split_once('/') {
        Some((current, total)) => (parse_count(current), parse_count(total)),
        None => (parse_count(raw), 0),
    }
}

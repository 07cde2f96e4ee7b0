use crate::catalog::categories::GeCategory;
use crate::catalog::domain::{
    availability_color, AvailabilityTier, ClassType, CourseRecord,
};
use crate::catalog::links::professor_search_url;
use serde::Serialize;

/// Display-ready projection of a section: the raw record plus every derived
/// field the presentation layer needs, recomputed at build time.
#[derive(Debug, Clone, Serialize)]
pub struct CourseView {
    pub code: String,
    pub title: String,
    pub instructor: String,
    pub schedule: String,
    pub location: String,
    pub enroll_id: String,
    pub link: String,
    /// Instructor-review search page, when an instructor is listed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ge: Option<GeCategory>,
    pub class_type: ClassType,
    pub class_type_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<AvailabilityTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_label: Option<&'static str>,
    pub color: &'static str,
    /// "remaining/capacity", the string shown beside each listing.
    pub spots_left: String,
}

impl CourseView {
    pub fn from_record(record: &CourseRecord) -> Self {
        let class_type = record.class_type();
        let availability = record.availability();
        Self {
            code: record.code.clone(),
            title: record.title.clone(),
            instructor: record.instructor.clone(),
            schedule: record.schedule.clone(),
            location: record.location.clone(),
            enroll_id: record.enroll_id.clone(),
            link: record.link.clone(),
            instructor_link: (!record.instructor.is_empty())
                .then(|| professor_search_url(&record.instructor)),
            ge: record.ge,
            class_type,
            class_type_label: class_type.label(),
            availability,
            availability_label: availability.map(AvailabilityTier::label),
            color: availability_color(record.enrolled, record.capacity),
            spots_left: format!("{}/{}", record.remaining(), record.capacity),
        }
    }
}

pub fn course_views(records: &[CourseRecord]) -> Vec<CourseView> {
    records.iter().map(CourseView::from_record).collect()
}

use crate::catalog::domain::{AvailabilityTier, ClassType, CourseRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Availability narrowing selected by the user; `All` disables the predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityFilter {
    #[default]
    All,
    Low,
    Medium,
    High,
}

impl AvailabilityFilter {
    pub const fn tier(self) -> Option<AvailabilityTier> {
        match self {
            Self::All => None,
            Self::Low => Some(AvailabilityTier::Low),
            Self::Medium => Some(AvailabilityTier::Medium),
            Self::High => Some(AvailabilityTier::High),
        }
    }
}

impl FromStr for AvailabilityFilter {
    type Err = FilterParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(FilterParseError {
                kind: "availability",
                value: value.to_string(),
            }),
        }
    }
}

/// Delivery-mode narrowing; `All` disables the predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassTypeFilter {
    #[default]
    All,
    InPerson,
    SynchronousOnline,
    AsynchronousOnline,
}

impl ClassTypeFilter {
    pub const fn class_type(self) -> Option<ClassType> {
        match self {
            Self::All => None,
            Self::InPerson => Some(ClassType::InPerson),
            Self::SynchronousOnline => Some(ClassType::SynchronousOnline),
            Self::AsynchronousOnline => Some(ClassType::AsynchronousOnline),
        }
    }
}

impl FromStr for ClassTypeFilter {
    type Err = FilterParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "in_person" => Ok(Self::InPerson),
            "synchronous_online" => Ok(Self::SynchronousOnline),
            "asynchronous_online" => Ok(Self::AsynchronousOnline),
            _ => Err(FilterParseError {
                kind: "class type",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug)]
pub struct FilterParseError {
    kind: &'static str,
    value: String,
}

impl fmt::Display for FilterParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} filter '{}'", self.kind, self.value)
    }
}

impl std::error::Error for FilterParseError {}

/// Everything the user can currently narrow a listing by. Fresh screens start
/// from `FilterState::default()`; nothing here survives a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub search: String,
    pub availability: AvailabilityFilter,
    pub class_type: ClassTypeFilter,
}

impl FilterState {
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty()
            && self.availability == AvailabilityFilter::All
            && self.class_type == ClassTypeFilter::All
    }
}

/// Single pass over a listing: derive each section's delivery mode, then keep
/// the sections matching every active predicate. Input order is preserved and
/// the inputs are never mutated, so re-running with the same arguments always
/// reproduces the same output.
pub fn filter_courses(records: &[CourseRecord], filter: &FilterState) -> Vec<CourseRecord> {
    let needle = filter.search.to_lowercase();
    records
        .iter()
        .filter(|record| {
            matches_availability(record, filter.availability)
                && matches_class_type(record, filter.class_type)
                && matches_search(record, &needle)
        })
        .cloned()
        .collect()
}

fn matches_availability(record: &CourseRecord, filter: AvailabilityFilter) -> bool {
    let Some(wanted) = filter.tier() else {
        return true;
    };
    // Anyone narrowing by availability is looking for a seat; full and
    // over-enrolled sections drop out before tier matching.
    if record.remaining() <= 0 {
        return false;
    }
    record.availability() == Some(wanted)
}

fn matches_class_type(record: &CourseRecord, filter: ClassTypeFilter) -> bool {
    match filter.class_type() {
        Some(wanted) => record.class_type() == wanted,
        None => true,
    }
}

fn matches_search(record: &CourseRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    [
        &record.code,
        &record.title,
        &record.instructor,
        &record.schedule,
        &record.location,
    ]
    .into_iter()
    .any(|field| field.to_lowercase().contains(needle))
}

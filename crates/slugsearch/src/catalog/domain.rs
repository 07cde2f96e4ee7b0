use crate::catalog::categories::GeCategory;
use serde::{Deserialize, Serialize};

/// Location value the registrar uses for sections with no physical room.
pub const ONLINE_LOCATION: &str = "Online";
/// Start-time value for sections with no scheduled meeting time.
pub const TBA_START_TIME: &str = "TBA";

pub const COLOR_LOW: &str = "#FF0000";
pub const COLOR_MEDIUM: &str = "#FFA500";
pub const COLOR_HIGH: &str = "#00B16A";
pub const COLOR_NEUTRAL: &str = "#808080";

const LOW_SEAT_CEILING: i64 = 10;
const MEDIUM_SEAT_CEILING: i64 = 25;

/// Seat-availability bucket derived from remaining capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityTier {
    Low,
    Medium,
    High,
}

impl AvailabilityTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Low => COLOR_LOW,
            Self::Medium => COLOR_MEDIUM,
            Self::High => COLOR_HIGH,
        }
    }

    pub(crate) const fn from_remaining(remaining: i64) -> Self {
        if remaining < LOW_SEAT_CEILING {
            Self::Low
        } else if remaining < MEDIUM_SEAT_CEILING {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// Delivery mode of a section, derived from its location and start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassType {
    InPerson,
    SynchronousOnline,
    AsynchronousOnline,
}

impl ClassType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::InPerson => "In Person",
            Self::SynchronousOnline => "Synchronous Online",
            Self::AsynchronousOnline => "Asynchronous Online",
        }
    }
}

/// One section of a course, unified across the catalog and class-search feeds.
///
/// The delivery mode and availability tier are intentionally not stored here;
/// both are recomputed from the raw fields on every pass so a re-fetch can
/// never disagree with a stale derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub code: String,
    pub title: String,
    pub instructor: String,
    pub schedule: String,
    pub location: String,
    pub start_time: String,
    pub enrolled: u32,
    pub capacity: u32,
    /// Registrar enrollment number, the identity key within a listing.
    pub enroll_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ge: Option<GeCategory>,
    pub link: String,
}

impl CourseRecord {
    /// Seats still open. Negative when a section is over-enrolled.
    pub fn remaining(&self) -> i64 {
        i64::from(self.capacity) - i64::from(self.enrolled)
    }

    pub fn class_type(&self) -> ClassType {
        classify_type(&self.location, &self.start_time)
    }

    pub fn availability(&self) -> Option<AvailabilityTier> {
        classify_availability(self.enrolled, self.capacity)
    }
}

/// Buckets a section by remaining seats: fewer than 10 is Low, fewer than 25
/// is Medium, everything else High. A section with no reported capacity has
/// no tier at all.
pub fn classify_availability(enrolled: u32, capacity: u32) -> Option<AvailabilityTier> {
    if capacity == 0 {
        return None;
    }
    Some(AvailabilityTier::from_remaining(
        i64::from(capacity) - i64::from(enrolled),
    ))
}

/// Tier color for display, falling back to neutral when there is no data.
pub fn availability_color(enrolled: u32, capacity: u32) -> &'static str {
    match classify_availability(enrolled, capacity) {
        Some(tier) => tier.color(),
        None => COLOR_NEUTRAL,
    }
}

pub fn classify_type(location: &str, start_time: &str) -> ClassType {
    if location != ONLINE_LOCATION {
        ClassType::InPerson
    } else if start_time == TBA_START_TIME {
        ClassType::AsynchronousOnline
    } else {
        ClassType::SynchronousOnline
    }
}

/// Enrollment counts arrive as decimal strings; leading digits are taken and
/// anything unparseable counts as zero, never an error.
pub fn parse_count(raw: &str) -> u32 {
    let trimmed = raw.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_matches_seat_thresholds() {
        assert_eq!(classify_availability(5, 10), Some(AvailabilityTier::Low));
        assert_eq!(classify_availability(0, 20), Some(AvailabilityTier::Medium));
        assert_eq!(classify_availability(0, 30), Some(AvailabilityTier::High));
    }

    #[test]
    fn availability_is_boundary_exact() {
        // 9 remaining is Low, 10 is Medium; 24 remaining is Medium, 25 is High.
        assert_eq!(classify_availability(91, 100), Some(AvailabilityTier::Low));
        assert_eq!(
            classify_availability(90, 100),
            Some(AvailabilityTier::Medium)
        );
        assert_eq!(
            classify_availability(76, 100),
            Some(AvailabilityTier::Medium)
        );
        assert_eq!(classify_availability(75, 100), Some(AvailabilityTier::High));
    }

    #[test]
    fn zero_capacity_has_no_tier_and_neutral_color() {
        assert_eq!(classify_availability(12, 0), None);
        assert_eq!(availability_color(12, 0), COLOR_NEUTRAL);
    }

    #[test]
    fn over_enrolled_sections_classify_low() {
        assert_eq!(classify_availability(35, 30), Some(AvailabilityTier::Low));
        assert_eq!(availability_color(35, 30), COLOR_LOW);
    }

    #[test]
    fn class_type_follows_location_and_start_time() {
        assert_eq!(classify_type("Online", "TBA"), ClassType::AsynchronousOnline);
        assert_eq!(
            classify_type("Online", "10:00"),
            ClassType::SynchronousOnline
        );
        assert_eq!(classify_type("Room 101", "10:00"), ClassType::InPerson);
        // A TBA start in a physical room is still in person.
        assert_eq!(classify_type("Thim Lecture 3", "TBA"), ClassType::InPerson);
    }

    #[test]
    fn parse_count_coerces_garbage_to_zero() {
        assert_eq!(parse_count("34"), 34);
        assert_eq!(parse_count(" 34 "), 34);
        assert_eq!(parse_count("34 seats"), 34);
        assert_eq!(parse_count("TBA"), 0);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("-5"), 0);
    }
}

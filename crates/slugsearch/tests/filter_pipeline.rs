use chrono::{Duration, TimeZone, Utc};
use slugsearch::catalog::{
    classify_availability, classify_type, filter_courses, sort_categories, time_ago,
    AvailabilityFilter, AvailabilityTier, ClassType, ClassTypeFilter, CourseRecord, FilterState,
};

fn section(code: &str, location: &str, start_time: &str, enrolled: u32, capacity: u32) -> CourseRecord {
    CourseRecord {
        code: code.to_string(),
        title: format!("{code} lecture"),
        instructor: "Mackey, Wes".to_string(),
        schedule: "MWF 08:00AM-09:05AM".to_string(),
        location: location.to_string(),
        start_time: start_time.to_string(),
        enrolled,
        capacity,
        enroll_id: format!("7{enrolled:04}"),
        ge: None,
        link: String::new(),
    }
}

#[test]
fn availability_tiers_are_total_over_positive_capacities() {
    for capacity in 1..=40u32 {
        for enrolled in 0..=capacity + 10 {
            let tier = classify_availability(enrolled, capacity)
                .expect("positive capacity always classifies");
            let remaining = capacity as i64 - enrolled as i64;
            let expected = if remaining < 10 {
                AvailabilityTier::Low
            } else if remaining < 25 {
                AvailabilityTier::Medium
            } else {
                AvailabilityTier::High
            };
            assert_eq!(tier, expected, "enrolled {enrolled} of {capacity}");
        }
    }
}

#[test]
fn modality_is_a_function_of_location_and_start_time_only() {
    assert_eq!(classify_type("Online", "TBA"), ClassType::AsynchronousOnline);
    assert_eq!(classify_type("Online", "10:00"), ClassType::SynchronousOnline);
    assert_eq!(classify_type("Room 101", "10:00"), ClassType::InPerson);
    // The sentinel is exact; a lower-case "online" is a room name, not a mode.
    assert_eq!(classify_type("online", "TBA"), ClassType::InPerson);
}

#[test]
fn pipeline_is_pure_and_stable() {
    let listing = vec![
        section("CSE 101", "Eng Aud", "09:20AM", 195, 200),
        section("CSE 102", "Online", "TBA", 10, 60),
        section("CSE 103", "Online", "02:40PM", 58, 60),
        section("CSE 107", "Baskin 169", "11:40AM", 30, 30),
    ];
    let before = listing.clone();

    let filter = FilterState {
        search: "cse 10".to_string(),
        availability: AvailabilityFilter::All,
        class_type: ClassTypeFilter::All,
    };
    let filtered = filter_courses(&listing, &filter);

    assert_eq!(listing, before, "inputs are never mutated");
    assert_eq!(filtered, listing, "a matching search keeps order and content");

    let narrowed = FilterState {
        search: String::new(),
        availability: AvailabilityFilter::Low,
        class_type: ClassTypeFilter::All,
    };
    let once = filter_courses(&listing, &narrowed);
    let twice = filter_courses(&once, &narrowed);
    assert_eq!(once, twice, "the pass is idempotent");
    let codes: Vec<&str> = once.iter().map(|r| r.code.as_str()).collect();
    // CSE 107 is full and drops out of every availability narrowing.
    assert_eq!(codes, vec!["CSE 101", "CSE 103"]);
}

#[test]
fn category_ordering_prefers_the_pinned_list() {
    let sorted = sort_categories(vec![
        "Electives".to_string(),
        "Major Qualification".to_string(),
        "Zebra".to_string(),
    ]);
    assert_eq!(sorted, vec!["Major Qualification", "Electives", "Zebra"]);
}

#[test]
fn freshness_boundaries_match_the_display_rules() {
    let now = Utc
        .with_ymd_and_hms(2024, 9, 26, 12, 0, 0)
        .single()
        .expect("valid instant");
    assert_eq!(time_ago(Some(now - Duration::seconds(60)), now), "1m ago");
    assert_eq!(time_ago(Some(now - Duration::seconds(3600)), now), "1h ago");
    assert_eq!(time_ago(None, now), "Invalid date");
}

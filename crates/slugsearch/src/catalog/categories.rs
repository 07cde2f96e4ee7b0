use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// General-education categories as the registrar codes them, plus the `AnyGe`
/// wildcard the catalog API accepts in place of a concrete category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeCategory {
    Cc,
    Er,
    Im,
    Mf,
    Si,
    Sr,
    Ta,
    PeE,
    PeH,
    PeT,
    PrE,
    PrC,
    PrS,
    C1,
    C2,
    AnyGe,
}

impl GeCategory {
    /// The concrete categories, in the order a full refresh sweeps them.
    pub const fn ordered() -> [Self; 15] {
        [
            Self::Cc,
            Self::Er,
            Self::Im,
            Self::Mf,
            Self::Si,
            Self::Sr,
            Self::Ta,
            Self::PeE,
            Self::PeH,
            Self::PeT,
            Self::PrE,
            Self::PrC,
            Self::PrS,
            Self::C1,
            Self::C2,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Cc => "CC",
            Self::Er => "ER",
            Self::Im => "IM",
            Self::Mf => "MF",
            Self::Si => "SI",
            Self::Sr => "SR",
            Self::Ta => "TA",
            Self::PeE => "PE-E",
            Self::PeH => "PE-H",
            Self::PeT => "PE-T",
            Self::PrE => "PR-E",
            Self::PrC => "PR-C",
            Self::PrS => "PR-S",
            Self::C1 => "C1",
            Self::C2 => "C2",
            Self::AnyGe => "AnyGE",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Cc => "Cross-Cultural Analysis",
            Self::Er => "Ethnicity and Race",
            Self::Im => "Interpreting Arts and Media",
            Self::Mf => "Mathematical and Formal Reasoning",
            Self::Si => "Scientific Inquiry",
            Self::Sr => "Statistical Reasoning",
            Self::Ta => "Textual Analysis",
            Self::PeE => "Perspectives: Environmental Awareness",
            Self::PeH => "Perspectives: Human Behavior",
            Self::PeT => "Perspectives: Technology and Society",
            Self::PrE => "Practice: Collaborative Endeavor",
            Self::PrC => "Practice: Creative Process",
            Self::PrS => "Practice: Service Learning",
            Self::C1 => "Composition 1",
            Self::C2 => "Composition 2",
            Self::AnyGe => "All Courses",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .chain(std::iter::once(Self::AnyGe))
            .find(|category| category.code() == code)
    }

    pub const fn is_wildcard(self) -> bool {
        matches!(self, Self::AnyGe)
    }
}

impl fmt::Display for GeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// The wire form is the registrar code ("PE-E"), which the derive-style
// renames cannot express.
impl Serialize for GeCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for GeCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Self::from_code(&code)
            .ok_or_else(|| D::Error::custom(format!("unknown GE category code '{code}'")))
    }
}

/// Requirement-group names pinned to the front of any degree listing; the
/// order here is the order they render.
pub const REQUIREMENT_GROUP_ORDER: [&str; 5] = [
    "Major Qualification",
    "Lower-Division Courses",
    "Upper-Division Courses",
    "Electives",
    "Disciplinary Communications (DC) Requirements",
];

/// Orders category names for presentation: pinned names first, in pinned
/// order, then everything else lexicographically.
pub fn sort_categories(mut names: Vec<String>) -> Vec<String> {
    names.sort_by(|a, b| compare_categories(a, b));
    names
}

pub(crate) fn compare_categories(a: &str, b: &str) -> Ordering {
    let rank = |name: &str| REQUIREMENT_GROUP_ORDER.iter().position(|n| *n == name);
    match (rank(a), rank(b)) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn pinned_names_come_first_in_pinned_order() {
        let sorted = sort_categories(names(&["Electives", "Major Qualification", "Zebra"]));
        assert_eq!(
            sorted,
            names(&["Major Qualification", "Electives", "Zebra"])
        );
    }

    #[test]
    fn unpinned_names_fall_back_to_lexicographic_order() {
        let sorted = sort_categories(names(&["Writing", "Capstone", "Breadth"]));
        assert_eq!(sorted, names(&["Breadth", "Capstone", "Writing"]));
    }

    #[test]
    fn full_pinned_set_keeps_declared_order() {
        let mut shuffled = names(&REQUIREMENT_GROUP_ORDER);
        shuffled.reverse();
        let sorted = sort_categories(shuffled);
        assert_eq!(sorted, names(&REQUIREMENT_GROUP_ORDER));
    }

    #[test]
    fn category_codes_round_trip() {
        for category in GeCategory::ordered() {
            assert_eq!(GeCategory::from_code(category.code()), Some(category));
        }
        assert_eq!(GeCategory::from_code("AnyGE"), Some(GeCategory::AnyGe));
        assert_eq!(GeCategory::from_code("XX"), None);
    }

    #[test]
    fn serde_uses_registrar_codes() {
        let encoded = serde_json::to_string(&GeCategory::PeE).expect("category serializes");
        assert_eq!(encoded, "\"PE-E\"");
        let decoded: GeCategory = serde_json::from_str("\"SI\"").expect("category deserializes");
        assert_eq!(decoded, GeCategory::Si);
    }
}

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Kind of place a node of the road map stands for.
///
/// Each category has a single character code used by the map file format:
/// `V` (city), `R` (restaurant) and `L` (recreation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlaceCategory {
    City,
    Restaurant,
    Recreation,
}

impl PlaceCategory {
    /// All categories in declaration order. Iteration order of tallies and
    /// deficiency checks follows this array.
    pub const ALL: [PlaceCategory; 3] = [
        PlaceCategory::City,
        PlaceCategory::Restaurant,
        PlaceCategory::Recreation,
    ];

    pub fn code(&self) -> char {
        match self {
            PlaceCategory::City => 'V',
            PlaceCategory::Restaurant => 'R',
            PlaceCategory::Recreation => 'L',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlaceCategory::City => "city",
            PlaceCategory::Restaurant => "restaurant",
            PlaceCategory::Recreation => "recreation",
        }
    }

    /// Position of the category inside [`PlaceCategory::ALL`]
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.code() == code)
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PlaceCategory {
    type Err = String;

    /// Accepts either the single character code or the label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "v" | "city" => Ok(PlaceCategory::City),
            "r" | "restaurant" => Ok(PlaceCategory::Restaurant),
            "l" | "recreation" => Ok(PlaceCategory::Recreation),
            _ => Err(format!(
                "Failed to parse place category '{}', expected one of V, R or L",
                s
            )),
        }
    }
}

/// Kind of road a route runs on: `A` (highway), `N` (national) or
/// `D` (departmental).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoadCategory {
    Highway,
    National,
    Departmental,
}

impl RoadCategory {
    pub const ALL: [RoadCategory; 3] = [
        RoadCategory::Highway,
        RoadCategory::National,
        RoadCategory::Departmental,
    ];

    pub fn code(&self) -> char {
        match self {
            RoadCategory::Highway => 'A',
            RoadCategory::National => 'N',
            RoadCategory::Departmental => 'D',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoadCategory::Highway => "highway",
            RoadCategory::National => "national",
            RoadCategory::Departmental => "departmental",
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.code() == code)
    }
}

impl fmt::Display for RoadCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RoadCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "a" | "highway" => Ok(RoadCategory::Highway),
            "n" | "national" => Ok(RoadCategory::National),
            "d" | "departmental" => Ok(RoadCategory::Departmental),
            _ => Err(format!(
                "Failed to parse road category '{}', expected one of A, N or D",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for category in PlaceCategory::ALL {
            assert_eq!(PlaceCategory::from_code(category.code()), Some(category));
        }
        for category in RoadCategory::ALL {
            assert_eq!(RoadCategory::from_code(category.code()), Some(category));
        }
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert_eq!(PlaceCategory::from_code('X'), None);
        assert_eq!(RoadCategory::from_code('X'), None);
        // Codes are case sensitive in the file format
        assert_eq!(RoadCategory::from_code('a'), None);
    }

    #[test]
    fn parse_labels_and_codes() {
        assert_eq!("city".parse::<PlaceCategory>(), Ok(PlaceCategory::City));
        assert_eq!("L".parse::<PlaceCategory>(), Ok(PlaceCategory::Recreation));
        assert_eq!("Highway".parse::<RoadCategory>(), Ok(RoadCategory::Highway));
        assert!("motorway".parse::<RoadCategory>().is_err());
    }

    #[test]
    fn index_follows_declaration_order() {
        for (i, category) in PlaceCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
        for (i, category) in RoadCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }
}

// Domain model - characters as delivered by the upstream API
//
// These types mirror the JSON shape of the character API so they can be
// deserialized directly, plus the filter/sort state the user controls.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Life status of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    Alive,
    Dead,
    #[default]
    Unknown,
}

impl Status {
    /// All statuses in filter-cycle order
    pub fn all() -> &'static [Status] {
        &[Status::Alive, Status::Dead, Status::Unknown]
    }

    /// Wire value used by the API (note the lowercase "unknown")
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Status::Alive => "Alive",
            Status::Dead => "Dead",
            Status::Unknown => "unknown",
        }
    }

    /// Parse a user or wire value; anything unrecognized is Unknown
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "alive" => Status::Alive,
            "dead" => Status::Dead,
            _ => Status::Unknown,
        }
    }

    /// Parse a user-supplied filter value strictly
    pub fn parse_filter(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "alive" => Some(Status::Alive),
            "dead" => Some(Status::Dead),
            "unknown" => Some(Status::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_api_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Status::parse_lenient(&raw))
    }
}

/// Origin location reference
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Origin {
    #[serde(default)]
    pub name: String,
}

/// A single character record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub origin: Origin,
}

/// Active filters sent to the query service
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub status: Option<Status>,
    pub species: Option<String>,
}

impl FilterState {
    pub fn new(status: Option<Status>, species: Option<String>) -> Self {
        Self {
            status,
            species: normalize_species(species),
        }
    }

    /// Copy with a different status filter
    pub fn with_status(&self, status: Option<Status>) -> Self {
        Self {
            status,
            species: self.species.clone(),
        }
    }

    /// Copy with a different species filter (blank text clears it)
    pub fn with_species(&self, species: Option<String>) -> Self {
        Self {
            status: self.status,
            species: normalize_species(species),
        }
    }
}

/// Blank species text means "no species filter"
fn normalize_species(species: Option<String>) -> Option<String> {
    species.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Client-side ordering of the displayed list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    Name,
    OriginName,
}

impl SortKey {
    pub fn toggle(self) -> Self {
        match self {
            SortKey::Name => SortKey::OriginName,
            SortKey::OriginName => SortKey::Name,
        }
    }

    /// Config/CLI spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::OriginName => "origin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "name" => Some(SortKey::Name),
            "origin" | "origin_name" | "originname" => Some(SortKey::OriginName),
            _ => None,
        }
    }
}

/// One page as returned by the query service
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    pub results: Vec<Character>,
    pub has_next: bool,
}

#[cfg(test)]
pub(crate) fn character(id: &str, name: &str, origin: &str) -> Character {
    Character {
        id: id.to_string(),
        name: name.to_string(),
        status: Status::Alive,
        species: "Human".to_string(),
        gender: "Female".to_string(),
        origin: Origin {
            name: origin.to_string(),
        },
    }
}

//! Catalog entry model and DTOs.
//!
//! `Entry` is the canonical record exchanged over the wire; `NewEntry` and
//! `EntryPatch` are the create/update payloads. Field names serialize in
//! camelCase to match the HTTP contract.

use serde::{Deserialize, Serialize};

use crate::types::{EntryId, Timestamp};

/// Whether an entry is a movie or a TV show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryType {
    #[serde(rename = "MOVIE")]
    Movie,
    #[serde(rename = "TV_SHOW")]
    TvShow,
}

impl EntryType {
    /// Stable wire name of the variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Movie => "MOVIE",
            EntryType::TvShow => "TV_SHOW",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntryType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MOVIE" => Ok(EntryType::Movie),
            "TV_SHOW" => Ok(EntryType::TvShow),
            _ => Err(()),
        }
    }
}

/// A catalog record.
///
/// `id` is assigned at creation and immutable; `created_at` is assigned once
/// and is the pagination sort key (ties broken by `id`, descending).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub director: String,
    /// Currency/numeric text, stored verbatim.
    pub budget: String,
    pub location: String,
    pub duration: String,
    /// Four-digit year, kept as text on the wire.
    pub year: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Payload for creating an entry. All fields required.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub title: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub director: String,
    pub budget: String,
    pub location: String,
    pub duration: String,
    pub year: String,
}

impl NewEntry {
    /// Copy with surrounding whitespace stripped from every text field.
    /// Applied after validation, before the payload reaches the store.
    pub fn trimmed(&self) -> NewEntry {
        NewEntry {
            title: self.title.trim().to_string(),
            entry_type: self.entry_type,
            director: self.director.trim().to_string(),
            budget: self.budget.trim().to_string(),
            location: self.location.trim().to_string(),
            duration: self.duration.trim().to_string(),
            year: self.year.trim().to_string(),
        }
    }
}

/// Payload for updating an entry. All fields optional; absent fields are
/// left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPatch {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: Option<EntryType>,
    pub director: Option<String>,
    pub budget: Option<String>,
    pub location: Option<String>,
    pub duration: Option<String>,
    pub year: Option<String>,
}

impl EntryPatch {
    /// Copy with surrounding whitespace stripped from every present field.
    pub fn trimmed(&self) -> EntryPatch {
        let trim = |value: &Option<String>| value.as_ref().map(|v| v.trim().to_string());
        EntryPatch {
            title: trim(&self.title),
            entry_type: self.entry_type,
            director: trim(&self.director),
            budget: trim(&self.budget),
            location: trim(&self.location),
            duration: trim(&self.duration),
            year: trim(&self.year),
        }
    }

    /// True when no field is present at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.entry_type.is_none()
            && self.director.is_none()
            && self.budget.is_none()
            && self.location.is_none()
            && self.duration.is_none()
            && self.year.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_type_round_trips_wire_names() {
        assert_eq!(EntryType::Movie.as_str(), "MOVIE");
        assert_eq!(EntryType::TvShow.as_str(), "TV_SHOW");
        assert_eq!("MOVIE".parse::<EntryType>().unwrap(), EntryType::Movie);
        assert_eq!("TV_SHOW".parse::<EntryType>().unwrap(), EntryType::TvShow);
        assert!("SHORT".parse::<EntryType>().is_err());
    }

    #[test]
    fn entry_serializes_camel_case() {
        let entry = Entry {
            id: "abc123".into(),
            title: "Heat".into(),
            entry_type: EntryType::Movie,
            director: "Michael Mann".into(),
            budget: "$60,000,000".into(),
            location: "Los Angeles".into(),
            duration: "170 min".into(),
            year: "1995".into(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "MOVIE");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn empty_patch_detected() {
        assert!(EntryPatch::default().is_empty());
        let patch = EntryPatch {
            title: Some("New".into()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}

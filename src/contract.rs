//! Contract - names and constants shared by storage, routing and callers
//!
//! Nothing in here has behavior beyond building URIs and converting the
//! gender code; it is the single place that spells the table and column names.

use crate::uri::ContentUri;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scheme of every content URI
pub const CONTENT_SCHEME: &str = "content";

/// Authority under which the pets collection is published
pub const CONTENT_AUTHORITY: &str = "com.example.android.pets";

/// Path segment of the pets collection
pub const PATH_PETS: &str = "pets";

/// File name of the on-disk database
pub const DATABASE_NAME: &str = "shelter.db";

/// Current schema version. Any bump drops and recreates the table.
pub const DATABASE_VERSION: i64 = 1;

/// Breed stored when the caller supplies an empty (or, on insert, no) breed
pub const DEFAULT_BREED: &str = "Unknown";

/// MIME type of the whole pets collection
pub const CONTENT_LIST_TYPE: &str = "vnd.android.cursor.dir/com.example.android.pets/pets";

/// MIME type of a single pet
pub const CONTENT_ITEM_TYPE: &str = "vnd.android.cursor.item/com.example.android.pets/pets";

/// Table and column names of the `Pets` table.
pub struct PetEntry;

impl PetEntry {
    pub const TABLE_NAME: &'static str = "Pets";
    pub const _ID: &'static str = "_id";
    pub const COLUMN_PET_NAME: &'static str = "name";
    pub const COLUMN_PET_BREED: &'static str = "breed";
    pub const COLUMN_PET_GENDER: &'static str = "gender";
    pub const COLUMN_PET_WEIGHT: &'static str = "weight";

    pub const GENDER_UNKNOWN: i64 = 0;
    pub const GENDER_MALE: i64 = 1;
    pub const GENDER_FEMALE: i64 = 2;

    /// Every column in table order
    pub const ALL_COLUMNS: [&'static str; 5] = [
        Self::_ID,
        Self::COLUMN_PET_NAME,
        Self::COLUMN_PET_BREED,
        Self::COLUMN_PET_GENDER,
        Self::COLUMN_PET_WEIGHT,
    ];
}

/// URI of the whole pets collection: `content://com.example.android.pets/pets`
pub fn content_uri() -> ContentUri {
    ContentUri::new(CONTENT_AUTHORITY, [PATH_PETS])
}

/// Gender of a pet as stored in the `gender` column.
///
/// The store itself never rejects an out-of-range code; [`Gender::from_code`]
/// returns `None` for those so callers can decide how to show them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Unknown,
    Male,
    Female,
}

impl Gender {
    pub fn code(self) -> i64 {
        match self {
            Gender::Unknown => PetEntry::GENDER_UNKNOWN,
            Gender::Male => PetEntry::GENDER_MALE,
            Gender::Female => PetEntry::GENDER_FEMALE,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            PetEntry::GENDER_UNKNOWN => Some(Gender::Unknown),
            PetEntry::GENDER_MALE => Some(Gender::Male),
            PetEntry::GENDER_FEMALE => Some(Gender::Female),
            _ => None,
        }
    }

    /// Map a free-form selection label to a gender. Anything that is not
    /// male or female is unknown, the way the editor's spinner treats it.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "male" | "m" => Gender::Male,
            "female" | "f" => Gender::Female,
            _ => Gender::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Unknown => "unknown",
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_codes() {
        for gender in [Gender::Unknown, Gender::Male, Gender::Female] {
            assert_eq!(Gender::from_code(gender.code()), Some(gender));
        }
        assert_eq!(Gender::from_code(7), None);
        assert_eq!(Gender::from_code(-1), None);
    }

    #[test]
    fn test_gender_labels() {
        assert_eq!(Gender::from_label("Male"), Gender::Male);
        assert_eq!(Gender::from_label(" female "), Gender::Female);
        assert_eq!(Gender::from_label("Unknown"), Gender::Unknown);
        assert_eq!(Gender::from_label(""), Gender::Unknown);
    }

    #[test]
    fn test_content_uri() {
        assert_eq!(content_uri().to_string(), "content://com.example.android.pets/pets");
    }
}

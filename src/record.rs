//! Pet records - typed rows read back from a cursor, and the form callers
//! fill in before handing values to the provider

use serde::{Deserialize, Serialize};

use crate::contract::{Gender, PetEntry};
use crate::cursor::CursorRow;
use crate::values::ContentValues;
use crate::{Error, Result};

/// A stored pet.
///
/// `gender` keeps the raw stored code since the store accepts any integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub breed: String,
    pub gender: i64,
    pub weight: Option<i64>,
}

impl Pet {
    /// Read a pet from a row that carries every column
    pub fn from_row(row: &CursorRow<'_>) -> Result<Self> {
        let id = row
            .get_i64(PetEntry::_ID)
            .ok_or_else(|| Error::InvalidArgument(format!("row has no {}", PetEntry::_ID)))?;

        Ok(Self {
            id,
            name: row.get_string(PetEntry::COLUMN_PET_NAME).unwrap_or_default(),
            breed: row.get_string(PetEntry::COLUMN_PET_BREED).unwrap_or_default(),
            gender: row.get_i64(PetEntry::COLUMN_PET_GENDER).unwrap_or(PetEntry::GENDER_UNKNOWN),
            weight: row.get_i64(PetEntry::COLUMN_PET_WEIGHT),
        })
    }

    /// The gender, if the stored code is one of the known ones
    pub fn gender(&self) -> Option<Gender> {
        Gender::from_code(self.gender)
    }
}

/// Editor input for one pet.
///
/// Text fields are trimmed. On a new pet an absent weight becomes `0`;
/// the provider itself never defaults weight.
#[derive(Debug, Clone, Default)]
pub struct PetForm {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub gender: Option<Gender>,
    pub weight: Option<i64>,
}

impl PetForm {
    /// The dummy pet the catalog seeds with
    pub fn dummy() -> Self {
        Self {
            name: Some("Totto".to_string()),
            breed: Some("Terrier".to_string()),
            gender: Some(Gender::Male),
            weight: Some(7),
        }
    }

    /// Values for inserting a new pet: every column is set.
    pub fn to_insert_values(&self) -> ContentValues {
        let mut values = ContentValues::new();
        values
            .put(PetEntry::COLUMN_PET_NAME, trimmed(&self.name))
            .put(PetEntry::COLUMN_PET_BREED, trimmed(&self.breed))
            .put(PetEntry::COLUMN_PET_GENDER, self.gender.unwrap_or_default().code())
            .put(PetEntry::COLUMN_PET_WEIGHT, self.weight.unwrap_or(0));
        values
    }

    /// Values for editing an existing pet: only the fields that were given.
    pub fn to_update_values(&self) -> ContentValues {
        let mut values = ContentValues::new();
        if self.name.is_some() {
            values.put(PetEntry::COLUMN_PET_NAME, trimmed(&self.name));
        }
        if self.breed.is_some() {
            values.put(PetEntry::COLUMN_PET_BREED, trimmed(&self.breed));
        }
        if let Some(gender) = self.gender {
            values.put(PetEntry::COLUMN_PET_GENDER, gender.code());
        }
        if let Some(weight) = self.weight {
            values.put(PetEntry::COLUMN_PET_WEIGHT, weight);
        }
        values
    }
}

fn trimmed(field: &Option<String>) -> String {
    field.as_deref().map(str::trim).unwrap_or_default().to_string()
}

//! Database schema definitions

use crate::contract::PetEntry;

/// SQL to create the pets table
pub fn create_pets_table() -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (\
         {id} INTEGER PRIMARY KEY, \
         {name} TEXT, \
         {breed} TEXT, \
         {gender} INTEGER, \
         {weight} INTEGER)",
        table = PetEntry::TABLE_NAME,
        id = PetEntry::_ID,
        name = PetEntry::COLUMN_PET_NAME,
        breed = PetEntry::COLUMN_PET_BREED,
        gender = PetEntry::COLUMN_PET_GENDER,
        weight = PetEntry::COLUMN_PET_WEIGHT,
    )
}

/// SQL to drop the pets table
pub fn drop_pets_table() -> String {
    format!("DROP TABLE IF EXISTS {}", PetEntry::TABLE_NAME)
}

/// Quote a column or table name as an SQL identifier
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_statement_shape() {
        assert_eq!(
            create_pets_table(),
            "CREATE TABLE IF NOT EXISTS Pets (_id INTEGER PRIMARY KEY, name TEXT, breed TEXT, gender INTEGER, weight INTEGER)"
        );
        assert_eq!(drop_pets_table(), "DROP TABLE IF EXISTS Pets");
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("name"), "\"name\"");
        assert_eq!(quote_identifier("na\"me"), "\"na\"\"me\"");
    }
}

pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{catalog_header, detail, error, pet_card, pet_saved, pets_changed, success, warn, Change};
pub use table::{pets_table, stats_table, PetRow, TableBuilder};
pub use theme::{theme, Theme};

//! Status lines for catalog commands

use owo_colors::OwoColorize;

use crate::contract::content_uri;
use crate::record::Pet;
use crate::ui::{theme, Icons};
use crate::uri::ContentUri;

/// What a write did to the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Updated,
    Deleted,
}

impl Change {
    fn icon(self) -> &'static str {
        match self {
            Change::Updated => Icons::MOD,
            Change::Deleted => Icons::DEL,
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Change::Updated => "Updated",
            Change::Deleted => "Deleted",
        }
    }
}

/// Title line of `pets list`
pub fn catalog_header(count: usize) {
    println!("{} {}", Icons::PAW, pet_count_label(count).style(theme().header.clone()));
    if count == 0 {
        println!("{} {}", Icons::EMPTY, "No pets yet. Try `pets seed`.".style(theme().muted.clone()));
    }
}

/// Every field of one pet, plus the URI that addresses it
pub fn pet_card(pet: &Pet) {
    println!("{} {}", Icons::PAW, pet.name.style(theme().header.clone()));
    for (label, value) in pet_card_rows(pet) {
        println!("  {:<7} {}", label.style(theme().dim.clone()), value);
    }
}

/// Confirmation after an insert, `uri` being the new row
pub fn pet_saved(uri: &ContentUri) {
    match uri.parse_id() {
        Some(id) => println!(
            "{} Pet saved, id: {}",
            Icons::NEW,
            id.style(theme().success.clone())
        ),
        None => println!("{} Pet saved", Icons::NEW),
    }
    detail("URI", &uri.to_string());
}

/// Outcome of an update or delete on `uri`
pub fn pets_changed(change: Change, count: usize, uri: &ContentUri) {
    if count == 0 {
        warn(&format!("No pets matched {}", uri));
    } else {
        println!("{} {}", change.icon(), change_message(change, count));
    }
}

pub fn success(message: &str) {
    println!("{} {}", Icons::CHECK, message.style(theme().success.clone()));
}

pub fn error(message: &str) {
    eprintln!("{} {}", Icons::CROSS, message.style(theme().error.clone()));
}

pub fn warn(message: &str) {
    eprintln!("{} {}", Icons::WARN, message.style(theme().warn.clone()));
}

/// `label: value` line, label dimmed
pub fn detail(label: &str, value: &str) {
    println!(
        "{} {}: {}",
        Icons::INFO.style(theme().info.clone()),
        label.style(theme().dim.clone()),
        value
    );
}

fn pet_count_label(count: usize) -> String {
    match count {
        1 => "1 pet".to_string(),
        n => format!("{} pets", n),
    }
}

fn change_message(change: Change, count: usize) -> String {
    format!("{} {}", change.verb(), pet_count_label(count))
}

/// Unknown gender codes are shown raw, a missing weight as `-`
fn pet_card_rows(pet: &Pet) -> Vec<(&'static str, String)> {
    let gender = match pet.gender() {
        Some(gender) => gender.to_string(),
        None => format!("code {}", pet.gender),
    };
    let weight = match pet.weight {
        Some(kg) => format!("{} kg", kg),
        None => "-".to_string(),
    };

    vec![
        ("ID", pet.id.to_string()),
        ("Breed", pet.breed.clone()),
        ("Gender", gender),
        ("Weight", weight),
        ("URI", content_uri().with_appended_id(pet.id).to_string()),
    ]
}

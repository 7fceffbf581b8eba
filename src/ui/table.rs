use tabled::{settings::Style, Table, Tabled};

use crate::record::Pet;

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

/// One catalog line: what the list screen shows per pet
#[derive(Tabled)]
pub struct PetRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Breed")]
    pub breed: String,
    #[tabled(rename = "Gender")]
    pub gender: String,
    #[tabled(rename = "Weight (kg)")]
    pub weight: String,
}

impl From<&Pet> for PetRow {
    fn from(pet: &Pet) -> Self {
        Self {
            id: pet.id,
            name: pet.name.clone(),
            breed: pet.breed.clone(),
            gender: pet
                .gender()
                .map(|g| g.to_string())
                .unwrap_or_else(|| format!("code {}", pet.gender)),
            weight: pet.weight.map(|w| w.to_string()).unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[derive(Default)]
pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

pub fn stats_table(stats: &[(&str, &str)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, value);
    }
    builder.build()
}

pub fn pets_table(pets: &[Pet]) -> String {
    if pets.is_empty() {
        return String::new();
    }
    let rows: Vec<PetRow> = pets.iter().map(PetRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

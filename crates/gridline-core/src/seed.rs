//! # Seed Data
//!
//! The sample dataset the table starts with: twelve people across four
//! roles, and the four base columns.

use crate::types::{Column, ColumnKind, Row, RowId};

/// (name, email, age, role) for each seeded row. Ids are 1-based positions.
const SAMPLE_PEOPLE: &[(&str, &str, u32, &str)] = &[
    ("Alice Johnson", "alice@example.com", 28, "Developer"),
    ("Bob Williams", "bob@example.com", 34, "Designer"),
    ("Charlie Brown", "charlie@example.com", 45, "Manager"),
    ("Diana Prince", "diana@example.com", 31, "QA Tester"),
    ("Ethan Hunt", "ethan@example.com", 38, "Developer"),
    ("Fiona Glenanne", "fiona@example.com", 32, "Designer"),
    ("George Costanza", "george@example.com", 55, "Manager"),
    ("Hannah Montana", "hannah@example.com", 25, "QA Tester"),
    ("Indiana Jones", "indy@example.com", 60, "Developer"),
    ("Jack Sparrow", "jack@example.com", 42, "Designer"),
    ("Kara Danvers", "kara@example.com", 29, "Manager"),
    ("Luke Skywalker", "luke@example.com", 22, "QA Tester"),
];

/// Returns the twelve sample rows with ids 1..=12.
pub fn sample_rows() -> Vec<Row> {
    SAMPLE_PEOPLE
        .iter()
        .enumerate()
        .map(|(index, (name, email, age, role))| {
            let mut row = Row::empty(index as RowId + 1);
            row.name = name.to_string();
            row.email = email.to_string();
            row.age = f64::from(*age);
            row.role = role.to_string();
            row
        })
        .collect()
}

/// Returns the base columns: Name, Email, Age (numeric), Role.
pub fn default_columns() -> Vec<Column> {
    vec![
        Column::new("Name"),
        Column::new("Email"),
        Column::new("Age").with_kind(ColumnKind::Number),
        Column::new("Role"),
    ]
}

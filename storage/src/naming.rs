use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Constraint naming convention applied by the migrations.
///
/// Database-reported constraint names are matched against names derived with
/// these templates, so new constraints must be created following them.
pub const NAMING_CONVENTION: [(ConstraintKind, &str); 5] = [
    (ConstraintKind::Ix, "{column}_ix"),
    (ConstraintKind::Uq, "{table}_{column}_uq"),
    (ConstraintKind::Ck, "{table}_{column}_ck"),
    (ConstraintKind::Fk, "{table}_{column}_fk"),
    (ConstraintKind::Pk, "{table}_pk"),
];

/// Kind of schema constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Index
    Ix,
    /// Unique
    Uq,
    /// Check
    Ck,
    /// Foreign key
    Fk,
    /// Primary key
    Pk,
}

impl ConstraintKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ConstraintKind::Ix => "ix",
            ConstraintKind::Uq => "uq",
            ConstraintKind::Ck => "ck",
            ConstraintKind::Fk => "fk",
            ConstraintKind::Pk => "pk",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown constraint kind: {0}")]
pub struct ParseConstraintKindError(String);

impl FromStr for ConstraintKind {
    type Err = ParseConstraintKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ix" => Ok(ConstraintKind::Ix),
            "uq" => Ok(ConstraintKind::Uq),
            "ck" => Ok(ConstraintKind::Ck),
            "fk" => Ok(ConstraintKind::Fk),
            "pk" => Ok(ConstraintKind::Pk),
            other => Err(ParseConstraintKindError(other.to_string())),
        }
    }
}

/// A table known to the schema.
pub trait Table {
    const NAME: &'static str;

    /// Reference one of this table's columns.
    fn column(name: &'static str) -> Column {
        Column::new(Self::NAME, name)
    }
}

/// Reference to a column of a known table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Column {
    table: &'static str,
    name: &'static str,
}

impl Column {
    pub const fn new(table: &'static str, name: &'static str) -> Self {
        Self { table, name }
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Identifies a constraint either by its literal name or by the column it
/// guards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstraintKey {
    Literal(String),
    Column(Column, ConstraintKind),
}

impl ConstraintKey {
    /// Name the database reports for this constraint.
    pub fn canonical_name(&self) -> String {
        match self {
            ConstraintKey::Literal(name) => name.clone(),
            ConstraintKey::Column(column, kind) => match kind {
                ConstraintKind::Uq | ConstraintKind::Ck | ConstraintKind::Fk => {
                    format!("{}_{}_{}", column.table, column.name, kind)
                }
                ConstraintKind::Ix => format!("{}_{}", column.name, kind),
                ConstraintKind::Pk => format!("{}_{}", column.table, kind),
            },
        }
    }
}

impl From<&str> for ConstraintKey {
    fn from(name: &str) -> Self {
        ConstraintKey::Literal(name.to_string())
    }
}

impl From<String> for ConstraintKey {
    fn from(name: String) -> Self {
        ConstraintKey::Literal(name)
    }
}

impl From<(Column, ConstraintKind)> for ConstraintKey {
    fn from((column, kind): (Column, ConstraintKind)) -> Self {
        ConstraintKey::Column(column, kind)
    }
}

use std::fmt;

/// A foreign key target, `table.column`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForeignKey {
    /// Name of the referenced table
    pub table: String,

    /// Name of the referenced column
    pub column: String,
}

impl ForeignKey {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Parses `table.column`. A bare table name references its `id` column.
    pub fn parse(src: &str) -> Self {
        match src.rsplit_once('.') {
            Some((table, column)) => Self::new(table, column),
            None => Self::new(src, "id"),
        }
    }
}

impl From<&str> for ForeignKey {
    fn from(src: &str) -> Self {
        Self::parse(src)
    }
}

impl fmt::Display for ForeignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

use crate::NO_NAME;

/// A table as seen by one viewer name. The client may sit at the same
/// server table under one name and observe it as `.` at the same time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableViewerId {
    table: String,
    viewer: String,
}

impl TableViewerId {
    pub fn new(table: &str, viewer: &str) -> Self {
        Self {
            table: table.to_string(),
            viewer: viewer.to_string(),
        }
    }
    pub fn table(&self) -> &str {
        &self.table
    }
    pub fn viewer(&self) -> &str {
        &self.viewer
    }
    pub fn is_observer(&self) -> bool {
        self.viewer == NO_NAME
    }
}

impl std::fmt::Display for TableViewerId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.table, self.viewer)
    }
}

use super::*;

/// Factory for game states.
pub trait Rules: Send + Sync {
    /// A fresh game seen from `view`.
    fn deal(&self, view: View) -> Box<dyn Game>;
    /// A game rebuilt from a record, seen from `view`.
    fn load(&self, view: View, record: &str) -> anyhow::Result<Box<dyn Game>>;
}

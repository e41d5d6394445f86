use super::*;
use crate::session::TableViewerId;
use std::sync::Arc;

/// Player factory keyed by the `--ai` selector.
///
/// `kind`, `params` and `library` are handed through for engines that
/// need them; the players shipped here ignore them.
#[derive(Debug, Clone)]
pub struct Roster {
    ai: String,
    kind: String,
    params: String,
    library: String,
}

impl Roster {
    pub const AVAILABLE: &[&str] = &["fish"];

    pub fn new(ai: &str, kind: &str, params: &str, library: &str) -> anyhow::Result<Self> {
        if !Self::AVAILABLE.contains(&ai) {
            anyhow::bail!("unknown ai '{}' (available: {})", ai, Self::AVAILABLE.join(", "));
        }
        Ok(Self {
            ai: ai.to_string(),
            kind: kind.to_string(),
            params: params.to_string(),
            library: library.to_string(),
        })
    }
}

impl PlayerFactory for Roster {
    fn build(&self, table: &TableViewerId) -> Arc<dyn Player> {
        log::info!(
            "[roster] new {} player for {} (kind '{}', params '{}', library '{}')",
            self.ai,
            table,
            self.kind,
            self.params,
            self.library
        );
        Arc::new(Fish)
    }
}

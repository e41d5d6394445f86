use super::*;
use crate::control::PlayerContext;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Session state behind the single lock shared by every task.
pub type Shared = Arc<Mutex<Session>>;

/// Everything the client knows about the server while logged in.
///
/// Joined and observed tables live in separate registries keyed by
/// [`TableViewerId`]; lookups always try the joined ones first.
#[derive(Default)]
pub struct Session {
    id: String,
    place: String,
    clients: BTreeMap<String, ClientData>,
    tables: BTreeMap<String, TableSummary>,
    joined: BTreeMap<TableViewerId, Table>,
    observed: BTreeMap<TableViewerId, Table>,
    tournaments: BTreeMap<String, TournamentData>,
    contexts: BTreeMap<TableViewerId, PlayerContext>,
    draining: bool,
}

impl Session {
    pub fn new(id: &str, place: &str) -> Self {
        Self {
            id: id.to_string(),
            place: place.to_string(),
            ..Self::default()
        }
    }
    pub fn shared(self) -> Shared {
        Arc::new(Mutex::new(self))
    }
    /// Client id as confirmed by the server.
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn place(&self) -> &str {
        &self.place
    }
    /// No new games are accepted; the process exits at the next watchdog tick.
    pub fn is_draining(&self) -> bool {
        self.draining
    }
    pub fn drain(&mut self) {
        self.draining = true;
    }
}

impl Session {
    pub fn clients(&self) -> &BTreeMap<String, ClientData> {
        &self.clients
    }
    pub fn add_client(&mut self, client: ClientData) {
        self.clients.insert(client.id.clone(), client);
    }
    pub fn remove_client(&mut self, id: &str) -> Option<ClientData> {
        self.clients.remove(id)
    }
    pub fn summaries(&self) -> &BTreeMap<String, TableSummary> {
        &self.tables
    }
    pub fn add_summary(&mut self, summary: TableSummary) {
        self.tables.insert(summary.id.clone(), summary);
    }
    pub fn remove_summary(&mut self, id: &str) -> Option<TableSummary> {
        self.tables.remove(id)
    }
    pub fn tournaments(&self) -> &BTreeMap<String, TournamentData> {
        &self.tournaments
    }
    pub fn add_tournament(&mut self, tour: TournamentData) {
        self.tournaments.insert(tour.name.clone(), tour);
    }
    pub fn remove_tournament(&mut self, id: &str) -> Option<TournamentData> {
        self.tournaments.remove(id)
    }
}

impl Session {
    /// Register a table after `create`. Observers go to the observed registry.
    pub fn create(&mut self, table: Table) -> Result<(), Inconsistency> {
        let id = table.id().clone();
        let registry = match id.is_observer() {
            true => &mut self.observed,
            false => &mut self.joined,
        };
        if registry.contains_key(&id) {
            return Err(Inconsistency::DuplicateTable(id.to_string()));
        }
        registry.insert(id, table);
        Ok(())
    }
    /// Forget a table after `destroy`, joined first.
    pub fn destroy(&mut self, id: &TableViewerId) -> Result<Table, Inconsistency> {
        self.joined
            .remove(id)
            .or_else(|| self.observed.remove(id))
            .ok_or_else(|| Inconsistency::UnknownTable(id.to_string()))
    }
    pub fn table(&self, id: &TableViewerId) -> Option<&Table> {
        self.joined.get(id).or_else(|| self.observed.get(id))
    }
    pub fn table_mut(&mut self, id: &TableViewerId) -> Option<&mut Table> {
        match self.joined.contains_key(id) {
            true => self.joined.get_mut(id),
            false => self.observed.get_mut(id),
        }
    }
    /// Like [`Session::table_mut`], but a missing table is an inconsistency.
    pub fn find(&mut self, id: &TableViewerId) -> Result<&mut Table, Inconsistency> {
        self.table_mut(id)
            .ok_or_else(|| Inconsistency::UnknownTable(id.to_string()))
    }
    /// Every view of server table `table`, joined ones first.
    pub fn views(&self, table: &str) -> Vec<TableViewerId> {
        self.joined
            .keys()
            .chain(self.observed.keys())
            .filter(|id| id.table() == table)
            .cloned()
            .collect()
    }
    pub fn joined(&self) -> impl Iterator<Item = &Table> {
        self.joined.values()
    }
    pub fn observed(&self) -> impl Iterator<Item = &Table> {
        self.observed.values()
    }
}

impl Session {
    pub fn context(&self, id: &TableViewerId) -> Option<&PlayerContext> {
        self.contexts.get(id)
    }
    pub fn context_mut(&mut self, id: &TableViewerId) -> Option<&mut PlayerContext> {
        self.contexts.get_mut(id)
    }
    pub fn insert_context(&mut self, id: TableViewerId, context: PlayerContext) {
        self.contexts.insert(id, context);
    }
    pub fn remove_context(&mut self, id: &TableViewerId) -> Option<PlayerContext> {
        self.contexts.remove(id)
    }
    /// Remove every context at once.
    pub fn take_contexts(&mut self) -> BTreeMap<TableViewerId, PlayerContext> {
        std::mem::take(&mut self.contexts)
    }
}

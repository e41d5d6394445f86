use crate::protocol::Words;

/// A client connected to the server, from `clients +`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientData {
    pub id: String,
    pub permission: i32,
    pub languages: String,
    pub games: u32,
    pub rating: f64,
    pub disconnects: u32,
    pub timeouts: u32,
    pub group: i32,
    pub clones: u32,
}

impl ClientData {
    /// `id perm langs games rating disco timeout group clone`
    pub fn parse(mut words: Words) -> Option<Self> {
        Some(Self {
            id: words.next()?.to_string(),
            permission: words.parse()?,
            languages: words.next()?.to_string(),
            games: words.parse()?,
            rating: words.parse()?,
            disconnects: words.parse()?,
            timeouts: words.parse()?,
            group: words.parse()?,
            clones: words.parse()?,
        })
    }
}

/// A table open on the server, from `tables +`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub id: String,
    pub size: usize,
    pub number: u32,
    pub players: Vec<String>,
}

impl TableSummary {
    /// `id n gamenum player...`
    pub fn parse(mut words: Words) -> Option<Self> {
        let id = words.next()?.to_string();
        let size = words.parse()?;
        let number = words.parse()?;
        let players = words.by_ref().take(size).map(String::from).collect::<Vec<_>>();
        match players.len() == size {
            true => Some(Self {
                id,
                size,
                number,
                players,
            }),
            false => None,
        }
    }
}

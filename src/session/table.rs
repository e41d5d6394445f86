use super::*;
use crate::GAME_PLAYERS;
use crate::NO_NAME;
use crate::Seat;
use crate::TABLE_SEATS;
use crate::game::*;
use crate::protocol::Words;
use std::time::Duration;
use tokio::time::Instant;

/// Result-table row for one seat, from `state`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Standing {
    pub name: String,
    pub ipset: char,
    pub played: u32,
    pub wins: u32,
    pub last: i32,
    pub total: i32,
    pub three_four: bool,
    pub practice: bool,
    pub talk: bool,
    pub ready: bool,
}

impl Standing {
    fn parse(words: &mut Words) -> Option<Self> {
        let flag = |w: &str| w == "1";
        Some(Self {
            name: words.next()?.to_string(),
            ipset: words.next()?.chars().next()?,
            played: words.parse()?,
            wins: words.parse()?,
            last: words.parse()?,
            total: words.parse()?,
            three_four: flag(words.next()?),
            practice: flag(words.next()?),
            talk: flag(words.next()?),
            ready: flag(words.next()?),
        })
    }
}

/// One table the client has joined or observes, as seen by one viewer.
#[derive(Debug)]
pub struct Table {
    id: TableViewerId,
    kind: String,
    block: Option<u32>,
    scores: Option<String>,
    game: Option<Box<dyn Game>>,
    seated: [Option<String>; TABLE_SEATS],
    players: [String; GAME_PLAYERS],
    clocks: [f64; GAME_PLAYERS],
    number: u32,
    size: usize,
    standings: Vec<Standing>,
    records: Vec<String>,
    progress: bool,
    started: bool,
    touched: Instant,
    last: Option<Move>,
}

impl Table {
    pub fn new(id: TableViewerId, kind: &str, block: Option<u32>, scores: Option<String>) -> Self {
        Self {
            id,
            kind: kind.to_string(),
            block: block.filter(|b| *b > 0),
            scores,
            game: None,
            seated: Default::default(),
            players: Default::default(),
            clocks: [0.; GAME_PLAYERS],
            number: 0,
            size: 0,
            standings: Vec::new(),
            records: Vec::new(),
            progress: false,
            started: false,
            touched: Instant::now(),
            last: None,
        }
    }

    pub fn id(&self) -> &TableViewerId {
        &self.id
    }
    pub fn kind(&self) -> &str {
        &self.kind
    }
    /// Tournament block number, if this is a tournament table.
    pub fn block(&self) -> Option<u32> {
        self.block
    }
    /// Score sheet text sent with `create`, unparsed.
    pub fn scores(&self) -> Option<&str> {
        self.scores.as_deref()
    }
    pub fn game(&self) -> Option<&dyn Game> {
        self.game.as_deref()
    }
    pub fn players(&self) -> &[String; GAME_PLAYERS] {
        &self.players
    }
    /// Remaining time per player in the current game, in seconds.
    pub fn clocks(&self) -> &[f64; GAME_PLAYERS] {
        &self.clocks
    }
    pub fn number(&self) -> u32 {
        self.number
    }
    pub fn size(&self) -> usize {
        self.size
    }
    pub fn standings(&self) -> &[Standing] {
        &self.standings
    }
    /// Final records of the games played in the current series.
    pub fn records(&self) -> &[String] {
        &self.records
    }
    pub fn last(&self) -> Option<&Move> {
        self.last.as_ref()
    }
    pub fn in_progress(&self) -> bool {
        self.progress
    }
    pub fn is_started(&self) -> bool {
        self.started
    }
    /// Seats occupied at the table.
    pub fn occupants(&self) -> usize {
        self.seated.iter().filter(|s| s.is_some()).count()
    }
    /// Time since the server last said anything about this table.
    pub fn idle(&self) -> Duration {
        self.touched.elapsed()
    }
    /// Game seat of the viewer, if the viewer plays in the current game.
    pub fn viewer_seat(&self) -> Option<Seat> {
        self.players.iter().position(|p| p == self.id.viewer())
    }
    fn touch(&mut self) {
        self.touched = Instant::now();
    }
}

impl Table {
    /// `gamenum p0 t0 p1 t1 p2 t2 [!|p|w record...]`
    pub fn start(&mut self, mut words: Words, rules: &dyn Rules) -> Result<(), Inconsistency> {
        self.touch();
        let malformed = || Inconsistency::Malformed(format!("start at {}", self.id));
        let number = words.parse().ok_or_else(malformed)?;
        let mut players: [String; GAME_PLAYERS] = Default::default();
        let mut clocks = [0.; GAME_PLAYERS];
        for i in 0..GAME_PLAYERS {
            players[i] = words.next().ok_or_else(malformed)?.to_string();
            clocks[i] = words.parse().ok_or_else(malformed)?;
        }
        self.number = number;
        self.players = players;
        self.clocks = clocks;
        if self.number == 1 {
            self.records.clear();
        }
        self.progress = true;
        self.last = None;
        let seat = self.viewer_seat().map(View::Seat).unwrap_or(View::Public);
        self.game = Some(match words.next() {
            None => rules.deal(seat),
            Some(mode) => {
                let view = match mode {
                    "!" => seat,
                    "w" => View::World,
                    _ => View::Public,
                };
                rules.load(view, words.rest()).map_err(|e| {
                    Inconsistency::Malformed(format!("record at {}: {}", self.id, e))
                })?
            }
        });
        log::debug!("[table] {} game {} as {:?}", self.id, self.number, seat);
        Ok(())
    }

    /// `who move t0 t1 t2`
    pub fn play(&mut self, mut words: Words) -> Result<Move, Inconsistency> {
        self.touch();
        let malformed = |what: &str| Inconsistency::Malformed(format!("play at {}: {}", self.id, what));
        let who = Source::from(words.next().ok_or_else(|| malformed("missing player"))?);
        let action = words.next().ok_or_else(|| malformed("missing move"))?;
        for i in 0..GAME_PLAYERS {
            self.clocks[i] = words.parse().ok_or_else(|| malformed("time is missing"))?;
        }
        let game = self
            .game
            .as_mut()
            .ok_or_else(|| Inconsistency::NoGame(self.id.to_string()))?;
        game.apply(who, action)
            .map_err(|e| Inconsistency::Malformed(format!("move {} at {}: {}", action, self.id, e)))?;
        let played = Move::new(who, action);
        self.last = Some(played.clone());
        Ok(played)
    }

    /// `n seat×4 (name ipset played wins last total 34 practice talk ready)×4 progress [gamenum]`
    pub fn state(&mut self, mut words: Words) -> Result<(), Inconsistency> {
        self.touch();
        let malformed = |what: &str| Inconsistency::Malformed(format!("state at {}: {}", self.id, what));
        let size = words.parse().ok_or_else(|| malformed("player number"))?;
        let mut seated: [Option<String>; TABLE_SEATS] = Default::default();
        for seat in seated.iter_mut() {
            let name = words.next().ok_or_else(|| malformed("seat"))?;
            *seat = (name != NO_NAME).then(|| name.to_string());
        }
        let standings = (0..TABLE_SEATS)
            .map(|_| Standing::parse(&mut words))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| malformed("result table"))?;
        let progress = match words.next() {
            Some("true") => true,
            Some("false") => false,
            _ => return Err(malformed("progress")),
        };
        let number = match words.next() {
            None => self.number,
            Some(n) => n.parse().map_err(|_| malformed("game number"))?,
        };
        self.size = size;
        self.seated = seated;
        self.standings = standings;
        self.progress = progress;
        self.number = number;
        Ok(())
    }

    /// Complete record of the game that just ended.
    pub fn end(&mut self, record: &str, rules: &dyn Rules) -> Result<(), Inconsistency> {
        self.touch();
        let game = rules
            .load(View::World, record)
            .map_err(|e| Inconsistency::Malformed(format!("record at {}: {}", self.id, e)))?;
        self.game = Some(game);
        self.records.push(record.to_string());
        self.progress = false;
        Ok(())
    }

    pub fn go(&mut self) {
        self.touch();
        self.started = true;
    }

    pub fn stop(&mut self) {
        self.touch();
        self.started = false;
    }
}

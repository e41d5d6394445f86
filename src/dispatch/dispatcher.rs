use super::*;
use crate::game::Rules;
use crate::protocol::*;
use crate::session::*;
use std::sync::Arc;

/// Outcome of one matcher: `None` when the line is not its shape.
type Matched = Option<Result<ServiceEvent, Inconsistency>>;
type Matcher = fn(&Dispatcher, &mut Session, &[&str], &str) -> Matched;

/// Classifies server lines and applies them to the session.
///
/// Matchers run in a fixed order and the first one that recognises the
/// line wins; a line nobody recognises becomes [`ServiceEvent::CatchAll`].
#[derive(Clone)]
pub struct Dispatcher {
    rules: Arc<dyn Rules>,
}

impl Dispatcher {
    const MATCHERS: &[Matcher] = &[
        Self::client_joined,
        Self::client_left,
        Self::yell,
        Self::tell,
        Self::text,
        Self::create,
        Self::destroy,
        Self::table_added,
        Self::table_removed,
        Self::table_stop,
        Self::table_play,
        Self::table_state,
        Self::table_tell,
        Self::table_start,
        Self::table_end,
        Self::table_error,
        Self::table_go,
        Self::invite,
        Self::finger,
        Self::time,
        Self::tour_added,
        Self::tour_removed,
        Self::error,
    ];

    pub fn new(rules: Arc<dyn Rules>) -> Self {
        Self { rules }
    }

    /// Classify `line`, mutating `session` as the message demands.
    pub fn dispatch(&self, session: &mut Session, line: &str) -> Result<ServiceEvent, Inconsistency> {
        let mut tokens = line.split(' ').collect::<Vec<_>>();
        while tokens.last() == Some(&"") {
            tokens.pop();
        }
        Self::MATCHERS
            .iter()
            .find_map(|matcher| matcher(self, session, &tokens, line))
            .unwrap_or_else(|| Ok(ServiceEvent::CatchAll(tokens.iter().map(|s| s.to_string()).collect())))
    }
}

// ============================================================================
// SERVER-WIDE MESSAGES
// ============================================================================
impl Dispatcher {
    /// `clients + id perm langs games rating disco timeout group clone`
    fn client_joined(&self, session: &mut Session, s: &[&str], line: &str) -> Matched {
        if s.len() != 11 || s[0] != "clients" || s[1] != "+" {
            return None;
        }
        let client = ClientData::parse(Words::from(line).skip(2))?;
        let id = client.id.clone();
        session.add_client(client);
        Some(Ok(ServiceEvent::ClientJoined(id)))
    }
    /// `clients - id`
    fn client_left(&self, session: &mut Session, s: &[&str], _: &str) -> Matched {
        if s.len() != 3 || s[0] != "clients" || s[1] != "-" {
            return None;
        }
        session.remove_client(s[2]);
        Some(Ok(ServiceEvent::ClientLeft(s[2].to_string())))
    }
    /// `yell id text...`
    fn yell(&self, _: &mut Session, s: &[&str], line: &str) -> Matched {
        if s.len() < 2 || s[0] != "yell" {
            return None;
        }
        Some(Ok(ServiceEvent::Yell {
            from: s[1].to_string(),
            text: Words::from(line).skip(2).rest().to_string(),
        }))
    }
    /// `tell id text...`
    fn tell(&self, _: &mut Session, s: &[&str], line: &str) -> Matched {
        if s.len() < 2 || s[0] != "tell" {
            return None;
        }
        Some(Ok(ServiceEvent::Tell {
            from: s[1].to_string(),
            text: Words::from(line).skip(2).rest().to_string(),
        }))
    }
    /// `text id text...`
    fn text(&self, _: &mut Session, s: &[&str], line: &str) -> Matched {
        if s.len() < 2 || s[0] != "text" || s[1].is_empty() {
            return None;
        }
        Some(Ok(ServiceEvent::Text {
            id: s[1].to_string(),
            text: decode_crlf(Words::from(line).skip(2).rest()),
        }))
    }
    /// `tables + id n gamenum players...`
    fn table_added(&self, session: &mut Session, s: &[&str], line: &str) -> Matched {
        if s.len() < 9 || s[0] != "tables" || s[1] != "+" {
            return None;
        }
        let summary = TableSummary::parse(Words::from(line).skip(2))?;
        let id = summary.id.clone();
        session.add_summary(summary);
        Some(Ok(ServiceEvent::TableAdded(id)))
    }
    /// `tables - id`
    fn table_removed(&self, session: &mut Session, s: &[&str], _: &str) -> Matched {
        if s.len() != 3 || s[0] != "tables" || s[1] != "-" {
            return None;
        }
        session.remove_summary(s[2]);
        Some(Ok(ServiceEvent::TableRemoved(s[2].to_string())))
    }
    /// `invite from table password`
    fn invite(&self, _: &mut Session, s: &[&str], _: &str) -> Matched {
        if s.len() < 4 || s[0] != "invite" {
            return None;
        }
        Some(Ok(ServiceEvent::Invite {
            from: s[1].to_string(),
            table: s[2].to_string(),
            password: s[3].to_string(),
        }))
    }
    /// `finger name info...`
    fn finger(&self, _: &mut Session, s: &[&str], line: &str) -> Matched {
        if s.len() < 2 || s[0] != "finger" || s[1].is_empty() {
            return None;
        }
        Some(Ok(ServiceEvent::Finger {
            name: s[1].to_string(),
            info: decode_crlf(Words::from(line).skip(2).rest()),
        }))
    }
    /// `time date time`
    fn time(&self, _: &mut Session, s: &[&str], _: &str) -> Matched {
        if s.len() < 3 || s[0] != "time" {
            return None;
        }
        Some(Ok(ServiceEvent::Time {
            date: s[1].to_string(),
            time: s[2].to_string(),
        }))
    }
    /// `tour + info... joined`
    fn tour_added(&self, session: &mut Session, s: &[&str], line: &str) -> Matched {
        if s.len() < 14 || s[0] != "tour" || s[1] != "+" {
            return None;
        }
        let tour = TournamentData::parse(Words::from(line).skip(2))?;
        let name = tour.name.clone();
        session.add_tournament(tour);
        Some(Ok(ServiceEvent::TourAdded(name)))
    }
    /// `tour - id`
    fn tour_removed(&self, session: &mut Session, s: &[&str], _: &str) -> Matched {
        if s.len() != 3 || s[0] != "tour" || s[1] != "-" {
            return None;
        }
        session.remove_tournament(s[2]);
        Some(Ok(ServiceEvent::TourRemoved(s[2].to_string())))
    }
    /// `error text...`
    fn error(&self, _: &mut Session, s: &[&str], line: &str) -> Matched {
        if s.is_empty() || s[0] != "error" {
            return None;
        }
        Some(Ok(ServiceEvent::Error(Words::from(line).skip(1).rest().to_string())))
    }
}

// ============================================================================
// TABLE LIFECYCLE
// ============================================================================
impl Dispatcher {
    /// `create table seat type [block [scoresheet...]]`
    fn create(&self, session: &mut Session, s: &[&str], line: &str) -> Matched {
        if s.len() < 4 || s[0] != "create" {
            return None;
        }
        let id = TableViewerId::new(s[1], s[2]);
        let block = match s.get(4).map(|b| b.parse::<u32>()) {
            None => None,
            Some(Ok(b)) => Some(b),
            Some(Err(_)) => return Some(Err(Inconsistency::Malformed(format!("create block {}", s[4])))),
        };
        let scores = (s.len() >= 6).then(|| Words::from(line).skip(5).rest().to_string());
        let player = !id.is_observer();
        Some(
            session
                .create(Table::new(id.clone(), s[3], block, scores))
                .map(|_| ServiceEvent::TableCreated { table: id, player }),
        )
    }
    /// `destroy table seat`
    fn destroy(&self, session: &mut Session, s: &[&str], _: &str) -> Matched {
        if s.len() < 3 || s[0] != "destroy" {
            return None;
        }
        let id = TableViewerId::new(s[1], s[2]);
        let player = !id.is_observer();
        Some(
            session
                .destroy(&id)
                .map(|_| ServiceEvent::TableDestroyed { table: id, player }),
        )
    }
    /// `table id stop`
    fn table_stop(&self, session: &mut Session, s: &[&str], _: &str) -> Matched {
        if s.len() != 3 || s[0] != "table" || s[2] != "stop" {
            return None;
        }
        let views = session.views(s[1]);
        for view in views.iter() {
            if let Some(table) = session.table_mut(view) {
                table.stop();
            }
        }
        Some(
            views
                .into_iter()
                .next()
                .map(ServiceEvent::TableStop)
                .ok_or_else(|| Inconsistency::UnknownTable(s[1].to_string())),
        )
    }
}

// ============================================================================
// TABLE MESSAGES (table <id> <viewer> <kind> ...)
// ============================================================================
impl Dispatcher {
    /// Viewer id of a `table` message of the given kind with at least `min` tokens.
    fn addressed(s: &[&str], kind: &str, min: usize) -> Option<TableViewerId> {
        (s.len() >= min.max(4) && s[0] == "table" && s[3] == kind).then(|| TableViewerId::new(s[1], s[2]))
    }
    /// `... play who move t0 t1 t2`
    fn table_play(&self, session: &mut Session, s: &[&str], line: &str) -> Matched {
        let id = Self::addressed(s, "play", 4)?;
        Some(
            session
                .find(&id)
                .and_then(|table| table.play(Words::from(line).skip(4)))
                .map(|played| ServiceEvent::TablePlay {
                    table: id,
                    who: played.source,
                    action: played.action,
                }),
        )
    }
    /// `... state info...`
    fn table_state(&self, session: &mut Session, s: &[&str], line: &str) -> Matched {
        let id = Self::addressed(s, "state", 4)?;
        Some(
            session
                .find(&id)
                .and_then(|table| table.state(Words::from(line).skip(4)))
                .map(|_| ServiceEvent::TableState(id)),
        )
    }
    /// `... tell from text...`
    fn table_tell(&self, session: &mut Session, s: &[&str], line: &str) -> Matched {
        let id = Self::addressed(s, "tell", 5)?;
        Some(session.find(&id).map(|_| ServiceEvent::TableTell {
            from: s[4].to_string(),
            text: Words::from(line).skip(5).rest().to_string(),
            table: id,
        }))
    }
    /// `... start gamenum p0 t0 p1 t1 p2 t2 [mode record...]`
    fn table_start(&self, session: &mut Session, s: &[&str], line: &str) -> Matched {
        let id = Self::addressed(s, "start", 4)?;
        Some(
            session
                .find(&id)
                .and_then(|table| table.start(Words::from(line).skip(4), self.rules.as_ref()))
                .map(|_| ServiceEvent::TableStart(id)),
        )
    }
    /// `... end record...`
    fn table_end(&self, session: &mut Session, s: &[&str], line: &str) -> Matched {
        let id = Self::addressed(s, "end", 4)?;
        let history = Words::from(line).skip(4).rest().to_string();
        Some(
            session
                .find(&id)
                .and_then(|table| table.end(&history, self.rules.as_ref()))
                .map(|_| ServiceEvent::TableEnd { table: id, history }),
        )
    }
    /// `... error text...`
    fn table_error(&self, session: &mut Session, s: &[&str], line: &str) -> Matched {
        let id = Self::addressed(s, "error", 4)?;
        Some(session.find(&id).map(|_| ServiceEvent::TableError {
            text: Words::from(line).skip(4).rest().to_string(),
            table: id,
        }))
    }
    /// `... go`
    fn table_go(&self, session: &mut Session, s: &[&str], _: &str) -> Matched {
        let id = Self::addressed(s, "go", 4)?;
        Some(session.find(&id).map(|table| {
            table.go();
            ServiceEvent::TableGo(id)
        }))
    }
}

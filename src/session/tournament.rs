use crate::protocol::Words;

/// A tournament announced with `tour +`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentData {
    pub name: String,
    pub creator: String,
    pub rounds: usize,
    pub blocks: u32,
    pub random_rounds: usize,
    pub only_three: bool,
    pub start: String,
    pub seconds_per_round: u32,
    pub players: u32,
    pub state: u32,
    pub current_round: i32,
    /// `(day offset, start time)` for every round.
    pub schedule: Vec<(u32, u32)>,
    pub joined: bool,
}

impl TournamentData {
    /// Info string followed by the joined flag.
    /// Anything corrupt or implausible yields `None`.
    pub fn parse(mut words: Words) -> Option<Self> {
        let name = words.next()?.to_string();
        let creator = words.next()?.to_string();
        let rounds = words.parse::<usize>()?;
        if !(1..=100).contains(&rounds) {
            return None;
        }
        let blocks = words.parse()?;
        let random_rounds = words.parse()?;
        let only_three = words.parse::<u32>()? != 0;
        let start = words.next()?.to_string();
        let seconds_per_round = words.parse()?;
        let players = words.parse()?;
        let state = words.parse()?;
        let current_round = words.parse()?;
        let schedule = (0..rounds)
            .map(|_| Some((words.parse()?, words.parse()?)))
            .collect::<Option<Vec<_>>>()?;
        let joined = words.next()? != "0";
        let data = Self {
            name,
            creator,
            rounds,
            blocks,
            random_rounds,
            only_three,
            start,
            seconds_per_round,
            players,
            state,
            current_round,
            schedule,
            joined,
        };
        data.sane().then_some(data)
    }

    fn sane(&self) -> bool {
        (3..=8).contains(&self.name.len())
            && (1..=24).contains(&self.blocks)
            && self.random_rounds <= self.rounds
            && (1..=360 * 60).contains(&self.seconds_per_round)
            && self.players <= 1000
            && (-1..self.rounds as i32).contains(&self.current_round)
            && self.schedule.first().map(|(day, _)| *day) == Some(0)
            && self.schedule.windows(2).all(|w| w[0].0 <= w[1].0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const INFO: &str = "cup01 ann 2 3 0 1 2024-05-01 3600 12 0 -1 0 600 1 600 1";

    #[test]
    fn parses_info_and_joined() {
        let tour = TournamentData::parse(Words::from(INFO)).unwrap();
        assert_eq!(tour.name, "cup01");
        assert_eq!(tour.rounds, 2);
        assert_eq!(tour.schedule, vec![(0, 600), (1, 600)]);
        assert_eq!(tour.current_round, -1);
        assert!(tour.only_three);
        assert!(tour.joined);
    }
    #[test]
    fn rejects_corrupt_info() {
        assert!(TournamentData::parse(Words::from("cup01 ann 0 3 0 1 d 1 1 0 -1 0")).is_none());
        assert!(TournamentData::parse(Words::from("cup01 ann 2 3 0 1 d 3600 12 0 -1 0 600")).is_none());
        assert!(TournamentData::parse(Words::from("cup01 ann 2 3 0 1 d 3600 12 0 -1 1 600 0 600 1")).is_none());
    }
}

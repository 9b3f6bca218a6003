use serde::de::DeserializeOwned;
use std::path::Path;

#[cfg(test)]
macro_rules! ship {
    ($id:literal, $name:literal) => {
        ship!($id, $name, timer: "1:00:00", event: "No Event")
    };
    ($id:literal, $name:literal, timer: $timer:literal, event: $event:literal) => {
        $crate::ShipRecord {
            id: $id,
            name: $name.to_string(),
            nation: "Eagle Union".to_string(),
            rarity: "Elite".to_string(),
            hull: "DD".to_string(),
            class: "Fletcher".to_string(),
            voice_actor: "Someone".to_string(),
            timer: $crate::Timer::parse($timer).expect("test timers are valid"),
            event: $crate::catalog::event_name($event),
        }
    };
}

#[cfg(test)]
macro_rules! player {
    (|$history:ident| $impl:block) => {{
        struct P;
        impl $crate::Player for P {
            fn guess(&mut self, $history: &[$crate::Guess<'_>]) -> String {
                $impl
            }
        }
        P
    }};
}

pub mod catalog;
pub mod compare;
pub mod complete;
pub mod daily;
mod error;
pub mod events;
pub mod history;
pub mod normalize;
pub mod render;
pub mod session;
mod timer;

pub use catalog::{Catalog, ShipId, ShipRecord};
pub use compare::{Attribute, Verdict, Verdicts};
pub use complete::Completer;
pub use daily::{ship_of_the_day, Day, Schedule};
pub use error::{Error, Result};
pub use events::{EventTables, TimerCategory};
pub use history::{Assignment, CanonicalHistory, DailyHistory, Discrepancy, Reconciler};
pub use normalize::{matches, normalize};
pub use session::{Guess, Outcome, Rejection, Session, State};
pub use timer::Timer;

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Runs games against a fixed catalog.
pub struct Game<'a> {
    catalog: &'a Catalog,
}

impl<'a> Game<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Plays until `player` finds `solution` or aborts.
    ///
    /// Returns the number of guesses it took, or `None` if the player gave up.
    pub fn play<P: Player>(&self, solution: &'a ShipRecord, mut player: P) -> Option<usize> {
        let mut session = Session::new(self.catalog, solution);
        loop {
            let input = player.guess(session.history());
            match session.submit(&input) {
                Outcome::Won { guesses } => {
                    player.finish(session.history());
                    return Some(guesses);
                }
                Outcome::Aborted => return None,
                Outcome::Rejected(why) => player.rejected(&input, why),
                Outcome::Wrong(_) => {}
            }
        }
    }
}

/// Whoever is making the guesses.
pub trait Player {
    fn guess(&mut self, history: &[Guess<'_>]) -> String;
    fn rejected(&mut self, _input: &str, _why: Rejection) {}
    fn finish(&mut self, _history: &[Guess<'_>]) {}
}

impl<P: Player + ?Sized> Player for &mut P {
    fn guess(&mut self, history: &[Guess<'_>]) -> String {
        (**self).guess(history)
    }
    fn rejected(&mut self, input: &str, why: Rejection) {
        (**self).rejected(input, why)
    }
    fn finish(&mut self, history: &[Guess<'_>]) {
        (**self).finish(history)
    }
}

impl Player for fn(history: &[Guess<'_>]) -> String {
    fn guess(&mut self, history: &[Guess<'_>]) -> String {
        (*self)(history)
    }
}

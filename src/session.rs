use crate::{Catalog, ShipId, ShipRecord, Verdicts};
use std::collections::HashSet;

/// Input that ends the game without a winner.
pub const ABORT: &str = "abort";

/// One evaluated guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guess<'a> {
    pub ship: &'a ShipRecord,
    pub verdicts: Verdicts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    AwaitingGuess,
    Won,
    Aborted,
}

/// Why an input was not counted as a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotFound,
    AlreadyGuessed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Rejected(Rejection),
    Wrong(Verdicts),
    Won { guesses: usize },
    Aborted,
}

/// A single day's game against one solution.
pub struct Session<'a> {
    catalog: &'a Catalog,
    solution: &'a ShipRecord,
    history: Vec<Guess<'a>>,
    guessed: HashSet<ShipId>,
    state: State,
}

impl<'a> Session<'a> {
    pub fn new(catalog: &'a Catalog, solution: &'a ShipRecord) -> Self {
        Self {
            catalog,
            solution,
            history: Vec::new(),
            guessed: HashSet::new(),
            state: State::AwaitingGuess,
        }
    }

    /// Evaluates one line of input.
    ///
    /// Unknown and repeated ships are rejected and do not count as guesses.
    ///
    /// # Panics
    ///
    /// If the session is already over.
    pub fn submit(&mut self, input: &str) -> Outcome {
        assert_eq!(self.state, State::AwaitingGuess, "the game is already over");

        let input = input.trim();
        if input.eq_ignore_ascii_case(ABORT) {
            self.state = State::Aborted;
            return Outcome::Aborted;
        }

        let Some(ship) = self.catalog.find_by_name(input) else {
            return Outcome::Rejected(Rejection::NotFound);
        };
        if !self.guessed.insert(ship.id) {
            return Outcome::Rejected(Rejection::AlreadyGuessed);
        }

        let verdicts = self.catalog.compare(self.solution, ship);
        self.history.push(Guess { ship, verdicts });
        if verdicts.is_solved() {
            self.state = State::Won;
            Outcome::Won {
                guesses: self.history.len(),
            }
        } else {
            Outcome::Wrong(verdicts)
        }
    }

    pub fn history(&self) -> &[Guess<'a>] {
        &self.history
    }

    /// Whether `ship` has already been guessed this session.
    pub fn guessed(&self, ship: &ShipRecord) -> bool {
        self.guessed.contains(&ship.id)
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn solution(&self) -> &'a ShipRecord {
        self.solution
    }
}

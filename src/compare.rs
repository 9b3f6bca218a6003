use crate::{EventTables, ShipRecord, Timer};
use std::fmt;

/// How a guessed attribute relates to the solution's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Green
    Match,
    /// Red
    NoMatch,
    /// The solution's value is greater than the guess's.
    Higher,
    /// The solution's value is less than the guess's.
    Lower,
}

impl Verdict {
    fn equal<T: PartialEq + ?Sized>(solution: &T, guess: &T) -> Self {
        if solution == guess {
            Verdict::Match
        } else {
            Verdict::NoMatch
        }
    }

    fn ordered<T: Ord>(solution: T, guess: T) -> Self {
        if solution == guess {
            Verdict::Match
        } else if solution > guess {
            Verdict::Higher
        } else {
            Verdict::Lower
        }
    }

    pub fn arrow(self) -> Option<&'static str> {
        match self {
            Verdict::Higher => Some("↑"),
            Verdict::Lower => Some("↓"),
            Verdict::Match | Verdict::NoMatch => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Match => f.write_str("Yes"),
            Verdict::NoMatch => f.write_str("No"),
            Verdict::Higher | Verdict::Lower => f.write_str(self.arrow().unwrap_or_default()),
        }
    }
}

/// The columns of the game, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Name,
    Rarity,
    Hull,
    Nation,
    Class,
    Timer,
    Event,
    VoiceActor,
}

impl Attribute {
    pub const ALL: [Self; 8] = [
        Self::Name,
        Self::Rarity,
        Self::Hull,
        Self::Nation,
        Self::Class,
        Self::Timer,
        Self::Event,
        Self::VoiceActor,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Attribute::Name => "Guess",
            Attribute::Rarity => "Rarity",
            Attribute::Hull => "Hull",
            Attribute::Nation => "Nation",
            Attribute::Class => "Class",
            Attribute::Timer => "Timer",
            Attribute::Event => "Event",
            Attribute::VoiceActor => "Voice Actor",
        }
    }

    pub fn value(self, ship: &ShipRecord) -> String {
        match self {
            Attribute::Name => ship.name.clone(),
            Attribute::Rarity => ship.rarity.clone(),
            Attribute::Hull => ship.hull.clone(),
            Attribute::Nation => ship.nation.clone(),
            Attribute::Class => ship.class.clone(),
            Attribute::Timer => ship.timer.to_string(),
            Attribute::Event => ship.event_name().to_string(),
            Attribute::VoiceActor => ship.voice_actor.clone(),
        }
    }
}

/// The verdict for every attribute of one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Verdicts {
    pub name: Verdict,
    pub nation: Verdict,
    pub rarity: Verdict,
    pub hull: Verdict,
    pub class: Verdict,
    pub voice_actor: Verdict,
    pub timer: Verdict,
    pub event: Verdict,
}

impl Verdicts {
    pub fn compute(events: &EventTables, solution: &ShipRecord, guess: &ShipRecord) -> Self {
        Verdicts {
            name: Verdict::equal(&solution.name, &guess.name),
            nation: Verdict::equal(&solution.nation, &guess.nation),
            rarity: Verdict::equal(&solution.rarity, &guess.rarity),
            hull: Verdict::equal(&solution.hull, &guess.hull),
            class: Verdict::equal(&solution.class, &guess.class),
            voice_actor: Verdict::equal(&solution.voice_actor, &guess.voice_actor),
            timer: Self::timer(&solution.timer, &guess.timer),
            event: Self::event(events, solution, guess),
        }
    }

    fn timer(solution: &Timer, guess: &Timer) -> Verdict {
        if solution == guess {
            return Verdict::Match;
        }
        match (solution.seconds(), guess.seconds()) {
            (Some(s), Some(g)) => Verdict::ordered(s, g),
            // Ships that can't be built have no place on the timeline.
            _ => Verdict::NoMatch,
        }
    }

    fn event(events: &EventTables, solution: &ShipRecord, guess: &ShipRecord) -> Verdict {
        let s = events.date_of(solution);
        let g = events.date_of(guess);
        if s == g {
            return Verdict::Match;
        }
        match (s, g) {
            (Some(s), Some(g)) if solution.category() == guess.category() => Verdict::ordered(s, g),
            _ => Verdict::NoMatch,
        }
    }

    pub fn get(&self, attribute: Attribute) -> Verdict {
        match attribute {
            Attribute::Name => self.name,
            Attribute::Rarity => self.rarity,
            Attribute::Hull => self.hull,
            Attribute::Nation => self.nation,
            Attribute::Class => self.class,
            Attribute::Timer => self.timer,
            Attribute::Event => self.event,
            Attribute::VoiceActor => self.voice_actor,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.name == Verdict::Match
    }
}

use crate::TimerCategory;
use std::fmt;

/// How a ship is obtained, as far as the construction timer column is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Timer {
    /// Buildable, taking this many seconds.
    Build(u32),
    /// Cannot be constructed at all.
    DropOnly,
    /// Obtained some other way, e.g. `"Research"` or `"META Showdown"`.
    Obtained(String),
}

const DROP_ONLY: &str = "Drop Only";

impl Timer {
    /// Parses a timer cell: `H:MM:SS`, `MM:SS`, `"Drop Only"` or the name of an acquisition
    /// method. Returns `None` for anything that looks like a time but isn't one.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.contains(':') {
            let mut fields = s.split(':');
            let mut total = digits(fields.next()?)?;
            let mut n = 1;
            for field in fields {
                let v = digits(field)?;
                if v >= 60 || field.len() != 2 {
                    return None;
                }
                total = total.checked_mul(60)?.checked_add(v)?;
                n += 1;
            }
            return (2..=3).contains(&n).then_some(Timer::Build(total));
        }
        if s.is_empty() || s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if s == DROP_ONLY {
            return Some(Timer::DropOnly);
        }
        Some(Timer::Obtained(s.to_string()))
    }

    /// The construction time in seconds, if the ship can be built at all.
    pub fn seconds(&self) -> Option<u32> {
        match *self {
            Timer::Build(s) => Some(s),
            _ => None,
        }
    }

    /// Which event table applies to ships with this timer.
    pub fn category(&self) -> TimerCategory {
        match self {
            Timer::Obtained(how) => TimerCategory::of(how),
            Timer::Build(_) | Timer::DropOnly => TimerCategory::General,
        }
    }
}

fn digits(field: &str) -> Option<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timer::Build(s) => write!(f, "{:02}:{:02}:{:02}", s / 3600, s / 60 % 60, s % 60),
            Timer::DropOnly => f.write_str(DROP_ONLY),
            Timer::Obtained(how) => f.write_str(how),
        }
    }
}

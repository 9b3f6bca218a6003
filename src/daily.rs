//! Day boundaries and the deterministic ship-of-the-day choice.

use crate::CanonicalHistory;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;
use tracing::debug;

pub const SECONDS_PER_DAY: i64 = 24 * 3600;

/// The first day the game has an answer for.
pub const EPOCH_DAY: Day = Day(20309);

/// Hours added to UTC to find the daily cutover.
pub const UTC_OFFSET_HOURS: i64 = -7;

/// Days since the unix epoch, counted from the daily cutover rather than midnight UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Day(pub i64);

impl Day {
    fn shifted(unix_seconds: i64, utc_offset_hours: i64) -> i64 {
        unix_seconds + utc_offset_hours * 3600
    }

    pub fn from_timestamp(unix_seconds: i64, utc_offset_hours: i64) -> Self {
        Day(Self::shifted(unix_seconds, utc_offset_hours).div_euclid(SECONDS_PER_DAY))
    }

    /// How long until the day after the one containing `unix_seconds` begins.
    pub fn until_next(unix_seconds: i64, utc_offset_hours: i64) -> Duration {
        let into_day = Self::shifted(unix_seconds, utc_offset_hours).rem_euclid(SECONDS_PER_DAY);
        Duration::from_secs((SECONDS_PER_DAY - into_day) as u64)
    }

    pub fn next(self) -> Self {
        Day(self.0 + 1)
    }

    pub fn prev(self) -> Self {
        Day(self.0 - 1)
    }

    /// Every day from `self` through `last`, inclusive.
    pub fn through(self, last: Day) -> impl Iterator<Item = Day> {
        (self.0..=last.0).map(Day)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Picks the ship for `day` out of `pool`.
///
/// The pool is sorted first, so the same day and the same set of names always give the same
/// ship no matter what order the names arrive in.
///
/// # Panics
///
/// If `pool` is empty.
pub fn ship_of_the_day<'a>(day: Day, pool: impl IntoIterator<Item = &'a str>) -> &'a str {
    let mut pool: Vec<&str> = pool.into_iter().collect();
    assert!(!pool.is_empty(), "no ships left to pick from on day {}", day);
    pool.sort_unstable();
    pool.dedup();
    let mut rng = StdRng::seed_from_u64(day.0 as u64);
    pool[rng.gen_range(0..pool.len())]
}

/// Replays the answer for every day from the epoch onwards.
///
/// Canonical days get their canonical answer. Every other day draws from the ships that have
/// not been an answer yet in the current cycle and are not a canonical answer for any day. Once
/// that pool runs dry a new cycle starts.
pub struct Schedule<'a> {
    names: Vec<&'a str>,
    canonical: &'a CanonicalHistory,
    reserved: HashSet<&'a str>,
    used: HashSet<&'a str>,
    day: Day,
}

impl<'a> Schedule<'a> {
    pub fn new(
        names: impl IntoIterator<Item = &'a str>,
        canonical: &'a CanonicalHistory,
        epoch: Day,
    ) -> Self {
        let mut names: Vec<_> = names.into_iter().collect();
        names.sort_unstable();
        names.dedup();
        Self {
            names,
            reserved: canonical.names().collect(),
            canonical,
            used: HashSet::new(),
            day: epoch,
        }
    }

    fn pool(&self) -> Vec<&'a str> {
        self.names
            .iter()
            .copied()
            .filter(|name| !self.used.contains(name) && !self.reserved.contains(name))
            .collect()
    }

    /// Answers for every remaining day up to and including `last`.
    pub fn through(self, last: Day) -> impl Iterator<Item = (Day, &'a str)> {
        self.take_while(move |&(day, _)| day <= last)
    }
}

impl<'a> Iterator for Schedule<'a> {
    type Item = (Day, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let day = self.day;
        self.day = day.next();

        let ship = match self.canonical.get(day) {
            Some(ship) => ship,
            None => {
                let mut pool = self.pool();
                if pool.is_empty() {
                    debug!(%day, "every ship has been an answer; starting a new cycle");
                    self.used.clear();
                    pool = self.pool();
                }
                ship_of_the_day(day, pool)
            }
        };
        self.used.insert(ship);
        Some((day, ship))
    }
}

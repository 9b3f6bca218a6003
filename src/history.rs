//! The day -> ship ledgers, and keeping the local one in line with the canonical one.

use crate::{read_json, Catalog, Day, Error, Result, Schedule};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

pub const CANONICAL_FILE: &str = "canonical.json";

/// The answers this installation has already settled on, persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyHistory {
    days: BTreeMap<Day, String>,
}

impl DailyHistory {
    /// Reads the history at `path`. A missing file is an empty history.
    pub fn load(path: &Path) -> Result<Self> {
        match read_json::<Self>(path) {
            Err(Error::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no history yet");
                Ok(Self::default())
            }
            Ok(history) => {
                debug!(path = %path.display(), days = history.len(), "loaded history");
                Ok(history)
            }
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), days = self.len(), "saved history");
        Ok(())
    }

    pub fn get(&self, day: Day) -> Option<&str> {
        self.days.get(&day).map(String::as_str)
    }

    pub fn insert(&mut self, day: Day, ship: impl Into<String>) -> Option<String> {
        self.days.insert(day, ship.into())
    }

    pub fn remove(&mut self, day: Day) -> Option<String> {
        self.days.remove(&day)
    }

    pub fn last_day(&self) -> Option<Day> {
        self.days.keys().next_back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Day, &str)> + '_ {
        self.days.iter().map(|(&day, ship)| (day, ship.as_str()))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(Day, S)> for DailyHistory {
    fn from_iter<I: IntoIterator<Item = (Day, S)>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().map(|(day, s)| (day, s.into())).collect(),
        }
    }
}

/// The answer key: days whose ship was fixed elsewhere and must not be re-derived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalHistory {
    days: BTreeMap<Day, String>,
}

impl CanonicalHistory {
    /// Reads the answer key at `path`, spelling each ship the way `catalog` does.
    pub fn load(path: &Path, catalog: &Catalog) -> Result<Self> {
        let raw: BTreeMap<Day, String> = read_json(path)?;
        let days = raw
            .into_iter()
            .map(|(day, name)| match catalog.find_by_name(&name) {
                Some(ship) => Ok((day, ship.name.clone())),
                None => Err(Error::UnknownShip { day, name }),
            })
            .collect::<Result<_>>()?;
        let canonical = Self { days };
        debug!(path = %path.display(), days = canonical.len(), "loaded canonical history");
        Ok(canonical)
    }

    pub fn get(&self, day: Day) -> Option<&str> {
        self.days.get(&day).map(String::as_str)
    }

    /// Every ship that is the answer for some day.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.days.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(Day, S)> for CanonicalHistory {
    fn from_iter<I: IntoIterator<Item = (Day, S)>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().map(|(day, s)| (day, s.into())).collect(),
        }
    }
}

/// Where the expected answer for a day came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    Canonical,
    Derived,
}

/// A day where the local history disagreed with the expected answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discrepancy {
    pub day: Day,
    pub recorded: String,
    pub expected: String,
    pub authority: Authority,
}

/// The ship chosen for today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub day: Day,
    pub ship: String,
    /// True if an earlier run had already settled on this ship.
    pub existing: bool,
}

pub struct Reconciler<'a> {
    catalog: &'a Catalog,
    canonical: &'a CanonicalHistory,
    epoch: Day,
}

impl<'a> Reconciler<'a> {
    pub fn new(catalog: &'a Catalog, canonical: &'a CanonicalHistory, epoch: Day) -> Self {
        Self {
            catalog,
            canonical,
            epoch,
        }
    }

    fn schedule(&self) -> Schedule<'a> {
        Schedule::new(self.catalog.names(), self.canonical, self.epoch)
    }

    /// Brings every day from the epoch through `today` in line with the expected answers.
    ///
    /// Canonical answers overwrite whatever was recorded locally. A recorded answer that
    /// disagrees with the derived one is dropped so it gets derived again.
    pub fn reconcile(&self, history: &mut DailyHistory, today: Day) -> Vec<Discrepancy> {
        let mut discrepancies = Vec::new();
        for (day, expected) in self.schedule().through(today) {
            let authority = if self.canonical.get(day).is_some() {
                Authority::Canonical
            } else {
                Authority::Derived
            };

            match history.get(day) {
                Some(recorded) if recorded == expected => continue,
                Some(recorded) => {
                    debug!(%day, recorded, expected, ?authority, "history disagrees");
                    discrepancies.push(Discrepancy {
                        day,
                        recorded: recorded.to_string(),
                        expected: expected.to_string(),
                        authority,
                    });
                }
                None if authority == Authority::Derived => continue,
                None => {}
            }

            match authority {
                Authority::Canonical => history.insert(day, expected),
                Authority::Derived => history.remove(day),
            };
        }

        if !discrepancies.is_empty() {
            info!(
                count = discrepancies.len(),
                "history updated to match the canonical answers"
            );
        }
        discrepancies
    }

    /// Fills in every missing day from the epoch through `today` and returns today's ship.
    pub fn assign_through(&self, history: &mut DailyHistory, today: Day) -> Assignment {
        let existing = history.get(today).map(str::to_string);
        let mut ship = existing.clone();
        for (day, expected) in self.schedule().through(today) {
            if history.get(day).is_none() {
                debug!(%day, ship = expected, "assigned");
                history.insert(day, expected);
            }
            if day == today {
                ship = history.get(day).map(str::to_string);
            }
        }

        Assignment {
            day: today,
            existing: existing.is_some(),
            // A day before the epoch was never scheduled, so it can only come from the history.
            ship: ship.unwrap_or_else(|| {
                self.schedule()
                    .next()
                    .map(|(_, ship)| ship.to_string())
                    .unwrap_or_default()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Authority, CanonicalHistory, DailyHistory, Reconciler};
    use crate::{Catalog, Day, EventTables, Schedule};

    fn catalog() -> Catalog {
        Catalog::new(
            [
                ship!(1, "Ajax"),
                ship!(2, "Belfast"),
                ship!(3, "Cleveland"),
                ship!(4, "Dido"),
                ship!(5, "Enterprise"),
                ship!(6, "Fubuki"),
                ship!(7, "Glorious"),
                ship!(8, "Hood"),
            ],
            EventTables::default(),
        )
        .unwrap()
    }

    const EPOCH: Day = Day(100);

    #[test]
    fn fresh_history() {
        let catalog = catalog();
        let canonical = CanonicalHistory::from_iter([(Day(101), "Hood")]);
        let reconciler = Reconciler::new(&catalog, &canonical, EPOCH);

        let mut history = DailyHistory::default();
        assert!(reconciler.reconcile(&mut history, Day(104)).is_empty());
        assert_eq!(history.get(Day(101)), Some("Hood"));
        assert_eq!(history.len(), 1);

        let today = reconciler.assign_through(&mut history, Day(104));
        assert!(!today.existing);
        assert_eq!(history.len(), 5);
        assert_eq!(history.get(Day(104)), Some(today.ship.as_str()));
        assert_eq!(history.get(Day(101)), Some("Hood"));
    }

    #[test]
    fn same_day_is_stable() {
        let catalog = catalog();
        let canonical = CanonicalHistory::default();
        let reconciler = Reconciler::new(&catalog, &canonical, EPOCH);

        let mut history = DailyHistory::default();
        reconciler.reconcile(&mut history, Day(103));
        let first = reconciler.assign_through(&mut history, Day(103));

        let mut replay = history.clone();
        assert!(reconciler.reconcile(&mut replay, Day(103)).is_empty());
        let second = reconciler.assign_through(&mut replay, Day(103));
        assert!(second.existing);
        assert_eq!(first.ship, second.ship);
        assert_eq!(history, replay);

        let mut elsewhere = DailyHistory::default();
        reconciler.reconcile(&mut elsewhere, Day(103));
        assert_eq!(reconciler.assign_through(&mut elsewhere, Day(103)).ship, first.ship);
    }

    #[test]
    fn canonical_overrides_local() {
        let catalog = catalog();
        let canonical = CanonicalHistory::from_iter([(Day(100), "Ajax"), (Day(102), "Dido")]);
        let reconciler = Reconciler::new(&catalog, &canonical, EPOCH);

        let mut history = DailyHistory::from_iter([(Day(100), "Ajax"), (Day(102), "Glorious")]);
        let discrepancies = reconciler.reconcile(&mut history, Day(102));
        assert_eq!(discrepancies.len(), 1);
        assert_eq!(discrepancies[0].day, Day(102));
        assert_eq!(discrepancies[0].recorded, "Glorious");
        assert_eq!(discrepancies[0].expected, "Dido");
        assert_eq!(discrepancies[0].authority, Authority::Canonical);

        for (day, ship) in canonical.days.iter() {
            assert_eq!(history.get(*day), Some(ship.as_str()));
        }
    }

    #[test]
    fn wrong_derived_days_are_dropped() {
        let catalog = catalog();
        let canonical = CanonicalHistory::default();
        let reconciler = Reconciler::new(&catalog, &canonical, EPOCH);
        let expected: Vec<_> = Schedule::new(catalog.names(), &canonical, EPOCH)
            .through(Day(102))
            .collect();

        let wrong = if expected[1].1 == "Ajax" { "Belfast" } else { "Ajax" };
        let mut history = DailyHistory::from_iter([
            (Day(100), expected[0].1),
            (Day(101), wrong),
            (Day(102), expected[2].1),
        ]);
        let discrepancies = reconciler.reconcile(&mut history, Day(102));
        assert_eq!(discrepancies.len(), 1);
        assert_eq!(discrepancies[0].authority, Authority::Derived);
        assert_eq!(history.get(Day(101)), None);
        assert_eq!(history.len(), 2);

        let today = reconciler.assign_through(&mut history, Day(102));
        assert!(today.existing);
        assert_eq!(history.get(Day(101)), Some(expected[1].1));
    }

    #[test]
    fn days_outside_the_window_are_kept() {
        let catalog = catalog();
        let canonical = CanonicalHistory::default();
        let reconciler = Reconciler::new(&catalog, &canonical, EPOCH);

        let mut history = DailyHistory::from_iter([(Day(50), "Hood"), (Day(500), "Hood")]);
        reconciler.reconcile(&mut history, Day(101));
        assert_eq!(history.get(Day(50)), Some("Hood"));
        assert_eq!(history.get(Day(500)), Some("Hood"));
    }

    #[test]
    fn before_the_epoch() {
        let catalog = catalog();
        let canonical = CanonicalHistory::default();
        let reconciler = Reconciler::new(&catalog, &canonical, EPOCH);

        let mut history = DailyHistory::default();
        let today = reconciler.assign_through(&mut history, Day(10));
        assert!(history.is_empty());
        assert!(catalog.find_by_name(&today.ship).is_some());
    }
}

use crate::events::NO_EVENT;
use crate::{normalize, read_json, Error, EventTables, Result, Timer, TimerCategory, Verdicts};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, warn};

pub const SHIPS_FILE: &str = "ships.json";
pub const EVENTS_FILE: &str = "events.json";
pub const RESEARCH_FILE: &str = "research.json";
pub const SHOWDOWN_FILE: &str = "showdown.json";
pub const CRUISE_FILE: &str = "cruise.json";

pub type ShipId = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipRecord {
    pub id: ShipId,
    pub name: String,
    pub nation: String,
    pub rarity: String,
    pub hull: String,
    pub class: String,
    pub voice_actor: String,
    pub timer: Timer,
    /// The release event, or `None` for ships that came from no event.
    pub event: Option<String>,
}

impl ShipRecord {
    pub fn category(&self) -> TimerCategory {
        self.timer.category()
    }

    pub fn event_name(&self) -> &str {
        self.event.as_deref().unwrap_or(NO_EVENT)
    }
}

/// Maps the `"No Event"` marker to `None`.
pub fn event_name(event: &str) -> Option<String> {
    (event != NO_EVENT).then(|| event.to_string())
}

/// One ship as it appears in `ships.json`.
#[derive(Debug, Deserialize)]
struct RawShip {
    name: String,
    nation: String,
    rarity: String,
    hull: String,
    class: String,
    #[serde(rename = "VA")]
    voice_actor: String,
    timer: String,
    event: String,
}

impl RawShip {
    fn into_record(self, id: ShipId) -> Result<ShipRecord> {
        let timer = Timer::parse(&self.timer).ok_or_else(|| Error::Timer {
            ship: self.name.clone(),
            value: self.timer.clone(),
        })?;
        Ok(ShipRecord {
            id,
            event: event_name(&self.event),
            name: self.name,
            nation: self.nation,
            rarity: self.rarity,
            hull: self.hull,
            class: self.class,
            voice_actor: self.voice_actor,
            timer,
        })
    }
}

/// Every ship that can be an answer, plus the event tables needed to compare them.
///
/// Built once per run and never modified.
#[derive(Debug, Clone)]
pub struct Catalog {
    ships: BTreeMap<ShipId, ShipRecord>,
    /// Normalized name -> id.
    by_name: HashMap<String, ShipId>,
    events: EventTables,
}

impl Catalog {
    /// Builds a catalog, checking that every ship's event exists in its category's table.
    ///
    /// If two ships normalize to the same name, the one with the lower id is the one found by
    /// name.
    pub fn new(ships: impl IntoIterator<Item = ShipRecord>, events: EventTables) -> Result<Self> {
        let ships: BTreeMap<_, _> = ships.into_iter().map(|ship| (ship.id, ship)).collect();
        let mut by_name = HashMap::with_capacity(ships.len());
        for ship in ships.values() {
            if !events.resolves(ship) {
                return Err(Error::UnknownEvent {
                    ship: ship.name.clone(),
                    event: ship.event_name().to_string(),
                    category: ship.category(),
                });
            }
            let key = normalize(&ship.name);
            if let Some(&first) = by_name.get(&key) {
                warn!(
                    ship = %ship.name,
                    shadowed_by = first,
                    "two ships share a name; only the first can be guessed"
                );
                continue;
            }
            by_name.insert(key, ship.id);
        }
        Ok(Self {
            ships,
            by_name,
            events,
        })
    }

    /// Loads the catalog and the four event tables from `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let raw: BTreeMap<ShipId, RawShip> = read_json(&dir.join(SHIPS_FILE))?;
        let ships = raw
            .into_iter()
            .map(|(id, ship)| ship.into_record(id))
            .collect::<Result<Vec<_>>>()?;

        let mut events = EventTables::default();
        for (category, file) in [
            (TimerCategory::General, EVENTS_FILE),
            (TimerCategory::Research, RESEARCH_FILE),
            (TimerCategory::MetaShowdown, SHOWDOWN_FILE),
            (TimerCategory::CruiseMissions, CRUISE_FILE),
        ] {
            let table: HashMap<String, NaiveDate> = read_json(&dir.join(file))?;
            debug!(%category, events = table.len(), "loaded event table");
            *events.table_mut(category) = table;
        }

        let catalog = Self::new(ships, events)?;
        debug!(ships = catalog.len(), dir = %dir.display(), "loaded catalog");
        Ok(catalog)
    }

    /// Finds a ship by name, ignoring case, diacritics and some punctuation.
    pub fn find_by_name(&self, name: &str) -> Option<&ShipRecord> {
        let id = self.by_name.get(&normalize(name))?;
        self.ships.get(id)
    }

    pub fn find_by_id(&self, id: ShipId) -> Option<&ShipRecord> {
        self.ships.get(&id)
    }

    pub fn ships(&self) -> impl Iterator<Item = &ShipRecord> + '_ {
        self.ships.values()
    }

    /// Names of every ship that can be guessed.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.by_name
            .values()
            .filter_map(|id| self.ships.get(id))
            .map(|ship| ship.name.as_str())
    }

    pub fn events(&self) -> &EventTables {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    pub fn compare(&self, solution: &ShipRecord, guess: &ShipRecord) -> Verdicts {
        Verdicts::compute(&self.events, solution, guess)
    }
}

#[cfg(test)]
mod tests {
    use super::Catalog;
    use crate::{Error, EventTables, TimerCategory};
    use chrono::NaiveDate;

    fn tables() -> EventTables {
        let mut tables = EventTables::default();
        tables.insert(
            TimerCategory::General,
            "Spring Gala",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );
        tables
    }

    #[test]
    fn lookups() {
        let catalog = Catalog::new(
            [
                ship!(1, "Ätland", timer: "1:00:00", event: "Spring Gala"),
                ship!(2, "O'Brien"),
            ],
            tables(),
        )
        .unwrap();

        assert_eq!(catalog.find_by_name("atland").map(|s| s.id), Some(1));
        assert_eq!(catalog.find_by_name("  ATLAND").map(|s| s.id), None);
        assert_eq!(catalog.find_by_name("obrien").map(|s| s.id), Some(2));
        assert_eq!(catalog.find_by_id(2).map(|s| s.name.as_str()), Some("O'Brien"));
        assert!(catalog.find_by_id(3).is_none());
        assert!(catalog.find_by_name("Nobody").is_none());
    }

    #[test]
    fn unknown_event() {
        let err = Catalog::new(
            [ship!(1, "Alpha", timer: "Research", event: "Spring Gala")],
            tables(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownEvent {
                category: TimerCategory::Research,
                ..
            }
        ));
    }

    #[test]
    fn shadowed_names() {
        let catalog = Catalog::new([ship!(7, "Ägir"), ship!(3, "Agir")], tables()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find_by_name("AGIR").map(|s| s.id), Some(3));
        assert_eq!(catalog.names().collect::<Vec<_>>(), ["Agir"]);
    }
}

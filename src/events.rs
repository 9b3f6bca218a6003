use crate::ShipRecord;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt;

/// Event name used by ships that did not come from any event.
pub const NO_EVENT: &str = "No Event";

/// Which event table a ship's release event is looked up in.
///
/// The tables are independent timelines, so dates from different categories are not compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerCategory {
    General,
    Research,
    MetaShowdown,
    CruiseMissions,
}

static CATEGORIES: phf::Map<&'static str, TimerCategory> = phf::phf_map! {
    "Research" => TimerCategory::Research,
    "META Showdown" => TimerCategory::MetaShowdown,
    "Cruise Missions" => TimerCategory::CruiseMissions,
};

impl TimerCategory {
    pub const ALL: [Self; 4] = [
        Self::General,
        Self::Research,
        Self::MetaShowdown,
        Self::CruiseMissions,
    ];

    /// The category for an acquisition method named in the timer column.
    pub fn of(acquisition: &str) -> Self {
        CATEGORIES
            .get(acquisition)
            .copied()
            .unwrap_or(TimerCategory::General)
    }
}

impl fmt::Display for TimerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimerCategory::General => "general events",
            TimerCategory::Research => "Research",
            TimerCategory::MetaShowdown => "META Showdown",
            TimerCategory::CruiseMissions => "Cruise Missions",
        })
    }
}

pub type EventTable = HashMap<String, NaiveDate>;

/// Release dates for every event, one table per [`TimerCategory`].
#[derive(Debug, Clone, Default)]
pub struct EventTables {
    general: EventTable,
    research: EventTable,
    showdown: EventTable,
    cruise: EventTable,
}

impl EventTables {
    pub fn table(&self, category: TimerCategory) -> &EventTable {
        match category {
            TimerCategory::General => &self.general,
            TimerCategory::Research => &self.research,
            TimerCategory::MetaShowdown => &self.showdown,
            TimerCategory::CruiseMissions => &self.cruise,
        }
    }

    pub fn table_mut(&mut self, category: TimerCategory) -> &mut EventTable {
        match category {
            TimerCategory::General => &mut self.general,
            TimerCategory::Research => &mut self.research,
            TimerCategory::MetaShowdown => &mut self.showdown,
            TimerCategory::CruiseMissions => &mut self.cruise,
        }
    }

    pub fn insert(&mut self, category: TimerCategory, event: impl Into<String>, date: NaiveDate) {
        self.table_mut(category).insert(event.into(), date);
    }

    /// The release date of `ship`'s event, looked up in the table for the ship's own category.
    ///
    /// Ships without an event have no date.
    pub fn date_of(&self, ship: &ShipRecord) -> Option<NaiveDate> {
        let event = ship.event.as_deref()?;
        self.table(ship.category()).get(event).copied()
    }

    /// True if `ship`'s event can be resolved, or it has none.
    pub fn resolves(&self, ship: &ShipRecord) -> bool {
        match &ship.event {
            None => true,
            Some(event) => self.table(ship.category()).contains_key(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EventTables, TimerCategory};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn category_names() {
        assert_eq!(TimerCategory::of("Research"), TimerCategory::Research);
        assert_eq!(TimerCategory::of("META Showdown"), TimerCategory::MetaShowdown);
        assert_eq!(TimerCategory::of("Cruise Missions"), TimerCategory::CruiseMissions);
        assert_eq!(TimerCategory::of("research"), TimerCategory::General);
        assert_eq!(TimerCategory::of("Drop Only"), TimerCategory::General);
    }

    #[test]
    fn lookup_uses_own_table() {
        let mut tables = EventTables::default();
        tables.insert(TimerCategory::General, "Spring Gala", day(1));
        tables.insert(TimerCategory::Research, "Spring Gala", day(20));

        let general = ship!(1, "Alpha", timer: "1:00:00", event: "Spring Gala");
        let research = ship!(2, "Beta", timer: "Research", event: "Spring Gala");
        let showdown = ship!(3, "Gamma", timer: "META Showdown", event: "Spring Gala");

        assert_eq!(tables.date_of(&general), Some(day(1)));
        assert_eq!(tables.date_of(&research), Some(day(20)));
        assert_eq!(tables.date_of(&showdown), None);
        assert!(!tables.resolves(&showdown));
    }

    #[test]
    fn no_event() {
        let tables = EventTables::default();
        let ship = ship!(1, "Alpha");
        assert_eq!(tables.date_of(&ship), None);
        assert!(tables.resolves(&ship));
    }
}

use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("could not access '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' is not valid", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A construction timer that is neither `H:MM:SS`/`MM:SS` nor an acquisition name.
    #[error("ship '{ship}' has a malformed construction timer '{value}'")]
    Timer { ship: String, value: String },

    #[error("ship '{ship}' refers to event '{event}', which is not in the {category} table")]
    UnknownEvent {
        ship: String,
        event: String,
        category: crate::TimerCategory,
    },

    #[error("canonical history names '{name}' for day {day}, which is not in the catalog")]
    UnknownShip { day: crate::Day, name: String },
}

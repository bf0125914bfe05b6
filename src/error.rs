use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("gap size {gap_size} leaves no room to place a gap in a playfield {height} high")]
    GapTooLarge { gap_size: f32, height: f32 },
    #[error("unknown key name: {0}")]
    UnknownKey(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Broken simulation invariants. None of these are recoverable.
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("no upcoming obstacle pair ahead of x = {agent_x} ({pairs} pairs on the field)")]
    NoUpcomingObstacle { agent_x: f32, pairs: usize },
}

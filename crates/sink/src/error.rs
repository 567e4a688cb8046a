use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("requested {requested} bytes but the sink holds only {available}")]
    RequestExceedsSize { requested: usize, available: usize },

    #[error("destination holds {capacity} bytes, {requested} requested")]
    DestinationTooSmall { requested: usize, capacity: usize },
}

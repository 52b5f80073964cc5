//! Domain types for SessionTrend

pub mod analysis;
pub mod bar;
pub mod signal;
pub mod trend;

pub use analysis::TrendAnalysis;
pub use bar::{closes, validate_series, Bar, SeriesError};
pub use signal::{NoSignalReason, SignalData, SignalMetadata, SignalOutcome};
pub use trend::{SessionType, SignalType, TrendDirection};

/// Symbol type alias
pub type Symbol = String;

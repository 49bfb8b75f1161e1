//! Musical durations: turning quarter lengths into notated note types,
//! dots and tuplets, and back.
//!
//! ```
//! use note_duration::{quarter_length_to_units, Duration, NoteType};
//!
//! let units = quarter_length_to_units(1.0 / 3.0, None).unwrap();
//! assert_eq!(units.len(), 1);
//! assert_eq!(units[0].to_tuple().3, Some(3));
//!
//! let duration = Duration::from_quarter_length(6.0).unwrap();
//! assert_eq!(duration.note_type().unwrap(), NoteType::Whole);
//! assert_eq!(duration.dots().unwrap(), 1);
//! ```

pub mod conversion;
pub mod error;
pub mod primitives;
pub mod settings;

pub use conversion::{
    closest_type, dotted_match, dotted_match_type, quarter_length_to_units,
    quarter_length_to_units_with, tuplet_candidates, tuplet_candidates_with,
    unit_for_quarter_length, unit_for_quarter_length_with,
};
pub use error::{DurationError, Result};
pub use primitives::{
    aggregate_multiplier, aggregate_ratio, checked_aggregate_ratio, Duration,
    DurationKind, DurationUnit, InterchangeTuple, Length, NoteType, TupletId,
    TupletRatio, UnitSpec,
};
pub use settings::DurationSettings;

//! Conversion between quarter lengths and notation symbols.
//!
//! The searches in `matching` look for one symbol reproducing a length;
//! `partition` chains them and falls back to splitting the length into
//! tied pieces.

pub mod matching;
pub mod partition;

pub use matching::{
    closest_type, dotted_match, dotted_match_type, tuplet_candidates,
    tuplet_candidates_with,
};
pub use partition::{
    quarter_length_to_units, quarter_length_to_units_with,
    unit_for_quarter_length, unit_for_quarter_length_with,
};

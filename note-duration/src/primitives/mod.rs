//! Value types of the duration engine.
//!
//! The type table (`NoteType`) and `TupletRatio` are leaves. `UnitSpec` is
//! the plain single-symbol form, `DurationUnit` a symbol with a linked or
//! overridden length, and `Duration` a tied sequence of units.

pub mod duration;
pub mod duration_unit;
pub mod fraction_tools;
pub mod length;
pub mod note_type;
pub mod tuplet;
pub mod unit_spec;

pub use duration::{Duration, DurationKind};
pub use duration_unit::DurationUnit;
pub use fraction_tools::{
    almost_equals, almost_le, checked_add, checked_mul, dot_multiplier,
    fraction_to_f64, limit_denominator,
};
pub use length::Length;
pub use note_type::NoteType;
pub use tuplet::{
    aggregate_multiplier, aggregate_ratio, checked_aggregate_ratio, TupletId,
    TupletRatio,
};
pub use unit_spec::{InterchangeTuple, UnitSpec};

/// Tolerance of every "exact" comparison of quarter lengths, relative to
/// the larger magnitude when it exceeds one.
pub const QUARTER_LENGTH_EPSILON: f64 = 1e-6;

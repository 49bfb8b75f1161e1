//! Tuplet ratios: `actual` notes in the time of `normal` notes.

use fraction::Fraction;
use serde::{Deserialize, Serialize};

use crate::error::{DurationError, Result};

use super::{
    fraction_tools::{checked_mul, fraction_to_f64},
    NoteType,
};

/// Caller-side identifier of a tuplet bracket, used to record nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TupletId(pub u32);

/// Ratio of a tuplet bracket.
///
/// Each side carries its own reference type, so "3 eighths in the time of
/// a quarter" is `3:1` with eighth and quarter. Equal numbers are allowed
/// and give the multiplier 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TupletRatio {
    number_actual: u32,
    number_normal: u32,
    actual_type: NoteType,
    normal_type: NoteType,
    nested_level: u32,
    nested_inside: Option<TupletId>,
}
impl TupletRatio {
    /// `actual` notes of `note_type` in the time of `normal` of the same
    /// type.
    ///
    /// ```
    /// # use note_duration::{NoteType, TupletRatio};
    /// # use fraction::Fraction;
    /// let triplet = TupletRatio::new(3, 2, NoteType::Eighth).unwrap();
    /// assert_eq!(triplet.multiplier(), Fraction::new(2u64, 3u64));
    /// assert_eq!(triplet.total_length(), 1.0);
    /// ```
    pub fn new(actual: u32, normal: u32, note_type: NoteType) -> Result<Self> {
        Self::with_types(actual, normal, note_type, note_type)
    }

    pub fn with_types(
        actual: u32,
        normal: u32,
        actual_type: NoteType,
        normal_type: NoteType,
    ) -> Result<Self> {
        check_ratio(actual, normal)?;
        Ok(Self {
            number_actual: actual,
            number_normal: normal,
            actual_type,
            normal_type,
            nested_level: 0,
            nested_inside: None,
        })
    }

    pub fn number_actual(&self) -> u32 {
        self.number_actual
    }
    pub fn number_normal(&self) -> u32 {
        self.number_normal
    }
    pub fn actual_type(&self) -> NoteType {
        self.actual_type
    }
    pub fn normal_type(&self) -> NoteType {
        self.normal_type
    }
    pub fn nested_level(&self) -> u32 {
        self.nested_level
    }
    pub fn nested_inside(&self) -> Option<TupletId> {
        self.nested_inside
    }

    pub fn set_ratio(&mut self, actual: u32, normal: u32) -> Result<&mut Self> {
        check_ratio(actual, normal)?;
        self.number_actual = actual;
        self.number_normal = normal;
        Ok(self)
    }

    /// Set both reference types.
    pub fn set_note_type(&mut self, note_type: NoteType) -> &mut Self {
        self.actual_type = note_type;
        self.normal_type = note_type;
        self
    }

    /// Mark the bracket as nested inside `outer`, known as `id` by the
    /// caller.
    pub fn nest_inside(&mut self, id: TupletId, outer: &TupletRatio) -> &mut Self {
        self.nested_inside = Some(id);
        self.nested_level = outer.nested_level + 1;
        self
    }

    /// Same ratio with both reference types moved by `steps` ordinals.
    pub fn shifted(&self, steps: i32) -> Option<Self> {
        Some(Self {
            actual_type: self.actual_type.shifted(steps)?,
            normal_type: self.normal_type.shifted(steps)?,
            ..self.clone()
        })
    }

    /// `(normal * normal_type) / (actual * actual_type)`, exact.
    pub fn multiplier(&self) -> Fraction {
        let normal = Fraction::new(self.number_normal as u64, 1u64)
            * self.normal_type.reference_fraction();
        let actual = Fraction::new(self.number_actual as u64, 1u64)
            * self.actual_type.reference_fraction();
        normal / actual
    }

    pub fn multiplier_f64(&self) -> f64 {
        fraction_to_f64(&self.multiplier())
    }

    /// Length, in quarters, of a fully populated bracket.
    pub fn total_length_fraction(&self) -> Fraction {
        Fraction::new(self.number_normal as u64, 1u64)
            * self.normal_type.reference_fraction()
    }

    pub fn total_length(&self) -> f64 {
        fraction_to_f64(&self.total_length_fraction())
    }

    pub fn is_degenerate(&self) -> bool {
        self.multiplier() == Fraction::new(1u64, 1u64)
    }

    /// ```
    /// # use note_duration::{NoteType, TupletRatio};
    /// let ratio = TupletRatio::new(11, 10, NoteType::Sixteenth).unwrap();
    /// assert_eq!(ratio.full_name(), "Tuplet of 11/10ths");
    /// ```
    pub fn full_name(&self) -> String {
        let name = match (self.number_actual, self.number_normal) {
            (2, 3) => "Duplet",
            (3, 2) => "Triplet",
            (4, 3) | (4, 6) => "Quadruplet",
            (5, 4) | (5, 2) => "Quintuplet",
            (6, 4) => "Sextuplet",
            (7, 4) | (7, 6) | (7, 8) => "Septuplet",
            (8, 6) => "Octuplet",
            (actual, normal) => {
                return format!(
                    "Tuplet of {actual}/{normal}{}",
                    plural_ordinal_suffix(normal)
                )
            }
        };
        name.to_string()
    }
}

fn check_ratio(actual: u32, normal: u32) -> Result<()> {
    if actual == 0 || normal == 0 {
        return Err(DurationError::InvalidTupletRatio { actual, normal });
    }
    Ok(())
}

fn plural_ordinal_suffix(num: u32) -> &'static str {
    if (11..=13).contains(&(num % 100)) {
        return "ths";
    }
    match num % 10 {
        1 => "sts",
        2 => "nds",
        3 => "rds",
        _ => "ths",
    }
}

/// Fold nested ratios (outer first) into one, without reducing.
///
/// Products past `u32::MAX` saturate, see [`checked_aggregate_ratio`].
///
/// ```
/// # use note_duration::{aggregate_ratio, NoteType, TupletRatio};
/// let outer = TupletRatio::new(3, 2, NoteType::Quarter).unwrap();
/// let inner = TupletRatio::new(5, 4, NoteType::Sixteenth).unwrap();
/// assert_eq!(aggregate_ratio(&[outer, inner]), (15, 8));
/// assert_eq!(aggregate_ratio(&[]), (1, 1));
/// ```
pub fn aggregate_ratio(ratios: &[TupletRatio]) -> (u32, u32) {
    ratios.iter().fold((1, 1), |(actual, normal), ratio| {
        (
            actual.saturating_mul(ratio.number_actual),
            normal.saturating_mul(ratio.number_normal),
        )
    })
}

/// [`aggregate_ratio`] failing with `InvalidTupletRatio` when a product
/// does not fit into `u32`. The error carries the saturated values.
pub fn checked_aggregate_ratio(ratios: &[TupletRatio]) -> Result<(u32, u32)> {
    ratios.iter().try_fold((1u32, 1u32), |(actual, normal), ratio| {
        match (
            actual.checked_mul(ratio.number_actual),
            normal.checked_mul(ratio.number_normal),
        ) {
            (Some(actual), Some(normal)) => Ok((actual, normal)),
            _ => {
                let (actual, normal) = aggregate_ratio(ratios);
                Err(DurationError::InvalidTupletRatio { actual, normal })
            }
        }
    })
}

/// Product of the multipliers of nested ratios.
pub fn aggregate_multiplier(ratios: &[TupletRatio]) -> Result<Fraction> {
    ratios
        .iter()
        .try_fold(Fraction::new(1u64, 1u64), |acc, ratio| {
            checked_mul(&acc, &ratio.multiplier())
        })
}

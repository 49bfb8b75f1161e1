//! Static table of notated types and their undotted lengths.
//!
//! Ordinals go from the largest type (duplex-maxima, 0) to the smallest
//! (2048th, 15). Every ordinal is the explicit enum discriminant, so adding
//! smaller types at the end never moves an existing one.

use std::{fmt, str::FromStr};

use fraction::Fraction;
use serde::{Deserialize, Serialize};

use crate::error::{DurationError, Result};

/// Ordinal of the whole note, the anchor of the table (4 quarters).
const WHOLE_ORDINAL: u32 = 4;

/// Notated note shape, without dots or tuplets.
///
/// `Ord` follows the ordinal, so `Whole < Half`: "smaller" means a longer
/// note.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
pub enum NoteType {
    #[serde(rename = "duplex-maxima")]
    DuplexMaxima = 0,
    #[serde(rename = "maxima")]
    Maxima = 1,
    #[serde(rename = "longa")]
    Longa = 2,
    #[serde(rename = "breve")]
    Breve = 3,
    #[serde(rename = "whole")]
    Whole = 4,
    #[serde(rename = "half")]
    Half = 5,
    #[serde(rename = "quarter")]
    Quarter = 6,
    #[serde(rename = "eighth")]
    Eighth = 7,
    #[serde(rename = "16th")]
    Sixteenth = 8,
    #[serde(rename = "32nd")]
    ThirtySecond = 9,
    #[serde(rename = "64th")]
    SixtyFourth = 10,
    #[serde(rename = "128th")]
    OneHundredTwentyEighth = 11,
    #[serde(rename = "256th")]
    TwoHundredFiftySixth = 12,
    #[serde(rename = "512th")]
    FiveHundredTwelfth = 13,
    #[serde(rename = "1024th")]
    OneThousandTwentyFourth = 14,
    #[serde(rename = "2048th")]
    TwoThousandFortyEighth = 15,
}

impl NoteType {
    /// All types, largest first.
    pub const ALL: [NoteType; 16] = [
        NoteType::DuplexMaxima,
        NoteType::Maxima,
        NoteType::Longa,
        NoteType::Breve,
        NoteType::Whole,
        NoteType::Half,
        NoteType::Quarter,
        NoteType::Eighth,
        NoteType::Sixteenth,
        NoteType::ThirtySecond,
        NoteType::SixtyFourth,
        NoteType::OneHundredTwentyEighth,
        NoteType::TwoHundredFiftySixth,
        NoteType::FiveHundredTwelfth,
        NoteType::OneThousandTwentyFourth,
        NoteType::TwoThousandFortyEighth,
    ];
    pub const LARGEST: NoteType = NoteType::DuplexMaxima;
    pub const SMALLEST: NoteType = NoteType::TwoThousandFortyEighth;

    pub const fn ordinal(self) -> u32 {
        self as u32
    }

    pub fn from_ordinal(ordinal: u32) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// Name as used by MusicXML `<type>`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::DuplexMaxima => "duplex-maxima",
            Self::Maxima => "maxima",
            Self::Longa => "longa",
            Self::Breve => "breve",
            Self::Whole => "whole",
            Self::Half => "half",
            Self::Quarter => "quarter",
            Self::Eighth => "eighth",
            Self::Sixteenth => "16th",
            Self::ThirtySecond => "32nd",
            Self::SixtyFourth => "64th",
            Self::OneHundredTwentyEighth => "128th",
            Self::TwoHundredFiftySixth => "256th",
            Self::FiveHundredTwelfth => "512th",
            Self::OneThousandTwentyFourth => "1024th",
            Self::TwoThousandFortyEighth => "2048th",
        }
    }

    /// Capitalized name for human readable output.
    pub(crate) const fn title(self) -> &'static str {
        match self {
            Self::DuplexMaxima => "Duplex Maxima",
            Self::Maxima => "Maxima",
            Self::Longa => "Longa",
            Self::Breve => "Breve",
            Self::Whole => "Whole",
            Self::Half => "Half",
            Self::Quarter => "Quarter",
            Self::Eighth => "Eighth",
            other => other.name(),
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name() == name)
            .ok_or_else(|| DurationError::UnknownType(name.to_string()))
    }

    /// Undotted length in quarters: `4 * 2^(4 - ordinal)`.
    pub fn reference_length(self) -> f64 {
        4.0 * 2f64.powi(WHOLE_ORDINAL as i32 - self.ordinal() as i32)
    }

    /// Length with `dots` dots: `reference_length * (2 - 2^-dots)`.
    pub fn dotted_length(self, dots: u8) -> f64 {
        self.reference_length() * (2.0 - 0.5f64.powi(dots as i32))
    }

    /// Exact counterpart of [`NoteType::reference_length`].
    pub fn reference_fraction(self) -> Fraction {
        let ordinal = self.ordinal();
        match ordinal <= WHOLE_ORDINAL {
            true => Fraction::new(4u64 << (WHOLE_ORDINAL - ordinal), 1u64),
            false => Fraction::new(4u64, 1u64 << (ordinal - WHOLE_ORDINAL)),
        }
    }

    /// Type named by division of the whole note: 1 → whole, 4 → quarter,
    /// 32 → 32nd.
    ///
    /// ```
    /// # use note_duration::NoteType;
    /// assert_eq!(NoteType::from_beat_division(8), Some(NoteType::Eighth));
    /// assert_eq!(NoteType::from_beat_division(6), None);
    /// ```
    pub fn from_beat_division(division: u32) -> Option<Self> {
        if !division.is_power_of_two() {
            return None;
        }
        Self::from_ordinal(WHOLE_ORDINAL + division.trailing_zeros())
    }

    /// Inverse of [`NoteType::from_beat_division`]. Types longer than a
    /// whole give fractions: breve → 0.5.
    pub fn beat_division(self) -> f64 {
        4.0 / self.reference_length()
    }

    pub fn next_larger(self) -> Option<Self> {
        self.ordinal()
            .checked_sub(1)
            .and_then(Self::from_ordinal)
    }
    pub fn next_smaller(self) -> Option<Self> {
        Self::from_ordinal(self.ordinal() + 1)
    }

    /// Type shifted by `steps` ordinals; negative steps go to longer types.
    pub fn shifted(self, steps: i32) -> Option<Self> {
        let ordinal = self.ordinal() as i64 + steps as i64;
        u32::try_from(ordinal).ok().and_then(Self::from_ordinal)
    }
}
impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
impl FromStr for NoteType {
    type Err = DurationError;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

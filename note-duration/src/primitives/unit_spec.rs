//! The atomic, single-symbol description of a length.

use serde::{Deserialize, Serialize};

use crate::error::{DurationError, Result};

use super::{almost_equals, NoteType, TupletRatio};

/// `(quarter_length, type, dots, tuplet actual, tuplet normal, tuplet type)`.
///
/// This is the shape the notation writers match on. The three tuplet
/// fields are either all `Some` or all `None`.
pub type InterchangeTuple =
    (f64, NoteType, u8, Option<u32>, Option<u32>, Option<NoteType>);

/// One notation symbol: type, dots and an optional simple tuplet.
///
/// `quarter_length` matches the symbol within the crate tolerance, except
/// for units emitted for lengths shorter than any type, see
/// [`UnitSpec::is_consistent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub quarter_length: f64,
    pub note_type: NoteType,
    pub dots: u8,
    pub tuplet: Option<TupletRatio>,
}
impl UnitSpec {
    pub fn new(note_type: NoteType, dots: u8, tuplet: Option<TupletRatio>) -> Self {
        let mut spec = Self {
            quarter_length: 0.0,
            note_type,
            dots,
            tuplet,
        };
        spec.quarter_length = spec.notated_length();
        spec
    }

    /// Length written by the symbol itself.
    pub fn notated_length(&self) -> f64 {
        let multiplier = self
            .tuplet
            .as_ref()
            .map_or(1.0, TupletRatio::multiplier_f64);
        self.note_type.dotted_length(self.dots) * multiplier
    }

    /// False for units whose length can not be written by their symbol.
    pub fn is_consistent(&self) -> bool {
        almost_equals(self.quarter_length, self.notated_length())
    }

    pub fn is_exact(&self, quantity: f64) -> bool {
        almost_equals(self.quarter_length, quantity)
    }

    /// ```
    /// # use note_duration::{NoteType, TupletRatio, UnitSpec};
    /// let triplet = TupletRatio::new(3, 2, NoteType::Eighth).unwrap();
    /// let spec = UnitSpec::new(NoteType::Eighth, 0, Some(triplet));
    /// assert_eq!(
    ///     spec.to_tuple(),
    ///     (spec.quarter_length, NoteType::Eighth, 0, Some(3), Some(2), Some(NoteType::Eighth))
    /// );
    /// ```
    pub fn to_tuple(&self) -> InterchangeTuple {
        let (actual, normal, base) = match &self.tuplet {
            Some(ratio) => (
                Some(ratio.number_actual()),
                Some(ratio.number_normal()),
                Some(ratio.normal_type()),
            ),
            None => (None, None, None),
        };
        (
            self.quarter_length,
            self.note_type,
            self.dots,
            actual,
            normal,
            base,
        )
    }

    /// Inverse of [`UnitSpec::to_tuple`]. Partially filled tuplet fields
    /// are rejected.
    pub fn from_tuple(tuple: InterchangeTuple) -> Result<Self> {
        let (quarter_length, note_type, dots, actual, normal, base) = tuple;
        let tuplet = match (actual, normal, base) {
            (None, None, None) => None,
            (Some(actual), Some(normal), Some(base)) => {
                Some(TupletRatio::new(actual, normal, base)?)
            }
            (actual, normal, _) => {
                return Err(DurationError::InvalidTupletRatio {
                    actual: actual.unwrap_or(0),
                    normal: normal.unwrap_or(0),
                })
            }
        };
        Ok(Self {
            quarter_length,
            note_type,
            dots,
            tuplet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::UnitSpec;
    use crate::{
        error::DurationError,
        primitives::{NoteType, TupletRatio},
    };

    #[test]
    fn notated_length() {
        let spec = UnitSpec::new(NoteType::Half, 1, None);
        assert_eq!(spec.quarter_length, 3.0);
        assert!(spec.is_consistent());
        assert!(spec.is_exact(3.0));
        assert!(!spec.is_exact(2.0));

        let quintuplet = TupletRatio::new(5, 4, NoteType::Sixteenth).unwrap();
        let spec = UnitSpec::new(NoteType::Sixteenth, 0, Some(quintuplet));
        assert!(spec.is_exact(0.2));

        let written = UnitSpec {
            quarter_length: 11.0 / 16.0,
            ..UnitSpec::new(NoteType::Half, 1, None)
        };
        assert!(!written.is_consistent());
    }

    #[test]
    fn tuples() {
        let plain = UnitSpec::new(NoteType::Quarter, 2, None);
        assert_eq!(
            plain.to_tuple(),
            (1.75, NoteType::Quarter, 2, None, None, None)
        );
        assert_eq!(UnitSpec::from_tuple(plain.to_tuple()), Ok(plain));

        let triplet = TupletRatio::new(3, 2, NoteType::Quarter).unwrap();
        let spec = UnitSpec::new(NoteType::Quarter, 0, Some(triplet));
        assert_eq!(UnitSpec::from_tuple(spec.to_tuple()), Ok(spec));

        assert_eq!(
            UnitSpec::from_tuple((1.0, NoteType::Quarter, 0, Some(3), None, None)),
            Err(DurationError::InvalidTupletRatio {
                actual: 3,
                normal: 0
            })
        );
    }
}

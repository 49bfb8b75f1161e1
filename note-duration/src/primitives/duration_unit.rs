//! One notated span, written with a single symbol.

use fraction::Fraction;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    conversion::{closest_type, unit_for_quarter_length_with},
    error::{DurationError, Result},
    settings::DurationSettings,
};

use super::{
    aggregate_multiplier, checked_aggregate_ratio, checked_mul, dot_multiplier,
    limit_denominator, Length, NoteType, TupletRatio, UnitSpec,
};

const DOT_NAMES: [&str; 5] =
    ["", "Dotted", "Double Dotted", "Triple Dotted", "Quadruple Dotted"];

/// Type, dots and (possibly nested) tuplets of one symbol, with its
/// quarter length either derived from them or overridden.
///
/// ```
/// # use note_duration::{DurationUnit, NoteType};
/// let mut unit = DurationUnit::new(NoteType::Half);
/// unit.set_dots(1);
/// assert_eq!(unit.quarter_length(), 3.0);
///
/// // no single symbol lasts 2.5 quarters, so the unit unlinks
/// let odd = DurationUnit::from_quarter_length(2.5).unwrap();
/// assert!(!odd.is_linked());
/// assert_eq!(odd.note_type(), NoteType::Half);
/// assert_eq!(odd.quarter_length(), 2.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationUnit {
    note_type: NoteType,
    dots: u8,
    tuplets: Vec<TupletRatio>,
    length: Length,
}
impl DurationUnit {
    pub fn new(note_type: NoteType) -> Self {
        Self::with_dots(note_type, 0)
    }

    pub fn with_dots(note_type: NoteType, dots: u8) -> Self {
        Self {
            note_type,
            dots,
            tuplets: Vec::new(),
            length: Length::Derived,
        }
    }

    pub fn from_type_name(name: &str) -> Result<Self> {
        Ok(Self::new(NoteType::from_name(name)?))
    }

    /// Build from what a notation reader provides: `<type>`, number of
    /// `<dot/>` and `<time-modification>`.
    pub fn from_notation(
        type_name: &str,
        dots: u8,
        tuplet: Option<TupletRatio>,
    ) -> Result<Self> {
        let mut unit = Self::with_dots(NoteType::from_name(type_name)?, dots);
        unit.tuplets.extend(tuplet);
        Ok(unit)
    }

    pub fn from_quarter_length(quarter_length: f64) -> Result<Self> {
        Self::from_quarter_length_with(
            quarter_length,
            &DurationSettings::default(),
        )
    }

    /// Closest single symbol for `quarter_length`. When none matches, the
    /// unit takes the largest type fitting into the length and is
    /// unlinked.
    pub fn from_quarter_length_with(
        quarter_length: f64,
        settings: &DurationSettings,
    ) -> Result<Self> {
        match unit_for_quarter_length_with(quarter_length, settings) {
            Some(spec) => Ok(Self::from(spec)),
            None => {
                let (note_type, _) = closest_type(quarter_length)?;
                log::debug!(
                    "no single symbol for {} quarters, unlinking {}",
                    quarter_length,
                    note_type
                );
                Ok(Self {
                    note_type,
                    dots: 0,
                    tuplets: Vec::new(),
                    length: Length::Overridden(quarter_length),
                })
            }
        }
    }

    pub fn note_type(&self) -> NoteType {
        self.note_type
    }
    pub fn dots(&self) -> u8 {
        self.dots
    }
    pub fn tuplets(&self) -> &[TupletRatio] {
        &self.tuplets
    }
    pub fn length(&self) -> Length {
        self.length
    }
    pub fn ordinal(&self) -> u32 {
        self.note_type.ordinal()
    }
    pub fn is_linked(&self) -> bool {
        self.length.is_linked()
    }

    pub fn set_type(&mut self, note_type: NoteType) -> &mut Self {
        self.note_type = note_type;
        self
    }
    pub fn set_dots(&mut self, dots: u8) -> &mut Self {
        self.dots = dots;
        self
    }
    /// Add a tuplet inside the already present ones.
    pub fn append_tuplet(&mut self, tuplet: TupletRatio) -> &mut Self {
        self.tuplets.push(tuplet);
        self
    }
    pub fn set_tuplets(&mut self, tuplets: Vec<TupletRatio>) -> &mut Self {
        self.tuplets = tuplets;
        self
    }
    pub fn clear_tuplets(&mut self) -> &mut Self {
        self.tuplets.clear();
        self
    }

    /// Re-derive the notation from `quarter_length`, unlinking when no
    /// single symbol matches.
    pub fn set_quarter_length(&mut self, quarter_length: f64) -> Result<&mut Self> {
        *self = Self::from_quarter_length(quarter_length)?;
        Ok(self)
    }

    /// Keep the notation, but make the unit last `quarter_length`.
    pub fn override_quarter_length(
        &mut self,
        quarter_length: f64,
    ) -> Result<&mut Self> {
        if !quarter_length.is_finite() || quarter_length < 0.0 {
            return Err(DurationError::InvalidQuantity(quarter_length));
        }
        self.length = Length::Overridden(quarter_length);
        Ok(self)
    }

    pub fn link(&mut self) -> &mut Self {
        self.length = Length::Derived;
        self
    }
    /// Freeze the current quarter length.
    pub fn unlink(&mut self) -> &mut Self {
        self.length = Length::Overridden(self.quarter_length());
        self
    }

    /// Length written by type, dots and tuplets.
    pub fn notated_length(&self) -> f64 {
        self.tuplets
            .iter()
            .map(TupletRatio::multiplier_f64)
            .fold(self.note_type.dotted_length(self.dots), |acc, m| acc * m)
    }

    pub fn quarter_length(&self) -> f64 {
        self.length.resolve(|| self.notated_length())
    }

    /// Exact when linked; overridden lengths are approximated with
    /// denominators up to `limit_denominator` of the default settings.
    ///
    /// Fails with `FractionOverflow` when the exact value does not fit
    /// into 64 bits.
    pub fn quarter_length_fraction(&self) -> Result<Fraction> {
        match self.length {
            Length::Derived => {
                let dotted = checked_mul(
                    &self.note_type.reference_fraction(),
                    &dot_multiplier(self.dots)?,
                )?;
                checked_mul(&dotted, &aggregate_multiplier(&self.tuplets)?)
            }
            Length::Overridden(value) => limit_denominator(
                value,
                DurationSettings::default().limit_denominator,
            ),
        }
    }

    /// ```
    /// # use note_duration::{DurationUnit, NoteType, TupletRatio};
    /// let mut unit = DurationUnit::new(NoteType::Eighth);
    /// unit.append_tuplet(TupletRatio::new(3, 2, NoteType::Eighth).unwrap());
    /// assert_eq!(unit.full_name(), "Eighth Triplet (1/3 QL)");
    /// ```
    pub fn full_name(&self) -> String {
        let dots = match DOT_NAMES.get(self.dots as usize) {
            Some(name) => name.to_string(),
            None => format!("{}-Times Dotted", self.dots),
        };
        let name = [dots, self.note_type.title().to_string()]
            .into_iter()
            .chain(self.tuplets.iter().map(TupletRatio::full_name))
            .filter(|part| !part.is_empty())
            .join(" ");
        if self.tuplets.is_empty() && self.is_linked() {
            return name;
        }
        match self.quarter_length_fraction() {
            Ok(frac) => format!("{name} ({frac} QL)"),
            Err(_) => format!("{name} ({} QL)", self.quarter_length()),
        }
    }

    /// Single-symbol form. Nested tuplets are folded into one ratio
    /// reported with the innermost types. When the folded ratio does not
    /// fit into `u32`, the spec is left without tuplet and is
    /// inconsistent.
    pub fn to_unit_spec(&self) -> UnitSpec {
        let tuplet = match self.tuplets.as_slice() {
            [] => None,
            [single] => Some(single.clone()),
            nested => match checked_aggregate_ratio(nested) {
                Ok((actual, normal)) => nested.last().and_then(|inner| {
                    TupletRatio::with_types(
                        actual,
                        normal,
                        inner.actual_type(),
                        inner.normal_type(),
                    )
                    .ok()
                }),
                Err(err) => {
                    log::warn!("{}, the unit is written without tuplet", err);
                    None
                }
            },
        };
        UnitSpec {
            quarter_length: self.quarter_length(),
            note_type: self.note_type,
            dots: self.dots,
            tuplet,
        }
    }

    /// Scale the length by `scalar`.
    ///
    /// Powers of two move type and tuplet types, keeping dots and
    /// ratios. Other scalars rebuild the unit from the scaled length.
    pub fn augment_or_diminish(&self, scalar: f64) -> Result<Self> {
        if !scalar.is_finite() || scalar <= 0.0 {
            return Err(DurationError::InvalidQuantity(scalar));
        }
        let steps = -scalar.log2();
        if self.is_linked() && steps.fract() == 0.0 {
            if let Some(scaled) = self.shifted(steps as i32) {
                return Ok(scaled);
            }
        }
        Self::from_quarter_length(self.quarter_length() * scalar)
    }

    fn shifted(&self, steps: i32) -> Option<Self> {
        let tuplets = self
            .tuplets
            .iter()
            .map(|tuplet| tuplet.shifted(steps))
            .collect::<Option<Vec<_>>>()?;
        Some(Self {
            note_type: self.note_type.shifted(steps)?,
            dots: self.dots,
            tuplets,
            length: Length::Derived,
        })
    }
}
impl From<UnitSpec> for DurationUnit {
    fn from(spec: UnitSpec) -> Self {
        let length = match spec.is_consistent() {
            true => Length::Derived,
            false => Length::Overridden(spec.quarter_length),
        };
        Self {
            note_type: spec.note_type,
            dots: spec.dots,
            tuplets: spec.tuplet.into_iter().collect(),
            length,
        }
    }
}

#[cfg(test)]
mod tests {
    use fraction::Fraction;

    use super::DurationUnit;
    use crate::{
        error::DurationError,
        primitives::{Length, NoteType, TupletRatio},
    };

    fn triplet(note_type: NoteType) -> TupletRatio {
        TupletRatio::new(3, 2, note_type).unwrap()
    }

    #[test]
    fn construction() {
        let unit = DurationUnit::from_type_name("16th").unwrap();
        assert_eq!(unit.quarter_length(), 0.25);
        assert_eq!(unit.ordinal(), 8);
        assert_eq!(
            DurationUnit::from_type_name("semiquaver"),
            Err(DurationError::UnknownType("semiquaver".to_string()))
        );

        let unit = DurationUnit::from_notation(
            "eighth",
            0,
            Some(triplet(NoteType::Eighth)),
        )
        .unwrap();
        assert_eq!(
            unit,
            DurationUnit::from_quarter_length(1.0 / 3.0).unwrap()
        );
        assert!(unit.is_linked());
        assert_eq!(
            unit.quarter_length_fraction().unwrap(),
            Fraction::new(1u64, 3u64)
        );

        let unit = DurationUnit::from_quarter_length(1.75).unwrap();
        assert_eq!((unit.note_type(), unit.dots()), (NoteType::Quarter, 2));
        assert!(DurationUnit::from_quarter_length(0.0).is_err());
    }

    #[test]
    fn linking() {
        let mut unit = DurationUnit::with_dots(NoteType::Half, 1);
        unit.override_quarter_length(11.0 / 16.0).unwrap();
        assert!(!unit.is_linked());
        assert_eq!(unit.quarter_length(), 0.6875);
        assert_eq!(unit.full_name(), "Dotted Half (11/16 QL)");

        // notation changes do not touch an overridden length
        unit.set_type(NoteType::Quarter).set_dots(0);
        assert_eq!(unit.quarter_length(), 0.6875);

        unit.link();
        assert_eq!(unit.quarter_length(), 1.0);
        unit.set_dots(1);
        assert_eq!(unit.quarter_length(), 1.5);
        unit.unlink();
        assert_eq!(unit.length(), Length::Overridden(1.5));
        unit.set_dots(2);
        assert_eq!(unit.quarter_length(), 1.5);

        unit.set_quarter_length(0.5).unwrap();
        assert!(unit.is_linked());
        assert_eq!(unit.note_type(), NoteType::Eighth);
        assert!(unit.override_quarter_length(-0.5).is_err());
    }

    #[test]
    fn tuplets() {
        let mut unit = DurationUnit::new(NoteType::Sixteenth);
        unit.append_tuplet(triplet(NoteType::Quarter));
        unit.append_tuplet(TupletRatio::new(5, 4, NoteType::Sixteenth).unwrap());
        assert!((unit.quarter_length() - 0.25 * 8.0 / 15.0).abs() < 1e-12);

        let spec = unit.to_unit_spec();
        let ratio = spec.tuplet.clone().unwrap();
        assert_eq!((ratio.number_actual(), ratio.number_normal()), (15, 8));
        assert_eq!(ratio.actual_type(), NoteType::Sixteenth);
        assert!(spec.is_consistent());

        unit.clear_tuplets();
        assert_eq!(unit.quarter_length(), 0.25);
        assert_eq!(unit.to_unit_spec().tuplet, None);
    }

    #[test]
    fn exact_fraction_limits() {
        let mut unit =
            DurationUnit::with_dots(NoteType::TwoThousandFortyEighth, 60);
        assert_eq!(
            unit.quarter_length_fraction(),
            Err(DurationError::FractionOverflow)
        );
        assert!((unit.quarter_length() - 2.0 * 4.0 / 2048.0).abs() < 1e-12);

        unit.append_tuplet(triplet(NoteType::TwoThousandFortyEighth));
        assert!(unit
            .full_name()
            .starts_with("60-Times Dotted 2048th Triplet ("));
        assert!(unit.full_name().ends_with(" QL)"));

        unit.unlink();
        assert!(unit.quarter_length_fraction().is_ok());

        let mut nested = DurationUnit::new(NoteType::Sixteenth);
        nested.set_tuplets(vec![
            TupletRatio::new(13, 12, NoteType::Sixteenth).unwrap();
            9
        ]);
        let spec = nested.to_unit_spec();
        assert_eq!(spec.tuplet, None);
        assert!(!spec.is_consistent());
        assert!((spec.quarter_length - nested.quarter_length()).abs() < 1e-12);
    }

    #[test]
    fn names() {
        assert_eq!(
            DurationUnit::with_dots(NoteType::Quarter, 2).full_name(),
            "Double Dotted Quarter"
        );
        assert_eq!(DurationUnit::new(NoteType::Breve).full_name(), "Breve");
        assert_eq!(
            DurationUnit::with_dots(NoteType::ThirtySecond, 6).full_name(),
            "6-Times Dotted 32nd"
        );
        let mut unit = DurationUnit::new(NoteType::Quarter);
        unit.append_tuplet(TupletRatio::new(5, 4, NoteType::Quarter).unwrap());
        assert_eq!(unit.full_name(), "Quarter Quintuplet (4/5 QL)");
    }

    #[test]
    fn augment_or_diminish() {
        let dotted = DurationUnit::with_dots(NoteType::Quarter, 1);
        assert_eq!(
            dotted.augment_or_diminish(2.0).unwrap(),
            DurationUnit::with_dots(NoteType::Half, 1)
        );

        let mut eighth_triplet = DurationUnit::new(NoteType::Eighth);
        eighth_triplet.append_tuplet(triplet(NoteType::Eighth));
        let halved = eighth_triplet.augment_or_diminish(0.5).unwrap();
        assert_eq!(halved.note_type(), NoteType::Sixteenth);
        assert_eq!(halved.tuplets(), &[triplet(NoteType::Sixteenth)]);

        let quarter = DurationUnit::new(NoteType::Quarter);
        assert_eq!(
            quarter.augment_or_diminish(1.5).unwrap(),
            DurationUnit::with_dots(NoteType::Quarter, 1)
        );
        let odd = quarter.augment_or_diminish(2.5).unwrap();
        assert!(!odd.is_linked());
        assert_eq!(odd.quarter_length(), 2.5);

        // out of the type table: rebuilt from length
        let maxima = DurationUnit::new(NoteType::DuplexMaxima);
        let doubled = maxima.augment_or_diminish(2.0).unwrap();
        assert_eq!(doubled.quarter_length(), 128.0);
        assert!(!doubled.is_linked());

        assert!(quarter.augment_or_diminish(0.0).is_err());
    }
}

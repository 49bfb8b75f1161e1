//! Tied sequences of notated units.

use derivative::Derivative;
use fraction::Fraction;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    conversion::{quarter_length_to_units_with, unit_for_quarter_length_with},
    error::{DurationError, Result},
    settings::DurationSettings,
};

use super::{
    aggregate_multiplier, almost_equals, almost_le, checked_add,
    fraction_tools::fraction_to_f64, DurationUnit, NoteType, TupletRatio,
    UnitSpec,
};

/// How a [`Duration`] takes part in time.
///
/// Every kind but `Normal` occupies no time, while the grace kinds still
/// keep the notated components.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum DurationKind {
    #[default]
    Normal,
    Zero,
    Grace,
    LongGrace,
    AppoggiaturaStart,
    AppoggiaturaStop,
}
impl DurationKind {
    pub fn is_grace(self) -> bool {
        matches!(
            self,
            Self::Grace
                | Self::LongGrace
                | Self::AppoggiaturaStart
                | Self::AppoggiaturaStop
        )
    }
    pub fn is_timeless(self) -> bool {
        self != Self::Normal
    }
    fn prefix(self) -> Option<&'static str> {
        match self {
            Self::Grace => Some("Grace"),
            Self::LongGrace => Some("Long Grace"),
            Self::AppoggiaturaStart | Self::AppoggiaturaStop => {
                Some("Appoggiatura")
            }
            Self::Normal | Self::Zero => None,
        }
    }
}

/// One logical span of time, written as one or more tied units.
///
/// Component `i` starts where component `i - 1` ends. With a single
/// component the duration is simple, and type, dots and tuplets can be
/// read and set directly.
///
/// ```
/// # use note_duration::{Duration, NoteType};
/// let mut duration = Duration::from_quarter_length(2.5).unwrap();
/// assert!(duration.is_complex());
/// assert_eq!(duration.full_name(), "Half tied to Eighth");
/// assert_eq!(duration.component_start_time(1).unwrap(), 2.0);
///
/// // 2.5 quarters is not a single symbol
/// assert!(!duration.consolidate());
///
/// let mut tied = Duration::from_type(NoteType::Quarter);
/// tied.add_duration(&Duration::from_type(NoteType::Eighth));
/// assert!(tied.consolidate());
/// assert_eq!(tied.dots().unwrap(), 1);
/// ```
#[derive(Derivative, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
pub struct Duration {
    #[derivative(Default(value = "DurationKind::Zero"))]
    kind: DurationKind,
    components: Vec<DurationUnit>,
}
impl Duration {
    /// Zero-length duration without components.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty `components` give a zero duration.
    pub fn from_units(components: Vec<DurationUnit>) -> Self {
        let kind = match components.is_empty() {
            true => DurationKind::Zero,
            false => DurationKind::Normal,
        };
        Self { kind, components }
    }

    pub fn from_type(note_type: NoteType) -> Self {
        Self::from_units(vec![DurationUnit::new(note_type)])
    }

    pub fn from_type_name(name: &str, dots: u8) -> Result<Self> {
        let unit = DurationUnit::with_dots(NoteType::from_name(name)?, dots);
        Ok(Self::from_units(vec![unit]))
    }

    pub fn from_quarter_length(quarter_length: f64) -> Result<Self> {
        Self::from_quarter_length_with(
            quarter_length,
            &DurationSettings::default(),
        )
    }

    pub fn from_quarter_length_with(
        quarter_length: f64,
        settings: &DurationSettings,
    ) -> Result<Self> {
        let units = quarter_length_to_units_with(quarter_length, None, settings)?;
        log::trace!(
            "duration of {} quarters built from {} units",
            quarter_length,
            units.len()
        );
        Ok(Self::from_units(
            units.into_iter().map(DurationUnit::from).collect(),
        ))
    }

    pub fn from_fraction(quarter_length: &Fraction) -> Result<Self> {
        Self::from_quarter_length(fraction_to_f64(quarter_length))
    }

    pub fn kind(&self) -> DurationKind {
        self.kind
    }
    pub fn set_kind(&mut self, kind: DurationKind) -> &mut Self {
        self.kind = kind;
        self
    }
    pub fn is_grace(&self) -> bool {
        self.kind.is_grace()
    }

    /// Same notation, without time. With `appoggiatura` the result starts
    /// an appoggiatura.
    pub fn grace_duration(&self, appoggiatura: bool) -> Self {
        let kind = match appoggiatura {
            true => DurationKind::AppoggiaturaStart,
            false => DurationKind::Grace,
        };
        Self {
            kind,
            components: self.components.clone(),
        }
    }

    /// Same notation, occupying its notated length.
    pub fn real_duration(&self) -> Self {
        Self::from_units(self.components.clone())
    }

    pub fn components(&self) -> &[DurationUnit] {
        &self.components
    }

    pub fn units(&self) -> Vec<UnitSpec> {
        self.components
            .iter()
            .map(DurationUnit::to_unit_spec)
            .collect()
    }

    /// Time occupied: zero for grace and zero kinds.
    pub fn quarter_length(&self) -> f64 {
        match self.kind.is_timeless() {
            true => 0.0,
            false => self.notated_quarter_length(),
        }
    }

    /// Sum of the component lengths, regardless of kind.
    pub fn notated_quarter_length(&self) -> f64 {
        self.components.iter().map(DurationUnit::quarter_length).sum()
    }

    pub fn quarter_length_fraction(&self) -> Result<Fraction> {
        let zero = Fraction::new(0u64, 1u64);
        if self.kind.is_timeless() {
            return Ok(zero);
        }
        self.components.iter().try_fold(zero, |total, unit| {
            checked_add(&total, &unit.quarter_length_fraction()?)
        })
    }

    /// Replace the components by the decomposition of `quarter_length`.
    pub fn set_quarter_length(
        &mut self,
        quarter_length: f64,
    ) -> Result<&mut Self> {
        let kind = self.kind;
        *self = Self::from_quarter_length(quarter_length)?;
        if kind != DurationKind::Zero && !self.components.is_empty() {
            self.kind = kind;
        }
        Ok(self)
    }

    pub fn is_complex(&self) -> bool {
        self.components.len() > 1
    }

    pub fn is_linked(&self) -> bool {
        self.components.iter().all(DurationUnit::is_linked)
    }

    /// `"zero"`, the type name of a simple duration, `"complex"`, or
    /// `"inexpressible"` for a single unit that its notation can not
    /// reproduce.
    pub fn type_label(&self) -> &'static str {
        match self.components.as_slice() {
            [] => "zero",
            [unit] => match unit.to_unit_spec().is_consistent() {
                true => unit.note_type().name(),
                false => "inexpressible",
            },
            _ => "complex",
        }
    }

    fn simple(&self, action: &'static str) -> Result<&DurationUnit> {
        match self.components.as_slice() {
            [unit] => Ok(unit),
            _ => Err(DurationError::ComplexDuration(action)),
        }
    }

    fn simple_mut(&mut self, action: &'static str) -> Result<&mut DurationUnit> {
        match self.components.as_mut_slice() {
            [unit] => Ok(unit),
            _ => Err(DurationError::ComplexDuration(action)),
        }
    }

    pub fn note_type(&self) -> Result<NoteType> {
        Ok(self.simple("get type")?.note_type())
    }

    pub fn dots(&self) -> Result<u8> {
        Ok(self.simple("get dots")?.dots())
    }

    pub fn set_dots(&mut self, dots: u8) -> Result<&mut Self> {
        self.simple_mut("set dots")?.set_dots(dots);
        Ok(self)
    }

    pub fn tuplets(&self) -> Result<&[TupletRatio]> {
        Ok(self.simple("get tuplets")?.tuplets())
    }

    pub fn append_tuplet(&mut self, tuplet: TupletRatio) -> Result<&mut Self> {
        self.simple_mut("append tuplet")?.append_tuplet(tuplet);
        Ok(self)
    }

    pub fn aggregate_tuplet_multiplier(&self) -> Result<Fraction> {
        aggregate_multiplier(self.simple("aggregate tuplets")?.tuplets())
    }

    pub fn add_unit(&mut self, unit: DurationUnit) -> &mut Self {
        if self.kind == DurationKind::Zero {
            self.kind = DurationKind::Normal;
        }
        self.components.push(unit);
        self
    }

    /// Tie `other` to the end.
    pub fn add_duration(&mut self, other: &Duration) -> &mut Self {
        for unit in other.components.iter().cloned() {
            self.add_unit(unit);
        }
        self
    }

    pub fn consolidate(&mut self) -> bool {
        self.consolidate_with(&DurationSettings::default())
    }

    /// Collapse all components into one, if a single symbol lasts the
    /// whole length. Otherwise nothing changes and `false` is returned.
    ///
    /// A single component counts as consolidated only when its notation
    /// reproduces its length.
    pub fn consolidate_with(&mut self, settings: &DurationSettings) -> bool {
        if let [unit] = self.components.as_slice() {
            if unit.to_unit_spec().is_consistent() {
                return true;
            }
        }
        let total = self.notated_quarter_length();
        match unit_for_quarter_length_with(total, settings) {
            Some(spec) => {
                self.components = vec![DurationUnit::from(spec)];
                true
            }
            None => {
                log::debug!(
                    "can not consolidate {} components of {} quarters",
                    self.components.len(),
                    total
                );
                false
            }
        }
    }

    /// Offset of component `index` from the start of the duration.
    pub fn component_start_time(&self, index: usize) -> Result<f64> {
        if index >= self.components.len() {
            return Err(DurationError::ComponentIndexOutOfRange {
                index,
                len: self.components.len(),
            });
        }
        Ok(self.components[..index]
            .iter()
            .map(DurationUnit::quarter_length)
            .sum())
    }

    /// Index of the component sounding at `position`. A position on a
    /// boundary belongs to the later component, the end of the duration
    /// to the last one.
    pub fn component_index_at_position(&self, position: f64) -> Result<usize> {
        let length = self.notated_quarter_length();
        let out_of_range = DurationError::PositionOutOfRange { position, length };
        if self.components.is_empty()
            || !position.is_finite()
            || !almost_le(0.0, position)
            || !almost_le(position, length)
        {
            return Err(out_of_range);
        }
        let mut end = 0.0;
        for (index, unit) in self.components.iter().enumerate() {
            end += unit.quarter_length();
            if position < end && !almost_equals(position, end) {
                return Ok(index);
            }
        }
        Ok(self.components.len() - 1)
    }

    /// Split the component sounding at `position` in two. Nothing happens
    /// when `position` already falls on a component boundary.
    ///
    /// ```
    /// # use note_duration::{Duration, NoteType};
    /// let mut duration = Duration::from_type(NoteType::Half);
    /// duration.slice_component_at_position(0.5).unwrap();
    /// assert_eq!(duration.full_name(), "Eighth tied to Dotted Quarter");
    /// assert_eq!(duration.quarter_length(), 2.0);
    /// ```
    pub fn slice_component_at_position(&mut self, position: f64) -> Result<()> {
        let index = self.component_index_at_position(position)?;
        let start = self.component_start_time(index)?;
        let unit_length = self.components[index].quarter_length();
        let head = position - start;
        let tail = start + unit_length - position;
        if almost_equals(head, 0.0) || almost_equals(tail, 0.0) {
            return Ok(());
        }
        log::debug!(
            "slicing component {} of {} quarters into {} + {}",
            index,
            unit_length,
            head,
            tail
        );
        let pieces = [
            DurationUnit::from_quarter_length(head)?,
            DurationUnit::from_quarter_length(tail)?,
        ];
        self.components.splice(index..=index, pieces);
        Ok(())
    }

    /// Scale every component by `scalar`, keeping the kind.
    pub fn augment_or_diminish(&self, scalar: f64) -> Result<Self> {
        if !scalar.is_finite() || scalar <= 0.0 {
            return Err(DurationError::InvalidQuantity(scalar));
        }
        let components = self
            .components
            .iter()
            .map(|unit| unit.augment_or_diminish(scalar))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            kind: self.kind,
            components,
        })
    }

    /// ```
    /// # use note_duration::Duration;
    /// let duration = Duration::from_quarter_length(4.75).unwrap();
    /// assert_eq!(duration.full_name(), "Whole tied to Dotted Eighth");
    /// let grace = Duration::from_quarter_length(0.5).unwrap().grace_duration(false);
    /// assert_eq!(grace.full_name(), "Grace Eighth");
    /// ```
    pub fn full_name(&self) -> String {
        let name = match self.components.is_empty() {
            true => "Zero".to_string(),
            false => self
                .components
                .iter()
                .map(DurationUnit::full_name)
                .join(" tied to "),
        };
        match self.kind.prefix() {
            Some(prefix) => format!("{prefix} {name}"),
            None => name,
        }
    }
}
impl From<DurationUnit> for Duration {
    fn from(unit: DurationUnit) -> Self {
        Self::from_units(vec![unit])
    }
}

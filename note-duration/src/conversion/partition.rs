//! Turning arbitrary quarter lengths into sequences of single symbols.

use crate::{
    error::{DurationError, Result},
    primitives::{almost_equals, almost_le, NoteType, UnitSpec},
    settings::DurationSettings,
};

use super::{closest_type, dotted_match, tuplet_candidates_with};

/// Remainders this close to zero are float noise.
fn is_negligible(quantity: f64) -> bool {
    almost_equals(quantity, 0.0)
}

/// Single symbol lasting exactly `quantity`: plain or dotted type first,
/// then a simple tuplet.
///
/// ```
/// # use note_duration::{unit_for_quarter_length, NoteType};
/// let unit = unit_for_quarter_length(0.75).unwrap();
/// assert_eq!((unit.note_type, unit.dots), (NoteType::Eighth, 1));
/// assert_eq!(unit_for_quarter_length(2.5), None);
/// ```
pub fn unit_for_quarter_length(quantity: f64) -> Option<UnitSpec> {
    unit_for_quarter_length_with(quantity, &DurationSettings::default())
}

pub fn unit_for_quarter_length_with(
    quantity: f64,
    settings: &DurationSettings,
) -> Option<UnitSpec> {
    if let Some((dots, note_type)) = dotted_match(quantity, settings.max_dots)
    {
        return Some(UnitSpec::new(note_type, dots, None));
    }
    tuplet_candidates_with(quantity, Some(1), settings)
        .into_iter()
        .next()
        .map(|ratio| UnitSpec::new(ratio.actual_type(), 0, Some(ratio)))
}

/// Convert `quantity` into single-symbol units, in time order.
///
/// Without `division_unit` the length is split greedily, largest type
/// first, whenever no single symbol fits. With it, the length is first cut
/// into chunks of `division_unit` (plus a shorter remainder), and every
/// chunk is converted on its own.
///
/// ```
/// # use note_duration::{quarter_length_to_units, NoteType};
/// let units = quarter_length_to_units(2.5, None).unwrap();
/// assert_eq!(
///     units.iter().map(|u| u.to_tuple()).collect::<Vec<_>>(),
///     vec![
///         (2.0, NoteType::Half, 0, None, None, None),
///         (0.5, NoteType::Eighth, 0, None, None, None),
///     ]
/// );
/// ```
pub fn quarter_length_to_units(
    quantity: f64,
    division_unit: Option<f64>,
) -> Result<Vec<UnitSpec>> {
    quarter_length_to_units_with(
        quantity,
        division_unit,
        &DurationSettings::default(),
    )
}

pub fn quarter_length_to_units_with(
    quantity: f64,
    division_unit: Option<f64>,
    settings: &DurationSettings,
) -> Result<Vec<UnitSpec>> {
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(DurationError::InvalidQuantity(quantity));
    }
    let mut partitioner = Partitioner {
        quantity,
        settings,
        units: Vec::new(),
    };
    match division_unit {
        None => partitioner.decompose(quantity)?,
        Some(chunk) => {
            if !chunk.is_finite() || chunk <= 0.0 || is_negligible(chunk) {
                return Err(DurationError::InvalidQuantity(chunk));
            }
            if (quantity / chunk).floor() > settings.max_components as f64 {
                return Err(DurationError::UnrepresentableLength {
                    quantity,
                    limit: settings.max_components,
                });
            }
            // every chunk pushes at least one unit, so `push` bounds the loop
            let mut rest = quantity;
            while almost_le(chunk, rest) {
                partitioner.decompose(chunk)?;
                rest -= chunk;
            }
            partitioner.decompose(rest.max(0.0))?;
        }
    }
    log::trace!(
        "{} quarters converted to {} units",
        quantity,
        partitioner.units.len()
    );
    Ok(partitioner.units)
}

struct Partitioner<'a> {
    /// requested length, for error reports
    quantity: f64,
    settings: &'a DurationSettings,
    units: Vec<UnitSpec>,
}
impl Partitioner<'_> {
    fn push(&mut self, unit: UnitSpec) -> Result<()> {
        if self.units.len() >= self.settings.max_components {
            return Err(DurationError::UnrepresentableLength {
                quantity: self.quantity,
                limit: self.settings.max_components,
            });
        }
        self.units.push(unit);
        Ok(())
    }

    fn decompose(&mut self, quantity: f64) -> Result<()> {
        let mut remainder = quantity;
        while !is_negligible(remainder) {
            if let Some(unit) =
                unit_for_quarter_length_with(remainder, self.settings)
            {
                log::trace!("{} quarters matched by {:?}", remainder, unit);
                return self.push(unit);
            }
            let (head, _) = closest_type(remainder)?;
            if remainder < head.reference_length() {
                log::warn!(
                    "{} quarters is shorter than {} and is not expressible",
                    remainder,
                    NoteType::SMALLEST
                );
                return self.push(UnitSpec {
                    quarter_length: remainder,
                    note_type: NoteType::SMALLEST,
                    dots: 0,
                    tuplet: None,
                });
            }
            log::debug!("splitting {} off {} quarters", head, remainder);
            self.push(UnitSpec::new(head, 0, None))?;
            remainder = (remainder - head.reference_length()).max(0.0);
        }
        Ok(())
    }
}

//! Single-symbol searches: closest type, dotted match and tuplet
//! candidates.
//!
//! "No match" is an ordinary outcome here and comes back as `None` or an
//! empty vector. The partitioner decides what to do with it.

use itertools::iproduct;

use crate::{
    error::{DurationError, Result},
    primitives::{almost_equals, almost_le, NoteType, TupletRatio},
    settings::{DurationSettings, DEFAULT_TUPLET_NUMERATORS},
};

fn check_quantity(quantity: f64) -> Result<f64> {
    match quantity.is_finite() && quantity > 0.0 {
        true => Ok(quantity),
        false => Err(DurationError::InvalidQuantity(quantity)),
    }
}

/// Largest type whose reference length is not greater than `quantity`,
/// and whether it matches exactly.
///
/// Above the duplex-maxima gives the duplex-maxima; below the 2048th
/// gives the 2048th, both inexact.
///
/// ```
/// # use note_duration::{closest_type, NoteType};
/// assert_eq!(closest_type(0.75).unwrap(), (NoteType::Eighth, false));
/// assert_eq!(closest_type(2.0).unwrap(), (NoteType::Half, true));
/// assert!(closest_type(0.0).is_err());
/// ```
pub fn closest_type(quantity: f64) -> Result<(NoteType, bool)> {
    let quantity = check_quantity(quantity)?;
    let found = NoteType::ALL
        .iter()
        .copied()
        .find(|t| almost_le(t.reference_length(), quantity))
        .map(|t| (t, almost_equals(t.reference_length(), quantity)));
    Ok(found.unwrap_or((NoteType::SMALLEST, false)))
}

fn checked_dotted_length(
    note_type: NoteType,
    dots: u8,
    max_dots: u8,
) -> Result<f64> {
    if dots > max_dots {
        return Err(DurationError::DotBudgetExceeded { dots, max_dots });
    }
    Ok(note_type.dotted_length(dots))
}

/// Dot count which makes `note_type` last `quantity`, if any within
/// `max_dots`.
pub fn dotted_match_type(
    quantity: f64,
    note_type: NoteType,
    max_dots: u8,
) -> Option<u8> {
    (0..=u8::MAX)
        .map(|dots| {
            checked_dotted_length(note_type, dots, max_dots)
                .map(|length| (dots, length))
        })
        .map_while(|candidate| candidate.ok())
        .find(|(_, length)| almost_equals(*length, quantity))
        .map(|(dots, _)| dots)
}

/// Find `(dots, type)` reproducing `quantity` exactly.
///
/// Types are tried from the largest one fitting into `quantity` down to
/// the smallest, dots from 0 to `max_dots`.
///
/// ```
/// # use note_duration::{dotted_match, NoteType};
/// assert_eq!(dotted_match(3.0, 4), Some((1, NoteType::Half)));
/// assert_eq!(dotted_match(1.75, 4), Some((2, NoteType::Quarter)));
/// assert_eq!(dotted_match(1.6, 4), None);
/// ```
pub fn dotted_match(quantity: f64, max_dots: u8) -> Option<(u8, NoteType)> {
    if check_quantity(quantity).is_err() {
        return None;
    }
    NoteType::ALL
        .iter()
        .copied()
        .filter(|t| almost_le(t.reference_length(), quantity))
        .find_map(|t| {
            dotted_match_type(quantity, t, max_dots).map(|dots| (dots, t))
        })
}

/// Tuplet ratios `N:(N-1)` of a single type, under which one note lasts
/// `quantity`.
///
/// Numerators come from the default set (3, 5, 7, 11, 13).
///
/// ```
/// # use note_duration::{tuplet_candidates, NoteType, TupletRatio};
/// let found = tuplet_candidates(1.0 / 3.0, None);
/// assert_eq!(found, vec![TupletRatio::new(3, 2, NoteType::Eighth).unwrap()]);
/// assert!(tuplet_candidates(0.5, None).is_empty());
/// ```
pub fn tuplet_candidates(
    quantity: f64,
    max_count: Option<usize>,
) -> Vec<TupletRatio> {
    search_tuplets(quantity, max_count, &DEFAULT_TUPLET_NUMERATORS)
}

pub fn tuplet_candidates_with(
    quantity: f64,
    max_count: Option<usize>,
    settings: &DurationSettings,
) -> Vec<TupletRatio> {
    search_tuplets(quantity, max_count, &settings.tuplet_numerators)
}

fn search_tuplets(
    quantity: f64,
    max_count: Option<usize>,
    numerators: &[u32],
) -> Vec<TupletRatio> {
    if check_quantity(quantity).is_err() {
        return Vec::new();
    }
    let found = iproduct!(
        numerators.iter().copied().filter(|n| *n > 1),
        NoteType::ALL.iter().rev().copied()
    )
    .filter(|(numerator, note_type)| {
        let undivided =
            quantity * *numerator as f64 / (*numerator - 1) as f64;
        almost_equals(undivided, note_type.reference_length())
    })
    .filter_map(|(numerator, note_type)| {
        TupletRatio::new(numerator, numerator - 1, note_type).ok()
    });
    match max_count {
        Some(count) => found.take(count).collect(),
        None => found.collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        closest_type, dotted_match, dotted_match_type, tuplet_candidates,
        tuplet_candidates_with,
    };
    use crate::{
        error::DurationError, primitives::NoteType, settings::DurationSettings,
        TupletRatio,
    };

    #[test]
    fn closest() {
        assert_eq!(closest_type(1.0).unwrap(), (NoteType::Quarter, true));
        assert_eq!(closest_type(1.5).unwrap(), (NoteType::Quarter, false));
        assert_eq!(closest_type(0.75).unwrap(), (NoteType::Eighth, false));
        assert_eq!(
            closest_type(100.0).unwrap(),
            (NoteType::DuplexMaxima, false)
        );
        assert_eq!(
            closest_type(0.001).unwrap(),
            (NoteType::TwoThousandFortyEighth, false)
        );
        // float drift still counts as exact
        assert_eq!(
            closest_type(0.1 + 0.2 + 0.2).unwrap(),
            (NoteType::Eighth, true)
        );
        assert_eq!(
            closest_type(-1.0),
            Err(DurationError::InvalidQuantity(-1.0))
        );
        assert!(closest_type(f64::INFINITY).is_err());
    }

    #[test]
    fn dotted() {
        assert_eq!(dotted_match(1.0, 4), Some((0, NoteType::Quarter)));
        assert_eq!(dotted_match(3.0, 4), Some((1, NoteType::Half)));
        assert_eq!(dotted_match(0.9375, 4), Some((3, NoteType::Eighth)));
        assert_eq!(dotted_match(0.96875, 4), Some((4, NoteType::Eighth)));
        assert_eq!(dotted_match(0.96875, 3), None);
        assert_eq!(dotted_match(96.0, 4), Some((1, NoteType::DuplexMaxima)));
        assert_eq!(dotted_match(2.5, 4), None);
        assert_eq!(dotted_match(0.0, 4), None);
        assert_eq!(dotted_match_type(1.5, NoteType::Quarter, 4), Some(1));
        assert_eq!(dotted_match_type(1.5, NoteType::Eighth, 4), None);
        assert_eq!(dotted_match_type(1.0, NoteType::Quarter, 0), Some(0));
    }

    #[test]
    fn tuplets() {
        assert_eq!(
            tuplet_candidates(0.2, None),
            vec![TupletRatio::new(5, 4, NoteType::Sixteenth).unwrap()]
        );
        assert_eq!(
            tuplet_candidates(2.0 / 3.0, Some(1)),
            vec![TupletRatio::new(3, 2, NoteType::Quarter).unwrap()]
        );
        assert!(tuplet_candidates(2.0 / 7.0, None).is_empty());
        assert_eq!(
            tuplet_candidates(6.0 / 7.0 * 0.5, None),
            vec![TupletRatio::new(7, 6, NoteType::Eighth).unwrap()]
        );
        assert!(tuplet_candidates(2.5, None).is_empty());
        assert!(tuplet_candidates(1.0 / 3.0, Some(0)).is_empty());

        let triplets_only =
            DurationSettings::default().with_tuplet_numerators([3]);
        assert!(tuplet_candidates_with(0.2, None, &triplets_only).is_empty());
    }
}

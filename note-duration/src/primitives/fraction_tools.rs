//! Tools for comparing quarter lengths and turning them into fractions.

use fraction::Fraction;

use crate::error::{DurationError, Result};

use super::QUARTER_LENGTH_EPSILON;

/// Tolerant equality of quarter lengths.
///
/// The tolerance is `QUARTER_LENGTH_EPSILON`, relative to the larger
/// magnitude but never smaller than the absolute epsilon.
///
/// ```
/// # use note_duration::primitives::almost_equals;
/// assert!(almost_equals(1.0 / 3.0 * 3.0, 1.0));
/// assert!(!almost_equals(0.333, 1.0 / 3.0));
/// ```
pub fn almost_equals(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= QUARTER_LENGTH_EPSILON * scale
}

/// `a <= b`, with `almost_equals` counted as equal.
pub fn almost_le(a: f64, b: f64) -> bool {
    a < b || almost_equals(a, b)
}

pub fn fraction_to_f64(frac: &Fraction) -> f64 {
    match (frac.numer(), frac.denom()) {
        (Some(num), Some(den)) => {
            let value = *num as f64 / *den as f64;
            match frac.is_sign_negative() {
                true => -value,
                false => value,
            }
        }
        _ => f64::NAN,
    }
}

/// Exact multiplier of `dots` dots: `2 - 2^-dots`.
///
/// ```
/// # use note_duration::primitives::dot_multiplier;
/// # use fraction::Fraction;
/// assert_eq!(dot_multiplier(0).unwrap(), Fraction::new(1u64, 1u64));
/// assert_eq!(dot_multiplier(2).unwrap(), Fraction::new(7u64, 4u64));
/// assert!(dot_multiplier(64).is_err());
/// ```
pub fn dot_multiplier(dots: u8) -> Result<Fraction> {
    let denom = 1u64
        .checked_shl(dots as u32)
        .ok_or(DurationError::FractionOverflow)?;
    let numer = denom
        .checked_mul(2)
        .ok_or(DurationError::FractionOverflow)?
        - 1;
    Ok(Fraction::new(numer, denom))
}

fn parts(frac: &Fraction) -> Result<(u64, u64)> {
    match (frac.numer(), frac.denom()) {
        (Some(numer), Some(denom)) if *denom != 0 => Ok((*numer, *denom)),
        _ => Err(DurationError::FractionOverflow),
    }
}

/// Product of two non-negative fractions, cross-reduced before
/// multiplying so that only the result has to fit into `u64`.
///
/// ```
/// # use note_duration::primitives::checked_mul;
/// # use fraction::Fraction;
/// let product = checked_mul(
///     &Fraction::new(1u64 << 40, 3u64),
///     &Fraction::new(3u64, 1u64 << 40),
/// );
/// assert_eq!(product.unwrap(), Fraction::new(1u64, 1u64));
/// assert!(checked_mul(
///     &Fraction::new(1u64, 1u64 << 40),
///     &Fraction::new(1u64, 1u64 << 40)
/// )
/// .is_err());
/// ```
pub fn checked_mul(a: &Fraction, b: &Fraction) -> Result<Fraction> {
    let (a_numer, a_denom) = parts(a)?;
    let (b_numer, b_denom) = parts(b)?;
    let left = Fraction::new(a_numer, b_denom);
    let right = Fraction::new(b_numer, a_denom);
    let (left_numer, left_denom) = parts(&left)?;
    let (right_numer, right_denom) = parts(&right)?;
    match (
        left_numer.checked_mul(right_numer),
        left_denom.checked_mul(right_denom),
    ) {
        (Some(numer), Some(denom)) => Ok(Fraction::new(numer, denom)),
        _ => Err(DurationError::FractionOverflow),
    }
}

/// Sum of two non-negative fractions over their least common denominator.
pub fn checked_add(a: &Fraction, b: &Fraction) -> Result<Fraction> {
    let (a_numer, a_denom) = parts(a)?;
    let (b_numer, b_denom) = parts(b)?;
    // a_denom / gcd and b_denom / gcd
    let (a_part, b_part) = parts(&Fraction::new(a_denom, b_denom))?;
    let sum = a_numer
        .checked_mul(b_part)
        .zip(b_numer.checked_mul(a_part))
        .and_then(|(left, right)| left.checked_add(right));
    match (sum, a_denom.checked_mul(b_part)) {
        (Some(numer), Some(denom)) => Ok(Fraction::new(numer, denom)),
        _ => Err(DurationError::FractionOverflow),
    }
}

/// Best rational approximation of `value` with denominator not greater
/// than `limit`.
///
/// Walks continued fraction convergents and then picks between the last
/// convergent and the best semiconvergent.
///
/// ```
/// # use note_duration::primitives::limit_denominator;
/// # use fraction::Fraction;
/// assert_eq!(
///     limit_denominator(1.0 / 3.0, 65535).unwrap(),
///     Fraction::new(1u64, 3u64)
/// );
/// assert_eq!(
///     limit_denominator(3.141592653589793, 100).unwrap(),
///     Fraction::new(311u64, 99u64)
/// );
/// ```
pub fn limit_denominator(value: f64, limit: u64) -> Result<Fraction> {
    if limit < 1 {
        return Err(DurationError::InvalidDenominatorLimit(limit));
    }
    if !value.is_finite() || value < 0.0 {
        return Err(DurationError::InvalidQuantity(value));
    }
    let (mut p0, mut q0, mut p1, mut q1) = (0u64, 1u64, 1u64, 0u64);
    let mut x = value;
    let mut exhausted = false;
    // 64 convergents is far beyond f64 precision.
    for _ in 0..64 {
        let a = x.floor();
        if a >= u64::MAX as f64 {
            break;
        }
        let a = a as u64;
        let q2 = match a.checked_mul(q1).and_then(|v| v.checked_add(q0)) {
            Some(q2) if q2 <= limit => q2,
            _ => break,
        };
        let p2 = match a.checked_mul(p1).and_then(|v| v.checked_add(p0)) {
            Some(p2) => p2,
            None => break,
        };
        (p0, q0, p1, q1) = (p1, q1, p2, q2);
        let rest = x - a as f64;
        if rest <= f64::EPSILON * x.max(1.0) {
            exhausted = true;
            break;
        }
        x = 1.0 / rest;
    }
    if q1 == 0 {
        return Err(DurationError::InvalidQuantity(value));
    }
    if exhausted {
        return Ok(Fraction::new(p1, q1));
    }
    let k = (limit - q0) / q1;
    let bound1 = (
        p0.saturating_add(k.saturating_mul(p1)),
        q0 + k * q1,
    );
    let bound2 = (p1, q1);
    let distance = |(p, q): (u64, u64)| (p as f64 / q as f64 - value).abs();
    let (p, q) = match distance(bound2) <= distance(bound1) {
        true => bound2,
        false => bound1,
    };
    Ok(Fraction::new(p, q))
}

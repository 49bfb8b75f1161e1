use serde::{Deserialize, Serialize};

/// Where the quarter length of a notated unit comes from.
///
/// `Derived` units are linked: their length always follows type, dots and
/// tuplets. `Overridden` units keep the caller's value, e.g. a dotted half
/// written to mean 11/16.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Length {
    #[default]
    Derived,
    Overridden(f64),
}
impl Length {
    pub fn is_linked(&self) -> bool {
        matches!(self, Self::Derived)
    }

    /// Evaluate with the value computed from notation.
    pub fn resolve(&self, derived: impl FnOnce() -> f64) -> f64 {
        match self {
            Self::Derived => derived(),
            Self::Overridden(value) => *value,
        }
    }
}

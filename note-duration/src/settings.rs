use derivative::Derivative;
use serde::{Deserialize, Serialize};

/// Tuplet numerators tried by the tuplet search, in search order.
///
/// 4:3-like ratios are left out: they read better as dots.
pub const DEFAULT_TUPLET_NUMERATORS: [u32; 5] = [3, 5, 7, 11, 13];

/// Knobs of the conversion algorithms.
///
/// Missing fields of a deserialized document are taken from defaults:
///
/// ```
/// # use note_duration::DurationSettings;
/// let settings: DurationSettings =
///     serde_json::from_str(r#"{"max_dots": 2}"#).unwrap();
/// assert_eq!(settings.max_dots, 2);
/// assert_eq!(settings.max_components, 256);
/// assert_eq!(settings.tuplet_numerators, vec![3, 5, 7, 11, 13]);
/// ```
#[derive(Derivative, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(default)]
pub struct DurationSettings {
    /// Largest dot count the dotted search tries.
    #[derivative(Default(value = "4"))]
    pub max_dots: u8,
    #[derivative(Default(value = "DEFAULT_TUPLET_NUMERATORS.to_vec()"))]
    pub tuplet_numerators: Vec<u32>,
    /// Partitioning fails with `UnrepresentableLength` past this count.
    #[derivative(Default(value = "256"))]
    pub max_components: usize,
    /// Denominator bound used when quarter lengths are reported as
    /// fractions.
    #[derivative(Default(value = "65535"))]
    pub limit_denominator: u64,
}
impl DurationSettings {
    pub fn new(max_dots: u8) -> Self {
        Self {
            max_dots,
            ..Default::default()
        }
    }
    pub fn with_max_components(mut self, max_components: usize) -> Self {
        self.max_components = max_components;
        self
    }
    pub fn with_tuplet_numerators(
        mut self,
        numerators: impl IntoIterator<Item = u32>,
    ) -> Self {
        self.tuplet_numerators = numerators.into_iter().collect();
        self
    }
}

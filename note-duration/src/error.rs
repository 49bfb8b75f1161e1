//! Error types for duration conversion.

/// Everything that can go wrong while turning quarter lengths into
/// notation and back.
///
/// "No exact match" is never an error: the search functions return
/// `Option` or an empty `Vec` for that.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DurationError {
    /// Type name or beat division that is not in the type table.
    #[error("unknown note type: {0}")]
    UnknownType(String),

    /// Zero, negative or non-finite length where a positive one is required.
    #[error("invalid quarter length: {0}")]
    InvalidQuantity(f64),

    /// Dot count over the configured budget. Only produced inside the
    /// dotted search, which treats it as "no match".
    #[error("{dots} dots exceed the budget of {max_dots}")]
    DotBudgetExceeded { dots: u8, max_dots: u8 },

    /// Length needs more components than the safety limit allows.
    #[error("quarter length {quantity} needs more than {limit} components")]
    UnrepresentableLength { quantity: f64, limit: usize },

    #[error("invalid tuplet ratio {actual}:{normal}")]
    InvalidTupletRatio { actual: u32, normal: u32 },

    #[error("component index {index} out of range for {len} components")]
    ComponentIndexOutOfRange { index: usize, len: usize },

    #[error("position {position} is outside of duration with length {length}")]
    PositionOutOfRange { position: f64, length: f64 },

    /// Operation is defined only for durations with a single component.
    #[error("can not {0} of a complex duration")]
    ComplexDuration(&'static str),

    /// Exact fraction arithmetic ran out of 64-bit numerators or
    /// denominators, e.g. for very many dots or deeply nested tuplets.
    #[error("exact fraction does not fit into 64 bits")]
    FractionOverflow,

    #[error("denominator limit should be at least one, got {0}")]
    InvalidDenominatorLimit(u64),
}

pub type Result<T> = std::result::Result<T, DurationError>;

//! Error types for dice-core.
//!
//! Every failure in this crate is an input or programmer error surfaced
//! synchronously to the caller. Validation is eager: a rejected setter or
//! constructor leaves no partially mutated state behind.
//!
//! Operand type violations (comparing a die against something that is neither
//! a number nor a die) cannot be expressed in Rust and are rejected at compile
//! time, so they have no variant here.

/// Severity level of an error, used for categorization and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, should not retry without changes.
    ///
    /// Examples: zero faces, exploding a pool of two dice
    Validation,

    /// The request is valid but exceeds what the statistics engine can represent.
    ///
    /// Examples: a d4294967295 whose frequency table would not fit in memory
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }
}

/// Field of a [`Die`](crate::Die) named in validation errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DieField {
    Count,
    Faces,
}

/// Errors produced by dice construction, rolling helpers and statistics.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    /// Pool size below one.
    #[error("count was {0}, expected count > 0")]
    InvalidCount(i64),

    /// Face count below one.
    #[error("faces was {0}, expected faces > 0")]
    InvalidFaces(i64),

    /// A textual value for `count` or `faces` was not an integer.
    #[error("{field} was {value:?}, expected an integer")]
    NotAnInteger { field: DieField, value: String },

    /// Text that is not `NdF` dice notation.
    #[error("invalid dice notation {0:?}, expected NdF (e.g. 2d6)")]
    InvalidNotation(String),

    /// Exploding rolls need a single die.
    #[error("exploding rolls need a single die, got a pool of {count}")]
    PoolSize { count: u32 },

    /// Unlimited explosions on a die that always rolls its maximum.
    #[error("cannot explode a {faces}-sided die without a max_explosions limit")]
    UnboundedExplosion { faces: u32 },

    /// The pool's frequency table exceeds the statistics size limits.
    #[error("outcome distribution of {count}d{faces} is too large to tabulate")]
    DistributionOverflow { count: u32, faces: u32 },

    /// Floor division by a literal zero.
    #[error("floor division by zero")]
    DivisionByZero,
}

impl DiceError {
    /// Returns the severity level of this error.
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DistributionOverflow { .. } => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    /// Returns a static string identifier for this error variant.
    pub const fn error_code(&self) -> &'static str {
        use DiceError::*;
        match self {
            InvalidCount(_) => "DICE_INVALID_COUNT",
            InvalidFaces(_) => "DICE_INVALID_FACES",
            NotAnInteger { .. } => "DICE_NOT_AN_INTEGER",
            InvalidNotation(_) => "DICE_INVALID_NOTATION",
            PoolSize { .. } => "DICE_POOL_SIZE",
            UnboundedExplosion { .. } => "DICE_UNBOUNDED_EXPLOSION",
            DistributionOverflow { .. } => "DICE_DISTRIBUTION_OVERFLOW",
            DivisionByZero => "DICE_DIVISION_BY_ZERO",
        }
    }
}

pub type Result<T> = std::result::Result<T, DiceError>;

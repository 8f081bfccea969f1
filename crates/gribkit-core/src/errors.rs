use thiserror::Error;

/// Result type alias using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure reported by the core maps to exactly one kind, and each
/// kind carries a stable code for programmatic handling by the bitstream
/// and metadata layers that call into this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Domain errors
    InvalidArgument,
    AllocationFailure,
    NotFound,
    ParseError,
    OutOfRange,

    // Expression parsing
    MalformedToken,
    TooManyTokens,

    // Concepts
    ConceptNoMatch,
    /// Rule table document is malformed or fails validation
    InvalidRuleTable,

    // Numerics
    /// An iterative solver hit its iteration cap
    NoConvergence,

    // Invariant channel
    /// A precondition or internal invariant did not hold
    AssertionFailed,

    // Integration
    Config,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidArgument => "ERR_INVALID_ARGUMENT",
            ExErrorKind::AllocationFailure => "ERR_ALLOCATION_FAILURE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ParseError => "ERR_PARSE_ERROR",
            ExErrorKind::OutOfRange => "ERR_OUT_OF_RANGE",
            ExErrorKind::MalformedToken => "ERR_MALFORMED_TOKEN",
            ExErrorKind::TooManyTokens => "ERR_TOO_MANY_TOKENS",
            ExErrorKind::ConceptNoMatch => "ERR_CONCEPT_NO_MATCH",
            ExErrorKind::InvalidRuleTable => "ERR_INVALID_RULE_TABLE",
            ExErrorKind::NoConvergence => "ERR_NO_CONVERGENCE",
            ExErrorKind::AssertionFailed => "ERR_ASSERTION_FAILED",
            ExErrorKind::Config => "ERR_CONFIG",
        }
    }

    /// Whether this kind belongs to the invariant channel rather than the domain channel
    pub fn is_invariant_failure(&self) -> bool {
        matches!(self, ExErrorKind::AssertionFailed)
    }
}

/// Canonical structured error type
///
/// Structured classification for programmatic handling plus free-form
/// context for humans.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    key: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            key: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add key context (field, concept or token name)
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the key context, if any
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(key) = &self.key {
            write!(f, " (key: {})", key)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for gribkit operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    // ===== Argument Errors =====
    /// Gaussian grid order must be positive
    #[error("Invalid Gaussian grid order: {order}")]
    InvalidGaussianOrder { order: usize },

    /// Caller-supplied buffer has the wrong length
    #[error("Buffer length {actual} does not match required length {expected}")]
    BufferLengthMismatch { expected: usize, actual: usize },

    /// Value is not a number
    #[error("Cannot quantize a NaN value")]
    NotANumber,

    /// Search array is too short to bracket anything
    #[error("Search array needs at least two elements, got {len}")]
    SearchArrayTooShort { len: usize },

    /// Concept name is not present in the rule table
    #[error("Unknown concept: {concept}")]
    UnknownConcept { concept: String },

    // ===== Resource Errors =====
    /// Output storage could not be allocated
    #[error("Cannot allocate {elements} values")]
    AllocationFailed { elements: usize },

    // ===== Range Errors =====
    /// Magnitude exceeds the exponent range of the target representation
    #[error("Value {value} is out of range for {representation}")]
    MagnitudeOutOfRange {
        value: f64,
        representation: &'static str,
    },

    // ===== Expression Errors =====
    /// Token has no `=`/`!=` separator, an empty key, or an empty value
    #[error("Malformed token '{token}': {reason}")]
    MalformedToken { token: String, reason: String },

    /// More assignments than the caller allowed
    #[error("Input string contains too many entries (max={max})")]
    TooManyTokens { max: usize },

    /// Value text cannot be coerced to the requested type
    #[error("Cannot convert '{text}' to {expected} for key {key}")]
    ValueCoercion {
        key: String,
        text: String,
        expected: String,
    },

    // ===== Lookup Errors =====
    /// Handle does not carry the requested field
    #[error("Field not found: {field}")]
    FieldNotFound { field: String },

    /// No rule row matches the handle
    #[error("Concept {concept} has no matching value")]
    ConceptNoMatch { concept: String },

    /// Rule table document is malformed
    #[error("Invalid rule table: {reason}")]
    InvalidRuleTable { reason: String },

    // ===== Numeric Errors =====
    /// Root refinement did not converge within the iteration cap
    #[error("Gaussian latitude {index} did not converge after {iterations} iterations")]
    NoConvergence { index: usize, iterations: usize },

    // ===== Invariant Errors =====
    /// Invariant failure routed through the assertion observer
    #[error("Assertion failed: {message}")]
    AssertionFailed { message: String },

    // ===== Configuration Errors =====
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Classify this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            CoreError::InvalidGaussianOrder { .. }
            | CoreError::BufferLengthMismatch { .. }
            | CoreError::NotANumber
            | CoreError::SearchArrayTooShort { .. }
            | CoreError::UnknownConcept { .. } => ExErrorKind::InvalidArgument,
            CoreError::AllocationFailed { .. } => ExErrorKind::AllocationFailure,
            CoreError::MagnitudeOutOfRange { .. } => ExErrorKind::OutOfRange,
            CoreError::MalformedToken { .. } => ExErrorKind::MalformedToken,
            CoreError::TooManyTokens { .. } => ExErrorKind::TooManyTokens,
            CoreError::ValueCoercion { .. } => ExErrorKind::ParseError,
            CoreError::FieldNotFound { .. } => ExErrorKind::NotFound,
            CoreError::ConceptNoMatch { .. } => ExErrorKind::ConceptNoMatch,
            CoreError::InvalidRuleTable { .. } => ExErrorKind::InvalidRuleTable,
            CoreError::NoConvergence { .. } => ExErrorKind::NoConvergence,
            CoreError::AssertionFailed { .. } => ExErrorKind::AssertionFailed,
            CoreError::Config { .. } => ExErrorKind::Config,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}

/// Conversion from CoreError to the structured ExError
impl From<CoreError> for ExError {
    fn from(err: CoreError) -> Self {
        let ex = ExError::new(err.kind()).with_message(err.to_string());
        match err {
            CoreError::UnknownConcept { concept } | CoreError::ConceptNoMatch { concept } => {
                ex.with_key(concept)
            }
            CoreError::MalformedToken { token, .. } => ex.with_key(token),
            CoreError::ValueCoercion { key, .. } => ex.with_key(key),
            CoreError::FieldNotFound { field } => ex.with_key(field),
            _ => ex,
        }
    }
}

/// Conversion from serde_yaml::Error to CoreError
impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::InvalidRuleTable {
            reason: format!("YAML parse error: {}", err),
        }
    }
}

/// Conversion from serde_json::Error to CoreError
impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::InvalidRuleTable {
            reason: format!("JSON parse error: {}", err),
        }
    }
}

/// Conversion from toml::de::Error to CoreError
impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::Config {
            message: err.to_string(),
        }
    }
}

//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_SEVERITY: &str = "severity";
pub const FIELD_MESSAGE: &str = "message";

// Domain identifiers
pub const FIELD_CONCEPT: &str = "concept";
pub const FIELD_CONCEPT_VALUE: &str = "concept_value";
pub const FIELD_GAUSSIAN_ORDER: &str = "order";
pub const FIELD_TOKEN_COUNT: &str = "token_count";
pub const FIELD_RULE_TABLE_VERSION: &str = "rule_table_version";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_DIAGNOSTIC: &str = "diagnostic";

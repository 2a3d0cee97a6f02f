//! Diagnostic codes reported by the setter generator.

/// The annotation sits on something other than a type or a field, or names a
/// type/field that does not exist.
pub const FXSETTER_UNSUPPORTED_PLACEMENT: &str = "FXSETTER_UNSUPPORTED_PLACEMENT";
/// The field name does not fit the configured accessor prefixes.
pub const FXSETTER_PREFIX_MISMATCH: &str = "FXSETTER_PREFIX_MISMATCH";
/// A hand-written method already uses the setter name.
pub const FXSETTER_METHOD_EXISTS: &str = "FXSETTER_METHOD_EXISTS";
/// `onMethod`/`onParam` was given on a type-level annotation.
pub const FXSETTER_UNSUPPORTED_AT_TYPE: &str = "FXSETTER_UNSUPPORTED_AT_TYPE";
/// Usage flagged through `setter.flag_usage`.
pub const FXSETTER_FLAGGED: &str = "FXSETTER_FLAGGED";
/// The setter could not be synthesized.
pub const FXSETTER_NOT_SUPPORTED: &str = "FXSETTER_NOT_SUPPORTED";

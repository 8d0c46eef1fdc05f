//! Error type for shader generation failures

use thiserror::Error;

use crate::emitter::ScopeKind;

/// Error type for shader generation failures
///
/// Failures are local to a single generation call and non-recoverable within
/// it; callers re-invoke with corrected input. Generation is deterministic
/// and stateless across calls, so there are no partial results to retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShaderGenError {
    /// A scope-closing operation ran with no matching open scope
    ///
    /// Nothing is appended to the buffer when this is returned; the
    /// alternative (silently emitting an unmatched `}`) would defer the
    /// failure to the external compile stage.
    #[error("scope underflow: no open scope to close")]
    ScopeUnderflow,

    /// An if-continuation ran while the innermost open scope was not an if
    ///
    /// Nothing is appended and the scope stack is unchanged; an `else`
    /// emitted against a function or struct opener would produce invalid
    /// GLSL with the braces still balanced.
    #[error("scope mismatch: expected an open if scope, found {found:?}")]
    ScopeMismatch {
        /// The innermost open scope that was found instead
        found: ScopeKind,
    },

    /// A generator input was outside its closed set of valid values
    #[error("invalid configuration: {value} is not a valid {expected}")]
    InvalidConfiguration {
        /// The rejected raw value
        value: u8,
        /// What the value was expected to name
        expected: &'static str,
    },
}

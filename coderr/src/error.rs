//! The coded Error type

use crate::code::{self, Code};
use crate::{parse, Failure, FailureRef};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// An error identified by a hierarchical code.
///
/// This error type provides:
/// - `code`: What kind of error occurred, e.g. `storage/tx/done`
/// - `reason`: Human-readable description
/// - `cause`: The wrapped error (if any)
///
/// Two errors are the same kind when their codes are equal, whatever
/// their reasons or causes say.
///
/// # Example
///
/// ```rust
/// use coderr::{Error, Failure};
///
/// let err = Error::new("net/http", "can't start server")
///     .wrap(Failure::msg("listen tcp :80: bind: address already in use"));
///
/// assert_eq!(err.code(), "net/http");
/// assert_eq!(
///     err.to_string(),
///     "[net/http] can't start server: listen tcp :80: bind: address already in use",
/// );
/// ```
#[derive(Clone)]
pub struct Error {
    code: Code,
    reason: Cow<'static, str>,
    cause: Option<Arc<Failure>>,
}

impl Error {
    /// Create a new error with the given code and reason
    pub fn new(code: impl Into<Code>, reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            reason: reason.into(),
            cause: None,
        }
    }

    /// Create an error from literals, usable in `static` items.
    ///
    /// ```rust
    /// use coderr::Error;
    ///
    /// pub static ERR_NOT_FOUND: Error = Error::from_static("404", "not found");
    /// ```
    pub const fn from_static(code: &'static str, reason: &'static str) -> Self {
        Self {
            code: Code::from_static(code),
            reason: Cow::Borrowed(reason),
            cause: None,
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Get the error code
    pub fn code(&self) -> &Code {
        &self.code
    }

    /// Get the reason
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Get the wrapped error (if any)
    pub fn cause(&self) -> Option<&Failure> {
        self.cause.as_deref()
    }

    // =========================================================================
    // Builders
    // =========================================================================

    /// Copy code and reason, leaving the cause behind
    pub fn without_cause(&self) -> Self {
        Self {
            code: self.code.clone(),
            reason: self.reason.clone(),
            cause: None,
        }
    }

    /// Return a copy of this error wrapping `cause`.
    ///
    /// `self` is left untouched, sentinels can be wrapped freely.
    pub fn wrap(&self, cause: impl Into<Failure>) -> Self {
        let mut err = self.without_cause();
        err.cause = Some(Arc::new(cause.into()));
        err
    }

    /// Derive a child error with code `self/suffix`.
    ///
    /// Meant for error tables built at startup. The result is checked
    /// against the error syntax.
    ///
    /// # Panics
    /// Panics if the rendered child is not a valid error message, e.g. the
    /// suffix holds an uppercase letter or the reason is empty.
    pub fn child(&self, suffix: &str, reason: impl Into<Cow<'static, str>>) -> Self {
        let err = Error::new(code::join(self.code.as_str(), suffix), reason);
        parse::must_parse(&err.to_string())
    }

    // =========================================================================
    // Matching
    // =========================================================================

    /// Check if `target` is a coded error with the same code
    pub fn matches<'a>(&self, target: impl Into<FailureRef<'a>>) -> bool {
        match target.into() {
            FailureRef::Coded(t) => self.code == t.code,
            _ => false,
        }
    }

    /// Check if this error's code descends from `ancestor`'s code
    pub fn is_descendant_of(&self, ancestor: &Error) -> bool {
        ancestor.code.is_ancestor_of(&self.code)
    }
}

// =============================================================================
// Display - the canonical error message
// =============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.reason)?;

        if let Some(cause) = &self.cause {
            write!(f, ": {}", cause)?;
        }

        Ok(())
    }
}

// =============================================================================
// Debug - verbose, multi-line format for debugging
// =============================================================================

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] {}", self.code, self.reason)?;

        if let Some(cause) = &self.cause {
            writeln!(f)?;
            writeln!(f, "    Cause: {:?}", cause)?;
        }

        Ok(())
    }
}

// =============================================================================
// std::error::Error implementation
// =============================================================================

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::new("500", "internal server error");
        assert_eq!(err.code(), "500");
        assert_eq!(err.reason(), "internal server error");
        assert!(err.cause().is_none());
    }

    #[test]
    fn test_display() {
        let err = Error::new("storage/tx/done", "transaction has already been committed");
        assert_eq!(
            err.to_string(),
            "[storage/tx/done] transaction has already been committed"
        );

        let err = Error::new("net/http", "can't start server")
            .wrap(Error::new("net/tcp", "listen failed").wrap(Failure::msg("bind")));
        assert_eq!(
            err.to_string(),
            "[net/http] can't start server: [net/tcp] listen failed: bind"
        );
    }

    #[test]
    fn test_wrap_does_not_mutate() {
        let err = Error::new("a", "outer");
        let wrapped = err.wrap(Error::new("b", "inner"));

        assert!(err.cause().is_none());
        assert!(wrapped.cause().is_some());
        assert_eq!(wrapped.code(), err.code());
        assert_eq!(wrapped.reason(), err.reason());
    }

    #[test]
    fn test_wrap_replaces_cause() {
        let err = Error::new("a", "outer").wrap(Failure::msg("first"));
        let rewrapped = err.wrap(Failure::msg("second"));

        assert_eq!(rewrapped.to_string(), "[a] outer: second");
        assert_eq!(err.to_string(), "[a] outer: first");
    }

    #[test]
    fn test_without_cause() {
        let err = Error::new("a", "outer").wrap(Failure::msg("inner"));
        let bare = err.without_cause();

        assert_eq!(bare.code(), "a");
        assert_eq!(bare.reason(), "outer");
        assert!(bare.cause().is_none());
        assert!(err.cause().is_some());
    }

    #[test]
    fn test_clone_keeps_cause() {
        let err = Error::new("a", "outer").wrap(Failure::msg("inner"));
        assert_eq!(err.clone().to_string(), err.to_string());
    }

    #[test]
    fn test_matches_by_code_only() {
        let err = Error::new("a", "x");
        assert!(err.matches(&Error::new("a", "y")));
        assert!(err.matches(&Error::new("a", "x").wrap(Failure::msg("z"))));
        assert!(!err.matches(&Error::new("b", "x")));
        assert!(!err.matches(&Failure::msg("[a] x")));
    }

    #[test]
    fn test_is_descendant_of() {
        let root = Error::new("a", "");
        assert!(Error::new("a/b", "").is_descendant_of(&root));
        assert!(!Error::new("ab", "").is_descendant_of(&root));
        assert!(!root.is_descendant_of(&root));
    }

    #[test]
    fn test_child() {
        let err = Error::new("test-error-new", "test Error.child");
        let child = err.child("new", "new test Error.child");

        assert_eq!(child.code(), "test-error-new/new");
        assert_eq!(child.reason(), "new test Error.child");
        assert!(child.is_descendant_of(&err));
    }

    #[test]
    #[should_panic(expected = "coderr/parse/code/char")]
    fn test_child_bad_suffix() {
        Error::new("base", "base").child("Bad", "uppercase suffix");
    }

    #[test]
    #[should_panic(expected = "coderr/parse/reason/none")]
    fn test_child_empty_reason() {
        Error::new("base", "base").child("empty", "");
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error as _;

        let err = Error::new("a", "outer").wrap(Error::new("b", "inner"));
        let source = err.source().expect("cause exposed as source");
        assert_eq!(source.to_string(), "[b] inner");
        assert!(source.source().is_none());
    }

    #[test]
    fn test_static_sentinel() {
        static ERR_TEST: Error = Error::from_static("test/static", "static sentinel");
        let wrapped = ERR_TEST.wrap(Failure::msg("detail"));

        assert!(ERR_TEST.cause().is_none());
        assert!(wrapped.matches(&ERR_TEST));
    }
}

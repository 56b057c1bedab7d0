//! Hierarchical error codes
//!
//! A code is a `/` separated path such as `storage/tx/done`. Every prefix
//! ending at a separator names an ancestor: `storage` and `storage/tx` are
//! both ancestors of `storage/tx/done`.

use std::borrow::Cow;
use std::fmt;

/// Separator between code segments.
pub const SEPARATOR: char = '/';

/// Join `parent` and `suffix` into a child code.
///
/// No validation happens here, programmatic construction is trusted.
/// Malformed codes are rejected when the rendered error is parsed.
pub fn join(parent: &str, suffix: &str) -> String {
    let mut code = String::with_capacity(parent.len() + 1 + suffix.len());
    code.push_str(parent);
    code.push(SEPARATOR);
    code.push_str(suffix);
    code
}

/// Check if `child` starts with `parent` followed by the separator.
///
/// A code is never its own ancestor, and `ab` does not descend from `a`.
pub fn is_ancestor(parent: &str, child: &str) -> bool {
    child.len() > parent.len()
        && child.starts_with(parent)
        && child.as_bytes()[parent.len()] == SEPARATOR as u8
}

/// Check if `c` may appear inside a code segment.
pub fn is_code_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.')
}

/// An error code, e.g. `net/http`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code(Cow<'static, str>);

impl Code {
    /// Create a code from a string literal, usable in `static` items
    pub const fn from_static(code: &'static str) -> Self {
        Code(Cow::Borrowed(code))
    }

    /// Create a code from any string
    pub fn new(code: impl Into<Cow<'static, str>>) -> Self {
        Code(code.into())
    }

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the code `self/suffix`
    pub fn child(&self, suffix: &str) -> Code {
        Code(Cow::Owned(join(&self.0, suffix)))
    }

    /// Check if `self` is a strict ancestor of `other`
    pub fn is_ancestor_of(&self, other: &Code) -> bool {
        is_ancestor(&self.0, &other.0)
    }

    /// Iterate over the `/` separated segments
    pub fn segments(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.split(SEPARATOR)
    }

    /// The direct ancestor, or `None` for a root code
    pub fn parent(&self) -> Option<&str> {
        self.0.rsplit_once(SEPARATOR).map(|(parent, _)| parent)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Code {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Code {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<&'static str> for Code {
    fn from(code: &'static str) -> Self {
        Code::from_static(code)
    }
}

impl From<String> for Code {
    fn from(code: String) -> Self {
        Code(Cow::Owned(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join() {
        assert_eq!(join("storage", "tx"), "storage/tx");
        assert_eq!(join("storage/tx", "done"), "storage/tx/done");
    }

    #[test]
    fn test_is_ancestor() {
        assert!(is_ancestor("a", "a/b"));
        assert!(is_ancestor("a", "a/b/c"));
        assert!(is_ancestor("a/b", "a/b/c"));

        assert!(!is_ancestor("a", "a")); // never self
        assert!(!is_ancestor("a", "ab")); // separator required
        assert!(!is_ancestor("a/b", "a"));
        assert!(!is_ancestor("b", "a/b"));
    }

    #[test]
    fn test_is_code_char() {
        for c in "az09_-.".chars() {
            assert!(is_code_char(c), "{c:?}");
        }
        for c in "AZ/+ :[]é".chars() {
            assert!(!is_code_char(c), "{c:?}");
        }
    }

    #[test]
    fn test_code_child_and_parent() {
        let root = Code::from_static("net");
        let child = root.child("http");

        assert_eq!(child, "net/http");
        assert!(root.is_ancestor_of(&child));
        assert!(!child.is_ancestor_of(&root));
        assert_eq!(child.parent(), Some("net"));
        assert_eq!(root.parent(), None);
    }

    #[test]
    fn test_segments() {
        let code = Code::new("storage/tx/done");
        let segments: Vec<_> = code.segments().collect();
        assert_eq!(segments, ["storage", "tx", "done"]);
    }
}

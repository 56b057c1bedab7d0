//! Failure variants and chain traversal
//!
//! Any error flowing through this crate is one of three things: a coded
//! [`Error`], a [`Group`] of failures, or an [`Opaque`] foreign error.
//! Predicates match on [`FailureRef`], the borrowed form of the same set.

use crate::{Error, Group};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Something that may wrap a further failure.
pub trait Causal {
    /// Get the directly wrapped failure (if any)
    fn cause(&self) -> Option<&Failure>;

    /// Iterate over every wrapped failure, outermost first
    fn causes(&self) -> Causes<'_> {
        Causes {
            next: self.cause(),
        }
    }
}

/// Iterator over a cause chain, see [`Causal::causes`].
#[derive(Clone)]
pub struct Causes<'a> {
    next: Option<&'a Failure>,
}

impl<'a> Iterator for Causes<'a> {
    type Item = &'a Failure;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = Failure::cause(current);
        Some(current)
    }
}

// =============================================================================
// Failure
// =============================================================================

/// An owned failure of any variant.
#[derive(Clone)]
pub enum Failure {
    /// A coded error
    Coded(Error),
    /// Independent failures reported together
    Group(Group),
    /// A foreign error or free text
    Opaque(Opaque),
}

impl Failure {
    /// Create an opaque failure from free text
    pub fn msg(text: impl Into<String>) -> Self {
        Failure::Opaque(Opaque::msg(text))
    }

    /// Borrow as a [`FailureRef`]
    pub fn view(&self) -> FailureRef<'_> {
        match self {
            Failure::Coded(e) => FailureRef::Coded(e),
            Failure::Group(g) => FailureRef::Group(g),
            Failure::Opaque(o) => FailureRef::Opaque(o),
        }
    }

    /// Get the directly wrapped failure (if any)
    pub fn cause(&self) -> Option<&Failure> {
        self.view().cause()
    }

    /// Get the coded error, if this is one
    pub fn as_coded(&self) -> Option<&Error> {
        match self {
            Failure::Coded(e) => Some(e),
            _ => None,
        }
    }

    /// Get the group, if this is one
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Failure::Group(g) => Some(g),
            _ => None,
        }
    }

    /// Attach `target` as the cause of this failure.
    ///
    /// Coded errors use [`Error::wrap`]. Any other failure is kept as an
    /// opaque error rendering the original text, with `target` as its cause.
    pub fn wrap(self, target: impl Into<Failure>) -> Failure {
        match self {
            Failure::Coded(e) => Failure::Coded(e.wrap(target)),
            other => Failure::Opaque(Opaque::new(other).with_cause(target.into())),
        }
    }
}

impl Causal for Error {
    fn cause(&self) -> Option<&Failure> {
        Error::cause(self)
    }
}

impl Causal for Failure {
    fn cause(&self) -> Option<&Failure> {
        Failure::cause(self)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Coded(e) => fmt::Display::fmt(e, f),
            Failure::Group(g) => fmt::Display::fmt(g, f),
            Failure::Opaque(o) => fmt::Display::fmt(o, f),
        }
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Coded(e) => fmt::Debug::fmt(e, f),
            Failure::Group(g) => fmt::Debug::fmt(g, f),
            Failure::Opaque(o) => fmt::Debug::fmt(o, f),
        }
    }
}

impl StdError for Failure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Failure::Coded(e) => e.source(),
            Failure::Group(_) => None,
            Failure::Opaque(o) => o.source(),
        }
    }
}

impl From<Error> for Failure {
    fn from(err: Error) -> Self {
        Failure::Coded(err)
    }
}

impl From<&Error> for Failure {
    fn from(err: &Error) -> Self {
        Failure::Coded(err.clone())
    }
}

impl From<Group> for Failure {
    fn from(group: Group) -> Self {
        Failure::Group(group)
    }
}

impl From<Opaque> for Failure {
    fn from(opaque: Opaque) -> Self {
        Failure::Opaque(opaque)
    }
}

impl From<anyhow::Error> for Failure {
    fn from(err: anyhow::Error) -> Self {
        Failure::Opaque(err.into())
    }
}

impl From<std::io::Error> for Failure {
    fn from(err: std::io::Error) -> Self {
        Failure::Opaque(Opaque::new(err))
    }
}

// =============================================================================
// FailureRef
// =============================================================================

/// A borrowed failure of any variant.
///
/// Built from `&Error`, `&Group`, `&Opaque` or `&Failure`, so predicates
/// accept any of them.
#[derive(Clone, Copy)]
pub enum FailureRef<'a> {
    Coded(&'a Error),
    Group(&'a Group),
    Opaque(&'a Opaque),
}

impl<'a> FailureRef<'a> {
    /// Get the directly wrapped failure (if any)
    pub fn cause(self) -> Option<&'a Failure> {
        match self {
            FailureRef::Coded(e) => e.cause(),
            FailureRef::Group(g) => Causal::cause(g),
            FailureRef::Opaque(o) => Causal::cause(o),
        }
    }

    /// Copy into an owned [`Failure`]
    pub fn to_failure(self) -> Failure {
        match self {
            FailureRef::Coded(e) => Failure::Coded(e.clone()),
            FailureRef::Group(g) => Failure::Group(g.clone()),
            FailureRef::Opaque(o) => Failure::Opaque(o.clone()),
        }
    }
}

impl<'a> From<&'a Failure> for FailureRef<'a> {
    fn from(failure: &'a Failure) -> Self {
        failure.view()
    }
}

impl<'a> From<&'a Error> for FailureRef<'a> {
    fn from(err: &'a Error) -> Self {
        FailureRef::Coded(err)
    }
}

impl<'a> From<&'a Group> for FailureRef<'a> {
    fn from(group: &'a Group) -> Self {
        FailureRef::Group(group)
    }
}

impl<'a> From<&'a Opaque> for FailureRef<'a> {
    fn from(opaque: &'a Opaque) -> Self {
        FailureRef::Opaque(opaque)
    }
}

impl<'a, 'b> From<&'b FailureRef<'a>> for FailureRef<'a> {
    fn from(failure: &'b FailureRef<'a>) -> Self {
        *failure
    }
}

impl fmt::Display for FailureRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureRef::Coded(e) => fmt::Display::fmt(e, f),
            FailureRef::Group(g) => fmt::Display::fmt(g, f),
            FailureRef::Opaque(o) => fmt::Display::fmt(o, f),
        }
    }
}

impl fmt::Debug for FailureRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureRef::Coded(e) => fmt::Debug::fmt(e, f),
            FailureRef::Group(g) => fmt::Debug::fmt(g, f),
            FailureRef::Opaque(o) => fmt::Debug::fmt(o, f),
        }
    }
}

// =============================================================================
// Opaque
// =============================================================================

/// A foreign error carried without a code.
///
/// Identity is the identity of the wrapped error instance: clones of one
/// `Opaque` match each other, two separately built ones never do.
#[derive(Clone)]
pub struct Opaque {
    inner: Arc<dyn StdError + Send + Sync + 'static>,
    cause: Option<Arc<Failure>>,
}

impl Opaque {
    /// Wrap a foreign error
    pub fn new<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(err),
            cause: None,
        }
    }

    /// Create an opaque error from free text
    pub fn msg(text: impl Into<String>) -> Self {
        let text: String = text.into();
        anyhow::Error::msg(text).into()
    }

    /// Attach a cause, rendered after the wrapped error
    pub fn with_cause(mut self, cause: Failure) -> Self {
        self.cause = Some(Arc::new(cause));
        self
    }

    /// Get the wrapped foreign error
    pub fn get_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.inner
    }

    /// Check if both hold the same foreign error instance
    pub fn same_as(&self, other: &Opaque) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Causal for Opaque {
    fn cause(&self) -> Option<&Failure> {
        self.cause.as_deref()
    }
}

impl From<anyhow::Error> for Opaque {
    fn from(err: anyhow::Error) -> Self {
        let boxed: Box<dyn StdError + Send + Sync + 'static> = err.into();
        Self {
            inner: Arc::from(boxed),
            cause: None,
        }
    }
}

impl fmt::Display for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)?;

        if let Some(cause) = &self.cause {
            write!(f, ": {}", cause)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.inner)?;

        if let Some(cause) = &self.cause {
            write!(f, ": {:?}", cause)?;
        }

        Ok(())
    }
}

impl StdError for Opaque {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.cause {
            Some(cause) => Some(&**cause as &(dyn StdError + 'static)),
            None => self.inner.source(),
        }
    }
}

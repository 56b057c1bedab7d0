//! Matching predicates
//!
//! - [`is`]: identity anywhere in the cause chain
//! - [`of`]: code ancestry, top level only
//! - [`all`] / [`any`]: [`is`] against several targets

use crate::FailureRef;

/// Report if `err`, or any failure it wraps, matches `target`.
///
/// Coded errors match by code and only coded targets. A group matches
/// when any member does. Opaque errors match only themselves.
pub fn is<'a, 'b>(err: impl Into<FailureRef<'a>>, target: impl Into<FailureRef<'b>>) -> bool {
    let target = target.into();
    let mut current = Some(err.into());
    while let Some(err) = current {
        if matches(err, target) {
            return true;
        }
        current = err.cause().map(|c| c.view());
    }

    false
}

fn matches(err: FailureRef<'_>, target: FailureRef<'_>) -> bool {
    match (err, target) {
        (FailureRef::Coded(e), _) => e.matches(target),
        (FailureRef::Group(g), _) => g.matches(target),
        (FailureRef::Opaque(e), FailureRef::Opaque(t)) => e.same_as(t),
        (FailureRef::Opaque(_), _) => false,
    }
}

/// Report if `err` was derived from `target`, i.e. its code descends from
/// the target's code.
///
/// Only the top level is checked, and both sides must be coded errors.
pub fn of<'a, 'b>(err: impl Into<FailureRef<'a>>, target: impl Into<FailureRef<'b>>) -> bool {
    match (err.into(), target.into()) {
        (FailureRef::Coded(e), FailureRef::Coded(t)) => e.is_descendant_of(t),
        _ => false,
    }
}

/// Report if `err` matches every target. No targets means no match.
pub fn all<'a, 'b, I, T>(err: impl Into<FailureRef<'a>>, targets: I) -> bool
where
    I: IntoIterator<Item = T>,
    T: Into<FailureRef<'b>>,
{
    let err = err.into();
    let mut seen = false;

    for target in targets {
        if !is(err, target) {
            return false;
        }
        seen = true;
    }

    seen
}

/// Report if `err` matches at least one target.
pub fn any<'a, 'b, I, T>(err: impl Into<FailureRef<'a>>, targets: I) -> bool
where
    I: IntoIterator<Item = T>,
    T: Into<FailureRef<'b>>,
{
    let err = err.into();
    targets.into_iter().any(|target| is(err, target))
}

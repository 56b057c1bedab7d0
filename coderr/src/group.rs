//! Error groups

use crate::{predicate, Causal, Failure, FailureRef};
use std::fmt;

/// Independent failures reported as one.
///
/// A group does not wrap its members, it only holds them. It matches a
/// target when any member does.
///
/// ```rust
/// use coderr::{Error, Failure};
///
/// static ERR_READ: Error = Error::from_static("io/read", "read failed");
/// static ERR_CLOSE: Error = Error::from_static("io/close", "close failed");
///
/// let errs = coderr::group([
///     ERR_READ.wrap(Failure::msg("unexpected eof")),
///     ERR_CLOSE.without_cause(),
/// ]);
///
/// assert!(coderr::is(&errs, &ERR_CLOSE));
/// assert_eq!(
///     errs.to_string(),
///     "* [io/read] read failed: unexpected eof; * [io/close] close failed",
/// );
/// ```
#[derive(Clone, Default)]
pub struct Group {
    members: Vec<Failure>,
}

impl Group {
    /// Create a group from the given failures, order preserved
    pub fn new<I, E>(errs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Failure>,
    {
        Self {
            members: errs.into_iter().map(Into::into).collect(),
        }
    }

    /// Get the members
    pub fn members(&self) -> &[Failure] {
        &self.members
    }

    /// Take the members
    pub fn into_members(self) -> Vec<Failure> {
        self.members
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the group has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Add a member at the end
    pub fn push(&mut self, err: impl Into<Failure>) {
        self.members.push(err.into());
    }

    /// Check if any member matches `target`
    pub fn matches<'a>(&self, target: impl Into<FailureRef<'a>>) -> bool {
        let target = target.into();
        self.members.iter().any(|m| predicate::is(m, target))
    }
}

/// Group the given failures into a single one.
pub fn group<I, E>(errs: I) -> Failure
where
    I: IntoIterator<Item = E>,
    E: Into<Failure>,
{
    Failure::Group(Group::new(errs))
}

/// Separate a group into its members.
///
/// Anything else comes back as a single element vector.
pub fn split(err: Failure) -> Vec<Failure> {
    match err {
        Failure::Group(g) => g.into_members(),
        other => vec![other],
    }
}

impl Causal for Group {
    fn cause(&self) -> Option<&Failure> {
        None
    }
}

impl<E: Into<Failure>> FromIterator<E> for Group {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Group::new(iter)
    }
}

impl<E: Into<Failure>> Extend<E> for Group {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.members.extend(iter.into_iter().map(Into::into));
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "* {}", member)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.members).finish()
    }
}

impl std::error::Error for Group {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{is, Error};

    fn members() -> (Error, Error, Error) {
        (
            Error::new("group/one", "first"),
            Error::new("group/two", "second"),
            Error::new("group/three", "third"),
        )
    }

    #[test]
    fn test_group_matches_any_member() {
        let (e1, e2, e3) = members();
        let g = group([e1, e2.clone(), e3]);

        assert!(is(&g, &e2));
        assert!(is(&g, &Error::new("group/two", "other reason")));
        assert!(!is(&g, &Error::new("group/four", "unrelated")));
    }

    #[test]
    fn test_group_matches_wrapped_member() {
        let inner = Error::new("deep/inner", "inner");
        let g = group([
            Error::new("deep/outer", "outer").wrap(inner.clone()),
            Error::new("other", "other"),
        ]);

        assert!(is(&g, &inner));
    }

    #[test]
    fn test_split_group() {
        let (e1, e2, _) = members();
        let parts = split(group([e1, e2]));

        let codes: Vec<String> = parts.iter().map(|p| p.to_string()).collect();
        assert_eq!(codes, ["[group/one] first", "[group/two] second"]);
    }

    #[test]
    fn test_split_non_group() {
        let err = Failure::msg("plain error");
        let parts = split(err.clone());

        assert_eq!(parts.len(), 1);
        let Failure::Opaque(part) = &parts[0] else {
            panic!("expected opaque failure");
        };
        let Failure::Opaque(original) = &err else {
            unreachable!();
        };
        assert!(part.same_as(original));
    }

    #[test]
    fn test_display() {
        let (e1, e2, e3) = members();
        let g = Group::new([e1, e2, e3]);
        assert_eq!(
            g.to_string(),
            "* [group/one] first; * [group/two] second; * [group/three] third"
        );

        assert_eq!(Group::default().to_string(), "");
    }

    #[test]
    fn test_nested_group() {
        let (e1, e2, e3) = members();
        let g = group([group([e1, e2]), Failure::from(e3.clone())]);

        assert!(is(&g, &e3));
        assert!(is(&g, &Error::new("group/one", "")));
    }

    #[test]
    fn test_collect() {
        let (e1, e2, _) = members();
        let mut g: Group = vec![e1].into_iter().collect();
        g.extend([e2.clone()]);

        assert_eq!(g.len(), 2);
        assert!(g.matches(&e2));
    }

    #[test]
    fn test_push() {
        let (e1, e2, _) = members();
        let mut g = Group::default();
        assert!(g.is_empty());
        assert!(!g.matches(&e1));

        g.push(e1.clone());
        g.push(Failure::msg("plain"));
        g.push(&e2);

        assert_eq!(g.len(), 3);
        assert!(g.matches(&e1));
        assert!(g.matches(&e2));
        assert_eq!(g.to_string(), "* [group/one] first; * plain; * [group/two] second");
    }

    #[test]
    fn test_member_matched_against_target() {
        let a = Error::new("dir/a", "a");
        let b_over_a = Error::new("dir/b", "b").wrap(a.clone());

        // Each member's chain is searched for the target, not the reverse.
        assert!(is(&group([b_over_a.clone()]), &a));
        assert!(!is(&group([a.clone()]), &b_over_a));
    }
}

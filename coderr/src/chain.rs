//! Building and flattening cause chains
//!
//! These helpers work on any [`Failure`], coded or not. `None` stands for
//! "no error" and is skipped.

use crate::{Causal, Failure, FailureRef};

/// Wrap `target` with `err`.
///
/// If either side is `None` the other one is returned unchanged.
pub fn wrap(err: Option<Failure>, target: Option<Failure>) -> Option<Failure> {
    match (err, target) {
        (None, target) => target,
        (err, None) => err,
        (Some(err), Some(target)) => Some(err.wrap(target)),
    }
}

/// Wrap the given errors left to right: the first one ends up outermost,
/// the last one innermost. `None` entries are skipped.
///
/// ```rust
/// use coderr::{Error, Failure};
///
/// let err = coderr::wrap_all([
///     Some(Error::new("a", "top").into()),
///     None,
///     Some(Error::new("b", "bottom").into()),
///     Some(Failure::msg("root")),
/// ])
/// .unwrap();
///
/// assert_eq!(err.to_string(), "[a] top: [b] bottom: root");
/// ```
pub fn wrap_all<I>(errs: I) -> Option<Failure>
where
    I: IntoIterator<Item = Option<Failure>>,
{
    let errs: Vec<_> = errs.into_iter().flatten().collect();
    errs.into_iter()
        .rev()
        .fold(None, |target, err| wrap(Some(err), target))
}

/// Collect every error wrapped by `err`, outermost first.
///
/// `err` itself is not included.
pub fn unwrap_all<'a>(err: impl Into<FailureRef<'a>>) -> Vec<&'a Failure> {
    match err.into().cause() {
        Some(cause) => std::iter::once(cause).chain(cause.causes()).collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{group, is, Error};

    #[test]
    fn test_wrap_none() {
        let err = Failure::msg("only");

        assert!(wrap(None, None).is_none());
        assert_eq!(wrap(Some(err.clone()), None).unwrap().to_string(), "only");
        assert_eq!(wrap(None, Some(err)).unwrap().to_string(), "only");
    }

    #[test]
    fn test_wrap_coded() {
        let outer = Error::new("a", "outer");
        let got = wrap(Some(outer.clone().into()), Some(Failure::msg("inner"))).unwrap();

        assert_eq!(got.to_string(), "[a] outer: inner");
        assert!(got.as_coded().is_some());
        assert!(outer.cause().is_none());
    }

    #[test]
    fn test_wrap_opaque() {
        let inner = Error::new("b", "inner");
        let got = wrap(Some(Failure::msg("outer")), Some(inner.clone().into())).unwrap();

        assert_eq!(got.to_string(), "outer: [b] inner");
        assert!(is(&got, &inner));
        assert_eq!(unwrap_all(&got).len(), 1);
    }

    #[test]
    fn test_wrap_group() {
        let inner = Error::new("c", "inner");
        let member = Error::new("m", "member");
        let got = wrap(Some(group([member.clone()])), Some(inner.clone().into())).unwrap();

        assert_eq!(got.to_string(), "* [m] member: [c] inner");
        assert!(is(&got, &inner));
    }

    #[test]
    fn test_wrap_all() {
        let got = wrap_all([
            Some(Error::new("test-wrap/deep/top", "top level").into()),
            Some(Error::new("test-wrap/deep/mid", "mid level").into()),
            Some(Failure::msg("low level")),
        ])
        .unwrap();

        assert_eq!(
            got.to_string(),
            "[test-wrap/deep/top] top level: [test-wrap/deep/mid] mid level: low level"
        );
        assert_eq!(unwrap_all(&got).len(), 2);
    }

    #[test]
    fn test_wrap_all_skips_none() {
        let got = wrap_all([
            None,
            Some(Error::new("a", "top").into()),
            None,
            Some(Error::new("b", "bottom").into()),
            None,
        ])
        .unwrap();

        assert_eq!(got.to_string(), "[a] top: [b] bottom");
        assert!(wrap_all([None, None]).is_none());
        assert!(wrap_all(Vec::new()).is_none());
    }

    #[test]
    fn test_unwrap_all() {
        let err = Error::new("a", "top")
            .wrap(Error::new("b", "mid").wrap(Failure::msg("low")));
        let causes: Vec<String> = unwrap_all(&err).iter().map(|c| c.to_string()).collect();

        assert_eq!(causes, ["[b] mid: low", "low"]);
        assert!(unwrap_all(&Error::new("a", "alone")).is_empty());
        assert!(unwrap_all(&group([err])).is_empty());
    }
}

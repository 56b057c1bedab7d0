//! Error message parsing
//!
//! Turns a rendered error message back into an [`Error`]. Parsing is a
//! single left to right pass: code, reason, then whatever follows the
//! first wrap separator, which is parsed again as an error or kept as
//! free text.
//!
//! The wrap separator is `": "`, except that a colon preceded by a space is
//! ordinary text. A reason that itself contains `": "` is therefore split
//! when re-parsed; renderings of such errors do not round trip.

use crate::code::{self, SEPARATOR};
use crate::{Error, Failure, Result};

// =============================================================================
// Parsing errors
// =============================================================================

/// Any syntax error.
pub static INVALID_SYNTAX: Error = Error::from_static("coderr/parse", "invalid error message");

/// The message is empty.
pub static EMPTY_MESSAGE: Error = Error::from_static("coderr/parse/empty", "empty error message");

/// The code is missing or malformed.
pub static INVALID_CODE: Error = Error::from_static("coderr/parse/code", "invalid code");

/// The code holds a character outside `a-z 0-9 _ - . /`.
pub static INVALID_CODE_CHAR: Error =
    Error::from_static("coderr/parse/code/char", "invalid code character");

/// There is no code, it is empty, or `]` is missing.
pub static NO_CODE: Error = Error::from_static("coderr/parse/code/none", "error message has no code");

/// The reason is missing or malformed.
pub static INVALID_REASON: Error = Error::from_static("coderr/parse/reason", "invalid reason");

/// Nothing follows the code.
pub static NO_REASON: Error =
    Error::from_static("coderr/parse/reason/none", "error message has no reason");

/// The code is not followed by a space.
pub static NO_REASON_SEPARATOR: Error =
    Error::from_static("coderr/parse/reason/no-separator", "reason has no separator");

const WRAP_SEPARATOR: &str = ": ";

/// Parse an error message.
///
/// Whatever follows the first wrap separator becomes the cause: a coded
/// error when it parses as one, free text otherwise.
///
/// ```rust
/// let err = coderr::parse(
///     "[net/http] can't start server: listen tcp :80: bind: address already in use",
/// )
/// .unwrap();
///
/// assert_eq!(err.code(), "net/http");
/// assert_eq!(err.reason(), "can't start server");
/// assert_eq!(
///     err.cause().unwrap().to_string(),
///     "listen tcp :80: bind: address already in use",
/// );
/// ```
pub fn parse(msg: &str) -> Result<Error> {
    if msg.is_empty() {
        return Err(EMPTY_MESSAGE.without_cause());
    }

    let mut heads = Vec::new();
    let mut leaf = None;
    let mut rest = msg;

    loop {
        match parse_head(rest) {
            Ok((err, tail)) => {
                heads.push(err);
                if tail.is_empty() {
                    break;
                }
                rest = tail;
            }
            // Only the outermost error must be well formed.
            Err(err) if heads.is_empty() => return Err(err),
            Err(_) => {
                leaf = Some(Failure::msg(rest));
                break;
            }
        }
    }

    let mut chain = heads.into_iter().rev();
    let Some(innermost) = chain.next() else {
        return Err(EMPTY_MESSAGE.without_cause());
    };
    let innermost = match leaf {
        Some(leaf) => innermost.wrap(leaf),
        None => innermost,
    };

    Ok(chain.fold(innermost, |cause, head| head.wrap(cause)))
}

/// Like [`parse`], but panics on invalid syntax.
///
/// Meant for errors defined from literals at startup, where a malformed
/// message is a programming error.
///
/// # Panics
/// Panics with [`INVALID_SYNTAX`] wrapping the parse error.
pub fn must_parse(msg: &str) -> Error {
    match parse(msg) {
        Ok(err) => err,
        Err(err) => panic!("{}", INVALID_SYNTAX.wrap(err)),
    }
}

/// Parse one `[code] reason` head, returning the text after the wrap
/// separator.
fn parse_head(msg: &str) -> Result<(Error, &str)> {
    let (code, msg) = parse_code(msg).map_err(|err| INVALID_CODE.wrap(err))?;
    let (reason, msg) = parse_reason(msg).map_err(|err| INVALID_REASON.wrap(err))?;

    Ok((Error::new(code.to_owned(), reason.to_owned()), msg))
}

fn parse_code(msg: &str) -> Result<(&str, &str)> {
    let bytes = msg.as_bytes();
    if bytes.len() < "[x]".len() || bytes[0] != b'[' || bytes[1] == b']' {
        return Err(NO_CODE.without_cause());
    }

    let body = &msg[1..];
    for (i, c) in body.char_indices() {
        if c == ']' {
            return Ok((&body[..i], &body[i + 1..]));
        }

        if c != SEPARATOR && !code::is_code_char(c) {
            let note = Failure::msg(format!("invalid byte '{}'", c));
            return Err(INVALID_CODE_CHAR.wrap(note));
        }
    }

    Err(NO_CODE.without_cause())
}

fn parse_reason(msg: &str) -> Result<(&str, &str)> {
    let bytes = msg.as_bytes();
    if bytes.len() < " x".len() {
        return Err(NO_REASON.without_cause());
    }

    if bytes[0] != b' ' {
        return Err(NO_REASON_SEPARATOR.without_cause());
    }

    let reason = &msg[1..];
    let bytes = reason.as_bytes();

    for i in 1..bytes.len() {
        if bytes[i] != b':' || bytes[i - 1] == b' ' {
            continue;
        }

        if reason[i..].starts_with(WRAP_SEPARATOR) {
            return Ok((&reason[..i], &reason[i + WRAP_SEPARATOR.len()..]));
        }
    }

    Ok((reason, ""))
}

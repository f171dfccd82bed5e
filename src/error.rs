// Copyright 2026 the x11-shell Authors
// SPDX-License-Identifier: Apache-2.0

//! Errors at the windowing-core level.

use std::fmt;

use x11rb::errors::{ConnectError, ConnectionError, ReplyError, ReplyOrIdError};
use x11rb::x11_utils::X11Error;

/// Everything that can go wrong talking to an X server.
///
/// The taxonomy is closed on purpose: callers match on the kind, not on
/// message strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A malformed argument, an operation on a destroyed window or closed
    /// display, or `DISPLAY` was unset.
    Invalid(&'static str),
    /// No matching visual or framebuffer configuration, or an ID-map lookup
    /// failed.
    NotFound,
    /// Attempted to register a resource ID that is already registered.
    AlreadyPresent,
    /// A configuration sequence exceeded its fixed cap.
    TooManyAttributes,
    /// A required server extension is absent; carries the extension name.
    Unsupported(&'static str),
    /// Could not connect, or the connection was lost mid-stream.
    TransportUnavailable,
    /// The server returned an error reply; carries the raw error code.
    Protocol(u8),
}

impl Error {
    /// The raw X11 error code, if this is a protocol error.
    pub fn protocol_code(&self) -> Option<u8> {
        match self {
            Error::Protocol(code) => Some(*code),
            _ => None,
        }
    }
}

/// Name of a core protocol error code.
///
/// The original Xlib route here is a server round-trip; the names are part
/// of the core protocol and have been stable since X11R1, so a static table
/// serves the same purpose without blocking.
pub fn protocol_error_name(code: u8) -> &'static str {
    match code {
        1 => "BadRequest",
        2 => "BadValue",
        3 => "BadWindow",
        4 => "BadPixmap",
        5 => "BadAtom",
        6 => "BadCursor",
        7 => "BadFont",
        8 => "BadMatch",
        9 => "BadDrawable",
        10 => "BadAccess",
        11 => "BadAlloc",
        12 => "BadColor",
        13 => "BadGC",
        14 => "BadIDChoice",
        15 => "BadName",
        16 => "BadLength",
        17 => "BadImplementation",
        _ => "unknown error",
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Error::Invalid(what) => write!(f, "invalid argument: {what}"),
            Error::NotFound => write!(f, "no matching entry"),
            Error::AlreadyPresent => write!(f, "resource id is already registered"),
            Error::TooManyAttributes => write!(f, "configuration sequence exceeds its cap"),
            Error::Unsupported(ext) => write!(f, "the {ext} extension is not supported by the server"),
            Error::TransportUnavailable => write!(f, "the X server connection is unavailable"),
            Error::Protocol(code) => {
                write!(f, "X11 protocol error {} ({})", code, protocol_error_name(*code))
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<X11Error> for Error {
    fn from(err: X11Error) -> Error {
        Error::Protocol(err.error_code)
    }
}

impl From<ConnectError> for Error {
    fn from(err: ConnectError) -> Error {
        match err {
            ConnectError::DisplayParsingError(_) => Error::Invalid("display name"),
            ConnectError::InvalidScreen => Error::Invalid("screen number"),
            _ => Error::TransportUnavailable,
        }
    }
}

impl From<ConnectionError> for Error {
    fn from(err: ConnectionError) -> Error {
        match err {
            ConnectionError::UnsupportedExtension => Error::Unsupported("requested"),
            _ => Error::TransportUnavailable,
        }
    }
}

impl From<ReplyError> for Error {
    fn from(err: ReplyError) -> Error {
        match err {
            ReplyError::ConnectionError(e) => e.into(),
            ReplyError::X11Error(e) => e.into(),
        }
    }
}

impl From<ReplyOrIdError> for Error {
    fn from(err: ReplyOrIdError) -> Error {
        match err {
            ReplyOrIdError::ConnectionError(e) => e.into(),
            ReplyOrIdError::X11Error(e) => e.into(),
            ReplyOrIdError::IdsExhausted => Error::TransportUnavailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_errors_keep_their_code() {
        let err = Error::Protocol(8);
        assert_eq!(err.protocol_code(), Some(8));
        assert_eq!(err.to_string(), "X11 protocol error 8 (BadMatch)");
        assert_eq!(Error::NotFound.protocol_code(), None);
    }

    #[test]
    fn unknown_codes_still_stringify() {
        assert_eq!(protocol_error_name(200), "unknown error");
        assert!(Error::Protocol(200).to_string().contains("200"));
    }
}

//! Error handling stuff
use displaydoc::Display;
use std::{io, num::ParseIntError, str::Utf8Error};
use thiserror::Error;

/// Error type for the typed readers in [`crate::sysctl`]
///
/// The untyped readers and writers return [`io::Error`] directly, so the
/// caller sees exactly what the kernel reported.
#[derive(Debug, Display, Error)]
#[non_exhaustive]
pub enum SysctlError {
    /// IO Failed
    Io(#[from] io::Error),

    /// Kernel parameter {0} is not an integer: {1}
    InvalidInt(String, #[source] ParseIntError),

    /// Kernel parameter {0} is not valid UTF-8: {1}
    InvalidUtf8(String, #[source] Utf8Error),
}

impl SysctlError {
    /// The [`io::ErrorKind`] of the underlying filesystem error, if this was
    /// one.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Io(e) => Some(e.kind()),
            _ => None,
        }
    }
}

//! Kernel parameters, as exposed under `/proc/sys`.
//!
//! The kernel documents these [here][1]. Each parameter is a single file,
//! read to query it and written to change it.
//!
//! Parameters are conventionally named with dots instead of slashes,
//! `net.ipv6.conf.all.disable_ipv6` is the file
//! `/proc/sys/net/ipv6/conf/all/disable_ipv6`.
//! See [`normalize`] for how names are turned into paths.
//!
//! Every function here does at most one read or one write, and keeps no
//! state between calls.
//!
//! [1]: https://www.kernel.org/doc/html/latest/admin-guide/sysctl/index.html
use std::{
    fs::{self, File},
    io::{self, prelude::*},
    os::unix::fs::OpenOptionsExt,
    path::{Path, PathBuf},
    str,
};

use log::{debug, trace};

use crate::{error::SysctlError, util::PROC_SYS_PATH};

/// Permissions for parameter files we have to create.
///
/// Owner read-write, group read. The kernel ignores this for real
/// parameters, which always exist.
const PARAM_MODE: u32 = (libc::S_IRUSR | libc::S_IWUSR | libc::S_IRGRP) as u32;

mod imp {
    /// Lexically clean `path`, the way `/`-separated paths are usually
    /// cleaned.
    ///
    /// - Repeated `/` become one.
    /// - `.` segments are removed.
    /// - `..` removes the segment before it. Rooted paths can't go above
    ///   `/`, relative ones keep their leading `..`.
    /// - Trailing `/` is removed, except for `/` itself.
    ///
    /// An empty result is `.`
    pub(crate) fn clean(path: &str) -> String {
        let rooted = path.starts_with('/');
        let mut parts: Vec<&str> = Vec::new();
        for seg in path.split('/') {
            match seg {
                "" | "." => {}
                ".." => match parts.last() {
                    Some(&last) if last != ".." => {
                        parts.pop();
                    }
                    _ if rooted => {}
                    _ => parts.push(".."),
                },
                seg => parts.push(seg),
            }
        }
        let joined = parts.join("/");
        if rooted {
            format!("/{joined}")
        } else if joined.is_empty() {
            ".".into()
        } else {
            joined
        }
    }

    /// Strip leading and trailing whitespace from `data`.
    pub(crate) fn trim_space(data: &[u8]) -> &[u8] {
        if let Ok(s) = std::str::from_utf8(data) {
            return s.trim().as_bytes();
        }
        // `u8::is_ascii_whitespace` skips vertical tab
        let is_space = |b: &u8| b.is_ascii_whitespace() || *b == 0x0B;
        let start = data.iter().position(|b| !is_space(b)).unwrap_or(data.len());
        let end = data.iter().rposition(|b| !is_space(b)).map_or(start, |i| i + 1);
        &data[start..end]
    }
}
use imp::{clean, trim_space};

/// Turn a kernel parameter name into a path relative to `/proc/sys`.
///
/// The separator that appears first decides how `property` is read.
///
/// - If it is a `/`, `property` is already a path and only gets cleaned.
///   Dots stay dots.
/// - If it is a `.`, every `.` from there on becomes a `/`, and every `/`
///   becomes a `.`.
///
/// The swap is needed because some parameters contain dots in their own
/// name. Network interfaces are the common case, VLAN `eth0.1` lives at
/// `net/ipv4/conf/eth0.1/rp_filter` and is named
/// `net.ipv4.conf.eth0/1.rp_filter`.
///
/// # Note
///
/// The final character is never swapped, so `a.b.` becomes `a/b.` and not
/// `a/b/`.
///
/// Only the first separator is inspected, a name mixing both styles after
/// that point is not detected.
///
/// # Example
///
/// - `net.ipv6.conf.all.disable_ipv6` is `net/ipv6/conf/all/disable_ipv6`
/// - `net/ipv6.conf.all.disable_ipv6` is unchanged
/// - `net.ipv6.conf.all/disable_ipv6` is `net/ipv6/conf/all.disable_ipv6`
pub fn normalize(property: &str) -> String {
    let first = property.find(['/', '.']);
    match first {
        Some(pos) if property.as_bytes()[pos] == b'.' => {
            // `pos` exists, so `property` isn't empty
            let end = property.len() - 1;
            let swapped: String = property
                .char_indices()
                .map(|(i, c)| match c {
                    '.' if i < end => '/',
                    '/' if i < end => '.',
                    c => c,
                })
                .collect();
            clean(&swapped)
        }
        _ => clean(property),
    }
}

/// Full path of `property`, joined onto `base`.
///
/// This is the file [`custom_get`] and [`custom_set`] would use.
///
/// A leading `/` in `property` doesn't replace `base`, `/net/ipv4` is
/// `<base>/net/ipv4`.
///
/// # Note
///
/// This does not confine `property` to `base`.
/// Leading `..` segments left over after [`normalize`] climb out of it, so
/// `a/../../etc` is `<base>/../etc`.
pub fn resolve<P: AsRef<Path>>(base: P, property: &str) -> PathBuf {
    base.as_ref().join(normalize(property).trim_start_matches('/'))
}

/// Set kernel parameter `property` to `value`, under `/proc/sys`.
///
/// See [`custom_set`] for details.
pub fn set<V: AsRef<[u8]>>(property: &str, value: V) -> io::Result<()> {
    custom_set(PROC_SYS_PATH, property, value)
}

/// Set `property` to `value`, under `base`.
///
/// The file content is replaced with `value` and a newline, in one write.
///
/// If the file doesn't exist it is created, readable and writable by its
/// owner and readable by its group.
///
/// # Errors
///
/// - If the file can't be opened or written. The [`io::Error`] is the one
///   the kernel returned, ie [`io::ErrorKind::NotFound`] for an unknown
///   parameter or [`io::ErrorKind::PermissionDenied`] when not root.
pub fn custom_set<P: AsRef<Path>, V: AsRef<[u8]>>(
    base: P,
    property: &str,
    value: V,
) -> io::Result<()> {
    let path = resolve(base, property);
    let value = value.as_ref();
    trace!("Writing {} bytes to `{}`", value.len() + 1, path.display());

    let mut data = Vec::with_capacity(value.len() + 1);
    data.extend_from_slice(value);
    data.push(b'\n');

    File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(PARAM_MODE)
        .open(&path)
        .and_then(|mut f| f.write_all(&data))
        .inspect_err(|e| debug!("Couldn't set `{}`: {e}", path.display()))
}

/// Read kernel parameter `property`, under `/proc/sys`.
///
/// See [`custom_get`] for details.
pub fn get(property: &str) -> io::Result<Vec<u8>> {
    custom_get(PROC_SYS_PATH, property)
}

/// Read `property`, under `base`.
///
/// Leading and trailing whitespace is removed, including the newline the
/// kernel ends every value with.
///
/// Whitespace is Unicode whitespace if the value is valid UTF-8, otherwise
/// only the ASCII kind, including vertical tab.
///
/// # Errors
///
/// - If the file can't be opened or read. The [`io::Error`] is passed
///   through unchanged.
pub fn custom_get<P: AsRef<Path>>(base: P, property: &str) -> io::Result<Vec<u8>> {
    let path = resolve(base, property);
    trace!("Reading `{}`", path.display());

    let data =
        fs::read(&path).inspect_err(|e| debug!("Couldn't get `{}`: {e}", path.display()))?;
    Ok(trim_space(&data).to_vec())
}

/// Read kernel parameter `property` as an integer, under `/proc/sys`.
///
/// See [`custom_get_int`] for details.
pub fn get_int(property: &str) -> Result<i64, SysctlError> {
    custom_get_int(PROC_SYS_PATH, property)
}

/// Read `property` as a base 10 integer, under `base`.
///
/// An empty value is `0`.
/// A leading `+` or `-` is accepted.
///
/// # Errors
///
/// - [`SysctlError::Io`] if [`custom_get`] does.
/// - [`SysctlError::InvalidUtf8`] or [`SysctlError::InvalidInt`] if the
///   value isn't an integer.
pub fn custom_get_int<P: AsRef<Path>>(base: P, property: &str) -> Result<i64, SysctlError> {
    let data = custom_get(base, property)?;
    if data.is_empty() {
        return Ok(0);
    }
    str::from_utf8(&data)
        .map_err(|e| SysctlError::InvalidUtf8(property.into(), e))?
        .parse()
        .map_err(|e| SysctlError::InvalidInt(property.into(), e))
}

/// Read kernel parameter `property` as a boolean, under `/proc/sys`.
///
/// See [`custom_get_bool`] for details.
pub fn get_bool(property: &str) -> Result<bool, SysctlError> {
    custom_get_bool(PROC_SYS_PATH, property)
}

/// Read `property` as a boolean, under `base`.
///
/// # Note
///
/// This is not a general boolean parser.
/// The value is `true` only if its first byte is `1`, so `"0"`, `"true"`
/// and `"yes"` are all `false`, while `"10"` is `true`.
///
/// An empty value is `false`.
///
/// # Errors
///
/// - [`SysctlError::Io`] if [`custom_get`] does.
pub fn custom_get_bool<P: AsRef<Path>>(base: P, property: &str) -> Result<bool, SysctlError> {
    let data = custom_get(base, property)?;
    Ok(data.first() == Some(&b'1'))
}

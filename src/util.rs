//! Utility functions

/// Where the kernel exposes its tunable parameters.
///
/// Linux mounts procfs at `/proc`, but anything that wants to point the
/// accessors elsewhere can use the `custom_*` variants in
/// [`crate::sysctl`] instead of changing this.
pub const PROC_SYS_PATH: &str = "/proc/sys";

//! Read and write Linux kernel parameters, as `sysctl(8)` does
//!
//! # Example
//!
//! ```rust,no_run
//! use linsysctl::sysctl;
//!
//! // Disables IPv6 on all interfaces
//! sysctl::set("net.ipv6.conf.all.disable_ipv6", "1")?;
//! let value = sysctl::get("net.ipv6.conf.all.disable_ipv6")?;
//! assert_eq!(value, b"1");
//!
//! let forwarding = sysctl::get_bool("net.ipv4.ip_forward")?;
//! let pid_max = sysctl::get_int("kernel.pid_max")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Implementation details
//!
//! Kernel parameters are provided through files in `/proc/sys`, so this
//! library requires it to exist, or a directory laid out the same way to be
//! given to the `custom_*` functions.
//!
//! Which parameters exist, and what they accept, depends on the kernel
//! version and configuration. Nothing here checks a parameter before using
//! it, the kernel's answer is returned as-is.
#![doc(html_root_url = "https://docs.rs/linsysctl/0.1.0")]

pub mod error;
pub mod sysctl;

mod util;

pub use util::PROC_SYS_PATH;

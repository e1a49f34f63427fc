use std::{fs, io};

use anyhow::Result;
use linsysctl::{error::SysctlError, sysctl, PROC_SYS_PATH};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Configure a fake interface the way a network agent would
#[test]
fn interface_settings() -> Result<()> {
    init();
    let dir = tempfile::tempdir()?;
    fs::create_dir_all(dir.path().join("net/ipv4/conf/eth0.100"))?;

    sysctl::custom_set(dir.path(), "net.ipv4.conf.eth0/100.rp_filter", "2")?;
    sysctl::custom_set(dir.path(), "net/ipv4/conf/eth0.100/forwarding", "1")?;

    assert_eq!(
        fs::read_to_string(dir.path().join("net/ipv4/conf/eth0.100/rp_filter"))?,
        "2\n"
    );
    assert_eq!(
        sysctl::custom_get_int(dir.path(), "net.ipv4.conf.eth0/100.rp_filter")?,
        2
    );
    assert!(sysctl::custom_get_bool(
        dir.path(),
        "net.ipv4.conf.eth0/100.forwarding"
    )?);
    Ok(())
}

#[test]
fn unknown_parameter() -> Result<()> {
    init();
    let dir = tempfile::tempdir()?;

    let err = sysctl::custom_get(dir.path(), "net.core.no_such_thing").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);

    match sysctl::custom_get_int(dir.path(), "net.core.no_such_thing") {
        Err(SysctlError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
        other => panic!("expected an io error, got {other:?}"),
    }
    Ok(())
}

#[test]
fn resolve_matches_accessors() -> Result<()> {
    init();
    let dir = tempfile::tempdir()?;
    let path = sysctl::resolve(dir.path(), "fs.file-max");
    fs::create_dir_all(dir.path().join("fs"))?;

    sysctl::custom_set(dir.path(), "fs.file-max", "9223372036854775807")?;
    assert!(path.is_file());
    assert_eq!(
        sysctl::custom_get_int(dir.path(), "fs.file-max")?,
        i64::MAX
    );
    Ok(())
}

/// Reads the real `/proc/sys` of the running system
#[test]
#[cfg(target_os = "linux")]
#[ignore = "needs a readable /proc/sys"]
fn live_system() -> Result<()> {
    init();
    assert_eq!(PROC_SYS_PATH, "/proc/sys");

    assert_eq!(sysctl::get("kernel.ostype")?, b"Linux");
    assert!(sysctl::get_int("kernel.pid_max")? > 0);
    Ok(())
}

//! Raw libc calls the demos need and `std` does not wrap safely.
//!
//! This is the only module in the workspace allowed to use `unsafe`.

use std::ffi::{CStr, OsStr, c_char, c_int};
use std::io;

use parking_lot::{Mutex, MutexGuard};

use crate::string::strlen;

static ENV_LOCK: Mutex<()> = Mutex::new(());

pub use libc::{EBADF, ENOENT};

/// A descriptor no process can have open.
pub const INVALID_FD: c_int = -1;

/// `read(2)` on a raw descriptor.
///
/// Returns the byte count, or the OS error (`errno`) when the call fails.
pub fn read_fd(fd: c_int, buf: &mut [u8]) -> io::Result<usize> {
    // SAFETY: `buf` is a valid, exclusively borrowed region of `buf.len()`
    // bytes. An invalid `fd` makes the kernel fail with EBADF before any write.
    let ret = unsafe { libc::read(fd, buf.as_mut_ptr().cast(), buf.len()) };
    if ret < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(ret as usize)
    }
}

/// Text for an errno value (`strerror`), e.g. "No such file or directory".
#[must_use]
pub fn strerror(errno: c_int) -> String {
    let mut buf = [0 as c_char; 256];
    // SAFETY: `buf` is writable for `buf.len()` bytes; the XSI `strerror_r`
    // NUL-terminates within that length when it returns 0.
    let ret = unsafe { libc::strerror_r(errno, buf.as_mut_ptr(), buf.len()) };
    if ret != 0 {
        return format!("Unknown error {errno}");
    }
    // SAFETY: checked above that the buffer holds a terminated string.
    let text = unsafe { CStr::from_ptr(buf.as_ptr()) };
    text.to_string_lossy().into_owned()
}

/// Fields of `struct utsname`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtsName {
    pub sysname: String,
    pub nodename: String,
    pub release: String,
    pub version: String,
    pub machine: String,
}

/// `uname(2)`.
pub fn uname() -> io::Result<UtsName> {
    // SAFETY: `utsname` is plain `c_char` arrays; all-zero is a valid value.
    let mut raw: libc::utsname = unsafe { std::mem::zeroed() };
    // SAFETY: `raw` is a valid, exclusively borrowed `utsname`.
    if unsafe { libc::uname(&mut raw) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(UtsName {
        sysname: field(&raw.sysname),
        nodename: field(&raw.nodename),
        release: field(&raw.release),
        version: field(&raw.version),
        machine: field(&raw.machine),
    })
}

/// `gethostname(2)`.
pub fn hostname() -> io::Result<String> {
    let mut buf = [0u8; 256];
    // SAFETY: `buf` is writable for `buf.len()` bytes.
    if unsafe { libc::gethostname(buf.as_mut_ptr().cast(), buf.len()) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(String::from_utf8_lossy(&buf[..strlen(&buf)]).into_owned())
}

fn field(chars: &[c_char]) -> String {
    let bytes: Vec<u8> = chars.iter().map(|&c| c as u8).collect();
    String::from_utf8_lossy(&bytes[..strlen(&bytes)]).into_owned()
}

/// Serialises environment mutation across threads. Hold it for the whole of
/// a set / read / unset sequence.
pub fn lock_env() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock()
}

/// `setenv(name, value, 1)`.
///
/// Only call while no other thread reads the environment through libc.
pub fn set_env(name: impl AsRef<OsStr>, value: impl AsRef<OsStr>) {
    // SAFETY: no code in this workspace reads the environment through libc,
    // and std serialises its own environment access.
    unsafe { std::env::set_var(name, value) }
}

/// `unsetenv(name)`. Same threading constraint as [`set_env`].
pub fn unset_env(name: impl AsRef<OsStr>) {
    // SAFETY: see `set_env`.
    unsafe { std::env::remove_var(name) }
}

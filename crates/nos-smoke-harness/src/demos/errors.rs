//! Deliberate failures: invalid descriptor, null string, missing file.
//!
//! Every failure here is the expected observation and is recorded as such.
//! A call that unexpectedly succeeds is a failed check.

use std::fs::File;

use nos_smoke_core::string::strlen_nullable;
use nos_smoke_core::sys::{self, INVALID_FD};

use crate::error::DemoError;
use crate::session::Session;

pub const NONEXISTENT_PATH: &str = "/nonexistent/file.txt";

pub fn run(s: &mut Session<'_>) -> Result<(), DemoError> {
    let mut buf = [0u8; 16];
    match sys::read_fd(INVALID_FD, &mut buf) {
        Err(e) => s.expected_failure("read(-1)", &e)?,
        Ok(n) => {
            s.check("read(-1)", false, Some(format!("unexpectedly read {n} bytes")))?;
        }
    }

    let len = strlen_nullable(None);
    s.line(format_args!("  strlen(NULL) = {len}"))?;
    s.check("strlen(NULL) 返回 0", len == 0, None)?;

    match File::open(NONEXISTENT_PATH) {
        Err(e) => s.expected_failure(&format!("fopen(\"{NONEXISTENT_PATH}\")"), &e)?,
        Ok(_) => {
            s.check(
                "fopen 不存在的文件",
                false,
                Some(format!("{NONEXISTENT_PATH} exists")),
            )?;
        }
    }

    let text = sys::strerror(sys::ENOENT);
    s.line(format_args!("  strerror(ENOENT) = \"{text}\""))?;
    s.check("strerror 错误消息", !text.is_empty(), None)?;
    Ok(())
}

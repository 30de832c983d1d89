//! Transient file: create, write three lines, close, reopen, stream back,
//! close, remove.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::DemoError;
use crate::session::Session;

pub const TRANSIENT_FILE_NAME: &str = "nos_test.txt";

/// Location of the transient file for `scratch_dir`.
#[must_use]
pub fn transient_path(scratch_dir: &Path) -> PathBuf {
    scratch_dir.join(TRANSIENT_FILE_NAME)
}

/// The three lines written by the demo: label, timestamp, process id.
#[must_use]
pub fn file_lines() -> [String; 3] {
    [
        "NOS 文件 I/O 测试 (file test)".to_string(),
        format!("时间戳 timestamp: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S")),
        format!("PID: {}", std::process::id()),
    ]
}

/// Creates (truncating) `path` and writes `lines`. The handle is closed on
/// return, including on error. A write failure removes the partial file.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<(), DemoError> {
    let file = File::create(path).map_err(|e| DemoError::file("create", path, e))?;
    write_all(BufWriter::new(file), lines).map_err(|e| {
        discard(path);
        DemoError::file("write", path, e)
    })
}

fn write_all(mut writer: impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(writer, "{line}")?;
    }
    writer.flush()
}

/// Best-effort removal after a failed step.
fn discard(path: &Path) {
    let _ = fs::remove_file(path);
}

/// Reopens `path`, streams it back line by line and checks it against
/// `expected`. On a reopen or read failure the file is removed and the demo
/// aborts.
pub fn read_back(s: &mut Session<'_>, path: &Path, expected: &[String]) -> Result<(), DemoError> {
    let file = File::open(path).map_err(|e| {
        discard(path);
        DemoError::file("reopen", path, e)
    })?;
    let mut read = Vec::with_capacity(expected.len());
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| {
            discard(path);
            DemoError::file("read", path, e)
        })?;
        s.line(format_args!("  读取 read: {line}"))?;
        read.push(line);
    }
    s.check(
        "读回三行 (read back)",
        read == expected,
        (read != expected).then(|| format!("read {} lines", read.len())),
    )?;
    Ok(())
}

/// Deletes `path`. A failure is reported and recorded as a failed check; it
/// does not abort the demo.
pub fn remove(s: &mut Session<'_>, path: &Path) -> Result<(), DemoError> {
    match fs::remove_file(path) {
        Ok(()) => {
            s.line(format_args!("  已删除 removed {}", path.display()))?;
            s.check("删除后文件不存在", !path.exists(), None)?;
        }
        Err(e) => {
            s.line(format_args!("  删除失败 remove failed: {e}"))?;
            s.check("删除临时文件", false, Some(e.to_string()))?;
        }
    }
    Ok(())
}

pub fn run(s: &mut Session<'_>) -> Result<(), DemoError> {
    let path = transient_path(&s.config.scratch_dir);
    let lines = file_lines();

    write_lines(&path, &lines)?;
    s.line(format_args!("  已写入并关闭 {} ({} 行)", path.display(), lines.len()))?;
    read_back(s, &path, &lines)?;
    remove(s, &path)
}

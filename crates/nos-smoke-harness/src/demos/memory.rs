//! Buffer lifecycle: malloc → memset → strcpy → realloc → strcat → free,
//! then calloc'd integer squares.

use nos_smoke_core::buffer::{TextBuffer, zeroed_ints};

use super::join;
use crate::error::DemoError;
use crate::session::Session;

pub const INITIAL_SIZE: usize = 64;
pub const GROWN_SIZE: usize = INITIAL_SIZE * 2;
pub const SQUARE_COUNT: usize = 10;

const GREETING: &[u8] = b"Hello, NOS memory!";
const EXTENSION: &[u8] = b" (extended after realloc)";

pub fn run(s: &mut Session<'_>) -> Result<(), DemoError> {
    run_with_sizes(s, INITIAL_SIZE, GROWN_SIZE)
}

/// Runs the demo with explicit buffer sizes.
///
/// An initial allocation failure returns before any other step. A resize
/// failure releases the original buffer and ends the demo.
pub fn run_with_sizes(s: &mut Session<'_>, initial: usize, grown: usize) -> Result<(), DemoError> {
    let mut buf = TextBuffer::allocate(initial).inspect_err(|_| {
        let _ = s.line(format_args!("  malloc({initial}) 失败 (allocation failed)"));
    })?;
    s.line(format_args!("  malloc({initial}) 成功"))?;

    buf.fill(0);
    s.check("memset 清零", buf.text_len() == 0, None)?;

    buf.write_str(GREETING);
    s.line(format_args!("  strcpy → \"{}\"", buf.text()))?;
    let original = buf.text().into_owned();

    let mut buf = buf.resize(grown).inspect_err(|_| {
        let _ = s.line(format_args!(
            "  realloc({grown}) 失败, 原缓冲区已释放 (original released)"
        ));
    })?;
    s.line(format_args!("  realloc({grown}) 成功, size = {}", buf.size()))?;
    let kept = buf.text() == original;
    s.check(
        "realloc 保留原内容",
        kept,
        (!kept).then(|| format!("expected \"{original}\", got \"{}\"", buf.text())),
    )?;

    buf.append_str(EXTENSION);
    s.line(format_args!("  strcat → \"{}\"", buf.text()))?;
    let extended = buf.text().starts_with(&original);
    s.check("扩展后前缀不变", extended, None)?;
    drop(buf);
    s.line(format_args!("  free 完成"))?;

    let mut squares = zeroed_ints(SQUARE_COUNT).inspect_err(|_| {
        let _ = s.line(format_args!("  calloc({SQUARE_COUNT}) 失败"));
    })?;
    s.check("calloc 清零", squares.iter().all(|&v| v == 0), None)?;
    for (i, slot) in squares.iter_mut().enumerate() {
        let i = i as i32;
        *slot = i * i;
    }
    s.line(format_args!("  squares: {}", join(&squares)))?;
    let ok = squares
        .iter()
        .enumerate()
        .all(|(i, &v)| v == (i * i) as i32);
    s.check("平方数组", ok, None)?;
    drop(squares);
    s.line(format_args!("  free 完成"))?;
    Ok(())
}

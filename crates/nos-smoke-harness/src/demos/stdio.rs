//! Line- and character-oriented output plus one character of input.

use crate::config::StdinMode;
use crate::error::DemoError;
use crate::session::{EOF, Session};

pub fn run(s: &mut Session<'_>) -> Result<(), DemoError> {
    // puts
    s.line(format_args!("Hello from NOS libc! 你好，NOS!"))?;

    // putchar
    let mut echoed = Vec::new();
    for &byte in b"NOS\n" {
        echoed.push(s.putchar(byte)?);
    }
    let expected: Vec<i32> = b"NOS\n".iter().map(|&b| i32::from(b)).collect();
    s.check("putchar 字符输出", echoed == expected, None)?;

    // printf
    s.line(format_args!("printf: {} + {} = {}, pi ≈ {:.2}", 2, 3, 2 + 3, std::f64::consts::PI))?;

    if s.config.stdin == StdinMode::Skip {
        return s.skip("getchar 字符输入", "stdin disabled");
    }

    s.write_str("请输入一个字符 (enter a character): ")?;
    s.flush()?;
    let c = s.getchar();
    s.line(format_args!("你输入的是 (you typed): {}", describe(c)))?;
    Ok(())
}

/// Echo form of a `getchar` result: the character and its code, or EOF.
pub fn describe(c: i32) -> String {
    if c == EOF {
        return format!("{EOF} (EOF)");
    }
    match u8::try_from(c) {
        Ok(b) if b.is_ascii_graphic() || b == b' ' => format!("'{}' ({c})", char::from(b)),
        _ => format!("{c}"),
    }
}

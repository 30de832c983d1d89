//! Demo routines, one per library area.
//!
//! Each routine acquires what it needs, prints what it observes, records
//! checks, and releases everything before returning.

pub mod errors;
pub mod fibonacci;
pub mod file_io;
pub mod math;
pub mod memory;
pub mod sort;
pub mod stdio;
pub mod strings;
pub mod syscall;

use clap::ValueEnum;

use crate::error::DemoError;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Demo {
    Stdio,
    Memory,
    String,
    Math,
    FileIo,
    Syscall,
    Fibonacci,
    Sort,
    Error,
}

impl Demo {
    /// Canonical run order.
    pub const ALL: [Demo; 9] = [
        Demo::Stdio,
        Demo::Memory,
        Demo::String,
        Demo::Math,
        Demo::FileIo,
        Demo::Syscall,
        Demo::Fibonacci,
        Demo::Sort,
        Demo::Error,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Demo::Stdio => "stdio",
            Demo::Memory => "memory",
            Demo::String => "string",
            Demo::Math => "math",
            Demo::FileIo => "file-io",
            Demo::Syscall => "syscall",
            Demo::Fibonacci => "fibonacci",
            Demo::Sort => "sort",
            Demo::Error => "error",
        }
    }

    /// Section heading printed before the routine runs.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Demo::Stdio => "📟 标准输入输出测试 (stdio)",
            Demo::Memory => "💾 内存管理测试 (malloc/realloc/calloc/free)",
            Demo::String => "📝 字符串操作测试 (string.h)",
            Demo::Math => "🔢 数学函数测试 (math.h)",
            Demo::FileIo => "📁 文件 I/O 测试 (fopen/fgets/remove)",
            Demo::Syscall => "💻 系统调用测试 (getpid/getenv/rand/time/sleep)",
            Demo::Fibonacci => "🌀 斐波那契数列 (fibonacci)",
            Demo::Sort => "🔃 冒泡排序 (bubble sort)",
            Demo::Error => "⚠️ 错误处理测试 (errno/strerror)",
        }
    }

    pub fn run(self, session: &mut Session<'_>) -> Result<(), DemoError> {
        match self {
            Demo::Stdio => stdio::run(session),
            Demo::Memory => memory::run(session),
            Demo::String => strings::run(session),
            Demo::Math => math::run(session),
            Demo::FileIo => file_io::run(session),
            Demo::Syscall => syscall::run(session),
            Demo::Fibonacci => fibonacci::run(session),
            Demo::Sort => sort::run(session),
            Demo::Error => errors::run(session),
        }
    }
}

impl std::fmt::Display for Demo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Renders integers space-separated, as the demos print arrays.
pub(crate) fn join<T: std::fmt::Display>(items: &[T]) -> std::string::String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_cli_values() {
        for demo in Demo::ALL {
            let parsed = Demo::from_str(demo.name(), true).unwrap();
            assert_eq!(parsed, demo);
        }
    }

    #[test]
    fn join_formats_space_separated() {
        assert_eq!(join(&[1, 2, 3]), "1 2 3");
        assert_eq!(join::<i32>(&[]), "");
    }
}

//! # nos-smoke-core
//!
//! Safe building blocks behind the NOS libc smoke demos: `<string.h>`-style
//! operations over byte slices, the bounded Fibonacci generator, the exchange
//! sort, the math sample table and the buffer lifecycle helpers.
//!
//! No `unsafe` code is permitted outside the [`sys`] module, which wraps the
//! few raw libc calls the error demo needs.

#![deny(unsafe_code)]

pub mod buffer;
pub mod fib;
pub mod math;
pub mod sort;
pub mod string;
#[allow(unsafe_code)]
pub mod sys;

pub use buffer::{BufferError, TextBuffer};
pub use fib::{FIB_MAX_TERMS, Fibonacci, fibonacci};
pub use sort::bubble_sort;

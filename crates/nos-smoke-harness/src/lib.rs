//! Manual smoke-test harness for the NOS C standard library surface.
//!
//! This crate provides:
//! - Demo routines: stdio, memory, string, math, file I/O, process/environment,
//!   Fibonacci, sort and error paths, each printing what it observes
//! - Check recording with an end-of-run summary report
//! - A sequential runner that reports a failed demo and moves on
//! - Structured JSONL logging of every check

#![forbid(unsafe_code)]

pub mod config;
pub mod demos;
pub mod error;
pub mod results;
pub mod runner;
pub mod session;
pub mod structured_log;

pub use config::{SmokeConfig, StdinMode};
pub use demos::Demo;
pub use error::DemoError;
pub use results::{Summary, TestResults};
pub use runner::{RunReport, SmokeRunner};
pub use session::Session;

//! CLI entrypoint for the NOS libc smoke harness.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::{Args, Parser, Subcommand};

use nos_smoke_harness::structured_log::{LogEmitter, validate_log_file};
use nos_smoke_harness::{Demo, Session, SmokeConfig, SmokeRunner, StdinMode};

/// Smoke tests for the NOS C standard library surface.
#[derive(Debug, Parser)]
#[command(name = "nos-smoke")]
#[command(about = "Manual smoke-test harness for the NOS C standard library")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    /// `run` flags, accepted without the subcommand name.
    #[command(flatten)]
    run: RunArgs,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the demo sequence (default).
    Run(RunArgs),
    /// List demo names in run order.
    List,
    /// Validate a JSONL log written by `run --log`.
    ValidateLog {
        /// JSONL log path.
        #[arg(long)]
        log: PathBuf,
    },
}

#[derive(Debug, Default, Args)]
struct RunArgs {
    /// Run only these demos (repeatable); order stays canonical.
    #[arg(long, value_enum)]
    only: Vec<Demo>,
    /// Write a structured JSONL log to this path.
    #[arg(long)]
    log: Option<PathBuf>,
    /// Directory for the transient file (default: system temp dir).
    #[arg(long)]
    scratch_dir: Option<PathBuf>,
    /// Sleep length of the syscall demo, in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,
    /// Number of Fibonacci terms to request.
    #[arg(long, allow_hyphen_values = true)]
    fib_count: Option<i32>,
    /// Do not read a character from stdin.
    #[arg(long)]
    no_stdin: bool,
}

impl RunArgs {
    fn into_config(self) -> SmokeConfig {
        let mut config = SmokeConfig::from_env();
        config.only = self.only;
        config.log_path = self.log;
        if let Some(dir) = self.scratch_dir {
            config.scratch_dir = dir;
        }
        if let Some(ms) = self.delay_ms {
            config.delay = Duration::from_millis(ms);
        }
        if let Some(n) = self.fib_count {
            config.fib_count = n;
        }
        if self.no_stdin {
            config.stdin = StdinMode::Skip;
        }
        config
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Cli { command, run: args } = Cli::parse();

    match command.unwrap_or(Command::Run(args)) {
        Command::Run(args) => run(args.into_config()),
        Command::List => {
            for demo in Demo::ALL {
                println!("{:<10} {}", demo.name(), demo.title());
            }
        }
        Command::ValidateLog { log } => {
            let (lines, errors) = validate_log_file(&log)?;
            for error in &errors {
                eprintln!("{error}");
            }
            eprintln!("{}: {lines} lines, {} errors", log.display(), errors.len());
            if !errors.is_empty() {
                return Err(format!("{} is not a valid smoke log", log.display()).into());
            }
        }
    }
    Ok(())
}

/// Runs the sequence. Always exits successfully; failures are reported in
/// the output and the log.
fn run(config: SmokeConfig) {
    let run_id = format!(
        "run-{}-{}",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default(),
        std::process::id()
    );
    let log = config.log_path.as_ref().and_then(|path| {
        LogEmitter::to_file(path, &run_id)
            .inspect_err(|err| eprintln!("log disabled: {}: {err}", path.display()))
            .ok()
    });

    let runner = SmokeRunner::new(config.selected());
    let stdout = std::io::stdout();
    let stdin = std::io::stdin();
    let mut session = Session::new(config, stdout.lock(), stdin.lock());
    if let Some(log) = log {
        session = session.with_log(log);
    }

    let report = runner.run(&mut session);
    session.finish();
    for run in report.aborted() {
        eprintln!("{} aborted: {}", run.demo, run.aborted.as_deref().unwrap_or_default());
    }
}

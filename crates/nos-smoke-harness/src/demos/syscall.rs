//! Process identity, environment lookups and round-trip, system information,
//! PRNG draws, wall-clock time and a fixed sleep.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use nos_smoke_core::sys;
use rand::{Rng, SeedableRng};

use crate::error::DemoError;
use crate::session::Session;

/// Variables looked up by the demo.
pub const ENV_VARS: [&str; 2] = ["HOME", "PATH"];

/// Variable set and then removed by the environment round-trip.
pub const ROUND_TRIP_VAR: &str = "NOS_SMOKE_TEST_VAR";
pub const ROUND_TRIP_VALUE: &str = "test_value";

/// Draws are taken from `0..RAND_BOUND`.
pub const RAND_BOUND: u32 = 100;

/// Two draws from a generator seeded with `seed` (`srand` + 2× `rand() % 100`).
#[must_use]
pub fn draws(seed: u64) -> [u32; 2] {
    let mut rng = StdRng::seed_from_u64(seed);
    [rng.gen_range(0..RAND_BOUND), rng.gen_range(0..RAND_BOUND)]
}

/// Local time in C `ctime` layout, without the trailing newline.
#[must_use]
pub fn ctime_now() -> String {
    chrono::Local::now().format("%a %b %e %H:%M:%S %Y").to_string()
}

pub fn run(s: &mut Session<'_>) -> Result<(), DemoError> {
    let pid = std::process::id();
    let ppid = std::os::unix::process::parent_id();
    s.line(format_args!("  getpid() = {pid}"))?;
    s.line(format_args!("  getppid() = {ppid}"))?;

    for name in ENV_VARS {
        match std::env::var_os(name) {
            Some(value) => s.line(format_args!("  getenv(\"{name}\") = {}", value.to_string_lossy()))?,
            None => s.line(format_args!("  getenv(\"{name}\"): 未设置 (unset)"))?,
        }
    }

    env_round_trip(s)?;
    system_info(s)?;

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let [first, second] = draws(seed);
    s.line(format_args!("  srand({seed}); rand() % {RAND_BOUND} = {first}, {second}"))?;
    s.check(
        "rand 范围",
        first < RAND_BOUND && second < RAND_BOUND,
        None,
    )?;
    s.check("srand 种子一致性", draws(seed) == [first, second], None)?;

    let now = ctime_now();
    s.line(format_args!("  ctime: {now}"))?;
    s.check("时间格式化", !now.trim().is_empty(), None)?;

    let delay = s.config.delay;
    s.line(format_args!("  sleep {} ms ...", delay.as_millis()))?;
    s.flush()?;
    let started = Instant::now();
    std::thread::sleep(delay);
    let slept = started.elapsed();
    s.line(format_args!("  唤醒 resumed after {} ms", slept.as_millis()))?;
    Ok(())
}

/// `setenv`, `getenv`, `unsetenv`, `getenv` on [`ROUND_TRIP_VAR`].
pub fn env_round_trip(s: &mut Session<'_>) -> Result<(), DemoError> {
    let (value, after) = {
        let _env = sys::lock_env();
        sys::set_env(ROUND_TRIP_VAR, ROUND_TRIP_VALUE);
        let value = std::env::var(ROUND_TRIP_VAR).ok();
        sys::unset_env(ROUND_TRIP_VAR);
        (value, std::env::var_os(ROUND_TRIP_VAR))
    };

    s.line(format_args!(
        "  setenv(\"{ROUND_TRIP_VAR}\", \"{ROUND_TRIP_VALUE}\"); getenv = {value:?}"
    ))?;
    let detail = match value.as_deref() {
        Some(ROUND_TRIP_VALUE) => None,
        Some(other) => Some(format!("expected {ROUND_TRIP_VALUE:?}, got {other:?}")),
        None => Some("unset after setenv".to_string()),
    };
    s.check("getenv 值匹配 (setenv)", detail.is_none(), detail)?;

    s.line(format_args!("  unsetenv(\"{ROUND_TRIP_VAR}\"); getenv = {:?}", after.as_deref()))?;
    s.check(
        "getenv 已删除变量 (unsetenv)",
        after.is_none(),
        after.map(|v| format!("still set to {:?}", v.to_string_lossy())),
    )?;
    Ok(())
}

/// `uname` and `gethostname`.
pub fn system_info(s: &mut Session<'_>) -> Result<(), DemoError> {
    match sys::uname() {
        Ok(uts) => {
            s.line(format_args!(
                "  uname: {} {} {} ({})",
                uts.sysname, uts.nodename, uts.release, uts.machine
            ))?;
            s.check("uname 系统信息", !uts.sysname.is_empty(), None)?;
        }
        Err(e) => {
            s.check("uname 系统信息", false, Some(e.to_string()))?;
        }
    }
    match sys::hostname() {
        Ok(name) => {
            s.line(format_args!("  gethostname() = {name}"))?;
            s.check(
                "gethostname 主机名",
                !name.is_empty(),
                name.is_empty().then(|| "empty hostname".to_string()),
            )?;
        }
        Err(e) => {
            s.check("gethostname 主机名", false, Some(e.to_string()))?;
        }
    }
    Ok(())
}

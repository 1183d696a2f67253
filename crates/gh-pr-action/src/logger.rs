//! Console logging using env_logger
//!
//! Everything goes to stdout so log lines and workflow commands interleave
//! in the order they were produced. The level comes from `RUST_LOG` and
//! defaults to `info`.

use env_logger::{Builder, Env, Target};
use std::io::Write;

/// Initialize the global logger
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let _ = Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .format(|buf, record| writeln!(buf, "{:<5} {}", record.level(), record.args()))
        .try_init();
}

use std::io::Write;

use env_logger::Builder;
use env_logger::Target;
use log::LevelFilter;

/// Install the logger for the binaries. Every log line is written to standard output and starts
/// with `prefix`, so that it can be told apart from the failure reports on standard error.
///
/// The level is `debug` when `verbose` is set and `info` otherwise; `RUST_LOG` takes precedence.
pub fn configure(verbose: bool, prefix: &'static str) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(Target::Stdout)
        .format(move |buf, record| {
            writeln!(
                buf,
                "{prefix}{} [{}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();
}

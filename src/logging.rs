//! Console logging setup for the `vocview` binary.
//!
//! The library only emits through the `log` facade; the binary decides where
//! records go. `RUST_LOG` always wins. Without it, records from this crate are
//! shown at `warn` and above, or lower with `-v`/`-vv`, and every other crate
//! is silenced.

use log::LevelFilter;

/// Level used for this crate's records when `RUST_LOG` is unset.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger. Calling it twice is harmless.
pub fn setup_logger(verbose: u8) {
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_env("RUST_LOG");
    } else {
        builder.filter(None, LevelFilter::Off);
        builder.filter(Some(env!("CARGO_CRATE_NAME")), level_for_verbosity(verbose));
    }

    builder.format_timestamp(None).format_target(true);

    // already installed (tests, embedding applications)
    let _ = builder.try_init();
}

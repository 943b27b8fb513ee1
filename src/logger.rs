use env_logger::Env;
use log::LevelFilter;

/// Level used when `RUST_LOG` is not set.
pub fn default_level(verbose: bool, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Installs the global logger. `RUST_LOG` takes precedence over the flags.
pub fn init(verbose: bool, quiet: bool) {
    let level = default_level(verbose, quiet);
    let env = Env::default().default_filter_or(level.as_str().to_lowercase());

    // An already installed logger wins.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

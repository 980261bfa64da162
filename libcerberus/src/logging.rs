use std::env;

use env_logger::Builder;
use error_chain::ChainedError;

use errors::*;

/// Initialises `env_logger`, using `RUST_LOG` when it is set and `default_config` otherwise.
///
/// Logs go to stderr, leaving stdout free for payload output.
pub fn init_logger(default_config: &str) -> Result<()> {
    let mut builder = Builder::new();
    match env::var("RUST_LOG") {
        Ok(log_config) => builder.parse_filters(&log_config),
        Err(_) => builder.parse_filters(default_config),
    };

    builder
        .try_init()
        .chain_err(|| "Failed to build env_logger")?;
    Ok(())
}

pub fn output_error<E: ChainedError>(err: &E) {
    error!("{}", err);

    for e in err.iter().skip(1) {
        error!("caused by: {}", e);
    }

    if let Some(backtrace) = err.backtrace() {
        error!("backtrace: {:?}", backtrace);
    }
}

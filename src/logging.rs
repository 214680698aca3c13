use std::any::Any;
use std::backtrace::Backtrace;

use anyhow::anyhow;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::AppConfig;

/// Installs the stderr subscriber and routes panics through it.
///
/// `RUST_LOG` wins over the configured level. Fails if a global subscriber
/// is already set.
pub fn init_tracing(cfg: &AppConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.log_level))
        .map_err(|err| anyhow!("invalid log filter `{}`: {err}", cfg.log_level))?;

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("tracing already initialised: {err}"))?;

    std::panic::set_hook(Box::new(|info| {
        let backtrace = Backtrace::capture();
        let location = info
            .location()
            .map(|loc| loc.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        tracing::error!(
            panic = %panic_message(info.payload()),
            location = %location,
            backtrace = %backtrace,
            "panic"
        );
    }));
    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

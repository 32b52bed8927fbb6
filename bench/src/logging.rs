use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber. `ALLPATHS_LOG` (or `RUST_LOG`) overrides
/// the level picked from the flags.
pub fn init_tracing(verbose: bool, log_json: bool) -> anyhow::Result<()> {
    let level = if verbose { "allpaths=debug" } else { "allpaths=info" };

    let filter = EnvFilter::try_from_env("ALLPATHS_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_span_events(fmt::format::FmtSpan::CLOSE),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

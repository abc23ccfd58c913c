use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset; `verbose` always wins over `level`.
pub fn default_directive(verbose: bool, level: &str) -> String {
    if verbose {
        "probability_calc=debug,info".to_string()
    } else {
        format!("probability_calc={}", level)
    }
}

/// Logs go to stderr so stdout only carries results. `json` switches to
/// one JSON object per line for log collectors.
pub fn init_logger(verbose: bool, level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, level)));

    let json_layer = json.then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
    });
    let compact_layer = (!json).then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(compact_layer)
        .init();
}

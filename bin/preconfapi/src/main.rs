use std::str::FromStr;

use tracing::Level;

fn main() {
    initialize_tracing_log();
    if let Err(err) = preconfapi_cmd::run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn initialize_tracing_log() {
    let level_env = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned());
    let level = Level::from_str(&level_env).unwrap_or_else(|_| {
        eprintln!("Invalid log level {level_env}, defaulting to info");
        Level::INFO
    });

    tracing_subscriber::fmt().compact().with_max_level(level).with_target(true).init();
}

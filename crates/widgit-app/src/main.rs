//! Native entry point: replays a recorded gesture file headlessly.
//!
//! Usage: `widgit [recording.json]`

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting Widgit replay");

    let path = std::env::args().nth(1).map(std::path::PathBuf::from);
    if let Err(e) = widgit_app::replay::run(path.as_deref()) {
        log::error!("Replay failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(all(feature = "native", not(target_arch = "wasm32"))))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}

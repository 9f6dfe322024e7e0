//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    use sketchboard_app::{App, AppConfig};
    use sketchboard_core::config::SketchConfig;

    env_logger::init();
    log::info!("Starting Sketchboard");

    let sketch = match std::env::var_os("SKETCHBOARD_CONFIG") {
        Some(path) => SketchConfig::load(&path).unwrap_or_else(|e| {
            log::warn!("Ignoring config {}: {e}", std::path::Path::new(&path).display());
            SketchConfig::default()
        }),
        None => SketchConfig::default(),
    };

    let config = AppConfig {
        sketch,
        ..AppConfig::default()
    };
    if let Err(e) = pollster::block_on(App::run(config)) {
        log::error!("Event loop error: {e}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}

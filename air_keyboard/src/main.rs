//! air_keyboard — interactive entry point.

use air_keyboard::app::run;
use air_keyboard::config::AppConfig;
use tracing::error;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "air_keyboard=info,key_layout=info,hand_gestures=info";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Air Keyboard — hover a key, pinch to type           ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let cfg = match AppConfig::from_args(std::env::args().skip(1)) {
        Ok(cfg) => cfg,
        Err(e) if e.is_usage() => {
            error!("{}", e);
            eprintln!("  usage: air_keyboard [--config PATH] [--layout qwerty|dvorak|numeric] [--inject] [--quick]");
            std::process::exit(2);
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    #[cfg(feature = "inject")]
    println!("  Output: on-screen text box{}", if cfg.inject { " + focused window" } else { "" });
    #[cfg(not(feature = "inject"))]
    println!("  Output: on-screen text box  (build with --features inject to type into other windows)");
    println!("  Layout: {}", cfg.layout().name);
    println!();
    println!("  Opening preview window…");
    println!();

    if let Err(e) = run(cfg) {
        error!("{}", e);
        std::process::exit(1);
    }
}

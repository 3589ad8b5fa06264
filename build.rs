//! Build script forwarding the backend origin to `option_env!`.

use std::env;

fn main() {
    // Load .env values (useful during development) before build-time macros read them
    let _ = dotenvy::dotenv();

    if let Ok(val) = env::var("KLUKKA_BASE_URL") {
        println!("cargo:rustc-env=KLUKKA_BASE_URL={}", val);
    }

    println!("cargo:rerun-if-env-changed=KLUKKA_BASE_URL");
}

use std::env;

fn main() {
    // Only the firmware build links against ESP-IDF; host builds (tests) skip it
    if env::var_os("CARGO_FEATURE_ESP32").is_some() {
        embuild::espidf::sysenv::output();
    }

    println!("cargo:rerun-if-changed=build.rs");
}

fn main() {
    // Re-export ESP-IDF build environment only when targeting the device.
    // Host builds (tests, clippy) skip it entirely.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}

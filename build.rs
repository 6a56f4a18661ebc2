fn main() {
    // Propagates the ESP-IDF build environment when the `espidf` feature
    // is active; emits nothing on plain host builds.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}

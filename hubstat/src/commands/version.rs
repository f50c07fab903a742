/// Get the version string for hubstat and libhubstat
pub fn get_version_string() -> String {
    format!(
        "hubstat {}\nlibhubstat {}",
        env!("CARGO_PKG_VERSION"),
        libhubstat::version()
    )
}

/// Print version information to stdout
pub fn print_version() {
    println!("{}", get_version_string());
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;

//! Library version information

/// Version as `major * 10000 + minor * 100 + patch`
pub fn api_version() -> i64 {
    let part = |s: &str| s.parse::<i64>().unwrap_or(0);
    part(env!("CARGO_PKG_VERSION_MAJOR")) * 10000
        + part(env!("CARGO_PKG_VERSION_MINOR")) * 100
        + part(env!("CARGO_PKG_VERSION_PATCH"))
}

/// Package version string
pub fn version_string() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Commit the library was built from, set through `GRIBKIT_GIT_SHA1` at build time
pub fn git_sha1() -> &'static str {
    option_env!("GRIBKIT_GIT_SHA1").unwrap_or("")
}

/// Build date, set through `GRIBKIT_BUILD_DATE` at build time
pub fn build_date() -> &'static str {
    option_env!("GRIBKIT_BUILD_DATE").unwrap_or("")
}

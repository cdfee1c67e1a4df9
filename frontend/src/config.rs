//! Build-time configuration of the frontend.

/// API root used when `CAMPUS_API_URL` is not set at build time.
pub const DEFAULT_API_URL: &str = "http://localhost:4000/api";

/// Base URL of the remote REST API, e.g. `CAMPUS_API_URL=https://campus.example/api trunk build`.
pub fn api_base_url() -> &'static str {
    option_env!("CAMPUS_API_URL").unwrap_or(DEFAULT_API_URL)
}

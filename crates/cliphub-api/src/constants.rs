//! API constants
//!
//! Routes and the OpenAPI spec are versioned under `/api/v0`.

/// Current API version
pub const API_VERSION: &str = "v0";

/// Versioned API path prefix
pub const API_PREFIX: &str = "/api/v0";

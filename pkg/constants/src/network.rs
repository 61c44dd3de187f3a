//! Network-related constants.

/// Default address of the library REST backend.
pub const DEFAULT_API_ADDR: &str = "http://localhost:3000";

/// Connect timeout applied to the HTTP client, in seconds.
///
/// Requests themselves have no deadline beyond the transport default.
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// `User-Agent` sent with every backend request.
pub const USER_AGENT: &str = concat!("lmsctl/", env!("CARGO_PKG_VERSION"));

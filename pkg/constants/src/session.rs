//! Persisted session keys.
//!
//! The credential store is a flat string map. These two keys are always
//! written and removed together.

/// Key holding the opaque bearer token.
pub const TOKEN_KEY: &str = "token";

/// Key holding the role string (stored lower-case, read case-insensitively).
pub const ROLE_KEY: &str = "role";

/// Role string that grants the admin-only routes.
pub const ROLE_ADMIN: &str = "admin";

/// Role string for front-desk staff.
pub const ROLE_LIBRARIAN: &str = "librarian";

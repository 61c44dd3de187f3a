//! Client-side session handling.
//!
//! The persisted credential map (token + role) is the durable source of
//! truth; [`Session`] is a cache of it rebuilt by [`SessionResolver`].
//! Nothing outside this crate reads or writes the store directly.

mod file_store;
pub mod nav;
mod resolver;
mod store;

pub use file_store::FileCredentialStore;
pub use resolver::{Authenticator, Session, SessionError, SessionResolver};
pub use store::{CredentialStore, MemoryCredentialStore, StoredCredentials};

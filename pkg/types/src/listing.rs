use serde::Deserialize;

/// A list endpoint response.
///
/// Most endpoints answer a bare array; a few wrap it in an object keyed by
/// the collection name. Both are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Bare(Vec<T>),
    Users { users: Vec<T> },
    Borrows { borrows: Vec<T> },
    Data { data: Vec<T> },
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Bare(items) => items,
            Listing::Users { users } => users,
            Listing::Borrows { borrows } => borrows,
            Listing::Data { data } => data,
        }
    }
}

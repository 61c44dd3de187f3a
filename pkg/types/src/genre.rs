use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Body for creating or renaming a genre.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreInput {
    pub name: String,
}

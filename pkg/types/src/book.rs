use serde::{Deserialize, Serialize};

use crate::genre::Genre;

// --- Persisted Book object ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub published_year: Option<i32>,
    #[serde(default)]
    pub available_copies: i64,
    #[serde(default)]
    pub genre_id: Option<i64>,
    /// Expanded genre, present when the backend joins it in.
    #[serde(default)]
    pub genre: Option<Genre>,
}

impl Book {
    /// Genre name, or an empty string when the backend did not join it.
    pub fn genre_name(&self) -> &str {
        self.genre.as_ref().map(|g| g.name.as_str()).unwrap_or("")
    }
}

// --- Create / update payloads ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub published_year: i32,
    pub available_copies: i64,
    pub genre_id: i64,
}

/// Partial update; only the fields that are set are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_copies: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre_id: Option<i64>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.published_year.is_none()
            && self.available_copies.is_none()
            && self.genre_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_skips_unset_fields() {
        let patch = BookPatch {
            available_copies: Some(3),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "available_copies": 3 }));
        assert!(!patch.is_empty());
        assert!(BookPatch::default().is_empty());
    }

    #[test]
    fn book_without_joined_genre() {
        let book: Book = serde_json::from_str(r#"{"id":1,"title":"Dune","author":"Herbert"}"#).unwrap();
        assert_eq!(book.genre_name(), "");
        assert_eq!(book.available_copies, 0);
    }
}

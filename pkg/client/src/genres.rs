use pkg_types::genre::{Genre, GenreInput};
use pkg_types::listing::Listing;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn list_genres(&self) -> Result<Vec<Genre>, ApiError> {
        let listing: Listing<Genre> = self.get("/genres").await?;
        Ok(listing.into_vec())
    }

    pub async fn create_genre(&self, name: &str) -> Result<Genre, ApiError> {
        let body = GenreInput {
            name: name.trim().to_string(),
        };
        self.post("/genres", &body).await
    }

    pub async fn rename_genre(&self, id: i64, name: &str) -> Result<Genre, ApiError> {
        let body = GenreInput {
            name: name.trim().to_string(),
        };
        self.patch(&format!("/genres/{}", id), &body).await
    }

    pub async fn delete_genre(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/genres/{}", id)).await
    }
}

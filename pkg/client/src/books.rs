use pkg_types::book::{Book, BookInput, BookPatch};
use pkg_types::listing::Listing;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn list_books(&self) -> Result<Vec<Book>, ApiError> {
        let listing: Listing<Book> = self.get("/books").await?;
        Ok(listing.into_vec())
    }

    pub async fn get_book(&self, id: i64) -> Result<Book, ApiError> {
        self.get(&format!("/books/{}", id)).await
    }

    pub async fn create_book(&self, input: &BookInput) -> Result<Book, ApiError> {
        self.post("/books", input).await
    }

    pub async fn update_book(&self, id: i64, patch: &BookPatch) -> Result<Book, ApiError> {
        self.patch(&format!("/books/{}", id), patch).await
    }

    pub async fn delete_book(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/books/{}", id)).await
    }
}

use pkg_types::listing::Listing;
use pkg_types::staff::{Staff, StaffInput, StaffPatch};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Staff accounts are listed through the auth module (`{"users": [...]}`),
    /// but created and edited under `/staff`.
    pub async fn list_staff(&self) -> Result<Vec<Staff>, ApiError> {
        let listing: Listing<Staff> = self.get("/auth/users").await?;
        Ok(listing.into_vec())
    }

    pub async fn create_staff(&self, input: &StaffInput) -> Result<Staff, ApiError> {
        self.post("/staff", input).await
    }

    pub async fn update_staff(&self, id: i64, patch: &StaffPatch) -> Result<Staff, ApiError> {
        self.patch(&format!("/staff/{}", id), patch).await
    }

    pub async fn delete_staff(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/staff/{}", id)).await
    }
}

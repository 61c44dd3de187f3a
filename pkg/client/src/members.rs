use pkg_types::borrow::BorrowRecord;
use pkg_types::listing::Listing;
use pkg_types::member::{Member, MemberInput, MemberPatch};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn list_members(&self) -> Result<Vec<Member>, ApiError> {
        let listing: Listing<Member> = self.get("/members").await?;
        Ok(listing.into_vec())
    }

    pub async fn create_member(&self, input: &MemberInput) -> Result<Member, ApiError> {
        self.post("/members", input).await
    }

    pub async fn update_member(&self, id: i64, patch: &MemberPatch) -> Result<Member, ApiError> {
        self.patch(&format!("/members/{}", id), patch).await
    }

    /// Fails with a validation error while the member still has borrow records.
    pub async fn delete_member(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/members/{}", id)).await
    }

    /// `GET /members/{id}/borrowing-history`; answered either as a bare list
    /// or as `{"borrows": [...]}`.
    pub async fn borrowing_history(&self, id: i64) -> Result<Vec<BorrowRecord>, ApiError> {
        let listing: Listing<BorrowRecord> = self
            .get(&format!("/members/{}/borrowing-history", id))
            .await?;
        Ok(listing.into_vec())
    }
}

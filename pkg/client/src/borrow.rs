use pkg_types::borrow::{BorrowRecord, BorrowRequest, ReturnRequest};
use pkg_types::listing::Listing;
use tracing::info;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn list_borrow_records(&self) -> Result<Vec<BorrowRecord>, ApiError> {
        let listing: Listing<BorrowRecord> = self.get("/borrow-records").await?;
        Ok(listing.into_vec())
    }

    pub async fn borrow_book(&self, req: &BorrowRequest) -> Result<BorrowRecord, ApiError> {
        info!(
            "Borrowing book {} for member {} until {}",
            req.book_id, req.member_id, req.due_date
        );
        self.post("/borrow-records/borrow", req).await
    }

    /// The backend stamps the return date; it is set exactly once.
    pub async fn return_book(&self, borrow_record_id: i64) -> Result<BorrowRecord, ApiError> {
        info!("Returning borrow record {}", borrow_record_id);
        let body = ReturnRequest { borrow_record_id };
        self.post("/borrow-records/return", &body).await
    }
}

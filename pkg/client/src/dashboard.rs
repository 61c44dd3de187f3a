use chrono::{DateTime, Utc};
use pkg_circulation::DashboardStats;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Fetch books, members and borrow records together and derive the
    /// dashboard counts at `now`.
    pub async fn dashboard(&self, now: DateTime<Utc>) -> Result<DashboardStats, ApiError> {
        let (books, members, records) = tokio::try_join!(
            self.list_books(),
            self.list_members(),
            self.list_borrow_records()
        )?;
        Ok(DashboardStats::compute(
            books.len(),
            members.len(),
            &records,
            now,
        ))
    }
}

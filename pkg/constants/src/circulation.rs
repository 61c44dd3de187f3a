//! Borrow / return constants.

/// Loan period used when a borrow is created without an explicit due date.
pub const DEFAULT_LOAN_DAYS: i64 = 14;

/// How many genres the popularity report keeps.
pub const POPULAR_GENRE_LIMIT: usize = 5;

/// Seconds in a day, used for duration and days-overdue arithmetic.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

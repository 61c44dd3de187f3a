pub mod auth;
pub mod books;
pub mod borrow;
pub mod genres;
pub mod members;
pub mod reports;
pub mod staff;

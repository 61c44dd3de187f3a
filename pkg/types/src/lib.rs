//! Wire types shared by the lms client crates.
//!
//! These mirror the JSON the library backend sends and accepts. Field names
//! follow the backend (`snake_case`), so no renaming happens here.

pub mod auth;
pub mod book;
pub mod borrow;
pub mod config;
pub mod genre;
pub mod listing;
pub mod member;
pub mod role;
pub mod search;
pub mod staff;
pub mod validate;

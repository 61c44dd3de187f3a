//! Client-side form checks, run before a payload is sent to the backend.
//!
//! The backend remains authoritative; these only catch obviously incomplete
//! input early.

use anyhow::{Result, bail};
use chrono::NaiveDate;

use crate::book::BookInput;
use crate::borrow::BorrowRequest;
use crate::role::Role;
use crate::staff::StaffInput;

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!("{} must not be empty", field);
    }
    Ok(())
}

pub fn validate_genre_name(name: &str) -> Result<()> {
    require("genre name", name)
}

pub fn validate_member_name(name: &str) -> Result<()> {
    require("member name", name)
}

pub fn validate_book(input: &BookInput) -> Result<()> {
    require("title", &input.title)?;
    require("author", &input.author)?;
    if input.available_copies < 0 {
        bail!(
            "available copies must not be negative (got {})",
            input.available_copies
        );
    }
    if input.genre_id <= 0 {
        bail!("a genre must be selected");
    }
    Ok(())
}

/// Staff creation also checks the password confirmation.
pub fn validate_staff(input: &StaffInput, confirm_password: &str) -> Result<()> {
    require("username", &input.username)?;
    require("email", &input.email)?;
    if input.role == Role::Unknown {
        bail!("role must be 'admin' or 'librarian'");
    }
    require("password", &input.password)?;
    if input.password != confirm_password {
        bail!("passwords do not match");
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` due date.
pub fn parse_due_date(raw: &str) -> Result<NaiveDate> {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(d) => Ok(d),
        Err(_) => bail!("due date '{}' is not a valid YYYY-MM-DD date", raw),
    }
}

pub fn validate_borrow(req: &BorrowRequest) -> Result<()> {
    if req.book_id <= 0 || req.member_id <= 0 {
        bail!("please select a book, member, and valid due date");
    }
    parse_due_date(&req.due_date)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff(role: Role, password: &str) -> StaffInput {
        StaffInput {
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            password: password.to_string(),
            role,
        }
    }

    #[test]
    fn blank_names_rejected() {
        assert!(validate_genre_name("  ").is_err());
        assert!(validate_member_name("").is_err());
        assert!(validate_genre_name("Poetry").is_ok());
    }

    #[test]
    fn staff_password_must_match() {
        assert!(validate_staff(&staff(Role::Librarian, "s3cret"), "s3cret").is_ok());
        let err = validate_staff(&staff(Role::Librarian, "s3cret"), "other").unwrap_err();
        assert_eq!(err.to_string(), "passwords do not match");
        assert!(validate_staff(&staff(Role::Unknown, "s3cret"), "s3cret").is_err());
        assert!(validate_staff(&staff(Role::Admin, ""), "").is_err());
    }

    #[test]
    fn book_requires_genre_and_non_negative_copies() {
        let mut input = BookInput {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            published_year: 1965,
            available_copies: 2,
            genre_id: 3,
        };
        assert!(validate_book(&input).is_ok());
        input.genre_id = 0;
        assert!(validate_book(&input).is_err());
        input.genre_id = 3;
        input.available_copies = -1;
        assert!(validate_book(&input).is_err());
    }

    #[test]
    fn borrow_needs_ids_and_date() {
        let mut req = BorrowRequest {
            book_id: 1,
            member_id: 2,
            due_date: "2024-06-15".to_string(),
        };
        assert!(validate_borrow(&req).is_ok());
        req.due_date = "15/06/2024".to_string();
        assert!(validate_borrow(&req).is_err());
        req.due_date = "2024-06-15".to_string();
        req.member_id = 0;
        assert!(validate_borrow(&req).is_err());
    }
}

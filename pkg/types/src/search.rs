//! Case-insensitive substring search over list views.

use crate::book::Book;
use crate::genre::Genre;
use crate::member::Member;
use crate::staff::Staff;

/// Something a list view can be searched by.
pub trait Searchable {
    /// Fields the query is matched against.
    fn search_fields(&self) -> Vec<&str>;

    fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.search_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Keep the items matching `query`; `None` or a blank query keeps everything.
pub fn filter<'a, T: Searchable>(items: &'a [T], query: Option<&str>) -> Vec<&'a T> {
    match query {
        Some(q) => items.iter().filter(|item| item.matches(q)).collect(),
        None => items.iter().collect(),
    }
}

impl Searchable for Book {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.author.as_str(), self.genre_name()]
    }
}

impl Searchable for Genre {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

impl Searchable for Member {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.email.as_str(), self.phone.as_str()];
        if let Some(joined) = &self.join_date {
            fields.push(joined.as_str());
        }
        fields
    }
}

impl Searchable for Staff {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.username.as_str(), self.email.as_str()]
    }
}

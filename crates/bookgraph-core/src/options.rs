//! Distinct values offered by the table view's filter selectors.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::model::{Relationship, RelationshipRow};

/// Sorted, distinct selector values derived from a row set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub authors: Vec<String>,
    pub books: Vec<String>,
    pub tags: Vec<String>,
    pub relationships: Vec<Relationship>,
}

impl FilterOptions {
    /// Collect options from the unfiltered rows so every value stays selectable.
    pub fn from_rows(rows: &[RelationshipRow]) -> Self {
        let mut authors = BTreeSet::new();
        let mut books = BTreeSet::new();
        let mut tags = BTreeSet::new();

        for row in rows {
            authors.insert(row.author.as_str());
            books.insert(row.book.as_str());
            if let Some(tag) = row.tag.as_deref().filter(|t| !t.is_empty()) {
                tags.insert(tag);
            }
        }

        Self {
            authors: authors.into_iter().map(String::from).collect(),
            books: books.into_iter().map(String::from).collect(),
            tags: tags.into_iter().map(String::from).collect(),
            relationships: Relationship::ALL.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten;
    use crate::model::GraphRecord;

    #[test]
    fn test_options_are_sorted_and_distinct() {
        let rows = flatten(&[
            GraphRecord::new("Le Guin", "The Dispossessed", &["sci-fi", "classic"]),
            GraphRecord::new("Asimov", "Foundation", &["sci-fi"]),
            GraphRecord::new("Le Guin", "Earthsea", &["fantasy"]),
        ]);
        let options = FilterOptions::from_rows(&rows);

        assert_eq!(options.authors, vec!["Asimov", "Le Guin"]);
        assert_eq!(options.books, vec!["Earthsea", "Foundation", "The Dispossessed"]);
        assert_eq!(options.tags, vec!["classic", "fantasy", "sci-fi"]);
        assert_eq!(options.relationships, vec![Relationship::Wrote, Relationship::TaggedAs]);
    }

    #[test]
    fn test_empty_rows_keep_relationships() {
        let options = FilterOptions::from_rows(&[]);
        assert!(options.authors.is_empty());
        assert!(options.tags.is_empty());
        assert_eq!(options.relationships.len(), 2);
    }
}

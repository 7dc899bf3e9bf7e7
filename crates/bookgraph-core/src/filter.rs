//! Predicate filtering over rows and records.
//!
//! Every predicate is optional; an absent or empty value matches everything
//! and active predicates are combined with AND. Filtering always returns a new
//! vector and leaves the input untouched.
//!
//! The relationship predicate behaves differently per granularity. On rows it
//! is an exact match. On records `WROTE` (or any unknown value) keeps every
//! record and `TAGGED_AS` keeps records with at least one tag. Both behaviors
//! are kept as the views have always shown them.

use serde::{Deserialize, Serialize};

use crate::model::{GraphRecord, Relationship, RelationshipRow};

/// The four optional predicates shared by the table and graph views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub book: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub relationship: Option<String>,
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl Filters {
    pub fn author(&self) -> Option<&str> {
        active(&self.author)
    }

    pub fn book(&self) -> Option<&str> {
        active(&self.book)
    }

    pub fn tag(&self) -> Option<&str> {
        active(&self.tag)
    }

    pub fn relationship(&self) -> Option<&str> {
        active(&self.relationship)
    }

    /// True when no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.author().is_none()
            && self.book().is_none()
            && self.tag().is_none()
            && self.relationship().is_none()
    }

    /// Exact-match test of a flattened row.
    pub fn matches_row(&self, row: &RelationshipRow) -> bool {
        self.author().map_or(true, |a| row.author == a)
            && self.book().map_or(true, |b| row.book == b)
            && self.tag().map_or(true, |t| row.tag.as_deref() == Some(t))
            && self.relationship().map_or(true, |r| row.relationship.as_str() == r)
    }

    /// Record-level test; tag is a membership check.
    pub fn matches_record(&self, record: &GraphRecord) -> bool {
        self.author().map_or(true, |a| record.author == a)
            && self.book().map_or(true, |b| record.book == b)
            && self.tag().map_or(true, |t| record.tags.iter().any(|tag| tag == t))
            && match self.relationship() {
                Some("TAGGED_AS") => !record.tags.is_empty(),
                _ => true,
            }
    }

    pub fn filter_rows(&self, rows: &[RelationshipRow]) -> Vec<RelationshipRow> {
        if self.is_empty() {
            return rows.to_vec();
        }
        rows.iter().filter(|r| self.matches_row(r)).cloned().collect()
    }

    pub fn filter_records(&self, records: &[GraphRecord]) -> Vec<GraphRecord> {
        if self.is_empty() {
            return records.to_vec();
        }
        records.iter().filter(|r| self.matches_record(r)).cloned().collect()
    }

    /// Whether edges of `kind` are emitted when building the graph.
    pub fn includes_edges(&self, kind: Relationship) -> bool {
        self.relationship().map_or(true, |r| r == kind.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten;

    fn sample() -> Vec<GraphRecord> {
        vec![
            GraphRecord::new("A", "B1", &["sci-fi", "short"]),
            GraphRecord::new("A", "B2", &["fantasy"]),
            GraphRecord::new("C", "B3", &[]),
        ]
    }

    fn with_tag(tag: &str) -> Filters {
        Filters { tag: Some(tag.to_string()), ..Default::default() }
    }

    fn with_relationship(rel: &str) -> Filters {
        Filters { relationship: Some(rel.to_string()), ..Default::default() }
    }

    #[test]
    fn test_empty_filters_are_identity() {
        let records = sample();
        let rows = flatten(&records);
        let filters = Filters::default();

        assert!(filters.is_empty());
        assert_eq!(filters.filter_records(&records), records);
        assert_eq!(filters.filter_rows(&rows), rows);
    }

    #[test]
    fn test_empty_strings_are_inactive() {
        let filters = Filters {
            author: Some(String::new()),
            book: Some(String::new()),
            tag: Some(String::new()),
            relationship: Some(String::new()),
        };
        assert!(filters.is_empty());
        assert_eq!(filters.filter_records(&sample()).len(), 3);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let rows = flatten(&sample());
        let filters = Filters { author: Some("A".into()), tag: Some("short".into()), ..Default::default() };

        let once = filters.filter_rows(&rows);
        let twice = filters.filter_rows(&once);
        assert_eq!(once, twice);

        let records = filters.filter_records(&sample());
        assert_eq!(filters.filter_records(&records), records);
    }

    #[test]
    fn test_tag_membership_at_record_level() {
        let records = vec![GraphRecord::new("A", "B1", &["sci-fi", "short"])];
        assert_eq!(with_tag("short").filter_records(&records), records);
    }

    #[test]
    fn test_tag_equality_at_row_level() {
        let rows = flatten(&[GraphRecord::new("A", "B1", &["sci-fi", "short"])]);
        let filtered = with_tag("short").filter_rows(&rows);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].tag.as_deref(), Some("short"));
        assert_eq!(filtered[0].relationship, Relationship::TaggedAs);
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let filters = Filters { author: Some("A".into()), book: Some("B2".into()), ..Default::default() };
        let filtered = filters.filter_records(&sample());
        assert_eq!(filtered, vec![GraphRecord::new("A", "B2", &["fantasy"])]);

        let filters = Filters { author: Some("C".into()), tag: Some("fantasy".into()), ..Default::default() };
        assert!(filters.filter_records(&sample()).is_empty());
    }

    #[test]
    fn test_filter_preserves_order() {
        let filtered = Filters { author: Some("A".into()), ..Default::default() }.filter_records(&sample());
        let books: Vec<&str> = filtered.iter().map(|r| r.book.as_str()).collect();
        assert_eq!(books, vec!["B1", "B2"]);
    }

    #[test]
    fn test_relationship_at_record_level() {
        assert_eq!(with_relationship("WROTE").filter_records(&sample()).len(), 3);
        let tagged = with_relationship("TAGGED_AS").filter_records(&sample());
        assert_eq!(tagged.len(), 2);
        assert!(tagged.iter().all(|r| !r.tags.is_empty()));
        assert_eq!(with_relationship("LIKES").filter_records(&sample()).len(), 3);
    }

    #[test]
    fn test_relationship_at_row_level() {
        let rows = flatten(&sample());
        let wrote = with_relationship("WROTE").filter_rows(&rows);
        assert_eq!(wrote.len(), 3);
        assert!(wrote.iter().all(|r| r.tag.is_none()));
        assert_eq!(with_relationship("TAGGED_AS").filter_rows(&rows).len(), 3);
        assert!(with_relationship("LIKES").filter_rows(&rows).is_empty());
    }

    #[test]
    fn test_includes_edges() {
        assert!(Filters::default().includes_edges(Relationship::Wrote));
        assert!(Filters::default().includes_edges(Relationship::TaggedAs));
        assert!(with_relationship("WROTE").includes_edges(Relationship::Wrote));
        assert!(!with_relationship("WROTE").includes_edges(Relationship::TaggedAs));
        assert!(!with_relationship("LIKES").includes_edges(Relationship::Wrote));
    }

    #[test]
    fn test_source_is_not_mutated() {
        let records = sample();
        let before = records.clone();
        let _ = with_tag("short").filter_records(&records);
        assert_eq!(records, before);
    }
}

//! Expands records into relationship rows for the table view.

use crate::model::{GraphRecord, Relationship, RelationshipRow};

/// Flatten records into one `WROTE` row per record followed by one
/// `TAGGED_AS` row per tag, in tag order.
pub fn flatten(records: &[GraphRecord]) -> Vec<RelationshipRow> {
    let total = records.iter().map(|r| 1 + r.tags.len()).sum();
    let mut rows = Vec::with_capacity(total);

    for record in records {
        rows.push(RelationshipRow {
            author: record.author.clone(),
            book: record.book.clone(),
            tag: None,
            relationship: Relationship::Wrote,
        });
        rows.extend(record.tags.iter().map(|tag| RelationshipRow {
            author: record.author.clone(),
            book: record.book.clone(),
            tag: Some(tag.clone()),
            relationship: Relationship::TaggedAs,
        }));
    }

    rows
}

//! Terminal output formatting.

use bookgraph_core::{GraphModel, GraphRecord, NodeKind, Relationship, RelationshipRow, ViewState};
use colored::{ColoredString, Colorize};
use unicode_width::UnicodeWidthStr;

const NAME_WIDTH: usize = 28;
const TAG_WIDTH: usize = 18;

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}

/// Fit a cell: truncate then pad to exactly `width` columns.
fn cell(s: &str, width: usize) -> String {
    pad_right(&truncate_visual(s, width), width)
}

fn relationship_colored(rel: Relationship) -> ColoredString {
    match rel {
        Relationship::Wrote => rel.as_str().blue(),
        Relationship::TaggedAs => rel.as_str().yellow(),
    }
}

fn kind_colored(kind: NodeKind) -> ColoredString {
    match kind {
        NodeKind::Author => kind.as_str().blue(),
        NodeKind::Book => kind.as_str().green(),
        NodeKind::Tag => kind.as_str().yellow(),
    }
}

/// Print records as a table.
pub fn print_records_table(records: &[GraphRecord]) {
    if records.is_empty() {
        println!("{}", "No records found.".dimmed());
        return;
    }

    println!("{} {} {}", cell("Author", NAME_WIDTH).bold(), cell("Book", NAME_WIDTH).bold(), "Tags".bold());
    println!("{}", "─".repeat(NAME_WIDTH * 2 + 30));

    for record in records {
        println!(
            "{} {} {}",
            cell(&record.author, NAME_WIDTH),
            cell(&record.book, NAME_WIDTH),
            record.tags.join(", ").dimmed()
        );
    }

    println!("\n{} records", records.len().to_string().bold());
}

/// Print relationship rows as a table. Absent tags show as `-`.
pub fn print_rows_table(rows: &[RelationshipRow]) {
    if rows.is_empty() {
        println!("{}", "No relationships match.".dimmed());
        return;
    }

    println!(
        "{} {} {} {}",
        cell("Author", NAME_WIDTH).bold(),
        cell("Book", NAME_WIDTH).bold(),
        cell("Tag", TAG_WIDTH).bold(),
        "Relationship".bold()
    );
    println!("{}", "─".repeat(NAME_WIDTH * 2 + TAG_WIDTH + 16));

    for row in rows {
        println!(
            "{} {} {} {}",
            cell(&row.author, NAME_WIDTH),
            cell(&row.book, NAME_WIDTH),
            cell(row.tag.as_deref().unwrap_or("-"), TAG_WIDTH),
            relationship_colored(row.relationship)
        );
    }

    println!("\n{} rows", rows.len().to_string().bold());
}

/// Print graph nodes followed by edges.
pub fn print_model(model: &GraphModel) {
    if model.is_empty() {
        println!("{}", "Nothing to draw.".dimmed());
        return;
    }

    let nodes: Vec<_> = model.nodes().collect();
    println!("{} ({}):", "Nodes".bold(), nodes.len());
    for node in &nodes {
        println!("  {} [{}] {}", "•".dimmed(), kind_colored(node.kind), node.label);
    }

    let edges: Vec<_> = model.edges().collect();
    println!("\n{} ({}):", "Edges".bold(), edges.len());
    for edge in &edges {
        println!(
            "  {} {} {}",
            edge.source.dimmed(),
            format!("-[{}]->", relationship_colored(edge.label)),
            edge.target
        );
    }
}

/// Print a settled watch result.
pub fn print_view(generation: u64, view: &ViewState<Vec<RelationshipRow>>) {
    println!("\n{} {}", "Fetch".bold(), format!("#{}", generation).dimmed());
    match view {
        ViewState::Ready(rows) => print_rows_table(rows),
        ViewState::Error(message) => println!("{}", message.red()),
        ViewState::Loading => println!("{}", "Loading data…".dimmed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_visual() {
        assert_eq!(truncate_visual("Dune", 10), "Dune");
        assert_eq!(truncate_visual("The Left Hand of Darkness", 10), "The Left..");
        assert_eq!(truncate_visual("abcdef", 3), "...");
    }

    #[test]
    fn test_cell_pads_to_width() {
        assert_eq!(cell("A", 4), "A   ");
        assert_eq!(UnicodeWidthStr::width(cell("The Left Hand of Darkness", 12).as_str()), 12);
    }
}

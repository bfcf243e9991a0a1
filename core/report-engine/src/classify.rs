//! FILENAME: core/report-engine/src/classify.rs
//! Row classification: splits a flat line list into contiguous groups.
//!
//! Input arrives pre-sorted by floor, then category. Grouping never re-sorts:
//! a new run starts whenever the key differs from the previous line's key, so
//! a label that reappears after another group becomes a second, separate group
//! with the same label.

use engine::{CostLineItem, MaterialLine};

/// One contiguous run of lines sharing a group key.
#[derive(Debug, Clone, PartialEq)]
pub struct Run<'a, L> {
    pub label: String,
    /// `(index in the input, line)` pairs.
    pub lines: Vec<(usize, &'a L)>,
}

impl<'a, L> Run<'a, L> {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Ordered runs, in input order.
pub type GroupedRuns<'a, L> = Vec<Run<'a, L>>;

/// Scans `rows` once, starting a new run whenever `key_fn` changes.
pub fn classify<'a, L, F>(rows: &'a [L], key_fn: F) -> GroupedRuns<'a, L>
where
    F: Fn(&L) -> &str,
{
    let mut runs: GroupedRuns<'a, L> = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let key = key_fn(row);
        match runs.last_mut() {
            Some(run) if run.label == key => run.lines.push((index, row)),
            _ => runs.push(Run {
                label: key.to_string(),
                lines: vec![(index, row)],
            }),
        }
    }

    runs
}

pub fn by_category(item: &CostLineItem) -> &str {
    &item.category
}

pub fn by_floor(item: &CostLineItem) -> &str {
    &item.floor_name
}

pub fn by_material_category(line: &MaterialLine) -> &str {
    &line.category
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(category: &str, floor: &str) -> CostLineItem {
        CostLineItem::new(category).on_floor(floor)
    }

    #[test]
    fn test_contiguous_runs() {
        let rows = vec![item("Civil", "G"), item("Civil", "G"), item("Electrical", "G")];
        let runs = classify(&rows, by_category);

        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].label, "Civil");
        assert_eq!(runs[0].len(), 2);
        assert_eq!(runs[1].label, "Electrical");
        assert_eq!(runs[1].lines[0].0, 2);
    }

    #[test]
    fn test_non_contiguous_labels_stay_separate() {
        let rows = vec![item("Civil", "G"), item("Plumbing", "G"), item("Civil", "G")];
        let runs = classify(&rows, by_category);

        let labels: Vec<&str> = runs.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Civil", "Plumbing", "Civil"]);
    }

    #[test]
    fn test_group_by_floor() {
        let rows = vec![item("Civil", "Ground"), item("Electrical", "Ground"), item("Civil", "First")];
        let runs = classify(&rows, by_floor);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 2);
        assert_eq!(runs[1].label, "First");
    }

    #[test]
    fn test_empty_input() {
        let rows: Vec<CostLineItem> = Vec::new();
        assert!(classify(&rows, by_category).is_empty());
    }

    #[test]
    fn test_material_runs() {
        let rows = vec![
            MaterialLine::new("Cement", "OPC 53"),
            MaterialLine::new("Cement", "PPC"),
            MaterialLine::new("Steel", "TMT 12mm"),
        ];
        let runs = classify(&rows, by_material_category);
        assert_eq!(runs.len(), 2);
        assert!(!runs[1].is_empty());
    }
}

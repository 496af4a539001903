use std::collections::BTreeSet;

use grid_core::{CellAddress, SelectionSink};

/// A flat table of cases plus the set of selected case indices.
#[derive(Debug, Clone)]
pub struct CaseSet {
    attributes: Vec<String>,
    cases: Vec<Vec<String>>,
    selected: BTreeSet<usize>,
}

impl CaseSet {
    pub fn new(attributes: Vec<String>, cases: Vec<Vec<String>>) -> Self {
        let width = attributes.len();
        let cases = cases
            .into_iter()
            .map(|mut case| {
                case.resize(width, String::new());
                case
            })
            .collect();
        Self {
            attributes,
            cases,
            selected: BTreeSet::new(),
        }
    }

    /// Deterministic sample data so two runs over the same count agree.
    pub fn sample(case_count: usize) -> Self {
        let attributes = vec![
            "case".to_string(),
            "group".to_string(),
            "value".to_string(),
            "note".to_string(),
        ];
        let groups = ["alpha", "beta", "gamma"];
        let cases = (0..case_count)
            .map(|index| {
                vec![
                    format!("C{:03}", index + 1),
                    groups[index % groups.len()].to_string(),
                    format!("{}", (index * 37 + 11) % 100),
                    format!("sample case {}", index + 1),
                ]
            })
            .collect();
        Self::new(attributes, cases)
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    pub fn value(&self, row: usize, column: usize) -> Option<&str> {
        self.cases
            .get(row)
            .and_then(|case| case.get(column))
            .map(String::as_str)
    }

    /// Replaces the selection. Indices past the last case are ignored.
    pub fn select_rows(&mut self, rows: &[usize]) {
        self.selected = rows
            .iter()
            .copied()
            .filter(|row| *row < self.cases.len())
            .collect();
    }

    /// Selected indices in ascending order.
    pub fn selected_rows(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_selected(&self, row: usize) -> bool {
        self.selected.contains(&row)
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn select_all(&mut self) {
        self.selected = (0..self.cases.len()).collect();
    }

    /// Tab-separated export of the selected cases, header line first.
    pub fn selected_rows_as_tsv(&self) -> String {
        let mut lines = vec![self.attributes.join("\t")];
        for row in &self.selected {
            if let Some(case) = self.cases.get(*row) {
                lines.push(case.join("\t"));
            }
        }
        lines.join("\n")
    }
}

impl SelectionSink for CaseSet {
    fn apply_row_selection(&mut self, rows: &[usize]) {
        self.select_rows(rows);
    }

    fn is_row_selectable(&self, address: CellAddress) -> bool {
        address.row < self.cases.len()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

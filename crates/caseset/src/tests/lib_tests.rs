use super::*;

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn new_normalizes_ragged_case_widths() {
    let cases = CaseSet::new(
        names(&["a", "b", "c"]),
        vec![names(&["1"]), names(&["1", "2", "3", "4"])],
    );

    assert_eq!(cases.value(0, 0), Some("1"));
    assert_eq!(cases.value(0, 2), Some(""));
    assert_eq!(cases.value(1, 2), Some("3"));
    assert_eq!(cases.value(1, 3), None);
}

#[test]
fn select_rows_replaces_and_drops_out_of_range_indices() {
    let mut cases = CaseSet::sample(5);
    cases.select_rows(&[0, 1]);

    cases.select_rows(&[3, 99, 4]);

    assert_eq!(cases.selected_rows(), vec![3, 4]);
    assert!(!cases.is_selected(0));
}

#[test]
fn selected_rows_come_back_ascending_and_deduplicated() {
    let mut cases = CaseSet::sample(10);

    cases.select_rows(&[7, 2, 7, 0]);

    assert_eq!(cases.selected_rows(), vec![0, 2, 7]);
    assert_eq!(cases.selected_count(), 3);
}

#[test]
fn select_all_then_clear() {
    let mut cases = CaseSet::sample(4);

    cases.select_all();
    assert_eq!(cases.selected_rows(), vec![0, 1, 2, 3]);

    cases.clear_selection();
    assert_eq!(cases.selected_count(), 0);
}

#[test]
fn value_lookups_past_the_table_return_none() {
    let cases = CaseSet::sample(3);

    assert!(cases.value(0, 0).is_some());
    assert_eq!(cases.value(3, 0), None);
    assert_eq!(cases.value(0, 99), None);
}

#[test]
fn tsv_export_has_a_header_and_one_line_per_selected_case() {
    let mut cases = CaseSet::new(
        names(&["name", "score"]),
        vec![names(&["ada", "9"]), names(&["bob", "4"]), names(&["cyd", "7"])],
    );
    cases.select_rows(&[2, 0]);

    let tsv = cases.selected_rows_as_tsv();

    let lines: Vec<&str> = tsv.lines().collect();
    assert_eq!(lines, vec!["name\tscore", "ada\t9", "cyd\t7"]);
}

#[test]
fn sample_data_is_deterministic_and_well_shaped() {
    let first = CaseSet::sample(12);
    let second = CaseSet::sample(12);

    assert_eq!(first.case_count(), 12);
    assert_eq!(first.attributes().len(), 4);
    for row in 0..first.case_count() {
        for column in 0..first.attributes().len() {
            assert_eq!(first.value(row, column), second.value(row, column));
        }
    }
    assert_eq!(first.value(0, 0), Some("C001"));
}

#[test]
fn sink_application_replaces_the_selection() {
    let mut cases = CaseSet::sample(6);
    cases.select_rows(&[1]);

    SelectionSink::apply_row_selection(&mut cases, &[2, 5]);

    assert_eq!(cases.selected_rows(), vec![2, 5]);
}

#[test]
fn rows_past_the_case_count_are_not_selectable() {
    let cases = CaseSet::sample(6);

    assert!(cases.is_row_selectable(CellAddress::new(5, 0)));
    assert!(!cases.is_row_selectable(CellAddress::new(6, 0)));
}

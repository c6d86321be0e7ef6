use dsv_public::{
    operators::visibility, read, record::sorted_ids, ParseFailure, VisibilityFilter,
    VISIBILITY_FIELD,
};

fn fixture(name: &str) -> String {
    format!("{}/test_data/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn awards_drop_closed_records() {
    let parsed = read(fixture("test_rm_awards.csv")).unwrap();
    assert!(parsed.errors.is_empty());
    assert_eq!(parsed.records.len(), 7);

    let filtered = visibility::run(&parsed.records);

    assert_eq!(
        sorted_ids(&filtered),
        vec!["award-1", "award-3", "award-4", "award-5", "award-7"]
    );
}

#[test]
fn awards_keep_every_other_status() {
    let parsed = read(fixture("test_rm_awards.csv")).unwrap();
    let filtered = visibility::run(&parsed.records);

    let status = |id: &str| {
        filtered
            .iter()
            .find(|record| record.id() == Some(id))
            .and_then(|record| record.get(VISIBILITY_FIELD))
    };

    assert_eq!(status("award-1"), Some(Some("disclosed")));
    assert_eq!(status("award-3"), Some(Some("disclosed")));
    assert_eq!(status("award-4"), Some(Some("yes")));
    assert_eq!(status("award-5"), Some(Some("")));
    assert_eq!(status("award-7"), Some(None));
}

#[test]
fn awards_null_tokens_are_absent() {
    let parsed = read(fixture("test_rm_awards.csv")).unwrap();
    let award6 = parsed
        .records
        .iter()
        .find(|record| record.id() == Some("award-6"))
        .unwrap();

    assert_eq!(award6.get("年度"), Some(None));
    assert_ne!(award6.get("年度"), Some(Some("")));
}

#[test]
fn filtering_twice_changes_nothing() {
    let parsed = read(fixture("test_rm_awards.csv")).unwrap();
    let filter = VisibilityFilter::default();

    let once = filter.apply(&parsed.records);
    assert_eq!(filter.apply(&once), once);
}

#[test]
fn missing_column_keeps_all_records() {
    let parsed = read(fixture("test_rm_misc_missing_column.csv")).unwrap();
    assert!(parsed.records.iter().all(|record| !record.contains(VISIBILITY_FIELD)));

    let filtered = visibility::run(&parsed.records);

    assert_eq!(sorted_ids(&filtered), vec!["misc-1", "misc-2", "misc-3"]);
    assert_eq!(filtered.len(), parsed.records.len());
}

#[test]
fn single_line_file_reports_failure() {
    let parsed = read(fixture("test_single_line.csv")).unwrap();

    assert!(parsed.records.is_empty());
    assert_eq!(
        parsed.errors,
        vec![ParseFailure::InsufficientLines { found: 1 }]
    );
    assert!(visibility::run(&parsed.records).is_empty());
}

use std::str::FromStr;

use {strum::EnumString, tracing::debug};

use crate::record::{Record, RecordSet};

/// Header of the disclosure-status column.
pub const VISIBILITY_FIELD: &str = "公開の有無";

/// Classification of a disclosure-status value.
///
/// Parsing never fails: anything that is not a known token, the empty string
/// included, lands in `Other` and counts as visible.
#[derive(Clone, Debug, PartialEq, Eq, Hash, EnumString)]
pub enum Visibility {
    #[strum(serialize = "disclosed")]
    Disclosed,
    #[strum(serialize = "closed")]
    Closed,
    #[strum(serialize = "yes")]
    Yes,
    #[strum(default)]
    Other(String),
}

impl Visibility {
    pub fn classify(value: &str) -> Self {
        Visibility::from_str(value).unwrap_or_else(|_| Visibility::Other(value.to_owned()))
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, Visibility::Closed)
    }
}

#[derive(Clone, Debug)]
pub struct VisibilityFilter {
    column: String,
}

impl Default for VisibilityFilter {
    fn default() -> Self {
        Self::for_column(VISIBILITY_FIELD)
    }
}

impl VisibilityFilter {
    pub fn for_column(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// Returns `true` if the record was rejected by the filter.
    ///
    /// Only a defined, non-null value equal to `closed` rejects a record.
    pub fn rejects(&self, record: &Record) -> bool {
        match record.get(&self.column) {
            Some(Some(value)) => Visibility::classify(value).is_hidden(),
            Some(None) | None => false,
        }
    }

    pub fn apply(&self, records: &[Record]) -> RecordSet {
        let kept: RecordSet = records
            .iter()
            .filter(|record| !self.rejects(record))
            .cloned()
            .collect();

        debug!(
            column = %self.column,
            input = records.len(),
            kept = kept.len(),
            "applied visibility filter"
        );

        kept
    }

    /// Like [`apply`](Self::apply), but a missing record set yields an empty one.
    pub fn apply_opt(&self, records: Option<&[Record]>) -> RecordSet {
        records.map(|records| self.apply(records)).unwrap_or_default()
    }
}

/// Filters on the default disclosure-status column.
pub fn run(records: &[Record]) -> RecordSet {
    VisibilityFilter::default().apply(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, visibility: Option<Option<&str>>) -> Record {
        let mut record = Record::new();
        record.insert("ID", Some(id.to_owned()));
        if let Some(value) = visibility {
            record.insert(VISIBILITY_FIELD, value.map(String::from));
        }
        record
    }

    fn ids(records: &[Record]) -> Vec<&str> {
        records.iter().filter_map(Record::id).collect()
    }

    #[test]
    fn classify_is_permissive() {
        assert_eq!(Visibility::classify("closed"), Visibility::Closed);
        assert_eq!(Visibility::classify("disclosed"), Visibility::Disclosed);
        assert_eq!(Visibility::classify("yes"), Visibility::Yes);
        assert_eq!(Visibility::classify(""), Visibility::Other(String::new()));
        assert_eq!(
            Visibility::classify("Closed"),
            Visibility::Other("Closed".to_owned())
        );
    }

    #[test]
    fn only_exact_closed_is_removed() {
        let records = vec![
            record("1", Some(Some("closed"))),
            record("2", Some(Some("Closed"))),
            record("3", Some(Some(" closed"))),
            record("4", Some(Some(""))),
            record("5", Some(None)),
            record("6", None),
            record("7", Some(Some("disclosed"))),
        ];

        assert_eq!(ids(&run(&records)), vec!["2", "3", "4", "5", "6", "7"]);
    }

    #[test]
    fn preserves_order_and_field_state() {
        let records = vec![
            record("b", None),
            record("a", Some(Some("closed"))),
            record("c", Some(None)),
        ];

        let kept = run(&records);

        assert_eq!(ids(&kept), vec!["b", "c"]);
        assert!(!kept[0].contains(VISIBILITY_FIELD));
        assert_eq!(kept[1].get(VISIBILITY_FIELD), Some(None));
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = vec![
            record("1", Some(Some("closed"))),
            record("2", Some(Some("yes"))),
            record("3", None),
        ];

        let once = run(&records);
        assert_eq!(run(&once), once);
    }

    #[test]
    fn missing_column_keeps_everything() {
        let records = (1..=5).map(|n| record(&n.to_string(), None)).collect::<Vec<_>>();

        assert_eq!(run(&records).len(), records.len());
    }

    #[test]
    fn empty_and_absent_inputs() {
        let filter = VisibilityFilter::default();

        assert!(filter.apply(&[]).is_empty());
        assert!(filter.apply_opt(None).is_empty());
    }

    #[test]
    fn custom_column() {
        let filter = VisibilityFilter::for_column("status");
        let mut hidden = Record::new();
        hidden.insert("status", Some("closed".to_owned()));

        assert!(filter.rejects(&hidden));
        assert!(!filter.rejects(&record("1", Some(Some("closed")))));
    }
}

use std::collections::HashMap;

/// One parsed data row, keyed by header name.
///
/// A value of `None` is the absent-value marker (a raw `null`/`NULL` token).
/// A name missing from the map means the record does not define that field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record(HashMap<String, Option<String>>);

pub type RecordSet = Vec<Record>;

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` if the field is not defined, `Some(None)` if it holds the
    /// absent-value marker, `Some(Some(value))` otherwise.
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.0.get(name).map(|value| value.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        self.0.insert(name.into(), value);
    }

    /// The `ID` column, if present and not null.
    pub fn id(&self) -> Option<&str> {
        self.get("ID").flatten()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut Option<String>> {
        self.0.values_mut()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Option<String>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect::<HashMap<String, Option<String>>>(),
        )
    }
}

/// Sorted IDs of a record set, skipping records without one.
pub fn sorted_ids(records: &[Record]) -> Vec<String> {
    let mut ids = records
        .iter()
        .filter_map(|record| record.id().map(String::from))
        .collect::<Vec<String>>();
    ids.sort();
    ids
}

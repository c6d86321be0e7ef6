use crate::record::Record;

/// Raw tokens that stand for "no value" in exported files.
pub const NULL_TOKENS: [&str; 2] = ["null", "NULL"];

pub fn is_null_token(value: &str) -> bool {
    NULL_TOKENS.contains(&value)
}

/// Replaces every `null`/`NULL` field value with the absent-value marker.
pub fn run(records: &mut [Record]) {
    for record in records.iter_mut() {
        apply(record);
    }
}

pub fn apply(record: &mut Record) {
    for value in record.values_mut() {
        if value.as_deref().is_some_and(is_null_token) {
            *value = None;
        }
    }
}

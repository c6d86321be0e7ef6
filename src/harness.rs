use std::{fmt::Debug, process::ExitCode};

use anyhow::Result;

use crate::{
    operators::visibility::{VisibilityFilter, VISIBILITY_FIELD},
    reader,
    record::{sorted_ids, Record},
};

/// Pass/fail tally for a run of assertions. Failures never stop the run.
#[derive(Debug, Default)]
pub struct TestSequence {
    passed: usize,
    failed: usize,
}

impl TestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub fn assert_equal<T: PartialEq + Debug>(&mut self, actual: T, expected: T, name: &str) -> bool {
        if actual == expected {
            self.pass(name);
            true
        } else {
            eprintln!("FAIL: {name}");
            eprintln!("  Expected: {expected:?}");
            eprintln!("  Actual:   {actual:?}");
            self.failed += 1;
            false
        }
    }

    pub fn assert_condition(&mut self, condition: bool, name: &str, failure_message: &str) -> bool {
        if condition {
            self.pass(name);
        } else {
            eprintln!("FAIL: {name}");
            eprintln!("  Reason: {failure_message}");
            self.failed += 1;
        }
        condition
    }

    fn pass(&mut self, name: &str) {
        println!("PASS: {name}");
        self.passed += 1;
    }

    pub fn summary(&self) {
        println!("\n--- Test Summary ---");
        println!("Total tests: {}", self.total());
        println!("Passed: {}", self.passed);
        println!("Failed: {}", self.failed);
    }

    pub fn succeeded(&self) -> bool {
        self.failed == 0
    }

    pub fn exit_code(&self) -> ExitCode {
        if !self.succeeded() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }
}

/// One input file and what the visibility filter must make of it.
#[derive(Debug)]
pub struct Fixture {
    pub title: &'static str,
    pub label: &'static str,
    pub path: &'static str,
    pub expected_ids: &'static [&'static str],
    /// `(ID, expected disclosure-status value)` for records that must survive.
    pub spot_checks: &'static [(&'static str, &'static str)],
    /// Whether the filter must keep every record.
    pub keeps_all: bool,
}

pub const FIXTURES: &[Fixture] = &[
    Fixture {
        title: "rm_awards.csv (filtering \"closed\", keeping \"disclosed\" and other values)",
        label: "Awards",
        path: concat!(env!("CARGO_MANIFEST_DIR"), "/test_data/test_rm_awards.csv"),
        expected_ids: &["award-1", "award-3", "award-4", "award-5", "award-7"],
        spot_checks: &[
            ("award-1", "disclosed"),
            ("award-3", "disclosed"),
            ("award-4", "yes"),
            ("award-5", ""),
        ],
        keeps_all: false,
    },
    Fixture {
        title: "rm_misc_missing_column.csv (missing column)",
        label: "Misc (Missing Column)",
        path: concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/test_data/test_rm_misc_missing_column.csv"
        ),
        expected_ids: &["misc-1", "misc-2", "misc-3"],
        spot_checks: &[],
        keeps_all: true,
    },
];

/// Checks the raw field, independently of [`VisibilityFilter`].
pub fn no_closed_records(records: &[Record]) -> bool {
    records
        .iter()
        .all(|record| record.get(VISIBILITY_FIELD) != Some(Some("closed")))
}

/// Reads, filters and checks one fixture. Only an unreadable file is an error.
pub fn run_fixture(sequence: &mut TestSequence, fixture: &Fixture) -> Result<()> {
    println!("\n--- Testing {} ---", fixture.title);

    let parsed = reader::read(fixture.path)?;

    let filter = VisibilityFilter::default();
    let filtered = filter.apply(&parsed.records);

    let mut expected_ids = fixture
        .expected_ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<String>>();
    expected_ids.sort();

    sequence.assert_equal(
        sorted_ids(&filtered),
        expected_ids,
        &format!("{}: Correct items after filtering for \"closed\"", fixture.label),
    );

    sequence.assert_condition(
        no_closed_records(&filtered),
        &format!("{}: No \"closed\" items present after filtering", fixture.label),
        &format!("Found items with \"{VISIBILITY_FIELD}\" as \"closed\" after filtering."),
    );

    for (id, expected) in fixture.spot_checks {
        let value = filtered
            .iter()
            .find(|record| record.id() == Some(*id))
            .and_then(|record| record.get(VISIBILITY_FIELD));

        sequence.assert_condition(
            value == Some(Some(*expected)),
            &format!(
                "{}: Item {id} with \"{VISIBILITY_FIELD}\" as \"{expected}\" is present",
                fixture.label
            ),
            &format!(
                "Item ID {id} with \"{VISIBILITY_FIELD}\" as \"{expected}\" not found or value incorrect."
            ),
        );
    }

    if fixture.keeps_all {
        sequence.assert_condition(
            filtered.len() == parsed.records.len(),
            &format!("{}: Number of items is unchanged", fixture.label),
            &format!(
                "Expected {} items, but got {}",
                parsed.records.len(),
                filtered.len()
            ),
        );
    }

    Ok(())
}

/// Runs every fixture in [`FIXTURES`] and prints the summary.
pub fn run_all(sequence: &mut TestSequence) -> Result<()> {
    for fixture in FIXTURES {
        run_fixture(sequence, fixture)?;
    }
    sequence.summary();
    Ok(())
}

use std::process::ExitCode;

use {
    dsv_public::harness::{self, TestSequence},
    tracing::error,
};

fn main() -> ExitCode {
    dsv_public::init_logging();

    let mut sequence = TestSequence::new();
    if let Err(err) = harness::run_all(&mut sequence) {
        error!("{err:#}");
        eprintln!("\x1b[31mCannot run filter tests: {err:#}\x1b[0m");
        return ExitCode::FAILURE;
    }

    sequence.exit_code()
}

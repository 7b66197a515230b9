//! Binary that runs every engine on its reference inputs and prints the
//! resulting transcript for cross-process verification.
//!
//! Usage: `transcript_fixture`
//!
//! Output: sorted `key=value` lines (see `waypoint_harness::transcript`).

use std::process::ExitCode;

use waypoint_harness::transcript::standard_transcript;

fn main() -> ExitCode {
    match standard_transcript() {
        Ok(transcript) => {
            print!("{}", transcript.render());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("transcript_fixture: {e}");
            ExitCode::FAILURE
        }
    }
}

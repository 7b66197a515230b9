//! Cross-process determinism for the standard transcript.
//!
//! Spawns the `transcript_fixture` binary under four environment variants
//! and asserts all produce identical output, and that the output matches an
//! in-process run.

use std::path::Path;
use std::process::Command;

use waypoint_harness::transcript::standard_transcript;

fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("transcript_fixture");
    path.to_string_lossy().to_string()
}

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn run_variant(work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();

    let mut command = Command::new(&bin);
    command.current_dir(work_dir);
    command
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });
    assert!(
        output.status.success(),
        "transcript_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

// ACCEPTANCE: TRANSCRIPT-CROSSPROC
#[test]
fn crossproc_determinism_four_env_variants() {
    let root = workspace_root();
    let baseline = run_variant(&root, &[]);

    for expected in [
        "eight_puzzle.easy.moves=2\n",
        "river.3x3.moves=11\n",
        "planner.canonical.forward.outcome=Complete\n",
        "planner.canonical.forward.plan_len=8\n",
        "planner.canonical.regression.plan_len=5\n",
        "planner.sussman.forward.plan_len=10\n",
        "queens.4.solution=1,3,0,2\n",
        "queens.8.transitions=2621\n",
    ] {
        assert!(baseline.contains(expected), "baseline output missing {expected:?}");
    }
    assert!(baseline.contains("river.3x3.log_digest=sha256:"));

    let alt_cwd = if cfg!(target_os = "windows") {
        "C:\\"
    } else {
        "/tmp"
    };
    assert_eq!(
        baseline,
        run_variant(alt_cwd, &[]),
        "output differs when cwd changes from {root} to {alt_cwd}"
    );
    assert_eq!(
        baseline,
        run_variant(&root, &[("LC_ALL", "C"), ("LANG", "C")]),
        "output differs when LC_ALL=C LANG=C"
    );
    assert_eq!(
        baseline,
        run_variant(
            &root,
            &[
                ("WAYPOINT_NOISE", "should_not_matter"),
                ("TZ", "America/New_York"),
                ("HOME", "/nonexistent"),
            ],
        ),
        "output differs with spurious env vars"
    );

    let in_process = standard_transcript().expect("transcript builds").render();
    assert_eq!(baseline, in_process, "fixture and in-process runs differ");
}

//! Pipeline-level tests for complete bootstrap runs.
//!
//! These drive `run_pipeline` against scripted processes and operators inside a
//! scratch workspace, checking stage ordering, skip-if-present behavior, the
//! deploy configuration file, and fail-fast aborts.

use std::fs;

use bootstrapper::acquire::Acquisition;
use bootstrapper::error::{BootstrapError, exit_code_for};
use bootstrapper::fixer::FixOutcome;
use bootstrapper::gate::{ARCH_QUESTION, BANNER};
use bootstrapper::pipeline::run_pipeline;
use bootstrapper::platform::Platform;
use bootstrapper::test_support::{ScriptedOperator, ScriptedRunner, Workspace};

/// Unattended run with defaults where only the bootstrap sources exist.
///
/// Expected: no bootstrap clone, full three-step build, permission fix, one
/// clone of the main sources, a two-line config, then deploy.
#[test]
fn unattended_run_reuses_bootstrap_and_clones_main() {
    let ws = Workspace::new().expect("workspace");
    let cfg = ws.config();
    let platform = Platform::posix();
    let layout = ws.seed_bootstrap(&cfg, &platform).expect("seed");
    let runner = ScriptedRunner::succeeding();
    let mut operator = ScriptedOperator::closed();

    let outcome = run_pipeline(&cfg, &runner, &mut operator, &platform).expect("pipeline");

    assert_eq!(outcome.bootstrap_sources, Acquisition::Existing);
    assert_eq!(outcome.main_sources, Acquisition::Cloned);
    assert_eq!(outcome.arch, None);
    assert!(operator.transcript().is_empty());

    let lines = runner.command_lines();
    let staging = cfg.main_src_dir.with_file_name("re-main.partial");
    assert_eq!(
        lines,
        vec![
            "cmake .. -G Ninja -DCMAKE_BUILD_TYPE=RelWithDebInfo".to_string(),
            "cmake --build .".to_string(),
            "cmake --install . --prefix re-bootstrap-installed".to_string(),
            format!(
                "git clone {} --recursive --branch main {}",
                cfg.repo_url,
                staging.display()
            ),
            format!("{} do deploy", layout.tool_path.display()),
        ]
    );
    assert_eq!(runner.clone_count(), 1);

    let out_dir = fs::canonicalize(&cfg.out_dir).expect("out dir");
    assert_eq!(outcome.out_dir, out_dir);

    let written = fs::read_to_string(cfg.main_src_dir.join("re.user.yml")).expect("config");
    assert_eq!(
        written,
        format!(
            "re-dev-deploy-path: {}\nvcpkg-root-path: {}\n",
            out_dir.display(),
            layout.dependency_root.display()
        )
    );

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&layout.generator_path)
            .expect("stat")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
        assert!(matches!(outcome.permissions, FixOutcome::Applied { .. }));
    }
}

/// A failing CMake build aborts before the main sources are touched.
#[test]
fn build_failure_stops_before_main_acquisition() {
    let ws = Workspace::new().expect("workspace");
    let cfg = ws.config();
    let platform = Platform::posix();
    ws.seed_bootstrap(&cfg, &platform).expect("seed");
    // generate ok, build fails
    let runner = ScriptedRunner::with_exit_codes([0, 1]);
    let mut operator = ScriptedOperator::closed();

    let err = run_pipeline(&cfg, &runner, &mut operator, &platform).unwrap_err();

    assert_eq!(exit_code_for(&err), 1);
    assert_eq!(runner.commands().len(), 2);
    assert_eq!(runner.clone_count(), 0);
    assert!(!cfg.main_src_dir.exists());
    assert!(format!("{err:#}").contains("stage build-bootstrap"));
}

/// Nothing present on a platform without execute bits: both trees are cloned
/// and the permission fix is skipped.
#[test]
fn fresh_run_clones_both_trees_in_order() {
    let ws = Workspace::new().expect("workspace");
    let cfg = ws.config();
    let platform = Platform::windows();
    let runner = ScriptedRunner::succeeding();
    let mut operator = ScriptedOperator::closed();

    let outcome = run_pipeline(&cfg, &runner, &mut operator, &platform).expect("pipeline");

    assert_eq!(outcome.bootstrap_sources, Acquisition::Cloned);
    assert_eq!(outcome.main_sources, Acquisition::Cloned);
    assert_eq!(outcome.permissions, FixOutcome::Skipped);
    assert_eq!(runner.clone_count(), 2);

    let lines = runner.command_lines();
    assert!(lines[0].starts_with("git clone"));
    assert!(lines[0].contains("--branch bootstrap"));
    assert!(lines[1].starts_with("cmake .."));
    assert!(lines[4].starts_with("git clone"));
    assert!(lines[4].contains("--branch main"));
    assert!(lines[5].ends_with("re.exe do deploy"));
    assert!(!cfg.bootstrap_src_dir.with_file_name("re-bootstrap-source.partial").exists());
}

/// A second run skips both clones and rewrites the config file wholesale.
#[test]
fn rerun_skips_clones_and_replaces_config() {
    let ws = Workspace::new().expect("workspace");
    let platform = Platform::posix();
    let mut cfg = ws.config();
    cfg.arch = Some("x64".to_string());
    ws.seed_bootstrap(&cfg, &platform).expect("seed");

    let first = ScriptedRunner::succeeding();
    run_pipeline(&cfg, &first, &mut ScriptedOperator::closed(), &platform).expect("first run");
    let config_path = cfg.main_src_dir.join("re.user.yml");
    assert_eq!(
        fs::read_to_string(&config_path).expect("read").lines().count(),
        3
    );

    cfg.arch = None;
    let second = ScriptedRunner::succeeding();
    let outcome =
        run_pipeline(&cfg, &second, &mut ScriptedOperator::closed(), &platform).expect("rerun");

    assert_eq!(outcome.main_sources, Acquisition::Existing);
    assert_eq!(second.clone_count(), 0);
    assert_eq!(second.commands().len(), 4);
    let written = fs::read_to_string(&config_path).expect("read");
    assert_eq!(written.lines().count(), 2);
    assert!(!written.contains("arch:"));
}

/// Interactive run: banner first, then the architecture question right before
/// the config is written.
#[test]
fn interactive_run_confirms_and_prompts_for_arch() {
    let ws = Workspace::new().expect("workspace");
    let platform = Platform::posix();
    let mut cfg = ws.config();
    cfg.auto = false;
    ws.seed_bootstrap(&cfg, &platform).expect("seed");
    let runner = ScriptedRunner::succeeding();
    let mut operator = ScriptedOperator::answering(["", "x86"]);

    let outcome = run_pipeline(&cfg, &runner, &mut operator, &platform).expect("pipeline");

    assert_eq!(outcome.arch.as_deref(), Some("x86"));
    assert_eq!(operator.transcript(), [BANNER, ARCH_QUESTION]);
    let written = fs::read_to_string(cfg.main_src_dir.join("re.user.yml")).expect("read");
    assert_eq!(written.lines().last(), Some("arch: x86"));
}

/// Closed operator input aborts at the gate before anything else happens.
#[test]
fn closed_input_aborts_before_any_work() {
    let ws = Workspace::new().expect("workspace");
    let mut cfg = ws.config();
    cfg.auto = false;
    let runner = ScriptedRunner::succeeding();
    let mut operator = ScriptedOperator::closed();

    let err = run_pipeline(&cfg, &runner, &mut operator, &Platform::posix()).unwrap_err();

    assert!(matches!(
        err.chain().find_map(|c| c.downcast_ref::<BootstrapError>()),
        Some(BootstrapError::InputClosed { .. })
    ));
    assert!(runner.commands().is_empty());
    assert!(!cfg.out_dir.exists());
}

/// The deploy step's own exit code is what the run reports.
#[test]
fn deploy_failure_surfaces_child_exit_code() {
    let ws = Workspace::new().expect("workspace");
    let cfg = ws.config();
    let platform = Platform::posix();
    ws.seed_bootstrap(&cfg, &platform).expect("seed");
    let runner = ScriptedRunner::with_exit_codes([0, 0, 0, 0, 5]);

    let err =
        run_pipeline(&cfg, &runner, &mut ScriptedOperator::closed(), &platform).unwrap_err();

    assert_eq!(exit_code_for(&err), 5);
    assert!(cfg.main_src_dir.join("re.user.yml").is_file());
}

/// A main-source clone that dies halfway leaves nothing a retry would trust.
#[test]
fn failed_main_clone_is_retried_on_next_run() {
    let ws = Workspace::new().expect("workspace");
    let cfg = ws.config();
    let platform = Platform::posix();
    ws.seed_bootstrap(&cfg, &platform).expect("seed");

    let failing = ScriptedRunner::with_exit_codes([0, 0, 0, 128]);
    let err = run_pipeline(&cfg, &failing, &mut ScriptedOperator::closed(), &platform)
        .unwrap_err();
    assert_eq!(exit_code_for(&err), 128);
    assert!(!cfg.main_src_dir.exists());

    let retry = ScriptedRunner::succeeding();
    let outcome = run_pipeline(&cfg, &retry, &mut ScriptedOperator::closed(), &platform)
        .expect("retry");
    assert_eq!(outcome.main_sources, Acquisition::Cloned);
    assert_eq!(retry.clone_count(), 1);
}

#![cfg(unix)]

mod common;

use nsis_step::step::{
    BufferListener, BuildContext, Installation, InvocationRequest, Invoker, MemoryRepository,
    NodeContext, ToolLocation, VariableMap,
};
use std::sync::Arc;

fn invoker(installations: Vec<Installation>) -> Invoker {
    common::fixture_dir();
    Invoker::new(Arc::new(MemoryRepository::new(installations)))
}

fn vars(pairs: &[(&str, &str)]) -> VariableMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn unix_context(dir: &std::path::Path) -> BuildContext {
    BuildContext::new(NodeContext::new("test-node", true), dir)
}

#[tokio::test]
async fn test_successful_run_streams_output() {
    let compiler = common::fake_compiler();
    let workdir = tempfile::tempdir().unwrap();
    let invoker = invoker(vec![Installation::new("v3", compiler.display().to_string())]);

    let request = InvocationRequest::new("installer.nsi")
        .installation("v3")
        .arguments("/DVERSION=${VERSION}\n/V3\t\"/DNAME=My App\"");
    let context = unix_context(workdir.path())
        .environment(vars(&[("FAKE_MARKER", "from-env")]))
        .build_variables(vars(&[("VERSION", "1.0")]));
    let listener = BufferListener::new();

    assert!(invoker.run(&request, &context, &listener).await);

    let lines = listener.lines();
    assert_eq!(lines[0], format!("Path To makensis.exe: {}", compiler.display()));
    assert_eq!(
        lines[1],
        format!(
            "Executing command: {} /DVERSION=1.0 /V3 \"/DNAME=My App\" installer.nsi",
            compiler.display()
        )
    );
    for expected in [
        "arg:/DVERSION=1.0",
        "arg:/V3",
        "arg:/DNAME=My App",
        "arg:installer.nsi",
        "marker:from-env",
        "warning from stderr",
    ] {
        assert!(lines.iter().any(|l| l == expected), "missing {expected:?} in {lines:#?}");
    }
    assert!(listener.fatal_errors().is_empty());
}

#[tokio::test]
async fn test_compiler_runs_in_module_root() {
    let compiler = common::fake_compiler();
    let workdir = tempfile::tempdir().unwrap();
    let root = workdir.path().canonicalize().unwrap();
    let invoker = invoker(vec![Installation::new("v3", compiler.display().to_string())]);
    let listener = BufferListener::new();

    let ok = invoker
        .run(
            &InvocationRequest::new("a.nsi").installation("v3"),
            &unix_context(&root),
            &listener,
        )
        .await;

    assert!(ok);
    assert!(listener.lines().contains(&format!("cwd:{}", root.display())));
}

#[tokio::test]
async fn test_non_zero_exit_fails_without_fatal_error() {
    let compiler = common::fake_compiler();
    let workdir = tempfile::tempdir().unwrap();
    let invoker = invoker(vec![Installation::new("v3", compiler.display().to_string())]);
    let context = unix_context(workdir.path()).environment(vars(&[("FAKE_EXIT", "3")]));
    let listener = BufferListener::new();

    let ok = invoker
        .run(&InvocationRequest::new("a.nsi").installation("v3"), &context, &listener)
        .await;

    assert!(!ok);
    assert!(listener.fatal_errors().is_empty());
    assert!(listener.lines().contains(&"arg:a.nsi".to_string()));
}

#[tokio::test]
async fn test_missing_installation_path_aborts_before_launch() {
    let workdir = tempfile::tempdir().unwrap();
    let missing = workdir.path().join("nsis").join("makensis");
    let invoker = invoker(vec![Installation::new("v3", missing.display().to_string())]);
    let listener = BufferListener::new();

    let ok = invoker
        .run(
            &InvocationRequest::new("a.nsi").installation("v3"),
            &unix_context(workdir.path()),
            &listener,
        )
        .await;

    assert!(!ok);
    assert_eq!(
        listener.fatal_errors(),
        vec![format!("{} doesn't exist", missing.display())]
    );
    assert!(
        !listener
            .lines()
            .iter()
            .any(|l| l.starts_with("Executing command:"))
    );
}

#[tokio::test]
async fn test_existence_check_failure_aborts_before_launch() {
    let workdir = tempfile::tempdir().unwrap();
    // A regular file used as a directory makes the check itself fail.
    let not_a_dir = workdir.path().join("file");
    std::fs::write(&not_a_dir, "").unwrap();
    let home = not_a_dir.join("makensis");
    let invoker = invoker(vec![Installation::new("v3", home.display().to_string())]);
    let listener = BufferListener::new();

    let ok = invoker
        .run(
            &InvocationRequest::new("a.nsi").installation("v3"),
            &unix_context(workdir.path()),
            &listener,
        )
        .await;

    assert!(!ok);
    assert_eq!(
        listener.fatal_errors(),
        vec![format!("Failed checking for existence of {}", home.display())]
    );
    assert!(
        !listener
            .lines()
            .iter()
            .any(|l| l.starts_with("Executing command:"))
    );
}

#[tokio::test]
async fn test_home_is_resolved_for_node_then_environment() {
    let workdir = tempfile::tempdir().unwrap();
    let invoker = invoker(vec![Installation::new("v3", "/does/not/exist/makensis")]);

    let node = NodeContext::new("agent", true)
        .with_tool_location(ToolLocation::new("v3", "${FIXTURES}/makensis"));
    let fixtures = common::fixture_dir().display().to_string();
    let context =
        BuildContext::new(node, workdir.path()).environment(vars(&[("FIXTURES", fixtures.as_str())]));
    let listener = BufferListener::new();

    let ok = invoker
        .run(&InvocationRequest::new("a.nsi").installation("v3"), &context, &listener)
        .await;

    assert!(ok, "{}", listener.text());
    assert_eq!(
        listener.lines()[0],
        format!("Path To makensis.exe: {}", common::fake_compiler().display())
    );
}

#[tokio::test]
async fn test_unknown_installation_falls_back_to_default_name() {
    let workdir = tempfile::tempdir().unwrap();
    let invoker = invoker(vec![Installation::new("v3", "/does/not/exist/makensis")]);

    // The child's PATH decides where the bare name is found.
    let path = format!("{}:/usr/bin:/bin", common::fixture_dir().display());
    let context = unix_context(workdir.path()).environment(vars(&[("PATH", path.as_str())]));
    let listener = BufferListener::new();

    let ok = invoker
        .run(
            &InvocationRequest::new("build.nsi").installation("v2"),
            &context,
            &listener,
        )
        .await;

    assert!(ok, "{}", listener.text());
    let lines = listener.lines();
    assert_eq!(lines[0], "Path To makensis.exe: makensis.exe");
    assert_eq!(lines[1], "Executing command: makensis.exe build.nsi");
}

#[tokio::test]
async fn test_launch_failure_is_reported_on_fatal_channel() {
    let workdir = tempfile::tempdir().unwrap();
    let invoker = invoker(Vec::new());
    let empty_path = tempfile::tempdir().unwrap();
    let path = empty_path.path().display().to_string();
    let context = unix_context(workdir.path()).environment(vars(&[("PATH", path.as_str())]));
    let listener = BufferListener::new();

    let ok = invoker
        .run(&InvocationRequest::new("build.nsi"), &context, &listener)
        .await;

    assert!(!ok);
    let fatal = listener.fatal_errors();
    assert_eq!(fatal.len(), 1);
    assert!(fatal[0].starts_with("command execution failed: "), "{fatal:?}");
    assert!(!fatal[0].contains("build.nsi"), "{fatal:?}");
    assert!(
        listener
            .lines()
            .iter()
            .any(|l| l.starts_with("failed to run command makensis.exe build.nsi"))
    );
}

#[tokio::test]
async fn test_windows_node_wraps_command_in_cmd() {
    let workdir = tempfile::tempdir().unwrap();
    let invoker = invoker(Vec::new());
    let context = BuildContext::new(NodeContext::new("win", false), workdir.path());
    let listener = BufferListener::new();

    // cmd.exe is absent on Unix, so only the logged command line is checked.
    let _ = invoker
        .run(
            &InvocationRequest::new("installer.nsi").arguments("/V3"),
            &context,
            &listener,
        )
        .await;

    assert!(listener.lines().contains(
        &"Executing command: cmd.exe /C makensis.exe /V3 installer.nsi && exit %%ERRORLEVEL%%"
            .to_string()
    ));
}

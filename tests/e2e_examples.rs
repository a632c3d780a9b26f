mod common;

use common::{CommandOutput, TestContext};

// Talks to the real GitHub API and downloads a full Proton-GE release.
#[test]
#[cfg(feature = "e2e")]
fn e2e_install_latest_proton_ge() {
    let ctx = TestContext::new();

    let output: CommandOutput = ctx
        .cmd("https://api.github.com")
        .output()
        .expect("Failed to run proton-updater")
        .into();

    output
        .assert_success()
        .assert_stderr_contains("Found latest release of tag")
        .assert_stderr_contains("Finished extracting");

    let installed: Vec<_> = std::fs::read_dir(ctx.compat_dir())
        .expect("compatibilitytools.d was not created")
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(installed.len(), 1, "unexpected contents: {:?}", installed);
    assert!(installed[0].starts_with("Proton-"));

    let install_dir = ctx.compat_dir().join(&installed[0]);
    assert!(install_dir.join("proton").exists());
    assert!(install_dir.join("compatibilitytool.vdf").exists());

    // Running again must be a no-op
    let output: CommandOutput = ctx
        .cmd("https://api.github.com")
        .output()
        .expect("Failed to run proton-updater")
        .into();
    output
        .assert_success()
        .assert_stderr_contains("already has compatibility tool");
}

#[test]
#[cfg(feature = "e2e")]
fn e2e_unknown_repository_fails() {
    let ctx = TestContext::new();

    let output: CommandOutput = ctx
        .cmd("https://api.github.com")
        .args(["--repo", "proton-updater-test/does-not-exist"])
        .output()
        .expect("Failed to run proton-updater")
        .into();

    output.assert_failure().assert_stderr_contains("404");
}

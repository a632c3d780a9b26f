use flate2::write::GzEncoder;
use flate2::Compression;
use std::path::PathBuf;
use std::process::{Command, Output};
use tar::{Builder, EntryType, Header};
use tempfile::TempDir;

// Not every test binary that includes this module uses every helper.
#[allow(dead_code)]
pub struct TestContext {
    pub _temp_dir: TempDir,
    pub steam_dir: PathBuf,
    pub bin_path: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let steam_dir = temp_dir.path().join("steam");
        std::fs::create_dir_all(&steam_dir).expect("Failed to create steam dir");

        let bin_path = PathBuf::from(env!("CARGO_BIN_EXE_proton-updater"));

        Self {
            _temp_dir: temp_dir,
            steam_dir,
            bin_path,
        }
    }

    pub fn compat_dir(&self) -> PathBuf {
        self.steam_dir.join("compatibilitytools.d")
    }

    /// Command pointed at the temp steam dir and the given API base.
    pub fn cmd(&self, api_base: &str) -> Command {
        let mut cmd = Command::new(&self.bin_path);
        cmd.arg("--steam-dir").arg(&self.steam_dir);
        cmd.env("GITHUB_API_URL", api_base);
        cmd.env_remove("GITHUB_TOKEN");
        cmd.env_remove("RUST_LOG");
        cmd.env("HOME", self._temp_dir.path());
        cmd
    }
}

#[allow(dead_code)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            status: output.status,
        }
    }
}

#[allow(dead_code)]
impl CommandOutput {
    pub fn assert_success(&self) -> &Self {
        if !self.status.success() {
            panic!(
                "Command failed with status {:?}\nstdout: {}\nstderr: {}",
                self.status.code(),
                self.stdout,
                self.stderr
            );
        }
        self
    }

    pub fn assert_failure(&self) -> &Self {
        assert!(
            !self.status.success(),
            "Command unexpectedly succeeded\nstdout: {}\nstderr: {}",
            self.stdout,
            self.stderr
        );
        assert_eq!(self.status.code(), Some(1));
        self
    }

    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Stdout did not contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Stderr did not contain '{}'\nActual stderr: {}",
            text,
            self.stderr
        );
        self
    }
}

/// A release tarball in the layout Proton-GE publishes.
#[allow(dead_code)]
pub fn proton_tarball(tag: &str, proton: &[u8]) -> Vec<u8> {
    let top = format!("Proton-{}", tag);
    let mut builder = Builder::new(GzEncoder::new(Vec::new(), Compression::default()));

    let mut dir = Header::new_gnu();
    dir.set_entry_type(EntryType::Directory);
    dir.set_mode(0o755);
    dir.set_size(0);
    builder
        .append_data(&mut dir, &top, std::io::empty())
        .expect("append dir");

    let mut file = Header::new_gnu();
    file.set_entry_type(EntryType::Regular);
    file.set_mode(0o755);
    file.set_size(proton.len() as u64);
    builder
        .append_data(&mut file, format!("{}/files/bin/proton", top), proton)
        .expect("append file");

    let mut link = Header::new_gnu();
    link.set_entry_type(EntryType::Symlink);
    link.set_mode(0o777);
    link.set_size(0);
    builder
        .append_link(&mut link, format!("{}/files/lib", top), "../shared/lib")
        .expect("append link");

    builder
        .into_inner()
        .and_then(|gz| gz.finish())
        .expect("finish tarball")
}

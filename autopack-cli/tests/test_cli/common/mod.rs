use std::fs;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tokio::io::AsyncWriteExt;

/// Name of the binary under test
pub const BINARY: &str = "autopack";

pub const SAMPLE_TEXT: &str = "The quick brown fox jumps over the lazy dog.\n\
    Pack my box with five dozen liquor jugs.\n\
    How vexingly quick daft zebras jump!\n";

/// Returns the path to the cargo-built binary.
///
/// # Panics
///
/// Panics if the binary cannot be found.
fn cargo_binary(name: &str) -> PathBuf {
    let bin_env = format!("CARGO_BIN_EXE_{name}");
    if let Some(path) = std::env::var_os(&bin_env) {
        return PathBuf::from(path);
    }

    let exe_name = format!("{name}{}", std::env::consts::EXE_SUFFIX);
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest
        .ancestors()
        .flat_map(|dir| ["debug", "release"].map(|profile| dir.join("target").join(profile)))
        .map(|dir| dir.join(&exe_name))
        .find(|path| path.is_file())
        .unwrap_or_else(|| {
            panic!("Binary '{name}' not found. Set '{bin_env}' or build the project binaries.")
        })
}

/// Whether a system tool is available in PATH
pub fn has_tool(name: &str) -> bool {
    which::which(name).is_ok()
}

/// Output from running a binary command
#[derive(Debug)]
pub struct Output {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl Output {
    /// Process exit code, `-1` when killed by a signal
    pub fn code(&self) -> i32 {
        self.status.code().unwrap_or(-1)
    }
}

/// Shared test fixture utilities to keep filesystem interactions isolated
pub struct Fixture {
    root_dir: tempfile::TempDir,
}

impl Fixture {
    /// Create an empty fixture
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    pub fn new() -> Self {
        Self {
            root_dir: tempfile::TempDir::new().unwrap(),
        }
    }

    /// Create fixture with single file
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created or if the fixture file
    /// cannot be written.
    pub fn with_file(name: &str, contents: &[u8]) -> Self {
        let fixture = Self::new();
        fixture.write(name, contents);
        fixture
    }

    /// Write a file, creating parent directories as needed
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write(&self, name: &str, contents: &[u8]) {
        let path = self.root_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    /// Get full path for a file in the fixture
    pub fn path(&self, name: &str) -> String {
        format!("{}/{}", self.root_dir.path().display(), name)
    }

    /// Check if a file exists in the fixture
    pub fn file_exists(&self, name: &str) -> bool {
        self.root_dir.path().join(name).exists()
    }

    /// Read a fixture file, empty when missing
    pub fn read(&self, name: &str) -> Vec<u8> {
        fs::read(self.root_dir.path().join(name)).unwrap_or_default()
    }

    pub fn root_dir_path(&self) -> &Path {
        self.root_dir.path()
    }

    /// Run the cargo binary with the specified arguments and closed stdin
    pub async fn run_cargo(&mut self, args: &[&str]) -> Output {
        self.run_with_stdin(args, b"").await
    }

    /// Run the cargo binary with the specified arguments and stdin input
    ///
    /// # Panics
    ///
    /// Panics if the process cannot be spawned or if awaiting its output fails.
    pub async fn run_with_stdin(&mut self, args: &[&str], stdin: &[u8]) -> Output {
        let mut child = tokio::process::Command::new(cargo_binary(BINARY))
            .args(args)
            .current_dir(self.root_dir.path())
            .env_remove("AUTOPACK_PASSWORD")
            .env_remove("RUST_LOG")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .unwrap();

        if let Some(ref mut pipe) = child.stdin {
            pipe.write_all(stdin).await.unwrap_or_else(|err| {
                // The binary may exit before reading everything.
                if err.kind() != std::io::ErrorKind::BrokenPipe {
                    panic!("failed write to stdin ({} bytes): {err}", stdin.len());
                }
            });
        }

        // Drop stdin to send EOF to the child process
        drop(child.stdin.take());

        let raw_output = child.wait_with_output().await.unwrap();
        Output {
            status: raw_output.status,
            stdout: String::from_utf8_lossy(&raw_output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&raw_output.stderr).into_owned(),
        }
    }
}

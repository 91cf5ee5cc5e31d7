//! Common test utilities for querypack integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Well-known location of the package thumbnail inside a content store
#[allow(dead_code)]
pub const THUMBNAIL_FILE: &str = "apps/querypack/packager/definition/package-thumbnail.png";

/// A content store plus package directory for integration tests
pub struct TestWorkspace {
    /// Temporary directory holding both trees
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Content store root, also the working directory of every command
    pub store: PathBuf,
    /// Directory packages are written to
    pub packages: PathBuf,
}

impl TestWorkspace {
    /// Create an empty store and package directory
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let store = temp.path().join("store");
        let packages = temp.path().join("packages");
        std::fs::create_dir_all(&store).expect("Failed to create store directory");
        Self {
            temp,
            store,
            packages,
        }
    }

    /// Write a file in the content store
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.store.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Create content files whose content is their own path
    #[allow(dead_code)]
    pub fn create_content(&self, files: &[&str]) {
        for file in files {
            self.write_file(file, file);
        }
    }

    /// Path of a package archive below the package directory
    #[allow(dead_code)]
    pub fn package_path(&self, group: &str, file_name: &str) -> PathBuf {
        self.packages.join(group).join(file_name)
    }

    /// querypack running inside the store, writing into the package directory
    pub fn querypack_cmd(&self) -> Command {
        let mut cmd = querypack_cmd();
        cmd.current_dir(&self.store)
            .env("QUERYPACK_PACKAGES", &self.packages);
        cmd
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// querypack with a clean environment
// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn querypack_cmd() -> Command {
    let mut cmd = Command::cargo_bin("querypack").expect("querypack binary should build");
    cmd.env_remove("QUERYPACK_STORE")
        .env_remove("QUERYPACK_PACKAGES")
        .env_remove("RUST_LOG");
    cmd
}

/// Parse the JSON printed on stdout
#[allow(dead_code)]
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

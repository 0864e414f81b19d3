//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use uitext::http::Fetcher;
use uitext::storage::Filesystem;
use uitext::{Backends, ResourceError, Result};

/// Load fixture file content.
pub fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// In-memory filesystem with controllable modification times.
#[derive(Default)]
pub struct FakeFilesystem {
    files: Mutex<HashMap<PathBuf, (i64, String)>>,
    reads: AtomicUsize,
}

impl FakeFilesystem {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Create or replace a file.
    pub fn write(&self, path: &str, modified: i64, content: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), (modified, content.to_string()));
    }

    /// Number of full reads so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn not_found(path: &Path) -> ResourceError {
        ResourceError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        }
    }
}

impl Filesystem for FakeFilesystem {
    fn modified(&self, path: &Path) -> Result<i64> {
        let files = self.files.lock().unwrap();
        files
            .get(path)
            .map(|(modified, _)| *modified)
            .ok_or_else(|| Self::not_found(path))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let files = self.files.lock().unwrap();
        files
            .get(path)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| Self::not_found(path))
    }
}

/// Fetcher serving one fixed body and counting requests.
pub struct CountingFetcher {
    body: String,
    calls: AtomicUsize,
}

impl CountingFetcher {
    pub fn new(body: &str) -> Arc<Self> {
        Arc::new(Self {
            body: body.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Fetcher for CountingFetcher {
    fn fetch(&self, _url: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.body.clone())
    }
}

/// Backends over a fake filesystem and a fetcher that serves nothing useful.
pub fn fake_backends(filesystem: &Arc<FakeFilesystem>) -> Backends {
    Backends::new(
        Arc::clone(filesystem) as Arc<dyn Filesystem>,
        CountingFetcher::new("<unused/>"),
    )
}

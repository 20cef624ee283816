//! Test double for `ScaffoldFilesystem`.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::domain::Mode;
use crate::ports::{OwnershipOutcome, PathState, ScaffoldFilesystem};

/// Mode a fresh directory gets before `set_mode` runs.
const UNSET_MODE: u32 = 0o777;

#[derive(Debug, Default)]
struct State {
    dirs: BTreeMap<PathBuf, Mode>,
    files: BTreeSet<PathBuf>,
    owners: BTreeMap<PathBuf, String>,
    fail_create: HashSet<PathBuf>,
    fail_set_mode: HashSet<PathBuf>,
    ignore_set_mode: HashSet<PathBuf>,
    fail_remove: HashSet<PathBuf>,
    removed: Vec<PathBuf>,
}

impl State {
    fn has_children(&self, path: &Path) -> bool {
        let is_child = |entry: &PathBuf| entry.parent() == Some(path);
        self.dirs.keys().any(is_child) || self.files.iter().any(is_child)
    }
}

/// In-memory directory tree with per-path fault injection.
#[derive(Clone, Debug, Default)]
pub struct MemoryFilesystem {
    state: Arc<Mutex<State>>,
}

impl MemoryFilesystem {
    /// A tree holding only the directory `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let fs = Self::default();
        fs.add_dir(root);
        fs
    }

    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        self.state.lock().unwrap().dirs.insert(path.into(), Mode::DEFAULT_DIRECTORY);
    }

    pub fn add_file(&self, path: impl Into<PathBuf>) {
        self.state.lock().unwrap().files.insert(path.into());
    }

    pub fn fail_create_at(&self, path: impl Into<PathBuf>) {
        self.state.lock().unwrap().fail_create.insert(path.into());
    }

    pub fn fail_set_mode_at(&self, path: impl Into<PathBuf>) {
        self.state.lock().unwrap().fail_set_mode.insert(path.into());
    }

    /// `set_mode` reports success at `path` but leaves the bits untouched.
    pub fn ignore_set_mode_at(&self, path: impl Into<PathBuf>) {
        self.state.lock().unwrap().ignore_set_mode.insert(path.into());
    }

    pub fn fail_remove_at(&self, path: impl Into<PathBuf>) {
        self.state.lock().unwrap().fail_remove.insert(path.into());
    }

    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        self.state.lock().unwrap().dirs.contains_key(path.as_ref())
    }

    pub fn mode_of(&self, path: impl AsRef<Path>) -> Option<Mode> {
        self.state.lock().unwrap().dirs.get(path.as_ref()).copied()
    }

    pub fn owner_of(&self, path: impl AsRef<Path>) -> Option<String> {
        self.state.lock().unwrap().owners.get(path.as_ref()).cloned()
    }

    /// Every directory currently present, sorted.
    pub fn dirs(&self) -> Vec<PathBuf> {
        self.state.lock().unwrap().dirs.keys().cloned().collect()
    }

    /// Paths passed to successful `remove_dir` calls, in call order.
    pub fn removed(&self) -> Vec<PathBuf> {
        self.state.lock().unwrap().removed.clone()
    }
}

fn injected(path: &Path) -> io::Error {
    io::Error::new(io::ErrorKind::PermissionDenied, format!("injected failure at {}", path.display()))
}

impl ScaffoldFilesystem for MemoryFilesystem {
    fn probe(&self, path: &Path) -> io::Result<PathState> {
        let state = self.state.lock().unwrap();
        if state.files.contains(path) {
            return Ok(PathState::NotDirectory);
        }
        if !state.dirs.contains_key(path) {
            return Ok(PathState::Missing);
        }
        if state.has_children(path) {
            Ok(PathState::PopulatedDirectory)
        } else {
            Ok(PathState::EmptyDirectory)
        }
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_create.contains(path) {
            return Err(injected(path));
        }
        if state.dirs.contains_key(path) || state.files.contains(path) {
            return Err(io::Error::new(io::ErrorKind::AlreadyExists, "entry exists"));
        }
        match path.parent() {
            Some(parent) if state.dirs.contains_key(parent) => {}
            _ => return Err(io::Error::new(io::ErrorKind::NotFound, "parent directory is missing")),
        }
        state.dirs.insert(path.to_path_buf(), Mode::new(UNSET_MODE).unwrap_or(Mode::DEFAULT_DIRECTORY));
        Ok(())
    }

    fn set_mode(&self, path: &Path, mode: Mode) -> io::Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_set_mode.contains(path) {
            return Err(injected(path));
        }
        if state.ignore_set_mode.contains(path) {
            return Ok(());
        }
        match state.dirs.get_mut(path) {
            Some(current) => {
                *current = mode;
                Ok(())
            }
            None => Err(io::Error::new(io::ErrorKind::NotFound, "no such directory")),
        }
    }

    fn mode(&self, path: &Path) -> io::Result<Option<Mode>> {
        let state = self.state.lock().unwrap();
        state
            .dirs
            .get(path)
            .map(|mode| Some(*mode))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such directory"))
    }

    fn set_owner(&self, path: &Path, owner: &str) -> io::Result<OwnershipOutcome> {
        if owner.parse::<u32>().is_err() {
            return Ok(OwnershipOutcome::Skipped(format!("'{}' is not a numeric uid", owner)));
        }
        self.state.lock().unwrap().owners.insert(path.to_path_buf(), owner.to_string());
        Ok(OwnershipOutcome::Applied)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_remove.contains(path) {
            return Err(injected(path));
        }
        if !state.dirs.contains_key(path) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such directory"));
        }
        if state.has_children(path) {
            return Err(io::Error::other("directory not empty"));
        }
        state.dirs.remove(path);
        state.owners.remove(path);
        state.removed.push(path.to_path_buf());
        Ok(())
    }
}

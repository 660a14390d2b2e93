use super::types::{AppState, STATE_VERSION};
use crate::timing::{TimingListener, TimingSet};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Get the default state file path (~/.config/wellcoach/state.json)
pub fn get_state_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("state.json"))
}

/// Load state from a JSON file
///
/// If the file doesn't exist, returns a new empty state.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_state(path: &Path) -> Result<AppState> {
    if !path.exists() {
        return Ok(AppState::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open state file at {}", path.display()))?;

    let state: AppState =
        serde_json::from_reader(file).context("Failed to load state file")?;

    if state.version != STATE_VERSION {
        anyhow::bail!("Unsupported state version: {}", state.version);
    }

    Ok(state)
}

/// Save state to a JSON file atomically
///
/// Creates the parent directory if it doesn't exist.
pub fn save_state(path: &Path, state: &AppState) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, state).context("Failed to serialize state")?;

    file.commit().context("Failed to save state")?;

    Ok(())
}

/// State file bound to its path. Accepted timing edits update the working set
/// in memory; `persist` writes it out. Saves write through immediately.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
    state: AppState,
    dirty: bool,
}

impl StateStore {
    pub fn open(path: PathBuf) -> Result<Self> {
        let state = load_state(&path)?;
        Ok(Self {
            path,
            state,
            dirty: false,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        self.dirty = true;
        &mut self.state
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write pending changes, if any.
    pub fn persist(&mut self) -> Result<()> {
        if self.dirty {
            save_state(&self.path, &self.state)?;
            self.dirty = false;
        }
        Ok(())
    }
}

impl TimingListener for StateStore {
    fn on_update(&mut self, timing: &TimingSet) {
        self.state.timing = Some(*timing);
        self.dirty = true;
    }

    fn on_save(&mut self, timing: &TimingSet) -> Result<()> {
        self.state.timing = Some(*timing);
        self.state.save_timing(*timing);
        self.dirty = true;
        self.persist()
    }
}

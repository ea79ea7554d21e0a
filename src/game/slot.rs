use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Durable storage for the best score.
pub trait BestScoreSlot {
    /// `None` when nothing was stored yet or the store cannot be read.
    fn load(&self) -> Option<u32>;

    fn store(&mut self, best_score: u32) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct BestScoreRecord {
    best_score: u32,
}

/// Keeps the best score as a small JSON file.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub const FILE_NAME: &'static str = "best_score.json";

    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Slot stored as [`FileSlot::FILE_NAME`] inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(Self::FILE_NAME))
    }
}

impl BestScoreSlot for FileSlot {
    fn load(&self) -> Option<u32> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(path = %self.path.display(), "no best score loaded: {e}");
                return None;
            },
        };
        match serde_json::from_str::<BestScoreRecord>(&raw) {
            Ok(record) => Some(record.best_score),
            Err(e) => {
                warn!(path = %self.path.display(), "ignoring unreadable best score: {e}");
                None
            },
        }
    }

    fn store(&mut self, best_score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).wrap_err_with(|| format!("creating {}", parent.display()))?;
        }
        let raw = serde_json::to_string(&BestScoreRecord { best_score })?;
        fs::write(&self.path, raw).wrap_err_with(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

/// Slot that lives only as long as the process. Clones share the stored value.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    value: std::rc::Rc<std::cell::Cell<Option<u32>>>,
    writes: std::rc::Rc<std::cell::Cell<usize>>,
}

#[cfg(test)]
impl MemorySlot {
    pub fn new(value: Option<u32>) -> Self {
        let slot = Self::default();
        slot.value.set(value);
        slot
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

#[cfg(test)]
impl BestScoreSlot for MemorySlot {
    fn load(&self) -> Option<u32> {
        self.value.get()
    }

    fn store(&mut self, best_score: u32) -> Result<()> {
        self.value.set(Some(best_score));
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;

    fn test_path() -> PathBuf {
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);
        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir()
            .join(format!("flappy-tui-test-{}-{}", std::process::id(), test_id))
            .join(FileSlot::FILE_NAME)
    }

    #[test]
    fn test_missing_file_loads_none() {
        let slot = FileSlot::new(test_path());
        assert_eq!(slot.load(), None);
    }

    #[test]
    fn test_store_then_load() -> Result<()> {
        let path = test_path();
        let mut slot = FileSlot::new(path.clone());
        slot.store(42)?;
        assert_eq!(FileSlot::new(path.clone()).load(), Some(42));

        slot.store(43)?;
        assert_eq!(slot.load(), Some(43));

        fs::remove_file(path)?;
        Ok(())
    }

    #[test]
    fn test_corrupt_file_loads_none() -> Result<()> {
        let path = test_path();
        fs::create_dir_all(path.parent().unwrap())?;
        fs::write(&path, "not json")?;
        assert_eq!(FileSlot::new(path.clone()).load(), None);

        fs::remove_file(path)?;
        Ok(())
    }

    #[test]
    fn test_in_dir_uses_file_name() -> Result<()> {
        let dir = test_path().with_file_name("data");
        let mut slot = FileSlot::in_dir(&dir);
        slot.store(9)?;
        assert_eq!(FileSlot::new(dir.join("best_score.json")).load(), Some(9));

        fs::remove_dir_all(dir)?;
        Ok(())
    }

    #[test]
    fn test_memory_slot_counts_writes() -> Result<()> {
        let mut slot = MemorySlot::new(Some(3));
        assert_eq!(slot.load(), Some(3));
        slot.store(5)?;
        assert_eq!(slot.load(), Some(5));
        assert_eq!(slot.writes(), 1);
        Ok(())
    }
}

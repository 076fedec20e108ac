//! Persistence for the session tokens so a session survives restarts
//!
//! Modelled as a small string key/value store (the browser's local storage
//! offers exactly this) so the session decides which keys it uses

use std::{
    collections::BTreeMap,
    fmt::Debug,
    sync::{Arc, Mutex},
};

pub trait TokenStore: Debug + Send + Sync {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    /// Removing a key that is not present is not an error
    fn remove(&self, key: &str) -> anyhow::Result<()>;
}

/// Keeps values for the lifetime of the process
///
/// Clones share the same values
#[derive(Debug, Default, Clone)]
pub struct MemoryTokenStore {
    values: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.values.lock().expect("mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.values.lock().expect("mutex poisoned").get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.values
            .lock()
            .expect("mutex poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.values.lock().expect("mutex poisoned").remove(key);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileTokenStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use anyhow::Context as _;
    use std::{
        collections::BTreeMap,
        path::{Path, PathBuf},
        sync::Mutex,
    };

    use super::TokenStore;

    /// Stores the values as a RON map in a single file
    ///
    /// A missing file is treated the same as an empty one
    #[derive(Debug)]
    pub struct FileTokenStore {
        path: PathBuf,
        /// Serializes read-modify-write cycles from this process
        write_lock: Mutex<()>,
    }

    impl FileTokenStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self {
                path: path.into(),
                write_lock: Mutex::new(()),
            }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn load(&self) -> anyhow::Result<BTreeMap<String, String>> {
            if !self.path.exists() {
                return Ok(BTreeMap::new());
            }
            let contents = std::fs::read_to_string(&self.path)
                .with_context(|| format!("failed to read token file: {:?}", self.path))?;
            if contents.trim().is_empty() {
                return Ok(BTreeMap::new());
            }
            ron::from_str(&contents)
                .with_context(|| format!("failed to parse token file: {:?}", self.path))
        }

        fn save(&self, values: &BTreeMap<String, String>) -> anyhow::Result<()> {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create folder for token file: {parent:?}")
                    })?;
                }
            }
            let contents = ron::to_string(values).context("failed to serialize to ron")?;
            std::fs::write(&self.path, contents)
                .with_context(|| format!("failed to write token file: {:?}", self.path))
        }

        fn modify<F>(&self, f: F) -> anyhow::Result<()>
        where
            F: FnOnce(&mut BTreeMap<String, String>),
        {
            let _guard = self.write_lock.lock().expect("mutex poisoned");
            let mut values = self.load()?;
            f(&mut values);
            self.save(&values)
        }
    }

    impl TokenStore for FileTokenStore {
        fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
            Ok(self.load()?.remove(key))
        }

        fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
            self.modify(|values| {
                values.insert(key.to_string(), value.to_string());
            })
        }

        fn remove(&self, key: &str) -> anyhow::Result<()> {
            if !self.path.exists() {
                return Ok(());
            }
            self.modify(|values| {
                values.remove(key);
            })
        }
    }
}

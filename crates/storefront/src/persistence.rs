//! Durable snapshot of the store's persisted fields.
//!
//! Only the cart, the signed-in user and the review list survive a restart.
//! [`Snapshot`] is the single declared projection of that subset; navigation,
//! search, modal flags and the current order are never written.
//!
//! Snapshots are stored as JSON inside a versioned envelope:
//!
//! ```json
//! { "state": { "cart": [], "user": null, "reviews": [] }, "version": 0 }
//! ```
//!
//! A missing, unreadable, malformed or wrong-version snapshot loads as the
//! built-in defaults. Those failures are logged and never reach the caller.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use grado_core::{Cart, Review, ReviewDraft, ReviewId, User};

/// Envelope version written by this build.
pub const SNAPSHOT_VERSION: u32 = 0;

/// Default file name for the on-disk snapshot.
pub const DEFAULT_SNAPSHOT_FILE: &str = "grado-app-storage.json";

/// Errors reading or writing a snapshot.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Storage could not be read or written.
    #[error("snapshot I/O error: {0}")]
    Io(#[from] io::Error),

    /// Snapshot contents could not be encoded or decoded.
    #[error("snapshot format error: {0}")]
    Format(#[from] serde_json::Error),

    /// Snapshot was written by an incompatible version.
    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version found in storage.
        found: u32,
        /// Version this build writes.
        expected: u32,
    },
}

/// The persisted subset of store state.
///
/// Fields missing from a stored snapshot fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub cart: Cart,
    pub user: Option<User>,
    pub reviews: Vec<Review>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            cart: Cart::new(),
            user: None,
            reviews: seed_reviews(),
        }
    }
}

impl Snapshot {
    /// Encode the snapshot in its versioned envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn encode(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string(&Envelope {
            state: self,
            version: SNAPSHOT_VERSION,
        })?)
    }

    /// Decode a snapshot from its versioned envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the version differs.
    pub fn decode(contents: &str) -> Result<Self, PersistenceError> {
        let envelope: Envelope<Self> = serde_json::from_str(contents)?;
        if envelope.version != SNAPSHOT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: envelope.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        Ok(envelope.state)
    }
}

#[derive(Serialize, Deserialize)]
struct Envelope<S> {
    state: S,
    version: u32,
}

/// Reviews shown before anyone has posted.
#[must_use]
pub fn seed_reviews() -> Vec<Review> {
    vec![
        Review::new(
            ReviewId::new(1),
            ReviewDraft {
                text: "Amazing chicken biryani! Perfect for late night study sessions.".to_string(),
                rating: 5,
                date: "2024-01-15".to_string(),
                author: "CSE Student".to_string(),
                images: None,
            },
        ),
        Review::new(
            ReviewId::new(2),
            ReviewDraft {
                text: "Good portion size and quick delivery to hostel.".to_string(),
                rating: 4,
                date: "2024-01-14".to_string(),
                author: "ECE Student".to_string(),
                images: None,
            },
        ),
    ]
}

// =============================================================================
// Storage Backends
// =============================================================================

/// Raw storage for an encoded snapshot.
pub trait SnapshotStore {
    /// Read the stored snapshot, or `None` if nothing has been saved.
    ///
    /// # Errors
    ///
    /// Returns an error if storage exists but cannot be read.
    fn read(&self) -> Result<Option<String>, PersistenceError>;

    /// Replace the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be written.
    fn write(&mut self, contents: &str) -> Result<(), PersistenceError>;
}

/// Snapshot stored in a JSON file.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Create a store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, contents: &str) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let temp = self.temp_path();
        fs::write(&temp, contents)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

/// In-memory snapshot storage.
///
/// Clones share the same slot, so a test can keep a handle while the store
/// owns another and then "reload" from it.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemorySnapshotStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with raw contents.
    #[must_use]
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(contents.into()))),
        }
    }

    /// Current raw contents.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.contents())
    }

    fn write(&mut self, contents: &str) -> Result<(), PersistenceError> {
        *self.slot.borrow_mut() = Some(contents.to_owned());
        Ok(())
    }
}

// =============================================================================
// Adapter
// =============================================================================

/// Persistence adapter owned by the application store.
pub struct Persistence {
    backend: Box<dyn SnapshotStore>,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Persistence {
    /// Wrap a storage backend.
    #[must_use]
    pub fn new(backend: impl SnapshotStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Load the stored snapshot, falling back to defaults on any failure.
    #[must_use]
    #[instrument(skip(self))]
    pub fn load(&self) -> Snapshot {
        match self.try_load() {
            Ok(Some(snapshot)) => {
                debug!(
                    cart_lines = snapshot.cart.lines().len(),
                    reviews = snapshot.reviews.len(),
                    signed_in = snapshot.user.is_some(),
                    "Rehydrated snapshot"
                );
                snapshot
            }
            Ok(None) => {
                debug!("No stored snapshot, using defaults");
                Snapshot::default()
            }
            Err(e) => {
                warn!(error = %e, "Discarding unreadable snapshot, using defaults");
                Snapshot::default()
            }
        }
    }

    /// Load the stored snapshot, reporting failures.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read or the contents are invalid.
    pub fn try_load(&self) -> Result<Option<Snapshot>, PersistenceError> {
        self.backend
            .read()?
            .map(|contents| Snapshot::decode(&contents))
            .transpose()
    }

    /// Write a snapshot, logging instead of failing.
    pub fn save(&mut self, snapshot: &Snapshot) {
        if let Err(e) = self.try_save(snapshot) {
            warn!(error = %e, "Failed to persist snapshot");
        }
    }

    /// Write a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or storage fails.
    pub fn try_save(&mut self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        let contents = snapshot.encode()?;
        self.backend.write(&contents)
    }
}

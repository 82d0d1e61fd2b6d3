//! Lazily loaded, memoized signing key shared by all fetch workers.
//!
//! The mutex is held across the whole load attempt, so however many workers
//! ask at once the key file is opened and parsed at most once. A failed
//! attempt is remembered and returned to every later caller.

use std::fmt::{Debug, Formatter};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use pgp::{Deserializable, SignedPublicKey, SignedSecretKey};
use tracing::{debug, warn};

use crate::error::KeyLoadError;

/// Turns the bytes of a key file into a usable key.
pub trait KeyParser: Send + Sync {
    type Key: Send + Sync;

    fn parse(&self, reader: &mut dyn Read) -> Result<Self::Key, String>;
}

/// OpenPGP key read from an ASCII-armored file.
#[derive(Debug)]
pub enum ArmoredKey {
    Secret(SignedSecretKey),
    Public(SignedPublicKey),
}

impl ArmoredKey {
    pub const fn is_secret(&self) -> bool {
        matches!(self, Self::Secret(_))
    }
}

/// Default parser: accepts an armored secret key, or a public key as fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArmoredKeyParser;

impl KeyParser for ArmoredKeyParser {
    type Key = ArmoredKey;

    fn parse(&self, reader: &mut dyn Read) -> Result<ArmoredKey, String> {
        let mut armored = String::new();
        reader
            .read_to_string(&mut armored)
            .map_err(|error| error.to_string())?;

        match SignedSecretKey::from_string(&armored) {
            Ok((key, _headers)) => Ok(ArmoredKey::Secret(key)),
            Err(secret_error) => match SignedPublicKey::from_string(&armored) {
                Ok((key, _headers)) => Ok(ArmoredKey::Public(key)),
                Err(public_error) => Err(format!(
                    "not a secret key ({secret_error}) nor a public key ({public_error})"
                )),
            },
        }
    }
}

enum KeyState<K> {
    Empty,
    Resolved(Arc<K>),
    Failed(KeyLoadError),
}

/// Memoizing loader for the optional key referenced by the configuration.
pub struct KeyCache<P: KeyParser = ArmoredKeyParser> {
    path: Option<PathBuf>,
    parser: P,
    state: Mutex<KeyState<P::Key>>,
}

impl KeyCache {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self::with_parser(path, ArmoredKeyParser)
    }
}

impl<P: KeyParser + Default> Default for KeyCache<P> {
    fn default() -> Self {
        Self::with_parser(None, P::default())
    }
}

impl<P: KeyParser> KeyCache<P> {
    /// An empty `path` counts as "no key configured".
    pub fn with_parser(path: Option<PathBuf>, parser: P) -> Self {
        Self {
            path: path.filter(|path| !path.as_os_str().is_empty()),
            parser,
            state: Mutex::new(KeyState::Empty),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Returns the key, loading it on the first call.
    ///
    /// `Ok(None)` means no key path is configured; nothing is locked or read.
    pub fn get(&self) -> Result<Option<Arc<P::Key>>, KeyLoadError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(None);
        };

        // A panic elsewhere never leaves the state half-written.
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match &*state {
            KeyState::Resolved(key) => return Ok(Some(Arc::clone(key))),
            KeyState::Failed(error) => return Err(error.clone()),
            KeyState::Empty => {}
        }

        match self.load(path) {
            Ok(key) => {
                debug!(path = %path.display(), "signing key loaded");
                *state = KeyState::Resolved(Arc::clone(&key));
                Ok(Some(key))
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "signing key unavailable for this run");
                *state = KeyState::Failed(error.clone());
                Err(error)
            }
        }
    }

    fn load(&self, path: &Path) -> Result<Arc<P::Key>, KeyLoadError> {
        let mut file = File::open(path).map_err(|error| KeyLoadError::Open {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;

        self.parser
            .parse(&mut file)
            .map(Arc::new)
            .map_err(|message| KeyLoadError::Parse {
                path: path.to_path_buf(),
                message,
            })
    }
}

impl<P: KeyParser> Debug for KeyCache<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let state = match &*self.state.lock().unwrap_or_else(PoisonError::into_inner) {
            KeyState::Empty => "empty",
            KeyState::Resolved(_) => "resolved",
            KeyState::Failed(_) => "failed",
        };
        f.debug_struct("KeyCache")
            .field("path", &self.path)
            .field("state", &state)
            .finish()
    }
}

//! Helpers for driving the library directly.

use std::io;
use std::path::{Path, PathBuf};

use age::x25519;
use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use sealbook::core::cipher::{Age, Cipher};
use sealbook::core::recipients::{RecipientDirectory, RecipientSet, RulesFile, Snapshot};
use sealbook::core::store::RecordStore;
use sealbook::error::{CipherError, Error, Result};

/// Noon UTC on a day of March 2024.
pub fn march(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
}

/// A generated identity and its public key.
pub struct Key {
    pub identity: x25519::Identity,
    pub public: String,
}

impl Key {
    pub fn generate() -> Self {
        let identity = x25519::Identity::generate();
        let public = identity.to_public().to_string();
        Self { identity, public }
    }
}

pub fn recipients(keys: &[&Key]) -> RecipientSet {
    RecipientSet::new(keys.iter().map(|k| k.public.as_str())).unwrap()
}

pub fn age(keys: &[&Key]) -> Age {
    Age::new(keys.iter().map(|k| k.identity.clone()).collect())
}

/// A store in a temp dir, encrypted to `owner`.
pub struct Fixture {
    pub dir: TempDir,
    pub root: PathBuf,
}

impl Fixture {
    pub fn new(owner: &Key) -> (Self, RecordStore) {
        let dir = TempDir::new().expect("failed to create temp dir");
        let root = dir.path().join("journal");
        let store = RecordStore::initialize(&root, &recipients(&[owner]), age(&[owner]))
            .expect("failed to initialize store");
        (Self { dir, root }, store)
    }

    pub fn open(&self, cipher: impl Cipher + 'static) -> Result<RecordStore> {
        RecordStore::open(&self.root, cipher)
    }

    pub fn rules_path(&self) -> PathBuf {
        self.root.join(".sealbook.toml")
    }

    pub fn backup_path(&self) -> PathBuf {
        self.root.join(".sealbook.toml.bak")
    }
}

/// Age cipher that refuses to encrypt any plaintext containing `poison`.
pub struct PoisonedCipher {
    inner: Age,
    poison: Vec<u8>,
}

impl PoisonedCipher {
    pub fn new(inner: Age, poison: &str) -> Self {
        Self {
            inner,
            poison: poison.as_bytes().to_vec(),
        }
    }
}

impl Cipher for PoisonedCipher {
    fn name(&self) -> &'static str {
        "poisoned-age"
    }

    fn encrypt(
        &self,
        plaintext: &[u8],
        recipients: &RecipientSet,
    ) -> std::result::Result<Vec<u8>, CipherError> {
        if plaintext
            .windows(self.poison.len())
            .any(|w| w == self.poison.as_slice())
        {
            return Err(CipherError::EncryptionFailed("injected fault".into()));
        }
        self.inner.encrypt(plaintext, recipients)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> std::result::Result<Vec<u8>, CipherError> {
        self.inner.decrypt(ciphertext)
    }
}

/// Rules file whose restore always fails.
pub struct UnrestorableRules(pub RulesFile);

impl RecipientDirectory for UnrestorableRules {
    fn load(&self) -> Result<RecipientSet> {
        self.0.load()
    }

    fn commit(&self, recipients: &RecipientSet) -> Result<()> {
        self.0.commit(recipients)
    }

    fn snapshot(&self) -> Result<Snapshot> {
        self.0.snapshot()
    }

    fn restore(&self, _snapshot: &Snapshot) -> Result<()> {
        Err(Error::Io(io::Error::new(io::ErrorKind::Other, "disk went away")))
    }

    fn discard(&self, snapshot: Snapshot) -> Result<()> {
        self.0.discard(snapshot)
    }
}

/// Decrypt a raw file with only `key`.
pub fn readable_by(path: &Path, key: &Key) -> bool {
    let bytes = std::fs::read(path).unwrap();
    age(&[key]).decrypt(&bytes).is_ok()
}

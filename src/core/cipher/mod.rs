//! Encryption provider.
//!
//! The store never builds ciphertext itself; it hands plaintext and the
//! current recipient set to a [`Cipher`] and reacts to success or failure.
//!
//! ## Backends
//!
//! - **age**: Default. x25519 public-key encryption with ASCII armor.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Cipher` trait
//! 2. Add the implementation in a new file
//! 3. Re-export from this module

mod age;

pub use self::age::{parse_recipient, Age};

use crate::core::recipients::RecipientSet;
use crate::error::CipherError;

/// Encryption provider trait.
///
/// Encryption targets an explicit recipient set; decryption uses whatever
/// identities the implementation holds (the "ambient" keys).
pub trait Cipher {
    /// Backend name for display/logging.
    fn name(&self) -> &'static str;

    /// Encrypt plaintext so that every recipient in the set can read it.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if a recipient is invalid or encryption fails.
    fn encrypt(&self, plaintext: &[u8], recipients: &RecipientSet) -> Result<Vec<u8>, CipherError>;

    /// Decrypt ciphertext with the ambient identities.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::DecryptionFailed` if no held identity matches
    /// or the ciphertext is malformed.
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError>;
}

impl<C: Cipher + ?Sized> Cipher for Box<C> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn encrypt(&self, plaintext: &[u8], recipients: &RecipientSet) -> Result<Vec<u8>, CipherError> {
        (**self).encrypt(plaintext, recipients)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        (**self).decrypt(ciphertext)
    }
}

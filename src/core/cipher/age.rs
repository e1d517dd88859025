//! Age encryption backend implementation.
//!
//! Provides encryption/decryption using the age format with x25519 keys
//! and ASCII armor encoding.

use std::io::{Read, Write};

use ::age::x25519;
use tracing::trace;

use super::Cipher;
use crate::core::recipients::RecipientSet;
use crate::error::CipherError;

/// Age-based cryptographic backend using x25519 keys.
///
/// Holds the identities used for decryption. Encryption only needs the
/// recipient set passed on each call.
pub struct Age {
    identities: Vec<x25519::Identity>,
}

impl Age {
    /// Create a backend that decrypts with the given identities.
    pub fn new(identities: Vec<x25519::Identity>) -> Self {
        Self { identities }
    }

    /// Number of identities available for decryption.
    pub fn identity_count(&self) -> usize {
        self.identities.len()
    }
}

impl std::fmt::Debug for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Age")
            .field("identities", &self.identities.len())
            .finish()
    }
}

impl Cipher for Age {
    fn name(&self) -> &'static str {
        "age"
    }

    fn encrypt(&self, plaintext: &[u8], recipients: &RecipientSet) -> Result<Vec<u8>, CipherError> {
        trace!(
            recipients = recipients.len(),
            plaintext_len = plaintext.len(),
            "encrypting"
        );

        let parsed = recipients
            .iter()
            .map(|r| parse_recipient(r))
            .collect::<Result<Vec<_>, _>>()?;

        let encryptor =
            ::age::Encryptor::with_recipients(parsed.iter().map(|r| r as &dyn ::age::Recipient))
                .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

        let mut encrypted = Vec::new();
        let armor = ::age::armor::ArmoredWriter::wrap_output(
            &mut encrypted,
            ::age::armor::Format::AsciiArmor,
        )
        .map_err(|e| CipherError::ArmorFailed(e.to_string()))?;
        let mut writer = encryptor
            .wrap_output(armor)
            .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

        writer
            .write_all(plaintext)
            .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;
        let armored = writer
            .finish()
            .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;
        armored
            .finish()
            .map_err(|e| CipherError::ArmorFailed(e.to_string()))?;

        trace!(ciphertext_len = encrypted.len(), "encrypted");
        Ok(encrypted)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        trace!(ciphertext_len = ciphertext.len(), "decrypting");

        let reader = ::age::armor::ArmoredReader::new(ciphertext);
        let decryptor = ::age::Decryptor::new(reader)
            .map_err(|e| CipherError::DecryptionFailed(e.to_string()))?;

        let mut reader = decryptor
            .decrypt(self.identities.iter().map(|i| i as &dyn ::age::Identity))
            .map_err(|e| CipherError::DecryptionFailed(e.to_string()))?;

        let mut decrypted = Vec::new();
        reader
            .read_to_end(&mut decrypted)
            .map_err(|e| CipherError::DecryptionFailed(e.to_string()))?;

        trace!(plaintext_len = decrypted.len(), "decrypted");
        Ok(decrypted)
    }
}

/// Parse a public key string into an age recipient.
///
/// # Errors
///
/// Returns `CipherError::InvalidPublicKey` if the key format is invalid.
pub fn parse_recipient(key: &str) -> Result<x25519::Recipient, CipherError> {
    key.parse::<x25519::Recipient>()
        .map_err(|_| CipherError::InvalidPublicKey(key.to_string()))
}

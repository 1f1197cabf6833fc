//! Encrypted storage for API keys.
//!
//! Keys are AES-256-CBC encrypted with material embedded at build time and
//! stored base64-encoded in the data directory, one file per service.

use super::data_storage::DataStorage;
use aes::Aes256;
use anyhow::Result;
use base64::prelude::*;
use block_modes::block_padding::Pkcs7;
use block_modes::{BlockMode, Cbc};
use dialoguer::{theme::ColorfulTheme, Password};
use std::fs;
use std::path::PathBuf;

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

type Aes256Cbc = Cbc<Aes256, Pkcs7>;

pub const CLOCKIFY_SECRET_FILE: &str = ".clockify_secret";
pub const TELEGRAM_SECRET_FILE: &str = ".telegram_secret";

#[derive(Clone, Debug)]
pub struct Secret {
    prompt: String,
    secret_file_path: PathBuf,
}

impl Secret {
    pub fn new(secret_name: &str, prompt: &str) -> Self {
        let secret_file_path = DataStorage::new().get_path(secret_name).unwrap_or_else(|_| PathBuf::from(secret_name));
        Self {
            prompt: prompt.to_owned(),
            secret_file_path,
        }
    }

    /// Returns the stored value without prompting, `None` if nothing usable is stored.
    pub fn get(&self) -> Option<String> {
        if !self.secret_file_path.exists() {
            return None;
        }
        match self.decrypt() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(path = %self.secret_file_path.display(), "unreadable secret: {}", e);
                None
            }
        }
    }

    /// Asks for a new value and stores it, replacing any previous one.
    pub fn prompt(&self) -> Result<String> {
        let value = Password::with_theme(&ColorfulTheme::default()).with_prompt(&self.prompt).interact()?;
        self.store(&value)?;
        Ok(value)
    }

    pub fn store(&self, value: &str) -> Result<()> {
        let cipher = Aes256Cbc::new_from_slices(APP_METADATA_ENCRYPTION_KEY, APP_METADATA_ENCRYPTION_IV)?;
        let encoded = BASE64_STANDARD.encode(cipher.encrypt_vec(value.as_bytes()));

        if let Some(parent) = self.secret_file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.secret_file_path, encoded)?;
        Ok(())
    }

    fn decrypt(&self) -> Result<String> {
        let encoded = fs::read_to_string(&self.secret_file_path)?;
        let ciphertext = BASE64_STANDARD.decode(encoded.trim())?;
        let cipher = Aes256Cbc::new_from_slices(APP_METADATA_ENCRYPTION_KEY, APP_METADATA_ENCRYPTION_IV)?;
        Ok(String::from_utf8(cipher.decrypt_vec(&ciphertext)?)?)
    }
}

//! Salary cipher: AES-256-CBC with a fresh random IV per encryption.
//!
//! Stored format: `hex(iv_16bytes) ":" hex(ciphertext)`, PKCS#7 padded.
//!
//! Absent or empty input is not an error in either direction: both
//! `encrypt` and `decrypt` map it to `Ok(None)`.
//!
//! CBC carries no authentication tag, so stored ciphertexts are kept
//! confidential but not tamper-evident.

use aes::Aes256;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};
use rand::RngCore;
use rand::rngs::OsRng;
use zeroize::Zeroize;

use crate::config::ConfigError;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

pub const SALARY_KEY_LEN: usize = 32;
const IV_LEN: usize = 16;
const SEPARATOR: char = ':';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    /// Not exactly `iv:ciphertext`
    #[error("malformed ciphertext: expected iv:ciphertext")]
    Malformed,
    #[error("ciphertext is not valid hex")]
    InvalidHex,
    #[error("initialization vector must be 16 bytes")]
    InvalidIv,
    #[error("decryption failed (wrong key or corrupted data)")]
    DecryptFailed,
    #[error("decrypted salary is not valid UTF-8")]
    InvalidUtf8,
}

/// Symmetric salary cipher, built once from configuration.
#[derive(Clone)]
pub struct SalaryCipher {
    key: [u8; SALARY_KEY_LEN],
}

impl Drop for SalaryCipher {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl std::fmt::Debug for SalaryCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalaryCipher").finish_non_exhaustive()
    }
}

impl SalaryCipher {
    /// Key must be exactly 32 bytes. No key derivation is applied.
    pub fn new(key: &str) -> Result<Self, ConfigError> {
        let bytes = key.as_bytes();
        if bytes.len() != SALARY_KEY_LEN {
            return Err(ConfigError::SalaryKeyLength(bytes.len()));
        }
        let mut k = [0u8; SALARY_KEY_LEN];
        k.copy_from_slice(bytes);
        Ok(Self { key: k })
    }

    /// Encrypt a plaintext salary → `hex(iv):hex(ct)`
    pub fn encrypt(&self, plaintext: Option<&str>) -> Result<Option<String>, CryptoError> {
        let Some(plaintext) = plaintext.filter(|p| !p.is_empty()) else {
            return Ok(None);
        };

        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut iv);

        let ciphertext = Aes256CbcEnc::new_from_slices(&self.key, &iv)
            .map_err(|_| CryptoError::InvalidIv)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        Ok(Some(format!(
            "{}{SEPARATOR}{}",
            hex::encode(iv),
            hex::encode(ciphertext)
        )))
    }

    /// Decrypt `hex(iv):hex(ct)` → plaintext salary
    pub fn decrypt(&self, stored: Option<&str>) -> Result<Option<String>, CryptoError> {
        let Some(stored) = stored.filter(|s| !s.is_empty()) else {
            return Ok(None);
        };

        let parts: Vec<&str> = stored.split(SEPARATOR).collect();
        let [iv_hex, ct_hex] = parts.as_slice() else {
            return Err(CryptoError::Malformed);
        };

        let iv = hex::decode(iv_hex).map_err(|_| CryptoError::InvalidHex)?;
        let ciphertext = hex::decode(ct_hex).map_err(|_| CryptoError::InvalidHex)?;
        if iv.len() != IV_LEN {
            return Err(CryptoError::InvalidIv);
        }

        let plaintext = Aes256CbcDec::new_from_slices(&self.key, &iv)
            .map_err(|_| CryptoError::InvalidIv)?
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|_| CryptoError::DecryptFailed)?;

        String::from_utf8(plaintext)
            .map(Some)
            .map_err(|_| CryptoError::InvalidUtf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "0123456789abcdef0123456789abcdef";

    fn cipher() -> SalaryCipher {
        SalaryCipher::new(KEY).unwrap()
    }

    #[test]
    fn test_roundtrip_recovers_plaintext() {
        let c = cipher();
        for salary in ["85000", "1,20,000.50", "₹ 9,99,999", "0"] {
            let stored = c.encrypt(Some(salary)).unwrap().unwrap();
            assert_eq!(c.decrypt(Some(&stored)).unwrap().as_deref(), Some(salary));
        }
    }

    #[test]
    fn test_fresh_iv_per_call() {
        let c = cipher();
        let a = c.encrypt(Some("85000")).unwrap().unwrap();
        let b = c.encrypt(Some("85000")).unwrap().unwrap();
        assert_ne!(a, b);
        assert_ne!(a.split(':').next(), b.split(':').next());
        assert_eq!(c.decrypt(Some(&a)).unwrap(), c.decrypt(Some(&b)).unwrap());
    }

    #[test]
    fn test_stored_format() {
        let stored = cipher().encrypt(Some("85000")).unwrap().unwrap();
        let (iv, ct) = stored.split_once(':').unwrap();
        assert_eq!(iv.len(), IV_LEN * 2);
        // one AES block for a short plaintext
        assert_eq!(ct.len(), 32);
        assert!(
            stored
                .chars()
                .all(|c| c == ':' || c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_absent_input_is_none_both_ways() {
        let c = cipher();
        assert_eq!(c.encrypt(None), Ok(None));
        assert_eq!(c.encrypt(Some("")), Ok(None));
        assert_eq!(c.decrypt(None), Ok(None));
        assert_eq!(c.decrypt(Some("")), Ok(None));
    }

    #[test]
    fn test_separator_count_must_be_exactly_one() {
        let c = cipher();
        assert_eq!(c.decrypt(Some("deadbeef")), Err(CryptoError::Malformed));
        assert_eq!(c.decrypt(Some("aa:bb:cc")), Err(CryptoError::Malformed));
        assert_eq!(c.decrypt(Some(":")), Err(CryptoError::InvalidIv));
    }

    #[test]
    fn test_bad_segments() {
        let c = cipher();
        assert_eq!(c.decrypt(Some("zz:00")), Err(CryptoError::InvalidHex));
        assert_eq!(c.decrypt(Some("0011:00")), Err(CryptoError::InvalidIv));

        let stored = c.encrypt(Some("85000")).unwrap().unwrap();
        let other = SalaryCipher::new("ffffffffffffffffffffffffffffffff").unwrap();
        // wrong key almost always breaks the padding; if not, the bytes differ
        match other.decrypt(Some(&stored)) {
            Err(_) => {}
            Ok(v) => assert_ne!(v.as_deref(), Some("85000")),
        }
    }

    #[test]
    fn test_key_length_enforced() {
        assert!(matches!(
            SalaryCipher::new("short"),
            Err(ConfigError::SalaryKeyLength(5))
        ));
        assert!(SalaryCipher::new(&"k".repeat(33)).is_err());
        assert!(SalaryCipher::new(&"k".repeat(32)).is_ok());
    }

    #[test]
    fn test_debug_hides_key() {
        assert!(!format!("{:?}", cipher()).contains("0123"));
    }
}

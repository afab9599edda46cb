//! AES-256-CBC transport layer for credential QR payloads.

use aes::Aes256;
use anyhow::{anyhow, Result};
use base64ct::{Base64, Encoding};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, KeyIvInit};
use std::fmt;

use super::QrError;

type Aes256CbcDec = cbc::Decryptor<Aes256>;
#[cfg(any(test, feature = "qr-mock"))]
type Aes256CbcEnc = cbc::Encryptor<Aes256>;

pub const KEY_LEN: usize = 32;
pub const IV_LEN: usize = 16;

/// Symmetric key material for the credential transport, decoded and
/// length-checked once at startup. Immutable for the process lifetime;
/// rotating the key means restarting with new configuration.
pub struct QrKeys {
    key: [u8; KEY_LEN],
    iv: [u8; IV_LEN],
}

impl fmt::Debug for QrKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("QrKeys(redacted)")
    }
}

impl QrKeys {
    /// Decode a Base64 key/IV pair. Wrong lengths are a configuration error,
    /// fatal to startup, never a per-request failure.
    ///
    /// # Errors
    /// Returns an error if either value is not valid Base64, if the key is
    /// not 32 bytes or the IV is not 16 bytes.
    pub fn from_base64(key_b64: &str, iv_b64: &str) -> Result<Self> {
        let key = Base64::decode_vec(key_b64.trim())
            .map_err(|_| anyhow!("QR encryption key is not valid Base64"))?;
        let iv = Base64::decode_vec(iv_b64.trim())
            .map_err(|_| anyhow!("QR encryption IV is not valid Base64"))?;

        let key: [u8; KEY_LEN] = key
            .try_into()
            .map_err(|v: Vec<u8>| anyhow!("QR key must be {KEY_LEN} bytes, got {}", v.len()))?;
        let iv: [u8; IV_LEN] = iv
            .try_into()
            .map_err(|v: Vec<u8>| anyhow!("QR IV must be {IV_LEN} bytes, got {}", v.len()))?;

        Ok(Self { key, iv })
    }

    /// Decrypt a Base64 ciphertext into the trimmed plaintext payload.
    ///
    /// Every failure mode (malformed Base64, wrong block alignment, padding
    /// failure, non-UTF-8 plaintext) collapses into [`QrError`]; the caller
    /// never learns which one tripped.
    ///
    /// # Errors
    /// Returns [`QrError::Ciphertext`], [`QrError::Decrypt`] or
    /// [`QrError::Shape`] depending on the stage that rejected the input.
    pub fn decrypt_qr(&self, encrypted: &str) -> Result<String, QrError> {
        let mut buf =
            Base64::decode_vec(encrypted.trim()).map_err(|_| QrError::Ciphertext)?;

        if buf.is_empty() || buf.len() % 16 != 0 {
            return Err(QrError::Decrypt);
        }

        let plaintext = Aes256CbcDec::new(&self.key.into(), &self.iv.into())
            .decrypt_padded_mut::<Pkcs7>(&mut buf)
            .map_err(|_| QrError::Decrypt)?;

        let text = std::str::from_utf8(plaintext)
            .map_err(|_| QrError::Shape)?
            .trim();

        if !super::is_payload(text) {
            return Err(QrError::Shape);
        }

        Ok(text.to_string())
    }

    /// Encrypt a plaintext payload to Base64 ciphertext. Mirror of
    /// [`Self::decrypt_qr`]; only compiled for tests and the mock tooling,
    /// production builds have no encryption path.
    #[cfg(any(test, feature = "qr-mock"))]
    #[must_use]
    pub fn encrypt_qr(&self, plain: &str) -> String {
        use cbc::cipher::BlockEncryptMut;

        let ciphertext = Aes256CbcEnc::new(&self.key.into(), &self.iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plain.as_bytes());

        Base64::encode_string(&ciphertext)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const KEY: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";
    const IV: &str = "AAAAAAAAAAAAAAAAAAAAAA==";

    #[test]
    fn test_from_base64() {
        assert!(QrKeys::from_base64(KEY, IV).is_ok());
    }

    #[test]
    fn test_from_base64_rejects_bad_material() {
        // not Base64 at all
        assert!(QrKeys::from_base64("!!!", IV).is_err());
        assert!(QrKeys::from_base64(KEY, "!!!").is_err());

        // wrong lengths (16-byte key, 32-byte IV)
        assert!(QrKeys::from_base64("AAAAAAAAAAAAAAAAAAAAAA==", IV).is_err());
        assert!(QrKeys::from_base64(KEY, KEY).is_err());
    }

    #[test]
    fn test_roundtrip() {
        let keys = QrKeys::from_base64(KEY, IV).unwrap();
        let ciphertext = keys.encrypt_qr("020000117101");
        assert_eq!(keys.decrypt_qr(&ciphertext).unwrap(), "020000117101");
    }

    #[test]
    fn test_wrong_key_is_rejected_not_a_crash() {
        let keys = QrKeys::from_base64(KEY, IV).unwrap();
        let other =
            QrKeys::from_base64("//////////////////////////////////////////8=", IV).unwrap();

        let ciphertext = keys.encrypt_qr("020000117101");

        // Garbage plaintext: either the padding check or the UTF-8/shape
        // check fires, the call must not panic.
        assert!(other.decrypt_qr(&ciphertext).is_err());
    }

    #[test]
    fn test_rejects_garbage_inputs() {
        let keys = QrKeys::from_base64(KEY, IV).unwrap();

        assert!(matches!(keys.decrypt_qr("not base64 !!"), Err(QrError::Ciphertext)));
        // valid Base64, not block aligned
        assert!(matches!(keys.decrypt_qr("AAAA"), Err(QrError::Decrypt)));
        assert!(matches!(keys.decrypt_qr(""), Err(QrError::Decrypt)));
    }

    #[test]
    fn test_debug_redacts_key_material() {
        let keys = QrKeys::from_base64(KEY, IV).unwrap();
        assert_eq!(format!("{keys:?}"), "QrKeys(redacted)");
    }
}

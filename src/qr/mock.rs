//! Development-only credential fixtures.
//!
//! The key/IV below are throwaway public values used to mint deterministic
//! test credentials while the official key material stays out-of-band. They
//! must never be configured on a production deployment; this module only
//! builds under `cfg(test)` or the `qr-mock` feature.

use super::{QrKeys, MOVEMENT};

pub const MOCK_KEY_B64: &str = "Vk1mtK1YwWZMxpHHKZNoJ8Mv5sB/57sNoDYKMPk97Do=";
pub const MOCK_IV_B64: &str = "UkXnuzeTy+gGVBRiG899UQ==";

/// Key pair backing the mock encoder.
///
/// # Panics
/// Never; the constants above are well formed.
#[must_use]
#[allow(clippy::expect_used)]
pub fn mock_keys() -> QrKeys {
    QrKeys::from_base64(MOCK_KEY_B64, MOCK_IV_B64).expect("mock key material is well formed")
}

/// Logical field values for a test credential, not yet zero-padded.
#[derive(Debug, Clone, Copy)]
pub struct MockQr<'a> {
    pub party_code: &'a str,
    pub jrv_number: &'a str,
    pub doc_type: &'a str,
    pub cargo_code: &'a str,
}

/// Zero-pad each field to its fixed width, concatenate and encrypt under the
/// mock key pair. Round-trips with the decrypt stage when the server is
/// configured with [`MOCK_KEY_B64`]/[`MOCK_IV_B64`].
#[must_use]
pub fn generate_mock_qr(params: &MockQr<'_>) -> String {
    let plain = format!(
        "{:0>2}{:0>5}{:0>2}{MOVEMENT}{:0>2}",
        params.party_code, params.jrv_number, params.doc_type, params.cargo_code,
    );

    mock_keys().encrypt_qr(&plain)
}

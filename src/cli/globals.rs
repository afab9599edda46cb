use secrecy::SecretString;

/// Secret-bearing arguments shared across actions: the Base64 key/IV pair
/// for the credential transport, supplied out-of-band.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub qr_key: SecretString,
    pub qr_iv: SecretString,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(qr_key: SecretString, qr_iv: SecretString) -> Self {
        Self { qr_key, qr_iv }
    }
}

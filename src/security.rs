use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Hash an account secret for storage
///
/// `credential = HMAC-SHA256(pepper, account_id || 0x00 || secret)`, hex
/// encoded. The account ID in the MAC input acts as a per-account salt, so
/// two accounts with the same secret store different credentials. The pepper
/// lives in an environment variable, never in the database, so a database
/// breach alone is not enough to mount a dictionary attack.
///
/// The stored value is never reversible and never leaves the store layer.
pub fn hash_credential(account_id: &str, secret: &str, pepper: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(pepper.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(account_id.as_bytes());
    mac.update(&[0x00]);
    mac.update(secret.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a presented secret against a stored credential
///
/// Recomputes the keyed hash and compares via `Mac::verify_slice`, which is
/// constant-time. A stored credential that is not valid hex never verifies.
pub fn verify_credential(account_id: &str, secret: &str, pepper: &str, stored: &str) -> bool {
    let expected = match hex::decode(stored) {
        Ok(bytes) => bytes,
        Err(_) => {
            tracing::error!("Stored credential is not valid hex");
            return false;
        }
    };

    let mut mac = match HmacSha256::new_from_slice(pepper.as_bytes()) {
        Ok(m) => m,
        Err(_) => {
            tracing::error!("Failed to create HMAC instance");
            return false;
        }
    };
    mac.update(account_id.as_bytes());
    mac.update(&[0x00]);
    mac.update(secret.as_bytes());

    mac.verify_slice(&expected).is_ok()
}

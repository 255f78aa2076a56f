use sha2::{Digest, Sha256};
use std::fmt;
use subtle::ConstantTimeEq;

const SALT_LEN: usize = 16;

/// Salted SHA-256 digest of an account password.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct PasswordHash {
    salt: [u8; SALT_LEN],
    digest: [u8; 32],
}

impl PasswordHash {
    pub(crate) fn new(password: &str) -> Self {
        Self::with_salt(password, rand::random())
    }

    fn with_salt(password: &str, salt: [u8; SALT_LEN]) -> Self {
        Self {
            salt,
            digest: digest(&salt, password),
        }
    }

    pub(crate) fn verify(&self, candidate: &str) -> bool {
        let candidate = digest(&self.salt, candidate);
        candidate[..].ct_eq(&self.digest[..]).into()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

fn digest(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

//! Password storage. Hashes are Argon2id PHC strings, so the salt and cost
//! parameters are stored alongside the digest in `users.password_hash`.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{Error, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

fn argon2id() -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default())
}

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(argon2id().hash_password(password.as_bytes(), &salt)?.to_string())
}

/// Check `password` against a stored hash.
///
/// A wrong password is `Ok(false)`. `Err` means the stored hash is corrupt.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, Error> {
    let stored = PasswordHash::new(stored_hash)?;
    match argon2id().verify_password(password.as_bytes(), &stored) {
        Ok(()) => Ok(true),
        Err(Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_hash_is_argon2id_phc() {
        let hash = hash_password("the-left-hand-of-darkness").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$"));
        assert!(verify_password("the-left-hand-of-darkness", &hash).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let first = hash_password("the-dispossessed").unwrap();
        let second = hash_password("the-dispossessed").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn wrong_password_is_false_not_error() {
        let hash = hash_password("real-password").unwrap();
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn corrupt_hash_is_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }
}

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Well-formed Argon2id hash with the fixed work factor that no password
/// matches. Verifying against it costs as much as checking a real credential.
pub const DECOY_HASH: &str = "$argon2id$v=19$m=7168,t=10,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Password hashing implementation.
///
/// Provides salted one-way hashing (internally uses Argon2id) with a fixed
/// work factor.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Number of Argon2 passes over memory.
    pub const WORK_FACTOR: u32 = 10;

    /// Memory cost in KiB.
    pub const MEMORY_COST_KIB: u32 = 7 * 1024;

    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher configured with Argon2id and the fixed work factor
    pub fn new() -> Self {
        Self
    }

    /// Argon2id instance with the fixed work factor.
    ///
    /// # Errors
    /// * `HashingFailed` - The fixed parameters were rejected
    fn argon2() -> Result<Argon2<'static>, PasswordError> {
        let params = Params::new(Self::MEMORY_COST_KIB, Self::WORK_FACTOR, 1, None)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    /// Hash a plaintext password securely.
    ///
    /// A fresh random salt is generated on every call, so hashing the same
    /// password twice yields two different strings.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Self::argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Parameters are read from the stored PHC string, so hashes produced
    /// with other Argon2 settings still verify.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches; false on mismatch or malformed hash
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is malformed");
                return false;
            }
        };

        // Cost parameters come from the stored hash, not from this instance
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "My_secure_passw0rd!";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = PasswordHasher::new();
        let password = "Repeat3d!";

        let first = hasher.hash(password).expect("Failed to hash password");
        let second = hasher.hash(password).expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify(password, &first));
        assert!(hasher.verify(password, &second));
    }

    #[test]
    fn test_hash_records_work_factor() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("Passw0rd!").expect("Failed to hash password");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("t=10"));
    }

    #[test]
    fn test_fixed_parameters_are_accepted() {
        let argon2 = PasswordHasher::argon2().expect("Fixed parameters rejected");

        assert_eq!(argon2.params().t_cost(), PasswordHasher::WORK_FACTOR);
        assert_eq!(argon2.params().m_cost(), PasswordHasher::MEMORY_COST_KIB);
    }

    #[test]
    fn test_decoy_hash_costs_the_same_as_a_real_one() {
        let hasher = PasswordHasher::new();
        let real = hasher.hash("Passw0rd!").expect("Failed to hash password");

        let real = PasswordHash::new(&real).unwrap();
        let decoy = PasswordHash::new(DECOY_HASH).expect("Decoy hash must parse");

        assert_eq!(decoy.algorithm, real.algorithm);
        assert_eq!(
            Params::try_from(&decoy).unwrap(),
            Params::try_from(&real).unwrap()
        );
        assert!(!hasher.verify("Passw0rd!", DECOY_HASH));
        assert!(!hasher.verify("", DECOY_HASH));
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "$argon2id$v=19$garbage"));
    }
}

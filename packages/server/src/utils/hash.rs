use bcrypt::{BcryptError, hash, verify};

/// bcrypt cost factor used for all stored password hashes.
pub const BCRYPT_COST: u32 = 12;

/// Hash a password with bcrypt at [`BCRYPT_COST`].
pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    hash(password, BCRYPT_COST)
}

/// Compare a plaintext password against a stored hash.
pub fn verify_password(password: &str, hashed: &str) -> Result<bool, BcryptError> {
    verify(password, hashed)
}

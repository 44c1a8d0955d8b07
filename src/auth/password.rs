//! Salted one-way password hashing. Plaintext is never stored or logged;
//! a hashing failure is fatal to the request that triggered it.

pub use bcrypt::BcryptError;

/// Fixed bcrypt work factor.
const WORK_FACTOR: u32 = 10;

pub fn hash(plaintext: &str) -> Result<String, BcryptError> {
    bcrypt::hash(plaintext, WORK_FACTOR)
}

pub fn verify(plaintext: &str, hashed: &str) -> Result<bool, BcryptError> {
    bcrypt::verify(plaintext, hashed)
}

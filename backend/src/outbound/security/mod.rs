//! Credential adapters: bearer token signing and password hashing.

mod argon2_hasher;
mod jwt_codec;

pub use argon2_hasher::Argon2PasswordHasher;
pub use jwt_codec::{JwtTokenCodec, TOKEN_TTL_DAYS};

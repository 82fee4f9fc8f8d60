use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Token {operation} failed: {message}")]
    Token { operation: String, message: String },
}

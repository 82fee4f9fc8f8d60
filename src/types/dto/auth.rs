use poem_openapi::Object;

/// Request body for end-user self-signup
#[derive(Object, Debug)]
pub struct SignupRequest {
    pub email: String,
    pub display_name: String,
    pub password: String,
}

/// Request body for login
#[derive(Object, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response
#[derive(Object, Debug)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Expiry as a unix timestamp
    pub expires_at: i64,
}

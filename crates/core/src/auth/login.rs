use serde::{Deserialize, Serialize};
use thiserror::Error;

const API_IDENTIFIER: &str = "xiberlinc";
const API_PASSWORD: &str = "20250627";
const DEMO_IDENTIFIER: &str = "Xiberlinc";
const DEMO_PASSWORD: &str = "123456";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Invalid username or password")]
    InvalidUsernameOrPassword,
}

impl AuthError {
    /// HTTP-style status for the error payload.
    pub fn status(&self) -> u16 {
        401
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
            status: self.status(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: String,
    pub token: String,
    pub expires_in: u64,
}

/// JSON shape of a rejected login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub status: u16,
}

/// The login endpoint: one fixed account, a fake token on success.
pub fn authenticate(request: &LoginRequest) -> Result<LoginResponse, AuthError> {
    if request.identifier == API_IDENTIFIER && request.password == API_PASSWORD {
        log::info!("login accepted for {}", request.identifier);
        Ok(LoginResponse {
            user_id: "fake-user-1".into(),
            token: "fake-jwt-token".into(),
            expires_in: 3600,
        })
    } else {
        log::warn!("login rejected for {:?}", request.identifier);
        Err(AuthError::InvalidCredentials)
    }
}

/// The stand-alone demo login page, which checks its own pair locally.
pub fn demo_login(identifier: &str, password: &str) -> Result<(), AuthError> {
    if identifier == DEMO_IDENTIFIER && password == DEMO_PASSWORD {
        log::info!("demo login accepted for {identifier}");
        Ok(())
    } else {
        log::warn!("demo login rejected for {identifier:?}");
        Err(AuthError::InvalidUsernameOrPassword)
    }
}

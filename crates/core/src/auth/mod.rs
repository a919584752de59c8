//! Mock accounts: hardcoded logins, an in-memory signup directory and the
//! participant-info store. Nothing here is secure; it only drives the page flow.

pub mod login;
pub mod signup;
pub mod user_info;

pub use login::{AuthError, ErrorBody, LoginRequest, LoginResponse, authenticate, demo_login};
pub use signup::{AccountDirectory, SignupError, SignupForm};
pub use user_info::{Gender, UserInfo, UserInfoPatch};

pub mod auth;

pub use auth::{
    LoginRequest, LogoutRequest, MessageResponse, ProtectedDataResponse, RefreshTokenRequest,
    RegisterRequest, TokenPairResponse,
};

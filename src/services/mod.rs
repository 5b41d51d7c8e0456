pub mod auth;

pub use auth::{
    AuthService, ClientFactory, CredentialsProvider, DefaultClientFactory, LoginOutcome,
    LoginRequest, StdinCredentialsProvider,
};

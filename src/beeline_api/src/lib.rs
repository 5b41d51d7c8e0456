pub mod account;
pub mod client;
pub mod constants;
pub mod types;

use client::{config::ClientConfig, session::SessionOptions, BeelineWebClient};

/// Build a client against the production portal.
pub fn get_client(options: SessionOptions) -> client::error::Result<BeelineWebClient> {
    BeelineWebClient::new(ClientConfig::default(), options)
}

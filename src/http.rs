//! Shared HTTP client construction

use reqwest::Client;

use crate::Result;

/// Default `User-Agent` header sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("marine-telex/", env!("CARGO_PKG_VERSION"));

/// Build the client used by the currents and imagery fetchers.
///
/// No timeout and no retry layer: a request either completes or fails once.
pub fn client(user_agent: &str) -> Result<Client> {
    Ok(Client::builder().user_agent(user_agent).build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_with_default_agent() {
        assert!(client(DEFAULT_USER_AGENT).is_ok());
        assert!(DEFAULT_USER_AGENT.starts_with("marine-telex/"));
    }
}

use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::{Result, SolverError};

/// An HTTP client capped to an allowlist of hosts.
///
/// Cookies returned by the Equation API are kept in the client's cookie store
/// and replayed on later requests, so a session established by the API
/// survives across solves.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a client with an empty allowlist.
    ///
    /// `timeout` of `None` waits for the API indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = ClientBuilder::new().cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, allowlist: HashSet::new() })
    }

    /// Creates a client whose allowlist holds the host of `base`.
    pub fn for_base_url(base: &Url, timeout: Option<Duration>) -> Result<Self> {
        let mut client = Self::new(timeout)?;
        match base.host_str() {
            Some(host) => client.allow_domain(host),
            None => return Err(SolverError::Sandbox(format!("base URL {} has no host", base))),
        }
        Ok(client)
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_ascii_lowercase());
    }

    /// Validates if a URL is permitted under the current sandbox policy.
    pub fn is_allowed(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else { return false };
        let host = host.to_ascii_lowercase();
        // Exact match or a subdomain of an allowed domain
        self.allowlist
            .iter()
            .any(|allowed| host == *allowed || host.ends_with(&format!(".{}", allowed)))
    }

    /// Starts a GET request if the URL passes the allowlist.
    pub fn get(&self, url: &Url) -> Result<reqwest::RequestBuilder> {
        if !self.is_allowed(url) {
            debug!(host = url.host_str().unwrap_or(""), "Blocked request outside allowlist");
            return Err(SolverError::Sandbox(format!(
                "domain not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.get(url.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_base_host_is_allowed() {
        let client = SandboxClient::for_base_url(&url("http://localhost:9090"), None).unwrap();
        assert!(client.is_allowed(&url("http://localhost:9090/api/equation/task1?equation=x")));
        assert!(!client.is_allowed(&url("http://example.com/api/equation/task1")));
    }

    #[test]
    fn test_subdomain_and_case() {
        let mut client = SandboxClient::new(None).unwrap();
        client.allow_domain("Solver.Example.org");
        assert!(client.is_allowed(&url("https://api.solver.example.org/x")));
        assert!(!client.is_allowed(&url("https://evilsolver.example.org/x")));
    }

    #[test]
    fn test_get_outside_allowlist_is_rejected() {
        let client = SandboxClient::new(None).unwrap();
        let err = client.get(&url("http://localhost:9090/")).unwrap_err();
        assert!(matches!(err, SolverError::Sandbox(_)));
    }
}

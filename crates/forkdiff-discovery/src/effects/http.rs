use std::io::Read;

/// Blocking HTTP client abstraction.
///
/// This trait provides the minimal interface needed for discovery: a single
/// GET that hands back the response body as a reader. Implementations own
/// their timeout and redirect configuration and must not retry.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - Scripted in-memory clients for testing
pub trait HttpClient: Send + Sync {
    /// Error type for transport failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Response body. Dropping it releases the underlying connection.
    type Body: Read;

    /// Issue a GET request.
    ///
    /// # Errors
    ///
    /// Returns an error for transport failures only (DNS, connect, TLS,
    /// timeout). A non-2xx response is still returned as a body; whether it
    /// holds anything useful is for the parser to decide.
    fn get(&self, url: &str, headers: &[(String, String)]) -> Result<Self::Body, Self::Error>;
}

impl<C: HttpClient> HttpClient for &C {
    type Error = C::Error;
    type Body = C::Body;

    fn get(&self, url: &str, headers: &[(String, String)]) -> Result<Self::Body, Self::Error> {
        (**self).get(url, headers)
    }
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use crate::data::ResolverOptions;

    /// Production HTTP client implementation using reqwest's blocking API.
    pub struct ReqwestClient {
        client: reqwest::blocking::Client,
    }

    impl ReqwestClient {
        /// Create a client whose requests time out after `options.timeout`.
        pub fn new(options: &ResolverOptions) -> Result<Self, reqwest::Error> {
            let client = reqwest::blocking::Client::builder()
                .timeout(options.timeout)
                .build()?;
            Ok(Self { client })
        }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;
        type Body = reqwest::blocking::Response;

        fn get(&self, url: &str, headers: &[(String, String)]) -> Result<Self::Body, Self::Error> {
            let mut request = self.client.get(url);
            for (key, value) in headers {
                request = request.header(key, value);
            }
            request.send()
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;

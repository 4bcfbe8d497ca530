//! HTTP client shared by the registry resolver and the translator.

use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("depscan/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client used for every outbound request.
///
/// `timeout` of `None` leaves requests unbounded.
pub fn build_client(timeout: Option<Duration>) -> reqwest::Result<Client> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::header;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_build_client() {
        assert!(build_client(None).is_ok());
        assert!(build_client(Some(Duration::from_secs(5))).is_ok());
    }

    #[tokio::test]
    async fn test_build_client_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let response = build_client(None).unwrap().get(server.uri()).send().await.unwrap();
        assert_eq!(response.status(), 200);
    }
}

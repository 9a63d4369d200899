use std::future::Future;

use reqwest::{
    Client, Method, Request, StatusCode, Url,
    header::{CONTENT_TYPE, HeaderValue},
};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::{
    build_info::REQWEST_VERSION,
    dto::requests::signup_request::SignupPayload,
    engine::task::VirtualUserTask,
    errors::code_error::{CodeError, LoadTestResult, code_err},
    init::config::RunConfig,
};

/// Sends one signup POST per iteration for whichever virtual user calls it.
///
/// The response is handed back untouched: any status code, 2xx or not, is a
/// successful send. Only transport failures (DNS, refused connection,
/// timeout) come back as errors, and nothing is retried.
#[derive(Debug, Clone)]
pub struct SignupRequestGenerator {
    client: Client,
    target_url: Url,
}

impl SignupRequestGenerator {
    pub fn new(client: Client, target_url: Url) -> Self {
        SignupRequestGenerator { client, target_url }
    }

    pub fn from_config(config: &RunConfig) -> LoadTestResult<Self> {
        let client = Client::builder()
            .user_agent(format!(
                "{}/{} ({})",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                REQWEST_VERSION
            ))
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| code_err(CodeError::CLIENT_BUILD_ERROR, e))?;

        Ok(Self::new(client, config.target_url.clone()))
    }

    pub fn target_url(&self) -> &Url {
        &self.target_url
    }

    pub fn build_request(&self, vu: u64) -> LoadTestResult<Request> {
        let body = SignupPayload::for_virtual_user(vu)
            .to_json_body()
            .map_err(|e| code_err(CodeError::PAYLOAD_SERIALIZATION_ERROR, e))?;

        self.client
            .request(Method::POST, self.target_url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .build()
            .map_err(|e| code_err(CodeError::REQUEST_BUILD_ERROR, e))
    }

    pub async fn send_signup(&self, vu: u64) -> LoadTestResult<StatusCode> {
        let request = self.build_request(vu)?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| code_err(CodeError::REQUEST_SEND_ERROR, e))?;

        Ok(response.status())
    }
}

impl VirtualUserTask for SignupRequestGenerator {
    fn run_iteration(&self, vu: u64) -> impl Future<Output = ()> + Send {
        async move {
            let start = Instant::now();
            match self.send_signup(vu).await {
                Ok(status) => {
                    debug!(vu, status = status.as_u16(), duration = ?start.elapsed(), "Signup sent")
                }
                Err(e) => {
                    warn!(vu, duration = ?start.elapsed(), error = %e, "Signup request failed")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{body_json_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const STAGING_SIGNUP_URL: &str = "https://my-staging.domain/signup";

    fn generator_for(url: &str) -> SignupRequestGenerator {
        let client = Client::builder().no_proxy().build().unwrap();
        SignupRequestGenerator::new(client, Url::parse(url).unwrap())
    }

    #[test]
    fn test_request_shape_is_fixed_for_every_vu() {
        let generator = generator_for(STAGING_SIGNUP_URL);

        for vu in [0u64, 1, 7, 20, 100_000] {
            let request = generator.build_request(vu).unwrap();
            assert_eq!(request.method(), &Method::POST);
            assert_eq!(request.url().as_str(), STAGING_SIGNUP_URL);
            assert_eq!(
                request.headers().get(CONTENT_TYPE).unwrap(),
                "application/json"
            );
        }
    }

    #[test]
    fn test_request_body_for_vu_7() {
        let generator = generator_for(STAGING_SIGNUP_URL);
        let request = generator.build_request(7).unwrap();
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();

        assert_eq!(
            body,
            br#"{"username":"user7","password":"P@ssw0rd!","email":"u7@example.com"}"#
        );
    }

    #[tokio::test]
    async fn test_send_signup_posts_json_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/signup"))
            .and(header("content-type", "application/json"))
            .and(body_json_string(
                r#"{"username":"user3","password":"P@ssw0rd!","email":"u3@example.com"}"#,
            ))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let generator = generator_for(&format!("{}/signup", server.uri()));
        let status = generator.send_signup(3).await.unwrap();

        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_non_2xx_is_returned_not_raised() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/signup"))
            .respond_with(ResponseTemplate::new(409).set_body_string("user exists"))
            .mount(&server)
            .await;

        let generator = generator_for(&format!("{}/signup", server.uri()));

        assert_eq!(
            generator.send_signup(1).await.unwrap(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            generator.send_signup(1).await.unwrap(),
            StatusCode::CONFLICT
        );
    }

    #[tokio::test]
    async fn test_connection_failure_is_send_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let generator = generator_for(&format!("http://{addr}/signup"));
        let err = generator.send_signup(5).await.unwrap_err();

        assert!(err.is(CodeError::REQUEST_SEND_ERROR), "got {err}");
    }

    #[tokio::test]
    async fn test_timeout_is_send_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let config = RunConfig::new(
            &format!("{}/signup", server.uri()),
            1,
            Duration::from_secs(1),
            Duration::from_secs(1),
            Duration::from_millis(200),
        )
        .unwrap();
        let generator = SignupRequestGenerator::from_config(&config).unwrap();
        let err = generator.send_signup(2).await.unwrap_err();

        assert!(err.is(CodeError::REQUEST_SEND_ERROR), "got {err}");
    }

    #[tokio::test]
    async fn test_iteration_sends_one_request_per_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/signup"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&server)
            .await;

        let generator = generator_for(&format!("{}/signup", server.uri()));
        generator.run_iteration(11).await;
        generator.run_iteration(12).await;

        let received = server.received_requests().await.unwrap();
        let usernames: Vec<String> = received
            .iter()
            .map(|r| {
                let v: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
                v["username"].as_str().unwrap().to_owned()
            })
            .collect();
        assert_eq!(usernames, ["user11", "user12"]);
    }
}

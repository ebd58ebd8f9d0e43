use anyhow::Result;
use async_trait::async_trait;
use event_manager::fetch::auth::UrlParam;
use event_manager::fetch::{BasicClient, HttpClient, fetch_json};
use event_manager::normalize::CleanZipcode;
use event_manager::services::civic_api::{Representative, RepresentativeLookup};
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/civicinfo/v2";

#[derive(Deserialize)]
struct RepresentativeInfoResponse {
    #[serde(default)]
    officials: Vec<Representative>,
}

/// Google Civic Information API client restricted to national legislators.
pub struct CivicInfoClient<C> {
    http: C,
    base_url: String,
}

impl CivicInfoClient<UrlParam<BasicClient>> {
    /// Creates a client that sends `api_key` as the `key` query parameter.
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self::with_client(UrlParam::new(BasicClient::new(), "key", api_key), base_url)
    }
}

impl<C: HttpClient> CivicInfoClient<C> {
    pub fn with_client(http: C, base_url: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    fn representatives_url(&self, zipcode: &CleanZipcode) -> Result<Url> {
        let url = Url::parse_with_params(
            &format!("{}/representatives", self.base_url.trim_end_matches('/')),
            &[
                ("address", zipcode.as_str()),
                ("levels", "country"),
                ("roles", "legislatorUpperBody"),
                ("roles", "legislatorLowerBody"),
            ],
        )?;
        Ok(url)
    }
}

#[async_trait]
impl<C: HttpClient> RepresentativeLookup for CivicInfoClient<C> {
    #[tracing::instrument(skip(self), fields(zipcode = %zipcode))]
    async fn legislators(&self, zipcode: &CleanZipcode) -> Result<Vec<Representative>> {
        let url = self.representatives_url(zipcode)?;
        let response: RepresentativeInfoResponse = fetch_json(&self.http, url.as_str()).await?;
        debug!(officials = response.officials.len(), "Representatives fetched");
        Ok(response.officials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use event_manager::normalize::clean_zipcode;
    use std::sync::Mutex;

    /// Answers every request with a fixed status and body, recording the URL.
    struct Canned {
        status: u16,
        body: &'static str,
        urls: Mutex<Vec<String>>,
    }

    impl Canned {
        fn new(status: u16, body: &'static str) -> Self {
            Self {
                status,
                body,
                urls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl HttpClient for Canned {
        async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            self.urls.lock().unwrap().push(req.url().to_string());
            let resp = http::Response::builder()
                .status(self.status)
                .body(self.body)
                .unwrap();
            Ok(reqwest::Response::from(resp))
        }
    }

    #[tokio::test]
    async fn test_parses_officials() {
        let body = r#"{
            "kind": "civicinfo#representativeInfoResponse",
            "officials": [
                {"name": "Eleanor Holmes Norton", "party": "Democratic Party", "urls": ["https://norton.house.gov/"]},
                {"name": "Second Official"}
            ]
        }"#;
        let client = CivicInfoClient::with_client(Canned::new(200, body), None);

        let reps = client.legislators(&clean_zipcode("20010")).await.unwrap();
        assert_eq!(reps.len(), 2);
        assert_eq!(reps[0].name, "Eleanor Holmes Norton");
        assert_eq!(reps[0].party.as_deref(), Some("Democratic Party"));
        assert_eq!(reps[1], Representative::named("Second Official"));
    }

    #[tokio::test]
    async fn test_builds_country_legislator_query() {
        let client = CivicInfoClient::with_client(
            Canned::new(200, "{}"),
            Some("http://localhost:9000/civicinfo/v2/".to_string()),
        );

        let reps = client.legislators(&clean_zipcode("2703")).await.unwrap();
        assert!(reps.is_empty());

        let urls = client.http.urls.lock().unwrap();
        assert_eq!(
            urls.as_slice(),
            ["http://localhost:9000/civicinfo/v2/representatives?address=02703&levels=country&roles=legislatorUpperBody&roles=legislatorLowerBody"]
        );
    }

    #[tokio::test]
    async fn test_error_status_fails() {
        let client = CivicInfoClient::with_client(
            Canned::new(400, r#"{"error": {"message": "Failed to parse address"}}"#),
            None,
        );

        let err = client.legislators(&clean_zipcode("00000")).await.unwrap_err();
        assert!(err.to_string().contains("400"));
    }
}

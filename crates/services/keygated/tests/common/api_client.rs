use std::str::FromStr;

use reqwest::Url;
use serde::Serialize;

pub struct ApiClient {
    pub url: &'static str,
}

impl ApiClient {
    fn path(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.url)
    }

    pub async fn post<T: Serialize>(
        &self,
        client: &reqwest::Client,
        endpoint: &str,
        body: &T,
    ) -> reqwest::Response {
        let url = Url::from_str(&self.path(endpoint)).unwrap();

        client
            .post(url)
            .json(body)
            .send()
            .await
            .expect("Failed to send http request")
    }

    pub async fn get(&self, client: &reqwest::Client, endpoint: &str) -> reqwest::Response {
        let url = Url::from_str(&self.path(endpoint)).unwrap();

        client
            .get(url)
            .send()
            .await
            .expect("Failed to send http request")
    }

    pub async fn get_with_token(
        &self,
        client: &reqwest::Client,
        endpoint: &str,
        token: &str,
    ) -> reqwest::Response {
        let url = Url::from_str(&self.path(endpoint)).unwrap();

        client
            .get(url)
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send http request")
    }
}

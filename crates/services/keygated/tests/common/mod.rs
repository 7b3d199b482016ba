#![allow(dead_code)]

use api_client::ApiClient;

pub mod api_client;
pub mod db_test_context;
pub mod test_context;

pub static KEYGATED: ApiClient = ApiClient {
    url: "http://localhost:3000",
};

pub fn from_env(var: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| panic!("Env Variable '{}' missing", var))
}

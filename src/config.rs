use crate::error::{config::ConfigError, AppError};

const PUBLIC_SUFFIX_LIST_URL: &str = "https://publicsuffix.org/list/public_suffix_list.dat";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

pub struct Config {
    pub database_url: String,
    pub listen_addr: String,

    /// Public base URL of the panel, used in mailed links.
    pub app_url: String,

    /// Key of the blind-index email hash.
    pub email_hash_key: String,

    pub mail_api_url: String,
    pub mail_api_token: String,
    pub mail_from: String,

    pub public_suffix_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: require("DATABASE_URL")?,
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string()),
            app_url: require("APP_URL")?,
            email_hash_key: require("EMAIL_HASH_KEY")?,
            mail_api_url: require("MAIL_API_URL")?,
            mail_api_token: require("MAIL_API_TOKEN")?,
            mail_from: require("MAIL_FROM")?,
            public_suffix_url: std::env::var("PUBLIC_SUFFIX_LIST_URL")
                .unwrap_or_else(|_| PUBLIC_SUFFIX_LIST_URL.to_string()),
        })
    }
}

fn require(name: &str) -> Result<String, AppError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()).into())
}

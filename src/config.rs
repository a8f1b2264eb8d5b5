use figment::{Figment, providers::Env};
use serde::Deserialize;
use std::sync::LazyLock;
use url::Url;

/// Process-wide configuration, read once from the environment.
/// `dotenvy` has already populated the environment by the time this
/// is first dereferenced (see `main.rs`).
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Figment::from(Env::raw())
        .extract()
        .expect("invalid environment configuration")
});

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// HS256 signing secret for session tokens. Must be non-empty;
    /// `main` refuses to start otherwise.
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(default = "default_loglevel")]
    pub loglevel: String,

    /// Admin user seeded at startup when both fields are present.
    #[serde(default)]
    pub admin_email: Option<String>,
    #[serde(default)]
    pub admin_password: Option<String>,

    /// Drop the `Secure` attribute on the session cookie (local HTTP dev).
    #[serde(default)]
    pub insecure_cookie: bool,

    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,

    #[serde(default = "default_geo_base_url")]
    pub geo_base_url: Url,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            jwt_secret: String::new(),
            listen_addr: default_listen_addr(),
            loglevel: default_loglevel(),
            admin_email: None,
            admin_password: None,
            insecure_cookie: false,
            token_ttl_hours: default_token_ttl_hours(),
            geo_base_url: default_geo_base_url(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite:voltlead.sqlite".to_string()
}

fn default_listen_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_loglevel() -> String {
    "info".to_string()
}

fn default_token_ttl_hours() -> i64 {
    24
}

fn default_geo_base_url() -> Url {
    Url::parse("https://servicodados.ibge.gov.br/api/v1/localidades/")
        .expect("geo base URL is valid")
}

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::VoltError;

/// State as returned by the IBGE localidades API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoState {
    pub id: i64,
    pub sigla: String,
    pub nome: String,
}

/// Municipality as returned by the IBGE localidades API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoCity {
    pub id: i64,
    pub nome: String,
}

/// Thin client for the IBGE localidades API, used to feed the form's
/// city/state pickers. GET-only; results are proxied verbatim.
#[derive(Clone)]
pub struct GeoClient {
    http: Client,
    base: Url,
}

impl GeoClient {
    pub fn new(http: Client, base: Url) -> Self {
        Self { http, base }
    }

    /// All states, ordered by name.
    pub async fn states(&self) -> Result<Vec<GeoState>, VoltError> {
        let mut url = self.base.join("estados")?;
        url.set_query(Some("orderBy=nome"));
        self.fetch(url).await
    }

    /// Municipalities of one state, ordered by name.
    /// Caller validates `uf` before this is reached.
    pub async fn cities(&self, uf: &str) -> Result<Vec<GeoCity>, VoltError> {
        let mut url = self.base.join(&format!("estados/{uf}/municipios"))?;
        url.set_query(Some("orderBy=nome"));
        self.fetch(url).await
    }

    async fn fetch<T: for<'de> Deserialize<'de>>(&self, url: Url) -> Result<T, VoltError> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(VoltError::GeoStatus(status));
        }
        Ok(resp.json().await?)
    }
}

//! Categories and the health probe.

use toolhub_core::{Category, HealthStatus, Language};

use crate::error::ApiResult;
use crate::http::HttpBackend;
use crate::parsing::{parse_categories, parse_health};
use crate::url::{build_categories_url, build_health_url};

use super::CatalogClient;

impl<B: HttpBackend> CatalogClient<B> {
    pub(crate) async fn list_categories(&self, language: Language) -> ApiResult<Vec<Category>> {
        let url = build_categories_url(&self.config, language);
        let envelope = self.get_envelope(&url).await?;
        Ok(parse_categories(&envelope.data))
    }

    /// Query `/health`. The body is a bare object, not an envelope.
    pub(crate) async fn check_health(&self) -> ApiResult<HealthStatus> {
        let url = build_health_url(&self.config);
        let body: serde_json::Value = self.backend.get_json(&url).await?;
        Ok(parse_health(&body))
    }
}

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use shared::{
    domain::Product,
    error::ApiErrorBody,
    protocol::{HealthResponse, NewProduct, ProductCount},
};
use tracing::{debug, info, warn};
use url::Url;

pub mod config;
pub mod controller;
pub mod error;
pub mod present;
pub mod view;

pub use controller::ViewController;
pub use error::FetchError;
pub use view::{Effect, Outcome, Phase, ViewState, Workflow};

/// The three calls the view workflows make against the catalogue API.
#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn fetch_product(&self, product_id: &str) -> Result<Product, FetchError>;
    async fn search_products(&self, keyword: &str) -> Result<Vec<Product>, FetchError>;
    /// The created record is returned untyped; callers only care that the body was JSON.
    async fn create_product(&self, draft: &NewProduct) -> Result<serde_json::Value, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ProductClient {
    http: Client,
    base_url: Url,
}

impl ProductClient {
    pub fn new(api_url: &str) -> Result<Self, FetchError> {
        Self::with_http(Client::new(), api_url)
    }

    pub fn with_http(http: Client, api_url: &str) -> Result<Self, FetchError> {
        let base_url = Url::parse(api_url)?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut endpoint = self.base_url.clone();
        endpoint
            .path_segments_mut()
            .map_err(|()| FetchError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(endpoint)
    }

    pub async fn count_products(&self) -> Result<i64, FetchError> {
        let url = self.endpoint(&["products", "count"])?;
        let response = self.http.get(url).send().await?;
        let body: ProductCount = ensure_success(response).await?.json().await?;
        Ok(body.count)
    }

    /// Probes `GET /`, which the API answers only when its database is reachable.
    pub async fn health(&self) -> Result<String, FetchError> {
        let response = self.http.get(self.base_url.clone()).send().await?;
        let body: HealthResponse = ensure_success(response).await?.json().await?;
        Ok(body.message)
    }
}

async fn ensure_success(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let detail = ApiErrorBody::detail_from_body(&body);
    warn!(
        status = status.as_u16(),
        detail = detail.as_deref().unwrap_or(""),
        "product api: request rejected"
    );
    Err(FetchError::Status {
        status: status.as_u16(),
        detail,
    })
}

#[async_trait]
impl ProductApi for ProductClient {
    async fn fetch_product(&self, product_id: &str) -> Result<Product, FetchError> {
        let url = self.endpoint(&["products", product_id])?;
        debug!(product_id, %url, "product api: fetching product");
        let response = self.http.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            info!(product_id, "product api: product not found");
            return Err(FetchError::NotFound);
        }

        let product: Product = ensure_success(response).await?.json().await?;
        Ok(product)
    }

    async fn search_products(&self, keyword: &str) -> Result<Vec<Product>, FetchError> {
        let url = self.endpoint(&["products", "search", keyword])?;
        debug!(keyword, %url, "product api: searching products");
        let response = self.http.get(url).send().await?;
        let products: Vec<Product> = ensure_success(response).await?.json().await?;
        info!(keyword, matches = products.len(), "product api: search completed");
        Ok(products)
    }

    async fn create_product(&self, draft: &NewProduct) -> Result<serde_json::Value, FetchError> {
        let url = self.endpoint(&["products"])?;
        let response = self.http.post(url).json(draft).send().await?;
        let created: serde_json::Value = ensure_success(response).await?.json().await?;
        info!(name = %draft.name, "product api: product created");
        Ok(created)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

//! # HTTP Client
//!
//! JSON client for the storefront API:
//!
//! - `GET {base}/stock/{id}`    → `{ "id": 1, "amount": 3 }`
//! - `GET {base}/products/{id}` → `{ "id": 1, "name": "...", "price": 179.9, "image": "..." }`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rocketshoes_core::{Product, ProductId, StockEntry, StockLevel};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::{ProductCatalog, ServiceError, ServiceResult, StockService};

/// Client for the stock and product endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> ServiceResult<Self> {
        // Without a trailing slash, Url::join would replace the last segment
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        let base_url =
            Url::parse(&normalized).map_err(|e| ServiceError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(ApiClient { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, resource: &str, id: ProductId) -> ServiceResult<Url> {
        self.base_url
            .join(&format!("{}/{}", resource, id))
            .map_err(|e| ServiceError::InvalidUrl(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        id: ProductId,
    ) -> ServiceResult<T> {
        let url = self.endpoint(resource, id)?;
        debug!(url = %url, "GET");

        let response = self.client.get(url.clone()).send().await?;

        match response.status() {
            status if status.is_success() => Ok(response.json::<T>().await?),
            StatusCode::NOT_FOUND => Err(ServiceError::NotFound {
                resource: if resource == "stock" { "Stock" } else { "Product" },
                id,
            }),
            status => Err(ServiceError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }
}

#[async_trait]
impl StockService for ApiClient {
    async fn stock(&self, id: ProductId) -> ServiceResult<StockLevel> {
        let entry: StockEntry = self.get_json("stock", id).await?;
        debug!(product_id = %id, amount = entry.amount, "Stock level fetched");
        Ok(entry.level())
    }
}

#[async_trait]
impl ProductCatalog for ApiClient {
    async fn product(&self, id: ProductId) -> ServiceResult<Product> {
        let product: Product = self.get_json("products", id).await?;

        if product.id != id {
            return Err(ServiceError::UnexpectedProduct {
                requested: id,
                returned: product.id,
            });
        }

        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn id(raw: i64) -> ProductId {
        ProductId::new(raw).unwrap()
    }

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.base_url(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_stock() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/stock/7");
                then.status(200).json_body(json!({"id": 7, "amount": 3}));
            })
            .await;

        let stock = client(&server).stock(id(7)).await.unwrap();

        assert_eq!(stock, StockLevel::new(3));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_product() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/products/7");
                then.status(200).json_body(json!({
                    "id": 7,
                    "name": "Shoe",
                    "price": 139.9,
                    "image": "https://cdn.example/shoe.jpg"
                }));
            })
            .await;

        let product = client(&server).product(id(7)).await.unwrap();
        assert_eq!(product.name, "Shoe");
    }

    #[tokio::test]
    async fn test_not_found_and_server_errors() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/stock/1");
                then.status(404);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/stock/2");
                then.status(500);
            })
            .await;

        let api = client(&server);
        assert!(matches!(
            api.stock(id(1)).await,
            Err(ServiceError::NotFound { .. })
        ));
        assert!(matches!(
            api.stock(id(2)).await,
            Err(ServiceError::Status { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_mismatched_product_is_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/products/3");
                then.status(200)
                    .json_body(json!({"id": 4, "name": "Other", "price": 1.0, "image": ""}));
            })
            .await;

        assert!(matches!(
            client(&server).product(id(3)).await,
            Err(ServiceError::UnexpectedProduct { .. })
        ));
    }

    #[test]
    fn test_base_url_keeps_path_prefix() {
        let api = ApiClient::new("http://localhost:3333/api", Duration::from_secs(1)).unwrap();
        assert_eq!(
            api.endpoint("stock", id(5)).unwrap().as_str(),
            "http://localhost:3333/api/stock/5"
        );
        assert!(ApiClient::new("not a url", Duration::from_secs(1)).is_err());
    }
}

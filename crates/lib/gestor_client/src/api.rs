//! Typed HTTP client for the REST API.

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::models::{
    ErrorBody, LoginRequest, LoginResponse, MessageBody, NewProduct, Product, ProductUpdate,
    RegisterRequest, RegisterResponse,
};

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Thin wrapper over `reqwest::Client` that knows the API's routes and
/// error envelope. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `http://localhost:5000/api`).
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: &str) -> ClientResult<Self> {
        // Url::join drops the last segment unless the base ends with '/'.
        let mut normalized = base_url.trim_end_matches('/').to_string();
        normalized.push('/');
        Ok(Self {
            http,
            base: Url::parse(&normalized)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<RegisterResponse> {
        let body = RegisterRequest {
            name,
            email,
            password,
        };
        let req = self.http.post(self.url("auth/register")?).json(&body);
        send(req).await
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let body = LoginRequest { email, password };
        let req = self.http.post(self.url("auth/login")?).json(&body);
        send(req).await
    }

    /// Products owned by the token's user.
    pub async fn list_products(&self, token: &str) -> ClientResult<Vec<Product>> {
        let req = self.http.get(self.url("products")?).bearer_auth(token);
        send(req).await
    }

    /// Public single-product lookup.
    pub async fn get_product(&self, id: &str) -> ClientResult<Product> {
        let req = self.http.get(self.product_url(id)?);
        send(req).await
    }

    pub async fn create_product(&self, token: &str, product: &NewProduct) -> ClientResult<Product> {
        let req = self
            .http
            .post(self.url("products")?)
            .bearer_auth(token)
            .json(product);
        send(req).await
    }

    pub async fn update_product(
        &self,
        token: &str,
        id: &str,
        update: &ProductUpdate,
    ) -> ClientResult<Product> {
        let req = self
            .http
            .put(self.product_url(id)?)
            .bearer_auth(token)
            .json(update);
        send(req).await
    }

    /// Delete a product; returns the server's confirmation message.
    pub async fn delete_product(&self, token: &str, id: &str) -> ClientResult<String> {
        let req = self.http.delete(self.product_url(id)?).bearer_auth(token);
        let body: MessageBody = send(req).await?;
        Ok(body.message)
    }

    fn url(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base.join(path)?)
    }

    fn product_url(&self, id: &str) -> ClientResult<Url> {
        let mut url = self.url("products")?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(id);
        Ok(url)
    }
}

async fn send<T: DeserializeOwned>(req: RequestBuilder) -> ClientResult<T> {
    let resp = req.send().await?;
    decode(resp).await
}

async fn decode<T: DeserializeOwned>(resp: Response) -> ClientResult<T> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json::<T>().await?);
    }

    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Error").to_string());
    debug!(status = status.as_u16(), %message, "API request failed");
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let client = ApiClient::new("http://localhost:5000/api").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:5000/api/");
        assert_eq!(
            client.url("auth/login").unwrap().as_str(),
            "http://localhost:5000/api/auth/login"
        );

        let client = ApiClient::new("http://localhost:5000/api///").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:5000/api/");
    }

    #[test]
    fn product_ids_are_percent_encoded() {
        let client = ApiClient::new(DEFAULT_API_URL).unwrap();
        assert_eq!(
            client.product_url("abc").unwrap().as_str(),
            "http://localhost:5000/api/products/abc"
        );
        assert_eq!(
            client.product_url("../auth").unwrap().as_str(),
            "http://localhost:5000/api/products/..%2Fauth"
        );
    }

    #[test]
    fn rejects_unparseable_base() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ClientError::Url(_))
        ));
    }
}

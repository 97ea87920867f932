//! Healthcheck Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Healthcheck Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HealthResponse {
    /// Always `ok` while the process serves requests
    pub status: String,
}

/// Healthcheck Handler
///
/// Liveness only; the database is not consulted.
#[endpoint(tags("health"), summary = "Liveness check")]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn healthcheck_needs_no_credentials() -> TestResult {
        let service = Service::new(Router::with_path("healthcheck").get(handler));

        let mut res = TestClient::get("http://example.com/healthcheck")
            .send(&service)
            .await;

        let body: HealthResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "ok");

        Ok(())
    }
}

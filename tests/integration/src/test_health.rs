//! Health probe tests.

#[cfg(test)]
mod tests {
    use crate::{GatewayOptions, client, spawn_gateway};

    #[tokio::test]
    async fn test_should_answer_health_probe() {
        let gw = spawn_gateway(&[], GatewayOptions::default()).await;

        for path in ["/_health", "/health"] {
            let resp = client().get(gw.url(path)).send().await.expect("GET health");
            assert_eq!(resp.status(), reqwest::StatusCode::OK);

            let body: serde_json::Value = resp.json().await.expect("json body");
            assert_eq!(body["status"], "running");
            assert_eq!(body["service"], "docgate");
        }

        gw.stop().await;
    }
}

//! Index resolution and redirect tests.

#[cfg(test)]
mod tests {
    use crate::{GatewayOptions, client, spawn_gateway};

    fn location(resp: &reqwest::Response) -> Option<&str> {
        resp.headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
    }

    #[tokio::test]
    async fn test_should_redirect_mount_to_index_html() {
        let gw = spawn_gateway(
            &[
                ("abc123/a.html", "<html>a</html>", None),
                ("abc123/index.html", "<html>index</html>", None),
                ("abc123/styles.css", "body{}", None),
            ],
            GatewayOptions::default(),
        )
        .await;

        let resp = client().get(gw.url("/docs")).send().await.expect("GET /docs");
        assert_eq!(resp.status(), reqwest::StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), Some("/docs/index.html"));

        gw.stop().await;
    }

    #[tokio::test]
    async fn test_should_redirect_directory_path_to_index() {
        let gw = spawn_gateway(
            &[("abc123/index.html", "<html/>", None)],
            GatewayOptions::default(),
        )
        .await;

        let resp = client()
            .get(gw.url("/docs/report/"))
            .send()
            .await
            .expect("GET /docs/report/");
        assert_eq!(resp.status(), reqwest::StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), Some("/docs/index.html"));

        gw.stop().await;
    }

    #[tokio::test]
    async fn test_should_redirect_dotted_directory_with_trailing_slash() {
        let gw = spawn_gateway(
            &[("abc123/index.html", "<html/>", None)],
            GatewayOptions::default(),
        )
        .await;

        let resp = client()
            .get(gw.url("/docs/v1.2/"))
            .send()
            .await
            .expect("GET /docs/v1.2/");
        assert_eq!(resp.status(), reqwest::StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), Some("/docs/index.html"));

        gw.stop().await;
    }

    #[tokio::test]
    async fn test_should_redirect_mount_containing_dot() {
        let gw = spawn_gateway(
            &[("abc123/index.html", "<html/>", None)],
            GatewayOptions {
                mount: "/v1.2",
                ..GatewayOptions::default()
            },
        )
        .await;

        let resp = client().get(gw.url("/v1.2")).send().await.expect("GET /v1.2");
        assert_eq!(resp.status(), reqwest::StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), Some("/v1.2/index.html"));

        gw.stop().await;
    }

    #[tokio::test]
    async fn test_should_redirect_to_greatest_html_without_index() {
        let gw = spawn_gateway(
            &[
                ("abc123/z.html", "<html>z</html>", None),
                ("abc123/a.html", "<html>a</html>", None),
            ],
            GatewayOptions::default(),
        )
        .await;

        let resp = client().get(gw.url("/docs")).send().await.expect("GET /docs");
        assert_eq!(resp.status(), reqwest::StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), Some("/docs/z.html"));

        gw.stop().await;
    }

    #[tokio::test]
    async fn test_should_return_404_without_index() {
        let gw = spawn_gateway(
            &[("abc123/styles.css", "body{}", None)],
            GatewayOptions::default(),
        )
        .await;

        let resp = client().get(gw.url("/docs")).send().await.expect("GET /docs");
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        let body: serde_json::Value = resp.json().await.expect("json error body");
        assert_eq!(body["code"], "NotFound");

        gw.stop().await;
    }

    #[tokio::test]
    async fn test_should_pick_up_index_added_after_startup() {
        let gw = spawn_gateway(&[], GatewayOptions::default()).await;

        let resp = client().get(gw.url("/docs")).send().await.expect("GET /docs");
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        gw.source
            .put_object("abc123/index.html", "<html/>", None, None)
            .await
            .expect("seed index");

        let resp = client().get(gw.url("/docs")).send().await.expect("GET /docs");
        assert_eq!(resp.status(), reqwest::StatusCode::SEE_OTHER);

        gw.stop().await;
    }

    #[tokio::test]
    async fn test_should_redirect_root_to_mount_when_enabled() {
        let gw = spawn_gateway(
            &[("abc123/index.html", "<html/>", None)],
            GatewayOptions {
                root_redirect: true,
                ..GatewayOptions::default()
            },
        )
        .await;

        let resp = client().get(gw.url("/")).send().await.expect("GET /");
        assert_eq!(resp.status(), reqwest::StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), Some("/docs"));

        gw.stop().await;
    }
}

//! Asset serving tests.

#[cfg(test)]
mod tests {
    use crate::{GatewayOptions, client, spawn_gateway};

    fn header<'a>(resp: &'a reqwest::Response, name: &str) -> Option<&'a str> {
        resp.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[tokio::test]
    async fn test_should_serve_css_with_fallback_content_type() {
        let gw = spawn_gateway(
            &[("abc123/page.css", "body{color:red}", None)],
            GatewayOptions::default(),
        )
        .await;

        let resp = client()
            .get(gw.url("/docs/page.css"))
            .send()
            .await
            .expect("GET page.css");
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert_eq!(header(&resp, "content-type"), Some("text/css"));
        assert_eq!(header(&resp, "content-length"), Some("15"));
        assert_eq!(header(&resp, "server"), Some("docgate"));
        assert!(resp.headers().contains_key("x-request-id"));

        let body = resp.text().await.expect("body");
        assert_eq!(body, "body{color:red}");

        gw.stop().await;
    }

    #[tokio::test]
    async fn test_should_keep_stored_content_type() {
        let gw = spawn_gateway(
            &[("abc123/site_libs/search.json", "[]", Some("application/json; charset=utf-8"))],
            GatewayOptions::default(),
        )
        .await;

        let resp = client()
            .get(gw.url("/docs/site_libs/search.json"))
            .send()
            .await
            .expect("GET search.json");
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert_eq!(
            header(&resp, "content-type"),
            Some("application/json; charset=utf-8")
        );

        gw.stop().await;
    }

    #[tokio::test]
    async fn test_should_pass_through_content_encoding() {
        let gw = spawn_gateway(&[], GatewayOptions::default()).await;
        gw.source
            .put_object(
                "abc123/app.js",
                vec![0x1f_u8, 0x8b, 0x08, 0x00],
                Some("application/javascript"),
                Some("gzip"),
            )
            .await
            .expect("seed gzip object");

        let resp = client()
            .get(gw.url("/docs/app.js"))
            .send()
            .await
            .expect("GET app.js");
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert_eq!(header(&resp, "content-encoding"), Some("gzip"));
        assert_eq!(header(&resp, "content-length"), Some("4"));

        gw.stop().await;
    }

    #[tokio::test]
    async fn test_should_return_404_for_missing_object() {
        let gw = spawn_gateway(&[], GatewayOptions::default()).await;

        let resp = client()
            .get(gw.url("/docs/missing.svg"))
            .send()
            .await
            .expect("GET missing.svg");
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        gw.stop().await;
    }

    #[tokio::test]
    async fn test_should_return_404_outside_mount() {
        let gw = spawn_gateway(
            &[("abc123/page.css", "body{}", None)],
            GatewayOptions::default(),
        )
        .await;

        let resp = client()
            .get(gw.url("/elsewhere/page.css"))
            .send()
            .await
            .expect("GET outside mount");
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        gw.stop().await;
    }

    #[tokio::test]
    async fn test_should_reject_post() {
        let gw = spawn_gateway(&[], GatewayOptions::default()).await;

        let resp = client()
            .post(gw.url("/docs/page.css"))
            .body("x")
            .send()
            .await
            .expect("POST page.css");
        assert_eq!(resp.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(header(&resp, "allow"), Some("GET, HEAD"));

        gw.stop().await;
    }

    #[tokio::test]
    async fn test_should_serve_nested_asset_under_multi_segment_mount() {
        let gw = spawn_gateway(
            &[("abc123/figures/plot.svg", "<svg/>", None)],
            GatewayOptions {
                mount: "/reports/annual",
                ..GatewayOptions::default()
            },
        )
        .await;

        let resp = client()
            .get(gw.url("/reports/annual/figures/plot.svg"))
            .send()
            .await
            .expect("GET plot.svg");
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert_eq!(header(&resp, "content-type"), Some("image/svg+xml"));

        gw.stop().await;
    }
}

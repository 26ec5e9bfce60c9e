//! End-to-end tests: real listener, real client, stubbed upstream.

use std::time::Duration;

use path_proxy::ProxyConfig;

mod common;

use common::{client, start_proxy, upstream_response, StubDispatcher};

#[tokio::test]
async fn test_request_is_translated_for_upstream() {
    let dispatcher = StubDispatcher::new(|_| upstream_response(200, &[("content-type", "text/plain")], "ok"));
    let (addr, shutdown) = start_proxy(ProxyConfig::default(), dispatcher.clone()).await;

    let res = client()
        .post(format!("http://{}/example.com/api/items?page=2", addr))
        .header("cookie", "session=abc; theme=dark")
        .header("x-custom", "kept")
        .body("payload")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "ok");

    let seen = dispatcher.requests();
    assert_eq!(seen.len(), 1);
    let outbound = &seen[0];
    assert_eq!(outbound.method().as_str(), "POST");
    assert_eq!(outbound.upstream_url(), "https://example.com/api/items?page=2");
    assert_eq!(outbound.headers().get("host").unwrap(), "example.com");
    assert_eq!(outbound.headers().get_all("host").iter().count(), 1);
    assert!(outbound.headers().get("connection").is_none());
    assert_eq!(outbound.headers().get("x-custom").unwrap(), "kept");
    assert_eq!(&outbound.body()[..], b"payload");

    let cookies: Vec<_> = outbound.cookies().iter().map(|c| (c.name.as_str(), c.value.as_str())).collect();
    assert_eq!(cookies, vec![("session", "abc"), ("theme", "dark")]);

    shutdown.trigger();
}

#[tokio::test]
async fn test_redirect_is_rewritten_through_proxy() {
    let dispatcher = StubDispatcher::new(|_| {
        upstream_response(
            302,
            &[
                ("location", "https://example.com/foo?x=1"),
                ("set-cookie", "id=42; Path=/"),
            ],
            "moved",
        )
    });
    let (addr, shutdown) = start_proxy(ProxyConfig::default(), dispatcher).await;

    let res = client()
        .get(format!("http://{}/example.com/old", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 302);
    assert_eq!(res.headers().get("location").unwrap(), "/example.com/foo?x=1");
    assert_eq!(res.headers().get("set-cookie").unwrap(), "id=42; Path=/");
    assert!(res.text().await.unwrap().is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_html_links_point_back_at_proxy() {
    let dispatcher = StubDispatcher::new(|_| {
        upstream_response(
            200,
            &[("content-type", "text/html; charset=utf-8")],
            r#"<a href="https://example.com/a">x</a><img src="//example.com/i.png"><a href="https://other.org/">"#,
        )
    });
    let (addr, shutdown) = start_proxy(ProxyConfig::default(), dispatcher).await;

    let res = client()
        .get(format!("http://{}/example.com/", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let body = res.text().await.unwrap();
    assert_eq!(
        body,
        format!(
            r#"<a href="http://{addr}/example.com/a">x</a><img src="//{addr}/example.com/i.png"><a href="https://other.org/">"#
        )
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_binary_body_and_transport_headers() {
    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0xff, 0x00];
    let dispatcher = StubDispatcher::new(|_| {
        upstream_response(
            200,
            &[
                ("content-type", "image/png"),
                ("content-encoding", "gzip"),
                ("content-length", "9999"),
                ("connection", "close"),
                ("cache-control", "max-age=60"),
            ],
            PNG,
        )
    });
    let (addr, shutdown) = start_proxy(ProxyConfig::default(), dispatcher).await;

    let res = client()
        .get(format!("http://{}/cdn.example.com/logo.png", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert!(res.headers().get("content-encoding").is_none());
    assert!(res.headers().get("transfer-encoding").is_none());
    assert_eq!(res.headers().get("content-length").unwrap(), PNG.len().to_string().as_str());
    assert_eq!(res.headers().get("cache-control").unwrap(), "max-age=60");
    assert_eq!(&res.bytes().await.unwrap()[..], PNG);

    shutdown.trigger();
}

#[tokio::test]
async fn test_invalid_utf8_html_passes_through() {
    const BODY: &[u8] = b"<p>https://example.com/\xff\xfe</p>";
    let dispatcher = StubDispatcher::new(|_| upstream_response(200, &[("content-type", "text/html")], BODY));
    let (addr, shutdown) = start_proxy(ProxyConfig::default(), dispatcher).await;

    let res = client()
        .get(format!("http://{}/example.com/", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(&res.bytes().await.unwrap()[..], BODY);

    shutdown.trigger();
}

#[tokio::test]
async fn test_concurrent_requests_keep_their_own_target() {
    let dispatcher = StubDispatcher::with_delay(Duration::from_millis(200), |request| {
        let body = match request.target().domain() {
            "one.example" => "see https://one.example/page",
            _ => "see https://two.example/page",
        };
        upstream_response(200, &[("content-type", "text/html")], body)
    });
    let (addr, shutdown) = start_proxy(ProxyConfig::default(), dispatcher).await;

    let client = client();
    let (first, second) = tokio::join!(
        client.get(format!("http://{}/one.example/", addr)).send(),
        client.get(format!("http://{}/two.example/", addr)).send(),
    );

    assert_eq!(
        first.unwrap().text().await.unwrap(),
        format!("see http://{addr}/one.example/page")
    );
    assert_eq!(
        second.unwrap().text().await.unwrap(),
        format!("see http://{addr}/two.example/page")
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_stalled_upstream_times_out() {
    let dispatcher = StubDispatcher::with_delay(Duration::from_secs(5), |_| upstream_response(200, &[], "late"));
    let mut config = ProxyConfig::default();
    config.upstream.request_timeout_secs = 1;
    let (addr, shutdown) = start_proxy(config, dispatcher).await;

    let res = client()
        .get(format!("http://{}/slow.example/", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    assert_eq!(
        res.text().await.unwrap(),
        "Proxy Error: upstream request timed out after 1 seconds"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_missing_domain_is_bad_request() {
    let dispatcher = StubDispatcher::new(|_| upstream_response(200, &[], "unreachable"));
    let (addr, shutdown) = start_proxy(ProxyConfig::default(), dispatcher.clone()).await;

    let res = client()
        .get(format!("http://{}//path/only", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    assert!(res.text().await.unwrap().starts_with("Proxy Error: "));
    assert!(dispatcher.requests().is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_landing_page_served_at_root() {
    let dispatcher = StubDispatcher::new(|_| upstream_response(200, &[], ""));
    let (addr, shutdown) = start_proxy(ProxyConfig::default(), dispatcher).await;

    let res = client().get(format!("http://{}/", addr)).send().await.unwrap();

    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    assert!(res.text().await.unwrap().contains("Proxy Server Running"));

    shutdown.trigger();
}

use backend_url::{APIClient, ClientError};
use reqwest::StatusCode;
use reqwest::header::{ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN};
use test_helpers::{
    MockBackendConfig, parse_allowed_origins, sample_init_config,
    spawn_backend, spawn_backend_with,
};

#[tokio::test]
async fn init_config_is_decoded() -> anyhow::Result<()> {
    let backend = spawn_backend().await?;

    let init_config = backend.client.init_config().await?;

    assert_eq!(init_config, sample_init_config());
    assert_eq!(init_config.server_timezone, "Asia/Shanghai");
    assert_eq!(
        init_config.market_default_codes.get("a").map(String::as_str),
        Some("SH.000001")
    );
    Ok(())
}

#[tokio::test]
async fn client_built_from_resolved_url() -> anyhow::Result<()> {
    let backend = spawn_backend().await?;

    let client = APIClient::new(&backend.url, "https://chart.vercel.app");

    assert_eq!(
        client.format_url("init_config"),
        format!("http://127.0.0.1:{}/api/init_config", backend.port)
    );
    client.init_config().await?;
    Ok(())
}

#[tokio::test]
async fn failing_endpoint_is_api_error() -> anyhow::Result<()> {
    let backend = spawn_backend_with(MockBackendConfig {
        init_config: None,
        ..MockBackendConfig::default()
    })
    .await?;

    let result = backend.client.init_config().await;

    match result {
        Err(ClientError::APIError(status, message)) => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(message, "init config unavailable");
        }
        other => panic!("expected APIError, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_network_error() {
    let backend = backend_url::BackendUrl::normalize("http://127.0.0.1:1");
    let client = APIClient::new(&backend, "http://localhost");

    let result = client.init_config().await;

    assert!(matches!(result, Err(ClientError::Network(_))));
}

#[test]
fn unknown_markets_are_kept() -> anyhow::Result<()> {
    let body = r#"{
        "market_frequencys": {"a": ["d", "30m"], "crypto_perp": ["1m"]},
        "market_default_codes": {"a": "SH.000001", "crypto_perp": "BTC"},
        "server_timezone": "Asia/Shanghai"
    }"#;

    let init_config: backend_url::responses::InitConfig =
        serde_json::from_str(body)?;

    assert_eq!(
        init_config.market_frequencys.get("crypto_perp"),
        Some(&vec!["1m".to_string()])
    );
    assert_eq!(init_config.market_default_codes.len(), 2);
    Ok(())
}

async fn allowed_origin_header(
    backend: &test_helpers::TestBackend,
    origin: &str,
) -> anyhow::Result<Option<String>> {
    let response = backend
        .client
        .inner_client
        .get(backend.client.format_url("init_config"))
        .header(ORIGIN, origin)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let header = response
        .headers()
        .get(ACCESS_CONTROL_ALLOW_ORIGIN)
        .map(|value| value.to_str().map(str::to_string))
        .transpose()?;
    Ok(header)
}

#[tokio::test]
async fn any_origin_is_allowed_by_default() -> anyhow::Result<()> {
    let backend = spawn_backend_with(MockBackendConfig::default()).await?;

    let header =
        allowed_origin_header(&backend, "https://anything.example").await?;

    assert!(header.is_some());
    Ok(())
}

#[tokio::test]
async fn configured_origin_is_allowed() -> anyhow::Result<()> {
    let backend = spawn_backend_with(MockBackendConfig {
        allowed_origins: parse_allowed_origins(Some(
            "https://my-chart.vercel.app, http://localhost:8080",
        )),
        ..MockBackendConfig::default()
    })
    .await?;

    for origin in ["https://my-chart.vercel.app", "http://localhost:8080"] {
        let header = allowed_origin_header(&backend, origin).await?;
        assert_eq!(header.as_deref(), Some(origin));
    }
    Ok(())
}

#[tokio::test]
async fn other_origins_get_no_cors_header() -> anyhow::Result<()> {
    let backend = spawn_backend_with(MockBackendConfig {
        allowed_origins: vec!["https://my-chart.vercel.app".to_string()],
        ..MockBackendConfig::default()
    })
    .await?;

    let header =
        allowed_origin_header(&backend, "https://elsewhere.example").await?;
    assert_eq!(header, None);

    // Requests without an Origin are not subject to CORS.
    let init_config = backend.client.init_config().await?;
    assert_eq!(init_config, sample_init_config());
    Ok(())
}

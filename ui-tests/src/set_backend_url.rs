use anyhow::Result;
use backend_url::{SAVE_FAILED_MESSAGE, STORAGE_KEY, UPDATED_MESSAGE};
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

use crate::framework::TestEnvironment;

const NEW_BACKEND: &str = "http://localhost:9000";

#[tokio::test]
#[ignore = "needs geckodriver and trunk"]
async fn build_time_backend_is_used_without_a_saved_url() -> Result<()> {
    let env = TestEnvironment::setup().await?;
    env.open_frontend().await?;

    let expected = env.backend.url.to_string();
    let accessor = env.eval_string("return window.apiBaseUrl();").await?;
    assert_eq!(accessor, expected);
    let mirrored = env.eval_string("return window.API_BASE_URL;").await?;
    assert_eq!(mirrored, expected);
    Ok(())
}

#[tokio::test]
#[ignore = "needs geckodriver and trunk"]
async fn setting_backend_saves_and_reloads() -> Result<()> {
    let env = TestEnvironment::setup().await?;
    env.open_frontend().await?;

    info!("Setting backend to {NEW_BACKEND}/");
    env.browser
        .execute(
            &format!(
                "window.reloadMarker = true; \
                 window.setBackendUrl('{NEW_BACKEND}/');"
            ),
            vec![],
        )
        .await?;

    let stored = env
        .eval_string(&format!(
            "return localStorage.getItem('{STORAGE_KEY}');"
        ))
        .await?;
    assert_eq!(stored, NEW_BACKEND);
    assert_eq!(
        env.eval_string("return window.API_BASE_URL;").await?,
        NEW_BACKEND
    );
    let message = env.toast_text(".cl-toast-info .cl-toast-message").await?;
    assert_eq!(message, UPDATED_MESSAGE);

    // The page reloads 1500 ms after saving.
    sleep(Duration::from_secs(3)).await;
    let reloaded = env
        .browser
        .execute("return window.reloadMarker === undefined;", vec![])
        .await?;
    assert_eq!(reloaded, serde_json::Value::Bool(true));
    assert_eq!(
        env.eval_string("return window.apiBaseUrl();").await?,
        NEW_BACKEND
    );
    Ok(())
}

#[tokio::test]
#[ignore = "needs geckodriver and trunk"]
async fn failed_save_shows_error_and_keeps_url() -> Result<()> {
    let env = TestEnvironment::setup().await?;
    env.open_frontend().await?;
    let before = env.eval_string("return window.API_BASE_URL;").await?;

    env.browser
        .execute(
            &format!(
                "Storage.prototype.setItem = function() {{ \
                     throw new DOMException('full', 'QuotaExceededError'); \
                 }}; \
                 window.reloadMarker = true; \
                 window.setBackendUrl('{NEW_BACKEND}');"
            ),
            vec![],
        )
        .await?;

    let message = env.toast_text(".cl-toast-error .cl-toast-message").await?;
    assert!(message.starts_with(SAVE_FAILED_MESSAGE), "{message}");
    assert!(
        message.contains("Storage error: QuotaExceededError"),
        "{message}"
    );
    assert_eq!(env.eval_string("return window.API_BASE_URL;").await?, before);

    // No reload is scheduled.
    sleep(Duration::from_secs(3)).await;
    let marker = env
        .browser
        .execute("return window.reloadMarker === true;", vec![])
        .await?;
    assert_eq!(marker, serde_json::Value::Bool(true));
    Ok(())
}

#[tokio::test]
#[ignore = "needs geckodriver and trunk"]
async fn missing_storage_is_reported() -> Result<()> {
    let env = TestEnvironment::setup().await?;
    env.open_frontend().await?;

    env.browser
        .execute(
            &format!(
                "Object.defineProperty(window, 'localStorage', \
                     {{ get: () => null, configurable: true }}); \
                 window.setBackendUrl('{NEW_BACKEND}');"
            ),
            vec![],
        )
        .await?;

    let message = env.toast_text(".cl-toast-error .cl-toast-message").await?;
    assert!(message.contains("Storage is not available"), "{message}");
    Ok(())
}

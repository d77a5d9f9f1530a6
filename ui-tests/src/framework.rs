//! Run with debugging output:
//!
//! ```shell
//! RUST_LOG=ui_tests=debug cargo test -p ui-tests -- --ignored --nocapture
//! ```

use anyhow::{Context, Result, anyhow};
use fantoccini::{Client, ClientBuilder, Locator};
use rand::Rng;
use serde_json::Value;
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use test_helpers::{MockBackendConfig, TestBackend};
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// A mock backend, the `ui` crate served by trunk, and a browser pointed at
/// nothing yet.
pub struct TestEnvironment {
    pub backend: TestBackend,
    pub browser: Client,
    pub frontend_process: Child,
    pub geckodriver_process: Child,
    pub frontend_url: String,
}

impl TestEnvironment {
    #[cfg(test)]
    pub async fn setup() -> Result<Self> {
        Self::setup_with_options(false).await
    }

    pub async fn setup_headed() -> Result<Self> {
        Self::setup_with_options(true).await
    }

    async fn setup_with_options(headed: bool) -> Result<Self> {
        info!("🔧 Setting up test environment");

        let backend =
            test_helpers::spawn_backend_with(MockBackendConfig::from_env())
                .await?;
        info!("✅ Mock backend running at {}", backend.url);

        let (geckodriver_process, gecko_port) =
            start_with_retry("geckodriver", 4444, |port| {
                Command::new("geckodriver")
                    .arg("--port")
                    .arg(port.to_string())
                    .spawn_quiet()
            })
            .await?;
        info!("✅ Geckodriver running on port {}", gecko_port);

        // The mock backend becomes the build-time default backend URL.
        let backend_url = backend.url.to_string();
        build_frontend(&backend_url)?;
        let (frontend_process, frontend_port) =
            start_with_retry("trunk serve", 8080, |port| {
                Command::new("trunk")
                    .arg("serve")
                    .arg("--port")
                    .arg(port.to_string())
                    .current_dir("../ui")
                    .env("BACKEND_URL", &backend_url)
                    .spawn_quiet()
            })
            .await?;
        let frontend_url = format!("http://localhost:{}", frontend_port);
        wait_for_frontend(&frontend_url).await?;
        info!("✅ Frontend ready at {}", frontend_url);

        let browser = connect_to_browser(gecko_port, headed).await?;
        info!("✅ Browser connected");

        Ok(TestEnvironment {
            backend,
            browser,
            frontend_process,
            geckodriver_process,
            frontend_url,
        })
    }

    /// Open the frontend and give the wasm module time to start.
    pub async fn open_frontend(&self) -> Result<()> {
        self.browser.goto(&self.frontend_url).await?;
        sleep(Duration::from_secs(1)).await;
        Ok(())
    }

    /// Run `script` in the page and return its result as a string.
    pub async fn eval_string(&self, script: &str) -> Result<String> {
        match self.browser.execute(script, vec![]).await? {
            Value::String(s) => Ok(s),
            other => Err(anyhow!("{script:?} returned {other}")),
        }
    }

    /// Text of the first toast matching `selector`, once it has rendered.
    pub async fn toast_text(&self, selector: &str) -> Result<String> {
        sleep(Duration::from_millis(300)).await;
        let toast = self
            .browser
            .find(Locator::Css(selector))
            .await
            .with_context(|| format!("no toast matching {selector}"))?;
        Ok(toast.text().await?)
    }
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        info!("🧹 Cleaning up test environment");

        if let Err(e) = self.frontend_process.kill() {
            warn!("Failed to kill frontend process: {}", e);
        }
        if let Err(e) = self.geckodriver_process.kill() {
            warn!("Failed to kill geckodriver process: {}", e);
        }
    }
}

trait SpawnQuiet {
    fn spawn_quiet(&mut self) -> std::io::Result<Child>;
}

impl SpawnQuiet for Command {
    fn spawn_quiet(&mut self) -> std::io::Result<Child> {
        self.stdout(Stdio::null()).stderr(Stdio::null()).spawn()
    }
}

/// Start a server on a random port near `base_port`, retrying on a new port
/// whenever the process exits straight away.
async fn start_with_retry(
    name: &str,
    base_port: u16,
    spawn: impl Fn(u16) -> std::io::Result<Child>,
) -> Result<(Child, u16)> {
    for attempt in 1..=5 {
        let port = base_port + rand::thread_rng().gen_range(0..=100);
        debug!("Starting {} on port {} (attempt {})", name, port, attempt);

        match spawn(port) {
            Ok(mut child) => {
                sleep(Duration::from_millis(500)).await;
                match child.try_wait() {
                    Ok(Some(status)) => {
                        debug!("{} exited with status {}", name, status);
                    }
                    Ok(None) => return Ok((child, port)),
                    Err(e) => {
                        debug!("Error checking {} status: {}", name, e);
                        let _ = child.kill();
                    }
                }
            }
            Err(e) => debug!("Failed to start {}: {}", name, e),
        }

        sleep(Duration::from_millis(100)).await;
    }

    Err(anyhow!("Failed to start {} after 5 attempts", name))
}

fn build_frontend(backend_url: &str) -> Result<()> {
    debug!("Building frontend with trunk build");
    let status = Command::new("trunk")
        .arg("build")
        .current_dir("../ui")
        .env("BACKEND_URL", backend_url)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .context("Failed to run trunk build")?;

    if !status.success() {
        return Err(anyhow!("Frontend build failed with status: {}", status));
    }
    Ok(())
}

async fn wait_for_frontend(url: &str) -> Result<()> {
    for i in 1..=30 {
        match reqwest::get(url).await {
            Ok(response) if response.status().is_success() => {
                debug!("Frontend ready after {} attempts", i);
                return Ok(());
            }
            _ => sleep(Duration::from_secs(1)).await,
        }
    }
    Err(anyhow!("Frontend failed to start after 30 attempts"))
}

async fn connect_to_browser(gecko_port: u16, headed: bool) -> Result<Client> {
    let gecko_url = format!("http://localhost:{}", gecko_port);

    let firefox_opts = if headed {
        serde_json::json!({ "log": {"level": "error"} })
    } else {
        serde_json::json!({
            "args": ["--headless"],
            "log": {"level": "error"}
        })
    };
    let mut caps = serde_json::Map::new();
    caps.insert("moz:firefoxOptions".to_string(), firefox_opts);

    ClientBuilder::native()
        .capabilities(caps)
        .connect(&gecko_url)
        .await
        .context("Failed to connect to geckodriver")
}

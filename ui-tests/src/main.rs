//! This crate uses standard Rust tests with #[tokio::test]. They need
//! geckodriver and trunk, so they are ignored by default:
//!
//! ```shell
//! cargo test -p ui-tests -- --ignored
//! ```
//!
//! For human-in-the-loop debugging, `main()` serves the frontend against a
//! mock backend and opens a headed browser.

#![allow(unused)]

use anyhow::Result;
use tracing::info;

mod set_backend_url;
mod framework;

use crate::framework::TestEnvironment;

#[tokio::main]
async fn main() -> Result<()> {
    test_helpers::init_logging("info");

    let env = TestEnvironment::setup_headed().await?;
    env.open_frontend().await?;

    info!("🌐 Frontend open at {}", env.frontend_url);
    info!("   Build-time backend: {}", env.backend.url);
    info!("   Try setBackendUrl('http://localhost:9000/') in the console");
    info!("👋 Press Ctrl+C to exit and close the browser");

    tokio::signal::ctrl_c().await?;

    info!("🧹 Cleaning up and closing browser");
    Ok(())
}

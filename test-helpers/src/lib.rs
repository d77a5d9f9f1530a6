pub mod fakes;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, web};
use backend_url::{APIClient, BackendUrl, responses::InitConfig};
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::net::TcpListener;
use tracing::{Subscriber, subscriber::set_global_default};
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

pub fn get_subscriber(env_filter: String) -> impl Subscriber + Sync + Send {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(env_filter));
    let stderr = fmt::Layer::new().with_test_writer();
    Registry::default().with(env_filter).with(stderr)
}

/// Register a subscriber as global default.
///
/// It should only be called once!
pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) {
    LogTracer::init().expect("Failed to set logger");
    set_global_default(subscriber).expect("Failed to set subscriber");
}

static LOGGING: OnceCell<()> = OnceCell::new();

/// Install the logging subscriber unless one is installed already. The
/// first caller's default filter wins.
pub fn init_logging(env_filter: &str) {
    LOGGING.get_or_init(|| {
        init_subscriber(get_subscriber(env_filter.into()));
    });
}

/// Install the test subscriber. Safe to call from every test.
pub fn init_test_logging() {
    init_logging("error");
}

pub struct MockBackendConfig {
    /// set to "0.0.0.0" for public access, "127.0.0.1" for local dev
    pub ip: String,
    /// set to 0 to get an os-assigned port
    pub port: u16,
    /// List of allowed CORS origins. Use "*" to allow any origin.
    pub allowed_origins: Vec<String>,
    /// Served at /api/init_config. `None` makes the endpoint fail.
    pub init_config: Option<InitConfig>,
}

impl Default for MockBackendConfig {
    fn default() -> Self {
        Self {
            ip: "127.0.0.1".into(),
            port: 0,
            allowed_origins: vec!["*".to_string()],
            init_config: Some(sample_init_config()),
        }
    }
}

impl MockBackendConfig {
    /// Read `CORS_ORIGINS` (comma separated, default `*`).
    pub fn from_env() -> Self {
        let raw = std::env::var("CORS_ORIGINS").ok();
        Self {
            allowed_origins: parse_allowed_origins(raw.as_deref()),
            ..Self::default()
        }
    }
}

/// Split a `CORS_ORIGINS` value into origins. Unset means any origin.
pub fn parse_allowed_origins(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or("*")
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub struct TestBackend {
    pub port: u16,
    pub url: BackendUrl,
    pub client: APIClient,
}

/// Start a mock backend on an os-assigned port.
pub async fn spawn_backend() -> anyhow::Result<TestBackend> {
    spawn_backend_with(MockBackendConfig::default()).await
}

pub async fn spawn_backend_with(
    mut config: MockBackendConfig,
) -> anyhow::Result<TestBackend> {
    init_test_logging();

    let listener =
        TcpListener::bind(format!("{}:{}", config.ip, config.port))?;
    config.port = listener.local_addr()?.port();

    let allowed_origins = config.allowed_origins.clone();
    let init_config = web::Data::new(config.init_config.clone());
    let server = HttpServer::new(move || {
        let cors = if allowed_origins.contains(&"*".to_string()) {
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
        } else {
            let mut cors =
                Cors::default().allow_any_method().allow_any_header();
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            cors
        };

        App::new()
            .wrap(cors)
            .app_data(init_config.clone())
            .route("/api/init_config", web::get().to(serve_init_config))
    })
    .workers(1)
    .listen(listener)?
    .run();
    tokio::spawn(server);

    let url = BackendUrl::normalize(format!(
        "http://{}:{}/",
        config.ip, config.port
    ));
    let client = APIClient::new(&url, "http://localhost");
    Ok(TestBackend {
        port: config.port,
        url,
        client,
    })
}

async fn serve_init_config(
    init_config: web::Data<Option<InitConfig>>,
) -> HttpResponse {
    match init_config.get_ref() {
        Some(init_config) => HttpResponse::Ok().json(init_config),
        None => HttpResponse::InternalServerError()
            .body("init config unavailable"),
    }
}

/// A representative document with every market the backend knows about.
pub fn sample_init_config() -> InitConfig {
    let markets: [(&str, &str, &[&str]); 8] = [
        ("a", "SH.000001", &["d", "60m", "30m", "15m", "5m", "1m"]),
        ("hk", "KH.00700", &["d", "60m", "30m", "15m", "5m", "1m"]),
        ("fx", "EURUSD", &["d", "4h", "60m", "30m", "15m", "5m"]),
        ("us", "AAPL", &["d", "60m", "30m", "15m", "5m"]),
        ("futures", "QS.RBL8", &["d", "60m", "30m", "15m", "5m", "1m"]),
        ("ny_futures", "CL", &["d", "60m", "30m", "15m", "5m"]),
        ("currency", "BTC/USDT", &["d", "4h", "60m", "30m", "15m", "5m"]),
        ("currency_spot", "BTC/USDT", &["d", "4h", "60m", "15m"]),
    ];

    let mut market_frequencys = BTreeMap::new();
    let mut market_default_codes = BTreeMap::new();
    for (market, code, frequencys) in markets {
        market_frequencys.insert(
            market.to_string(),
            frequencys.iter().map(|f| f.to_string()).collect(),
        );
        market_default_codes.insert(market.to_string(), code.to_string());
    }

    InitConfig {
        market_frequencys,
        market_default_codes,
        server_timezone: "Asia/Shanghai".to_string(),
    }
}

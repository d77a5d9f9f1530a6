use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Startup data the frontend needs before it can draw any chart.
///
/// Markets are keyed by their short name (`a`, `hk`, `fx`, `us`, `futures`,
/// `ny_futures`, `currency`, `currency_spot`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InitConfig {
    /// Supported bar frequencies per market.
    pub market_frequencys: BTreeMap<String, Vec<String>>,
    /// Symbol shown first for each market.
    pub market_default_codes: BTreeMap<String, String>,
    /// IANA name of the backend's local timezone.
    pub server_timezone: String,
}

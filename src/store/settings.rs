//! Display settings: active currency and the mock FX table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard};

use crate::domain::value_objects::Currency;
use crate::store::persist::KeyValueStore;

const STORAGE_KEY: &str = "settings-storage";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub currency: Currency,
    pub exchange_rates: HashMap<Currency, Decimal>,
}

impl Default for Settings {
    fn default() -> Self {
        // Mock live FX rates.
        let exchange_rates = HashMap::from([
            (Currency::Usd, Decimal::ONE),
            (Currency::Eur, Decimal::new(92, 2)),
            (Currency::Try, Decimal::new(3250, 2)),
        ]);
        Self {
            currency: Currency::Usd,
            exchange_rates,
        }
    }
}

pub struct SettingsStore {
    state: RwLock<Settings>,
    kv: Arc<dyn KeyValueStore>,
}

impl SettingsStore {
    /// Hydrates from the adapter at startup, falling back to defaults.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        let state = kv
            .load(STORAGE_KEY)
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        Self {
            state: RwLock::new(state),
            kv,
        }
    }

    pub fn snapshot(&self) -> Settings {
        self.read().clone()
    }

    pub fn currency(&self) -> Currency {
        self.read().currency
    }

    pub fn set_currency(&self, currency: Currency) -> Settings {
        let snapshot = {
            let mut state = self
                .state
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            state.currency = currency;
            state.clone()
        };
        self.persist(&snapshot);
        snapshot
    }

    /// Converts a USD price into the active display currency.
    pub fn convert_price(&self, price_usd: Decimal) -> Decimal {
        let state = self.read();
        let rate = state
            .exchange_rates
            .get(&state.currency)
            .copied()
            .unwrap_or(Decimal::ONE);
        (price_usd * rate).round_dp(2)
    }

    fn persist(&self, settings: &Settings) {
        match serde_json::to_string(settings) {
            Ok(json) => self.kv.save(STORAGE_KEY, &json),
            Err(error) => tracing::error!(%error, "failed to serialize settings"),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Settings> {
        self.state.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

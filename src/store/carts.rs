//! Session-scoped cart store.
//!
//! Each session/device owns its own cart instance; there is no cross-session
//! locking. Carts hydrate lazily from the persistence adapter on first touch
//! and are saved back on every mutating call.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::checkout::orchestrator::CartAccess;
use crate::domain::aggregates::cart::Cart;
use crate::domain::aggregates::product::Product;
use crate::store::persist::KeyValueStore;

pub struct CartStore {
    carts: Mutex<HashMap<String, Cart>>,
    kv: Arc<dyn KeyValueStore>,
}

impl CartStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            carts: Mutex::new(HashMap::new()),
            kv,
        }
    }

    pub fn snapshot(&self, session: &str) -> Cart {
        let mut carts = lock(&self.carts);
        self.entry(&mut carts, session).clone()
    }

    pub fn add_item(&self, session: &str, product: Product, variant_id: Option<String>) -> Cart {
        self.mutate(session, |cart| cart.add_item(product, variant_id))
    }

    pub fn update_quantity(
        &self,
        session: &str,
        product_id: &str,
        quantity: i64,
        variant_id: Option<&str>,
    ) -> Cart {
        self.mutate(session, |cart| {
            cart.update_quantity(product_id, quantity, variant_id)
        })
    }

    pub fn clear(&self, session: &str) {
        self.mutate(session, Cart::clear);
    }

    fn mutate(&self, session: &str, op: impl FnOnce(&mut Cart)) -> Cart {
        let mut carts = lock(&self.carts);
        let cart = self.entry(&mut carts, session);
        op(cart);
        let snapshot = cart.clone();
        self.persist(session, &snapshot);
        snapshot
    }

    fn entry<'a>(&self, carts: &'a mut HashMap<String, Cart>, session: &str) -> &'a mut Cart {
        carts.entry(session.to_string()).or_insert_with(|| {
            self.kv
                .load(&storage_key(session))
                .and_then(|json| serde_json::from_str(&json).ok())
                .unwrap_or_default()
        })
    }

    fn persist(&self, session: &str, cart: &Cart) {
        match serde_json::to_string(cart) {
            Ok(json) => self.kv.save(&storage_key(session), &json),
            Err(error) => tracing::error!(session, %error, "failed to serialize cart"),
        }
    }
}

impl CartAccess for CartStore {
    fn snapshot(&self, session: &str) -> Cart {
        CartStore::snapshot(self, session)
    }

    fn clear(&self, session: &str) {
        CartStore::clear(self, session);
    }
}

fn storage_key(session: &str) -> String {
    format!("cart-storage:{session}")
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

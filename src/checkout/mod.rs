//! Checkout flow: draft validation and payment orchestration.
pub mod draft;
pub mod orchestrator;

pub use draft::OrderDraft;
pub use orchestrator::{
    BernoulliSampler, CartAccess, CheckoutConfig, CheckoutError, CreateOrder, GatewaySampler,
    OrderCreationError, PaymentAttemptState, PaymentOrchestrator,
};

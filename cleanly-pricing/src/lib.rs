//! Price calculation for cleaning services.
//!
//! Takes a service's pricing options and a customer's selections and
//! produces an ordered breakdown, subtotal and total. Pure and stateless:
//! no I/O, no shared state, safe to call from any number of threads.

pub mod engine;
pub mod engine_config;
pub mod error;
pub mod result;
pub mod selection;

pub use engine::{calculate, PricingEngine};
pub use engine_config::{EngineConfig, RoundingMode};
pub use error::CalculationError;
pub use result::{LineItem, PricingResult};
pub use selection::OptionSelection;

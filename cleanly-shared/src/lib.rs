pub mod models;

pub use models::events::{OrderEvent, OrderPricedEvent, OrderRecalculatedEvent, OrderStatusChangedEvent};

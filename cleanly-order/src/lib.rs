pub mod models;
pub mod manager;

pub use models::{CustomerContact, OrderStatus, PricedOrder};
pub use manager::{OrderError, OrderManager};

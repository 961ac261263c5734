use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct OrderPricedEvent {
    pub order_id: Uuid,
    pub service_id: i64,
    pub total: Decimal,
    pub line_count: usize,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct OrderRecalculatedEvent {
    pub order_id: Uuid,
    pub revision: u32,
    pub previous_total: Decimal,
    pub total: Decimal,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct OrderStatusChangedEvent {
    pub order_id: Uuid,
    pub from: String,
    pub to: String,
    pub timestamp: i64,
}

/// Envelope for everything the order side publishes
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
#[serde(tag = "event_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEvent {
    OrderPriced(OrderPricedEvent),
    OrderRecalculated(OrderRecalculatedEvent),
    OrderStatusChanged(OrderStatusChangedEvent),
}

impl OrderEvent {
    pub fn order_id(&self) -> Uuid {
        match self {
            OrderEvent::OrderPriced(e) => e.order_id,
            OrderEvent::OrderRecalculated(e) => e.order_id,
            OrderEvent::OrderStatusChanged(e) => e.order_id,
        }
    }
}

use chrono::Utc;
use cleanly_catalog::ServiceDefinition;
use cleanly_pricing::{CalculationError, OptionSelection, PricingEngine};
use cleanly_shared::{OrderEvent, OrderPricedEvent, OrderRecalculatedEvent, OrderStatusChangedEvent};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{CustomerContact, OrderStatus, PricedOrder};

/// Prices orders and manages their lifecycle
pub struct OrderManager {
    engine: PricingEngine,
    orders: HashMap<Uuid, PricedOrder>,
    events: Vec<OrderEvent>,
}

impl OrderManager {
    pub fn new(engine: PricingEngine) -> Self {
        Self {
            engine,
            orders: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// Price the customer's selections and record the order
    pub fn create_order(
        &mut self,
        service: &ServiceDefinition,
        customer: CustomerContact,
        selections: Vec<OptionSelection>,
    ) -> Result<PricedOrder, OrderError> {
        if !service.is_published {
            return Err(OrderError::ServiceNotPublished(service.id));
        }

        let pricing = self.engine.calculate_for_service(service, &selections)?;
        let order = PricedOrder::new(service.id, service.name.clone(), customer, selections, pricing);

        tracing::info!(order_id = %order.id, service_id = service.id, total = %order.total_amount, "order priced");
        self.events.push(OrderEvent::OrderPriced(OrderPricedEvent {
            order_id: order.id,
            service_id: service.id,
            total: order.total_amount,
            line_count: order.pricing.breakdown.len(),
            timestamp: Utc::now().timestamp(),
        }));

        self.orders.insert(order.id, order.clone());
        Ok(order)
    }

    /// Get an order by ID
    pub fn get_order(&self, order_id: &Uuid) -> Option<&PricedOrder> {
        self.orders.get(order_id)
    }

    /// Admin action: re-price an open order against the current service
    /// definition. The previous snapshot is replaced by a new revision; a
    /// failed calculation leaves the stored order as it was.
    pub fn recalculate(&mut self, order_id: &Uuid, service: &ServiceDefinition) -> Result<PricedOrder, OrderError> {
        let current = self
            .orders
            .get(order_id)
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;

        if current.status.is_final() {
            return Err(OrderError::OrderClosed(current.status));
        }
        if current.service_id != service.id {
            return Err(OrderError::ServiceMismatch {
                expected: current.service_id,
                actual: service.id,
            });
        }

        let pricing = self.engine.calculate_for_service(service, &current.selections)?;
        let previous_total = current.total_amount;
        let updated = current.repriced(service.name.clone(), pricing);

        tracing::info!(
            order_id = %updated.id,
            revision = updated.revision,
            previous_total = %previous_total,
            total = %updated.total_amount,
            "order recalculated"
        );
        self.events.push(OrderEvent::OrderRecalculated(OrderRecalculatedEvent {
            order_id: updated.id,
            revision: updated.revision,
            previous_total,
            total: updated.total_amount,
            timestamp: Utc::now().timestamp(),
        }));

        self.orders.insert(updated.id, updated.clone());
        Ok(updated)
    }

    /// Transition: Pending Confirmation → Confirmed
    pub fn confirm(&mut self, order_id: &Uuid) -> Result<(), OrderError> {
        self.transition(order_id, &[OrderStatus::PendingConfirmation], OrderStatus::Confirmed)
    }

    /// Transition: Confirmed → Completed
    pub fn complete(&mut self, order_id: &Uuid) -> Result<(), OrderError> {
        self.transition(order_id, &[OrderStatus::Confirmed], OrderStatus::Completed)
    }

    /// Cancel an order that has not been completed
    pub fn cancel(&mut self, order_id: &Uuid) -> Result<(), OrderError> {
        self.transition(
            order_id,
            &[OrderStatus::PendingConfirmation, OrderStatus::Confirmed],
            OrderStatus::Cancelled,
        )
    }

    /// Drain events published since the last call
    pub fn take_events(&mut self) -> Vec<OrderEvent> {
        std::mem::take(&mut self.events)
    }

    fn transition(&mut self, order_id: &Uuid, allowed: &[OrderStatus], to: OrderStatus) -> Result<(), OrderError> {
        let order = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;

        if !allowed.contains(&order.status) {
            return Err(OrderError::InvalidTransition {
                from: order.status.to_string(),
                to: to.to_string(),
            });
        }

        let from = order.status;
        order.update_status(to);

        tracing::info!(order_id = %order_id, %from, %to, "order status changed");
        self.events.push(OrderEvent::OrderStatusChanged(OrderStatusChangedEvent {
            order_id: *order_id,
            from: from.to_string(),
            to: to.to_string(),
            timestamp: Utc::now().timestamp(),
        }));
        Ok(())
    }
}

impl Default for OrderManager {
    fn default() -> Self {
        Self::new(PricingEngine::default())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Order is {0} and can no longer be changed")]
    OrderClosed(OrderStatus),

    #[error("Order belongs to service {expected}, not {actual}")]
    ServiceMismatch { expected: i64, actual: i64 },

    #[error("Service {0} is not published")]
    ServiceNotPublished(i64),

    #[error("Pricing failed: {0}")]
    Pricing(#[from] CalculationError),
}

impl OrderError {
    /// Message suitable for showing to the customer or admin
    pub fn user_message(&self) -> String {
        match self {
            OrderError::Pricing(err) => match err {
                CalculationError::MissingRequiredOption(_) => {
                    "Please make a selection for every required option.".to_string()
                }
                CalculationError::UnknownOption(_) | CalculationError::DuplicateSelection(_) => {
                    "The service options have changed. Please refresh and try again.".to_string()
                }
                CalculationError::InvalidQuantity(_) => "Please enter a valid quantity.".to_string(),
                CalculationError::InvalidChoice(_, name) => {
                    format!("'{}' is not an available choice. Please pick another.", name)
                }
                CalculationError::SelectionMismatch(_, _) => "Please complete every selected option.".to_string(),
                CalculationError::AmountOverflow(_) => "The requested amount is too large.".to_string(),
            },
            OrderError::NotFound(_) => "Order not found.".to_string(),
            OrderError::ServiceNotPublished(_) => "This service is not available for booking.".to_string(),
            OrderError::InvalidTransition { .. } | OrderError::OrderClosed(_) | OrderError::ServiceMismatch { .. } => {
                self.to_string()
            }
        }
    }
}

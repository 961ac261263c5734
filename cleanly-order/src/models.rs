use chrono::{DateTime, Utc};
use cleanly_pricing::{OptionSelection, PricingResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Order status in the lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderStatus {
    #[serde(rename = "Pending Confirmation")]
    PendingConfirmation,
    Confirmed,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Completed and cancelled orders are frozen
    pub fn is_final(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::PendingConfirmation => "Pending Confirmation",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        };
        f.write_str(s)
    }
}

/// Who the order is for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerContact {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

/// A customer order with the pricing it was accepted at.
///
/// `pricing` is a snapshot: later catalog edits never touch it. An admin
/// recalculation produces a whole new snapshot with a higher `revision`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricedOrder {
    pub id: Uuid,
    pub service_id: i64,
    pub service_name: String,
    pub customer: CustomerContact,
    pub selections: Vec<OptionSelection>,
    pub pricing: PricingResult,
    pub total_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration_minutes: Option<u32>,
    pub revision: u32,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PricedOrder {
    pub fn new(
        service_id: i64,
        service_name: String,
        customer: CustomerContact,
        selections: Vec<OptionSelection>,
        pricing: PricingResult,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            service_id,
            service_name,
            customer,
            selections,
            total_amount: pricing.total,
            estimated_duration_minutes: pricing.estimated_duration_minutes,
            pricing,
            revision: 1,
            status: OrderStatus::PendingConfirmation,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Next revision of this order carrying a fresh pricing snapshot
    pub fn repriced(&self, service_name: String, pricing: PricingResult) -> Self {
        Self {
            service_name,
            total_amount: pricing.total,
            estimated_duration_minutes: pricing.estimated_duration_minutes,
            pricing,
            revision: self.revision + 1,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    /// Update order status
    pub fn update_status(&mut self, new_status: OrderStatus) {
        self.status = new_status;
        self.updated_at = Utc::now();
    }
}

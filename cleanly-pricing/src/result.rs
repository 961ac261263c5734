use cleanly_catalog::{OptionId, OptionType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One priced line of the breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub option_id: OptionId,
    pub option_name: String,
    pub kind: OptionType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,

    /// Name of the picked selector choice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choice: Option<String>,

    /// Per-unit price, choice price or flat surcharge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,

    /// Percentage applied to the subtotal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    pub line_total: Decimal,
}

impl LineItem {
    pub(crate) fn new(option_id: OptionId, option_name: &str, kind: OptionType) -> Self {
        Self {
            option_id,
            option_name: option_name.to_string(),
            kind,
            quantity: None,
            choice: None,
            unit_price: None,
            percent: None,
            enabled: None,
            line_total: Decimal::ZERO,
        }
    }
}

/// Outcome of a successful calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub base_price: Decimal,

    /// Base price plus per-unit and selector lines
    pub subtotal: Decimal,

    /// Subtotal plus surcharges, rounded once
    pub total: Decimal,

    /// Lines in `order_index` order
    pub breakdown: Vec<LineItem>,

    /// Catalog estimate, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration_minutes: Option<u32>,
}

impl PricingResult {
    pub fn with_estimated_duration(mut self, minutes: Option<u32>) -> Self {
        self.estimated_duration_minutes = minutes;
        self
    }

    /// Look up the line for an option
    pub fn line(&self, option_id: OptionId) -> Option<&LineItem> {
        self.breakdown.iter().find(|l| l.option_id == option_id)
    }

    /// Sum of surcharge lines (everything between subtotal and total)
    pub fn surcharges(&self) -> Decimal {
        self.breakdown
            .iter()
            .filter(|l| l.kind == OptionType::FlexibleValue)
            .map(|l| l.line_total)
            .sum()
    }
}

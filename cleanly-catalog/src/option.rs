use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DefinitionError;

/// Identifier of a pricing option, stable across requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionId(pub i64);

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for OptionId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Pricing option kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    PerUnit,
    Selector,
    FlexibleValue,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OptionType::PerUnit => "per_unit",
            OptionType::Selector => "selector",
            OptionType::FlexibleValue => "flexible_value",
        };
        f.write_str(s)
    }
}

/// How a flexible value is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlexibleValueType {
    /// Percentage of the subtotal
    Percentage,
    /// Flat surcharge
    DollarAmount,
}

/// Linear price per selected quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerUnitData {
    pub price_per_unit: Decimal,

    /// Label for one unit ("cushion", "window")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_quantity: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_quantity: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
}

impl PerUnitData {
    pub fn new(price_per_unit: Decimal) -> Self {
        Self {
            price_per_unit,
            unit_name: None,
            min_quantity: None,
            max_quantity: None,
            short_description: None,
            full_description: None,
        }
    }

    /// Restrict accepted quantities to `min..=max`
    pub fn with_bounds(mut self, min_quantity: Option<i64>, max_quantity: Option<i64>) -> Self {
        self.min_quantity = min_quantity;
        self.max_quantity = max_quantity;
        self
    }

    /// Whether `quantity` is acceptable for this option
    pub fn accepts(&self, quantity: i64) -> bool {
        if quantity < 0 {
            return false;
        }
        if self.min_quantity.is_some_and(|min| quantity < min) {
            return false;
        }
        !self.max_quantity.is_some_and(|max| quantity > max)
    }
}

/// One entry of a selector option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub name: String,
    pub price: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
}

impl Choice {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
            short_description: None,
            full_description: None,
        }
    }
}

/// Exactly one of `choices` is picked per calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorData {
    #[serde(rename = "options")]
    pub choices: Vec<Choice>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
}

impl SelectorData {
    pub fn new(choices: Vec<Choice>) -> Self {
        Self {
            choices,
            short_description: None,
            full_description: None,
        }
    }

    /// Look a choice up by its exact name
    pub fn find(&self, name: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.name == name)
    }
}

/// Togglable surcharge, either a percentage of the subtotal or a flat amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexibleValueData {
    pub value_type: FlexibleValueType,
    pub value: Decimal,

    /// Default state when a selection does not say otherwise
    #[serde(default)]
    pub is_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
}

impl FlexibleValueData {
    pub fn percentage(value: Decimal) -> Self {
        Self::new(FlexibleValueType::Percentage, value)
    }

    pub fn dollar_amount(value: Decimal) -> Self {
        Self::new(FlexibleValueType::DollarAmount, value)
    }

    fn new(value_type: FlexibleValueType, value: Decimal) -> Self {
        Self {
            value_type,
            value,
            is_enabled: false,
            short_description: None,
            full_description: None,
        }
    }

    pub fn enabled_by_default(mut self) -> Self {
        self.is_enabled = true;
        self
    }
}

/// Type-specific payload of a pricing option.
///
/// The payload lives inside the variant, so an option can never carry data
/// for a kind other than its own.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionKind {
    PerUnit(PerUnitData),
    Selector(SelectorData),
    FlexibleValue(FlexibleValueData),
}

impl OptionKind {
    pub fn option_type(&self) -> OptionType {
        match self {
            OptionKind::PerUnit(_) => OptionType::PerUnit,
            OptionKind::Selector(_) => OptionType::Selector,
            OptionKind::FlexibleValue(_) => OptionType::FlexibleValue,
        }
    }
}

/// One configurable charge line a service offers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PricingOptionRecord", into = "PricingOptionRecord")]
pub struct PricingOption {
    pub id: OptionId,
    pub name: String,
    /// Display and evaluation order, unique within a service
    pub order_index: i32,
    pub is_required: bool,
    /// Inactive options are treated as deleted by the engine
    pub is_active: bool,
    /// Presentation hint only; hidden options are still priced
    pub is_hidden: bool,
    pub kind: OptionKind,
}

impl PricingOption {
    pub fn new(id: impl Into<OptionId>, name: impl Into<String>, kind: OptionKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            order_index: 0,
            is_required: false,
            is_active: true,
            is_hidden: false,
            kind,
        }
    }

    pub fn per_unit(id: impl Into<OptionId>, name: impl Into<String>, price_per_unit: Decimal) -> Self {
        Self::new(id, name, OptionKind::PerUnit(PerUnitData::new(price_per_unit)))
    }

    pub fn selector(id: impl Into<OptionId>, name: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self::new(id, name, OptionKind::Selector(SelectorData::new(choices)))
    }

    pub fn flexible(id: impl Into<OptionId>, name: impl Into<String>, data: FlexibleValueData) -> Self {
        Self::new(id, name, OptionKind::FlexibleValue(data))
    }

    pub fn with_order_index(mut self, order_index: i32) -> Self {
        self.order_index = order_index;
        self
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.is_hidden = true;
        self
    }

    pub fn option_type(&self) -> OptionType {
        self.kind.option_type()
    }
}

fn default_active() -> bool {
    true
}

/// Flat record form of a pricing option, as the catalog API exchanges it:
/// a type tag plus one optional payload field per kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingOptionRecord {
    pub id: OptionId,
    pub name: String,
    pub option_type: OptionType,
    #[serde(default)]
    pub order_index: i32,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_unit_option: Option<PerUnitData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector_option: Option<SelectorData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flexible_value_option: Option<FlexibleValueData>,
}

impl TryFrom<PricingOptionRecord> for PricingOption {
    type Error = DefinitionError;

    fn try_from(record: PricingOptionRecord) -> Result<Self, Self::Error> {
        let kind = match (
            record.option_type,
            record.per_unit_option,
            record.selector_option,
            record.flexible_value_option,
        ) {
            (OptionType::PerUnit, Some(data), None, None) => OptionKind::PerUnit(data),
            (OptionType::Selector, None, Some(data), None) => OptionKind::Selector(data),
            (OptionType::FlexibleValue, None, None, Some(data)) => OptionKind::FlexibleValue(data),
            (option_type, ..) => {
                return Err(DefinitionError::PayloadMismatch {
                    option_id: record.id,
                    option_type,
                })
            }
        };

        Ok(Self {
            id: record.id,
            name: record.name,
            order_index: record.order_index,
            is_required: record.is_required,
            is_active: record.is_active,
            is_hidden: record.is_hidden,
            kind,
        })
    }
}

impl From<PricingOption> for PricingOptionRecord {
    fn from(option: PricingOption) -> Self {
        let option_type = option.option_type();
        let (per_unit_option, selector_option, flexible_value_option) = match option.kind {
            OptionKind::PerUnit(data) => (Some(data), None, None),
            OptionKind::Selector(data) => (None, Some(data), None),
            OptionKind::FlexibleValue(data) => (None, None, Some(data)),
        };

        Self {
            id: option.id,
            name: option.name,
            option_type,
            order_index: option.order_index,
            is_required: option.is_required,
            is_active: option.is_active,
            is_hidden: option.is_hidden,
            per_unit_option,
            selector_option,
            flexible_value_option,
        }
    }
}

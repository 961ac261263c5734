//! Import of pricing blocks, the earlier revision of the option model.
//!
//! Blocks came in three shapes: quantity (per-unit price with optional
//! bounds), type (pick one of several prices) and toggle (a percentage
//! increase that the customer switches on).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DefinitionError;
use crate::option::{
    Choice, FlexibleValueData, OptionId, OptionKind, OptionType, PerUnitData, PricingOption, SelectorData,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Quantity,
    Type,
    Toggle,
}

impl BlockType {
    fn option_type(self) -> OptionType {
        match self {
            BlockType::Quantity => OptionType::PerUnit,
            BlockType::Type => OptionType::Selector,
            BlockType::Toggle => OptionType::FlexibleValue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityBlock {
    pub name: String,
    pub unit_price: Decimal,
    #[serde(default)]
    pub min_quantity: Option<i64>,
    #[serde(default)]
    pub max_quantity: Option<i64>,
    pub unit_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeBlockEntry {
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeBlock {
    pub name: String,
    pub options: Vec<TypeBlockEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleBlock {
    pub name: String,
    pub short_description: String,
    #[serde(default)]
    pub full_description: Option<String>,
    pub percentage_increase: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingBlock {
    pub id: i64,
    pub service_id: i64,
    pub name: String,
    pub block_type: BlockType,
    pub order_index: i32,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub quantity_option: Option<QuantityBlock>,
    #[serde(default)]
    pub type_option: Option<TypeBlock>,
    #[serde(default)]
    pub toggle_option: Option<ToggleBlock>,
}

impl TryFrom<PricingBlock> for PricingOption {
    type Error = DefinitionError;

    fn try_from(block: PricingBlock) -> Result<Self, Self::Error> {
        let id = OptionId(block.id);

        let kind = match (block.block_type, block.quantity_option, block.type_option, block.toggle_option) {
            (BlockType::Quantity, Some(q), None, None) => {
                let mut data = PerUnitData::new(q.unit_price).with_bounds(q.min_quantity, q.max_quantity);
                data.unit_name = Some(q.unit_name);
                OptionKind::PerUnit(data)
            }
            (BlockType::Type, None, Some(t), None) => OptionKind::Selector(SelectorData::new(
                t.options.into_iter().map(|e| Choice::new(e.name, e.price)).collect(),
            )),
            (BlockType::Toggle, None, None, Some(t)) => {
                let mut data = FlexibleValueData::percentage(t.percentage_increase);
                data.short_description = Some(t.short_description);
                data.full_description = t.full_description;
                OptionKind::FlexibleValue(data)
            }
            (block_type, ..) => {
                return Err(DefinitionError::PayloadMismatch {
                    option_id: id,
                    option_type: block_type.option_type(),
                })
            }
        };

        Ok(PricingOption {
            id,
            name: block.name,
            order_index: block.order_index,
            is_required: block.is_required,
            is_active: block.is_active,
            is_hidden: false,
            kind,
        })
    }
}

/// Convert a whole service's blocks, stopping at the first malformed one
pub fn import_blocks(blocks: Vec<PricingBlock>) -> Result<Vec<PricingOption>, DefinitionError> {
    let count = blocks.len();
    let options = blocks
        .into_iter()
        .map(PricingOption::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    tracing::info!(count, "imported legacy pricing blocks");
    Ok(options)
}

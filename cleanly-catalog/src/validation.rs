use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::error::DefinitionError;
use crate::option::{FlexibleValueType, OptionKind, PricingOption};

/// Check a single option definition. Fails on the first problem found.
pub fn validate_option(option: &PricingOption) -> Result<(), DefinitionError> {
    let id = option.id;

    if option.name.trim().is_empty() {
        return Err(DefinitionError::EmptyName(id));
    }

    match &option.kind {
        OptionKind::PerUnit(data) => {
            if data.price_per_unit < Decimal::ZERO {
                return Err(DefinitionError::NegativePrice(id));
            }
            if let (Some(min), Some(max)) = (data.min_quantity, data.max_quantity) {
                if min > max {
                    return Err(DefinitionError::InvalidQuantityBounds { option_id: id, min, max });
                }
            }
        }
        OptionKind::Selector(data) => {
            if data.choices.is_empty() {
                return Err(DefinitionError::EmptyChoices(id));
            }
            let mut seen = HashSet::new();
            for choice in &data.choices {
                if !seen.insert(choice.name.as_str()) {
                    return Err(DefinitionError::DuplicateChoice {
                        option_id: id,
                        name: choice.name.clone(),
                    });
                }
                if choice.price < Decimal::ZERO {
                    return Err(DefinitionError::NegativePrice(id));
                }
            }
        }
        OptionKind::FlexibleValue(data) => match data.value_type {
            FlexibleValueType::Percentage => {
                if data.value <= Decimal::ZERO || data.value > Decimal::ONE_HUNDRED {
                    return Err(DefinitionError::PercentageOutOfRange(id));
                }
            }
            FlexibleValueType::DollarAmount => {
                if data.value < Decimal::ZERO {
                    return Err(DefinitionError::NegativeAmount(id));
                }
            }
        },
    }

    Ok(())
}

/// Check every option of a service plus the cross-option invariants:
/// unique ids and unique order indices.
pub fn validate_options(options: &[PricingOption]) -> Result<(), DefinitionError> {
    let mut ids = HashSet::new();
    let mut indices = HashSet::new();

    for option in options {
        validate_option(option)?;

        if !ids.insert(option.id) {
            return Err(DefinitionError::DuplicateOptionId(option.id));
        }
        if !indices.insert(option.order_index) {
            return Err(DefinitionError::DuplicateOrderIndex(option.order_index));
        }
    }

    tracing::debug!(count = options.len(), "pricing options validated");
    Ok(())
}

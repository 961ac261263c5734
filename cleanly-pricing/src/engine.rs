use cleanly_catalog::{FlexibleValueType, OptionId, OptionKind, PricingOption, ServiceDefinition};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

use crate::engine_config::EngineConfig;
use crate::error::CalculationError;
use crate::result::{LineItem, PricingResult};
use crate::selection::OptionSelection;

/// How a line feeds into the totals
enum Contribution {
    /// Part of the subtotal (per-unit and selector lines)
    Subtotal,
    /// Flat surcharge added after the subtotal
    Flat,
    /// Percentage of the subtotal, resolved once the subtotal is known
    Percentage(Decimal),
    /// Disabled surcharge, reported with a zero total
    Nothing,
}

/// Stateless price calculator for service pricing options.
///
/// Holds only its configuration, so one instance can be shared freely
/// between threads.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: EngineConfig,
}

impl PricingEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Price a service definition, threading its duration estimate into the
    /// result.
    pub fn calculate_for_service(
        &self,
        service: &ServiceDefinition,
        selections: &[OptionSelection],
    ) -> Result<PricingResult, CalculationError> {
        let result = self.calculate(&service.pricing_options, selections, service.base_price)?;
        Ok(result.with_estimated_duration(service.estimated_duration_minutes))
    }

    /// Compute the breakdown and totals for `selections` against `options`.
    ///
    /// Percentage surcharges are each taken from the same subtotal and then
    /// added; they never compound on one another.
    pub fn calculate(
        &self,
        options: &[PricingOption],
        selections: &[OptionSelection],
        base_price: Decimal,
    ) -> Result<PricingResult, CalculationError> {
        let mut active: Vec<&PricingOption> = options.iter().filter(|o| o.is_active).collect();
        active.sort_by_key(|o| (o.order_index, o.id));
        let by_id: HashMap<OptionId, &PricingOption> = active.iter().map(|o| (o.id, *o)).collect();

        let selected: HashSet<OptionId> = selections.iter().map(|s| s.option_id).collect();
        if let Some(missing) = active.iter().find(|o| o.is_required && !selected.contains(&o.id)) {
            return Err(CalculationError::MissingRequiredOption(missing.id));
        }

        let mut by_option: HashMap<OptionId, &OptionSelection> = HashMap::with_capacity(selections.len());
        for selection in selections {
            if !by_id.contains_key(&selection.option_id) {
                return Err(CalculationError::UnknownOption(selection.option_id));
            }
            if by_option.insert(selection.option_id, selection).is_some() {
                return Err(CalculationError::DuplicateSelection(selection.option_id));
            }
        }

        let mut lines = Vec::with_capacity(by_option.len());
        for option in &active {
            if let Some(selection) = by_option.get(&option.id) {
                lines.push(price_line(option, selection)?);
            }
        }

        let mut subtotal = base_price;
        for (line, contribution) in &lines {
            if let Contribution::Subtotal = contribution {
                subtotal = subtotal
                    .checked_add(line.line_total)
                    .ok_or(CalculationError::AmountOverflow(line.option_id))?;
            }
        }

        let mut total = subtotal;
        for (line, contribution) in lines.iter_mut() {
            match contribution {
                Contribution::Percentage(percent) => {
                    line.line_total = subtotal
                        .checked_mul(*percent)
                        .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
                        .ok_or(CalculationError::AmountOverflow(line.option_id))?;
                }
                Contribution::Flat => {}
                Contribution::Subtotal | Contribution::Nothing => continue,
            }
            total = total
                .checked_add(line.line_total)
                .ok_or(CalculationError::AmountOverflow(line.option_id))?;
        }

        let result = PricingResult {
            base_price,
            subtotal,
            total: self.config.round(total),
            breakdown: lines.into_iter().map(|(line, _)| line).collect(),
            estimated_duration_minutes: None,
        };

        tracing::debug!(
            options = active.len(),
            lines = result.breakdown.len(),
            subtotal = %result.subtotal,
            total = %result.total,
            "pricing calculated"
        );

        Ok(result)
    }
}

/// Price one matched (option, selection) pair.
fn price_line(
    option: &PricingOption,
    selection: &OptionSelection,
) -> Result<(LineItem, Contribution), CalculationError> {
    let mut line = LineItem::new(option.id, &option.name, option.option_type());

    let contribution = match &option.kind {
        OptionKind::PerUnit(data) => {
            let quantity = selection
                .quantity
                .ok_or(CalculationError::SelectionMismatch(option.id, option.option_type()))?;
            if !data.accepts(quantity) {
                return Err(CalculationError::InvalidQuantity(option.id));
            }
            line.quantity = Some(quantity);
            line.unit_price = Some(data.price_per_unit);
            line.line_total = data
                .price_per_unit
                .checked_mul(Decimal::from(quantity))
                .ok_or(CalculationError::AmountOverflow(option.id))?;
            Contribution::Subtotal
        }
        OptionKind::Selector(data) => {
            let name = selection
                .selected_option
                .as_deref()
                .ok_or(CalculationError::SelectionMismatch(option.id, option.option_type()))?;
            let choice = data
                .find(name)
                .ok_or_else(|| CalculationError::InvalidChoice(option.id, name.to_string()))?;
            line.choice = Some(choice.name.clone());
            line.unit_price = Some(choice.price);
            line.line_total = choice.price;
            Contribution::Subtotal
        }
        OptionKind::FlexibleValue(data) => {
            let enabled = selection.enabled.unwrap_or(data.is_enabled);
            line.enabled = Some(enabled);
            match data.value_type {
                FlexibleValueType::Percentage => line.percent = Some(data.value),
                FlexibleValueType::DollarAmount => line.unit_price = Some(data.value),
            }

            if !enabled {
                Contribution::Nothing
            } else {
                match data.value_type {
                    FlexibleValueType::DollarAmount => {
                        // Catalog rejects these; priced as given so a stale
                        // definition lowers the total instead of failing.
                        if data.value < Decimal::ZERO {
                            tracing::warn!(option_id = %option.id, value = %data.value, "negative flat surcharge");
                        }
                        line.line_total = data.value;
                        Contribution::Flat
                    }
                    FlexibleValueType::Percentage => {
                        if data.value <= Decimal::ZERO || data.value > Decimal::ONE_HUNDRED {
                            tracing::warn!(option_id = %option.id, value = %data.value, "percentage outside (0, 100]");
                        }
                        Contribution::Percentage(data.value)
                    }
                }
            }
        }
    };

    Ok((line, contribution))
}

/// Calculate with the default configuration
pub fn calculate(
    options: &[PricingOption],
    selections: &[OptionSelection],
    base_price: Decimal,
) -> Result<PricingResult, CalculationError> {
    PricingEngine::default().calculate(options, selections, base_price)
}

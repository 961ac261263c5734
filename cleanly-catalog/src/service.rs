use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::option::PricingOption;

/// A cleaning service together with its pricing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_published: bool,

    /// Price charged before any option is applied
    #[serde(default)]
    pub base_price: Decimal,

    /// Duration estimate owned by the catalog; passed through to quotes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration_minutes: Option<u32>,

    #[serde(default)]
    pub pricing_options: Vec<PricingOption>,

    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ServiceDefinition {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            is_published: false,
            base_price: Decimal::ZERO,
            estimated_duration_minutes: None,
            pricing_options: Vec::new(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn with_base_price(mut self, base_price: Decimal) -> Self {
        self.base_price = base_price;
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.estimated_duration_minutes = Some(minutes);
        self
    }

    pub fn with_option(mut self, option: PricingOption) -> Self {
        self.pricing_options.push(option);
        self
    }

    /// Replace the option list, e.g. after an admin edit
    pub fn set_options(&mut self, options: Vec<PricingOption>) {
        self.pricing_options = options;
        self.updated_at = Some(Utc::now());
    }

    /// Options the engine will price, in evaluation order
    pub fn active_options(&self) -> Vec<&PricingOption> {
        let mut options: Vec<&PricingOption> = self.pricing_options.iter().filter(|o| o.is_active).collect();
        options.sort_by_key(|o| (o.order_index, o.id));
        options
    }

    /// Options a customer-facing calculator should render
    pub fn public_options(&self) -> Vec<&PricingOption> {
        self.active_options().into_iter().filter(|o| !o.is_hidden).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::{FlexibleValueData, OptionId};

    #[test]
    fn test_public_options_skip_hidden_and_inactive() {
        let service = ServiceDefinition::new(1, "Couch Cleaning")
            .with_base_price(Decimal::from(100))
            .with_duration(120)
            .with_option(PricingOption::per_unit(1, "Cushions", Decimal::TEN).with_order_index(5))
            .with_option(PricingOption::per_unit(2, "Legacy", Decimal::TEN).with_order_index(1).inactive())
            .with_option(
                PricingOption::flexible(3, "Admin fee", FlexibleValueData::dollar_amount(Decimal::TEN))
                    .with_order_index(2)
                    .hidden(),
            );

        let active: Vec<OptionId> = service.active_options().iter().map(|o| o.id).collect();
        assert_eq!(active, vec![OptionId(3), OptionId(1)]);

        let public: Vec<OptionId> = service.public_options().iter().map(|o| o.id).collect();
        assert_eq!(public, vec![OptionId(1)]);
    }

    #[test]
    fn test_set_options_touches_updated_at() {
        let mut service = ServiceDefinition::new(1, "Couch Cleaning");
        assert!(service.updated_at.is_none());
        service.set_options(vec![PricingOption::per_unit(1, "Cushions", Decimal::TEN)]);
        assert!(service.updated_at.is_some());
        assert_eq!(service.pricing_options.len(), 1);
    }
}

use cleanly_catalog::OptionId;
use serde::{Deserialize, Serialize};

/// A customer's (or admin's) value for one pricing option in one request.
///
/// Which field is read depends on the option kind: `quantity` for per-unit
/// options, `selected_option` for selectors, `enabled` for flexible values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSelection {
    pub option_id: OptionId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_option: Option<String>,

    /// Overrides the option's default state; the default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl OptionSelection {
    pub fn new(option_id: impl Into<OptionId>) -> Self {
        Self {
            option_id: option_id.into(),
            quantity: None,
            selected_option: None,
            enabled: None,
        }
    }

    pub fn per_unit(option_id: impl Into<OptionId>, quantity: i64) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::new(option_id)
        }
    }

    pub fn choice(option_id: impl Into<OptionId>, name: impl Into<String>) -> Self {
        Self {
            selected_option: Some(name.into()),
            ..Self::new(option_id)
        }
    }

    pub fn toggle(option_id: impl Into<OptionId>, enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
            ..Self::new(option_id)
        }
    }
}

use crate::option::{OptionId, OptionType};

/// Problems with a pricing-option definition, raised by the catalog when an
/// option is created, updated, imported or reordered.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DefinitionError {
    #[error("Option {option_id}: payload does not match option type {option_type}")]
    PayloadMismatch {
        option_id: OptionId,
        option_type: OptionType,
    },

    #[error("Option {0}: name must not be empty")]
    EmptyName(OptionId),

    #[error("Option {0}: price must not be negative")]
    NegativePrice(OptionId),

    #[error("Option {option_id}: min quantity {min} exceeds max quantity {max}")]
    InvalidQuantityBounds {
        option_id: OptionId,
        min: i64,
        max: i64,
    },

    #[error("Option {0}: selector has no choices")]
    EmptyChoices(OptionId),

    #[error("Option {option_id}: duplicate choice name '{name}'")]
    DuplicateChoice {
        option_id: OptionId,
        name: String,
    },

    #[error("Option {0}: percentage must be greater than 0 and at most 100")]
    PercentageOutOfRange(OptionId),

    #[error("Option {0}: dollar amount must not be negative")]
    NegativeAmount(OptionId),

    #[error("Duplicate option id {0}")]
    DuplicateOptionId(OptionId),

    #[error("Duplicate order index {0}")]
    DuplicateOrderIndex(i32),

    #[error("Option not found: {0}")]
    UnknownOption(OptionId),
}

use cleanly_catalog::{OptionId, OptionType};

/// Reasons a calculation request is rejected.
///
/// Every variant is a caller input problem; the engine stops at the first
/// one it meets and never returns a partial result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalculationError {
    #[error("Required option {0} has no selection")]
    MissingRequiredOption(OptionId),

    #[error("Selection references unknown or inactive option {0}")]
    UnknownOption(OptionId),

    #[error("Invalid quantity for option {0}")]
    InvalidQuantity(OptionId),

    #[error("Option {0} has no choice named '{1}'")]
    InvalidChoice(OptionId, String),

    #[error("Option {0} was selected more than once")]
    DuplicateSelection(OptionId),

    #[error("Selection for option {0} carries no value for a {1} option")]
    SelectionMismatch(OptionId, OptionType),

    #[error("Amount for option {0} is out of range")]
    AmountOverflow(OptionId),
}

impl CalculationError {
    /// Option the error refers to
    pub fn option_id(&self) -> OptionId {
        match self {
            CalculationError::MissingRequiredOption(id)
            | CalculationError::UnknownOption(id)
            | CalculationError::InvalidQuantity(id)
            | CalculationError::InvalidChoice(id, _)
            | CalculationError::DuplicateSelection(id)
            | CalculationError::SelectionMismatch(id, _)
            | CalculationError::AmountOverflow(id) => *id,
        }
    }
}

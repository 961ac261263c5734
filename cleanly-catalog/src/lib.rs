pub mod option;
pub mod service;
pub mod validation;
pub mod ordering;
pub mod legacy;
pub mod error;

pub use option::{
    Choice, FlexibleValueData, FlexibleValueType, OptionId, OptionKind, OptionType, PerUnitData, PricingOption,
    PricingOptionRecord, SelectorData,
};
pub use service::ServiceDefinition;
pub use validation::{validate_option, validate_options};
pub use ordering::{apply_order_updates, sort_by_order, OptionOrderUpdate};
pub use legacy::{import_blocks, PricingBlock};
pub use error::DefinitionError;

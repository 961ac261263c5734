use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::error::DefinitionError;
use crate::option::{OptionId, PricingOption};

/// Admin request to move an option to a new position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionOrderUpdate {
    pub option_id: OptionId,
    pub new_order: i32,
}

/// Sort options by `order_index`, ties broken by id
pub fn sort_by_order(options: &mut [PricingOption]) {
    options.sort_by_key(|o| (o.order_index, o.id));
}

/// Apply a batch of reorder requests.
///
/// All-or-nothing: an unknown id or a batch that would leave two options on
/// the same index fails and leaves `options` untouched.
pub fn apply_order_updates(
    options: &mut [PricingOption],
    updates: &[OptionOrderUpdate],
) -> Result<(), DefinitionError> {
    let mut new_order: HashMap<OptionId, i32> = options.iter().map(|o| (o.id, o.order_index)).collect();

    for update in updates {
        match new_order.get_mut(&update.option_id) {
            Some(index) => *index = update.new_order,
            None => return Err(DefinitionError::UnknownOption(update.option_id)),
        }
    }

    let mut taken = HashSet::new();
    for option in options.iter() {
        let index = new_order[&option.id];
        if !taken.insert(index) {
            return Err(DefinitionError::DuplicateOrderIndex(index));
        }
    }

    for option in options.iter_mut() {
        option.order_index = new_order[&option.id];
    }
    sort_by_order(options);

    tracing::debug!(updates = updates.len(), "pricing options reordered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn options() -> Vec<PricingOption> {
        vec![
            PricingOption::per_unit(1, "A", Decimal::ONE).with_order_index(0),
            PricingOption::per_unit(2, "B", Decimal::ONE).with_order_index(10),
            PricingOption::per_unit(3, "C", Decimal::ONE).with_order_index(20),
        ]
    }

    #[test]
    fn test_swap_positions() {
        let mut opts = options();
        apply_order_updates(
            &mut opts,
            &[
                OptionOrderUpdate { option_id: OptionId(1), new_order: 20 },
                OptionOrderUpdate { option_id: OptionId(3), new_order: 0 },
            ],
        )
        .unwrap();

        let ids: Vec<i64> = opts.iter().map(|o| o.id.0).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_collision_leaves_options_untouched() {
        let mut opts = options();
        let err = apply_order_updates(&mut opts, &[OptionOrderUpdate { option_id: OptionId(1), new_order: 10 }])
            .unwrap_err();

        assert_eq!(err, DefinitionError::DuplicateOrderIndex(10));
        assert_eq!(opts, options());
    }

    #[test]
    fn test_unknown_option() {
        let mut opts = options();
        let err = apply_order_updates(&mut opts, &[OptionOrderUpdate { option_id: OptionId(99), new_order: 5 }])
            .unwrap_err();
        assert_eq!(err, DefinitionError::UnknownOption(OptionId(99)));
    }
}

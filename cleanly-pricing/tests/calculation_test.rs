use cleanly_catalog::{Choice, FlexibleValueData, OptionId, PricingOption};
use cleanly_pricing::{calculate, CalculationError, OptionSelection, PricingEngine};
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;
use std::sync::Arc;
use std::thread;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn additive_options() -> Vec<PricingOption> {
    vec![
        PricingOption::per_unit(1, "Removable cushions", dec("7.25")).with_order_index(0),
        PricingOption::per_unit(2, "Pillows", dec("3.10")).with_order_index(1),
        PricingOption::selector(
            3,
            "Fabric",
            vec![Choice::new("Cotton", dec("0")), Choice::new("Leather", dec("22.40"))],
        )
        .with_order_index(2),
        PricingOption::per_unit(4, "Windows", dec("6")).with_order_index(3),
    ]
}

fn additive_selections() -> Vec<OptionSelection> {
    vec![
        OptionSelection::per_unit(1, 4),
        OptionSelection::per_unit(2, 3),
        OptionSelection::choice(3, "Leather"),
        OptionSelection::per_unit(4, 0),
    ]
}

#[test]
fn test_additive_lines_ignore_order_index_permutation() {
    init_tracing();
    let base = dec("40");
    let expected = base + dec("29") + dec("9.30") + dec("22.40");

    let permutations = [[0, 1, 2, 3], [3, 2, 1, 0], [10, -5, 7, 2], [1, 3, 0, 2]];
    for indices in permutations {
        let options: Vec<PricingOption> = additive_options()
            .into_iter()
            .zip(indices)
            .map(|(o, i)| o.with_order_index(i))
            .collect();

        let result = calculate(&options, &additive_selections(), base).unwrap();
        assert_eq!(result.subtotal, expected);
        assert_eq!(result.total, result.subtotal);

        let line_sum: Decimal = result.breakdown.iter().map(|l| l.line_total).sum();
        assert_eq!(base + line_sum, result.total);

        // Breakdown follows order_index
        let mut sorted = indices.to_vec();
        sorted.sort();
        let reported: Vec<i32> = result
            .breakdown
            .iter()
            .map(|l| options.iter().find(|o| o.id == l.option_id).unwrap().order_index)
            .collect();
        assert_eq!(reported, sorted);
    }
}

#[test]
fn test_percentages_do_not_compound() {
    init_tracing();
    let options = vec![
        PricingOption::per_unit(1, "Rooms", dec("25")).with_order_index(0),
        PricingOption::flexible(2, "Pet hair", FlexibleValueData::percentage(dec("50"))).with_order_index(1),
        PricingOption::flexible(3, "Urine stains", FlexibleValueData::percentage(dec("50"))).with_order_index(2),
    ];
    let selections = vec![
        OptionSelection::per_unit(1, 4),
        OptionSelection::toggle(2, true),
        OptionSelection::toggle(3, true),
    ];

    let result = calculate(&options, &selections, Decimal::ZERO).unwrap();
    assert_eq!(result.subtotal, dec("100"));
    assert_eq!(result.total, dec("200"));
    assert_eq!(result.line(OptionId(2)).unwrap().line_total, dec("50"));
    assert_eq!(result.line(OptionId(3)).unwrap().line_total, dec("50"));
}

#[test]
fn test_percentage_and_flat_surcharges_together() {
    let options = vec![
        PricingOption::flexible(1, "Accelerated drying", FlexibleValueData::dollar_amount(dec("15")))
            .with_order_index(0),
        PricingOption::flexible(2, "Base surcharge", FlexibleValueData::percentage(dec("20"))).with_order_index(1),
    ];
    let selections = vec![OptionSelection::toggle(1, true), OptionSelection::toggle(2, true)];

    // The flat amount is not part of the subtotal the percentage applies to
    let result = calculate(&options, &selections, dec("100")).unwrap();
    assert_eq!(result.subtotal, dec("100"));
    assert_eq!(result.total, dec("135"));
}

#[test]
fn test_identical_inputs_give_identical_output() {
    let mut options = additive_options();
    options.push(
        PricingOption::flexible(5, "Stains", FlexibleValueData::percentage(dec("12.5"))).with_order_index(9),
    );
    let mut selections = additive_selections();
    selections.push(OptionSelection::toggle(5, true));

    let engine = PricingEngine::default();
    let first = serde_json::to_string(&engine.calculate(&options, &selections, dec("19.99")).unwrap()).unwrap();
    let second = serde_json::to_string(&engine.calculate(&options, &selections, dec("19.99")).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_missing_required_returns_no_result() {
    let options = vec![
        PricingOption::per_unit(1, "Cushions", dec("10")).required(),
        PricingOption::selector(2, "Size", vec![Choice::new("Small", dec("5"))]).required(),
    ];
    let result = calculate(&options, &[OptionSelection::choice(2, "Small")], Decimal::ZERO);
    assert_eq!(result, Err(CalculationError::MissingRequiredOption(OptionId(1))));
}

#[test]
fn test_request_from_catalog_json() {
    init_tracing();
    let options: Vec<PricingOption> = serde_json::from_value(json!([
        {
            "id": 1, "name": "Cushions", "option_type": "per_unit", "order_index": 0,
            "is_required": true, "per_unit_option": { "price_per_unit": "10" }
        },
        {
            "id": 2, "name": "Size", "option_type": "selector", "order_index": 1,
            "is_required": true,
            "selector_option": { "options": [
                { "name": "Small", "price": "5" },
                { "name": "Large", "price": "15" }
            ] }
        },
        {
            "id": 3, "name": "Pet hair", "option_type": "flexible_value", "order_index": 2,
            "flexible_value_option": { "value_type": "percentage", "value": "10", "is_enabled": false }
        }
    ]))
    .unwrap();

    let selections: Vec<OptionSelection> = serde_json::from_value(json!([
        { "option_id": 1, "quantity": 3 },
        { "option_id": 2, "selected_option": "Large" },
        { "option_id": 3, "enabled": true }
    ]))
    .unwrap();

    let result = calculate(&options, &selections, Decimal::ZERO).unwrap();
    assert_eq!(result.subtotal, dec("45"));
    assert_eq!(result.total, dec("49.50"));

    let body = serde_json::to_value(&result).unwrap();
    assert_eq!(body["breakdown"][0]["kind"], "per_unit");
    assert_eq!(body["breakdown"][1]["choice"], "Large");
    assert_eq!(body["breakdown"][2]["enabled"], true);
}

#[test]
fn test_shared_engine_across_threads() {
    let engine = Arc::new(PricingEngine::default());
    let options = Arc::new(additive_options());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            let options = Arc::clone(&options);
            thread::spawn(move || {
                let selections = vec![OptionSelection::per_unit(1, i), OptionSelection::choice(3, "Cotton")];
                engine.calculate(&options, &selections, Decimal::ZERO).unwrap().total
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), dec("7.25") * Decimal::from(i as i64));
    }
}

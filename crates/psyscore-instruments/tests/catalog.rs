use std::collections::HashSet;

use psyscore_instruments::error::InstrumentError;
use psyscore_instruments::scoring::SubscaleDefinition;
use psyscore_instruments::{all_instruments, get_instrument, Catalog};

#[test]
fn every_instrument_is_registered_once() {
    let instruments = all_instruments();
    assert_eq!(instruments.len(), 8);

    let ids: HashSet<&str> = instruments.iter().map(|i| i.id()).collect();
    assert_eq!(ids.len(), instruments.len());
    for id in [
        "adhd_rs_iv",
        "asrs",
        "wurs25",
        "caars",
        "caars_short",
        "cat_q",
        "diva5",
        "wechsler",
    ] {
        assert!(ids.contains(id), "missing {id}");
    }
}

#[test]
fn template_names_are_distinct() {
    let instruments = all_instruments();
    let templates: HashSet<&str> = instruments.iter().map(|i| i.template_name()).collect();
    assert_eq!(templates.len(), instruments.len());
}

#[test]
fn subscale_items_stay_within_the_form() {
    let limits = [
        ("adhd_rs_iv", 18),
        ("asrs", 18),
        ("wurs25", 25),
        ("caars", 66),
        ("caars_short", 26),
        ("cat_q", 25),
    ];
    for (id, items) in limits {
        let instrument = get_instrument(id).unwrap();
        let subscales: &[SubscaleDefinition] = instrument.subscales();
        assert!(!subscales.is_empty(), "{id} has no subscales");
        for def in subscales {
            assert!(
                def.items.iter().all(|&i| (1..=items).contains(&i)),
                "{id}/{} references an item outside 1..={items}",
                def.id
            );
        }
    }
}

#[test]
fn unknown_instrument_is_an_error() {
    assert!(get_instrument("mmpi").is_none());
    assert!(matches!(
        Catalog::new().get("mmpi"),
        Err(InstrumentError::UnknownInstrument(id)) if id == "mmpi"
    ));
}

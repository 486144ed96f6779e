use super::*;
use crate::form::types::MenuItem;
use crate::form::validate::ValidMenuItem;

fn wire_restaurant() -> Restaurant {
    Restaurant {
        id: "r1".to_owned(),
        user: Some("u1".to_owned()),
        name: "Pasta Place".to_owned(),
        city: "Rome".to_owned(),
        country: "Italy".to_owned(),
        delivery_price: 1050,
        estimated_delivery_time: 25,
        cuisines: vec!["Italian".to_owned(), "Pasta".to_owned(), "Italian".to_owned()],
        menu_items: vec![
            MenuItem { id: Some("m1".to_owned()), name: "Carbonara".to_owned(), price: 1299 },
            MenuItem { id: None, name: "Water".to_owned(), price: 100 },
        ],
        image_url: None,
        last_updated: None,
    }
}

// =============================================================
// Coercion
// =============================================================

#[test]
fn parse_amount_rejects_blank_and_non_finite() {
    assert_eq!(parse_amount(" 8.5 "), Ok(8.5));
    assert_eq!(parse_amount(""), Err(NormalizeError::Empty));
    assert_eq!(parse_amount("abc"), Err(NormalizeError::NotANumber("abc".to_owned())));
    assert_eq!(parse_amount("inf"), Err(NormalizeError::NotANumber("inf".to_owned())));
}

#[test]
fn parse_whole_number_accepts_integral_floats() {
    assert_eq!(parse_whole_number("45"), Ok(45));
    assert_eq!(parse_whole_number("45.0"), Ok(45));
    assert_eq!(parse_whole_number("4.5"), Err(NormalizeError::NotWhole("4.5".to_owned())));
    assert_eq!(parse_whole_number("-1"), Err(NormalizeError::Negative));
    assert_eq!(parse_whole_number("1e12"), Err(NormalizeError::OutOfRange));
}

// =============================================================
// Minor units
// =============================================================

#[test]
fn to_minor_units_multiplies_by_one_hundred() {
    assert_eq!(to_minor_units(5.0), Ok(500));
    assert_eq!(to_minor_units(8.5), Ok(850));
    assert_eq!(to_minor_units(10.99), Ok(1099));
    assert_eq!(to_minor_units(0.0), Ok(0));
}

#[test]
fn to_minor_units_rounds_instead_of_truncating() {
    assert_eq!(to_minor_units(0.29), Ok(29));
    assert_eq!(to_minor_units(1.005_1), Ok(101));
    assert_eq!(to_minor_units(2.994), Ok(299));
}

#[test]
fn to_minor_units_rejects_invalid_amounts() {
    assert_eq!(to_minor_units(-0.5), Err(NormalizeError::Negative));
    assert_eq!(to_minor_units(1e300), Err(NormalizeError::OutOfRange));
    assert!(matches!(to_minor_units(f64::NAN), Err(NormalizeError::NotANumber(_))));
}

#[test]
fn format_display_amount_uses_at_most_two_digits() {
    assert_eq!(format_display_amount(1050), "10.5");
    assert_eq!(format_display_amount(500), "5");
    assert_eq!(format_display_amount(1099), "10.99");
    assert_eq!(format_display_amount(7), "0.07");
    assert_eq!(format_display_amount(0), "0");
    assert_eq!(format_display_amount(-250), "-2.5");
}

#[test]
fn display_round_trip_preserves_minor_units() {
    for minor in [0, 1, 7, 10, 99, 100, 101, 850, 1050, 1099, 12_345, 999_999, 123_456_789] {
        let shown = format_display_amount(minor);
        let back = to_minor_units(parse_amount(&shown).unwrap()).unwrap();
        assert_eq!(back, minor, "round trip of {minor} via {shown:?}");
    }
}

// =============================================================
// draft_from_restaurant
// =============================================================

#[test]
fn draft_from_restaurant_converts_currency_only() {
    let draft = draft_from_restaurant(&wire_restaurant());
    assert_eq!(draft.name, "Pasta Place");
    assert_eq!(draft.city, "Rome");
    assert_eq!(draft.delivery_price, "10.5");
    assert_eq!(draft.estimated_delivery_time, "25");
    assert_eq!(
        draft.menu_items,
        vec![MenuItemDraft::new("Carbonara", "12.99"), MenuItemDraft::new("Water", "1")]
    );
    assert!(draft.image_file.is_none());
}

#[test]
fn draft_from_restaurant_collapses_duplicate_cuisines() {
    let draft = draft_from_restaurant(&wire_restaurant());
    assert_eq!(draft.cuisines, vec!["Italian".to_owned(), "Pasta".to_owned()]);
}

// =============================================================
// to_wire
// =============================================================

#[test]
fn to_wire_converts_every_currency_field() {
    let valid = ValidRestaurant {
        name: "Taco Town".to_owned(),
        city: "Austin".to_owned(),
        country: "USA".to_owned(),
        delivery_price: 5.0,
        estimated_delivery_time: 30,
        cuisines: vec!["Mexican".to_owned()],
        menu_items: vec![ValidMenuItem { name: "Burger".to_owned(), price: 8.5 }],
        image_file: None,
    };
    let wire = to_wire(valid).unwrap();
    assert_eq!(wire.delivery_price, 500);
    assert_eq!(wire.menu_items, vec![WireMenuItem { name: "Burger".to_owned(), price: 850 }]);
    assert_eq!(wire.estimated_delivery_time, 30);
}

#[test]
fn to_wire_attaches_errors_to_paths() {
    let valid = ValidRestaurant {
        name: "X".to_owned(),
        city: "Y".to_owned(),
        country: "Z".to_owned(),
        delivery_price: -1.0,
        estimated_delivery_time: 1,
        cuisines: vec!["Thai".to_owned()],
        menu_items: vec![
            ValidMenuItem { name: "A".to_owned(), price: 1.0 },
            ValidMenuItem { name: "B".to_owned(), price: f64::INFINITY },
        ],
        image_file: None,
    };
    let errors = to_wire(valid).unwrap_err();
    assert!(errors.contains(FieldPath::DeliveryPrice));
    assert!(errors.contains(FieldPath::menu_item_price(1)));
    assert!(!errors.contains(FieldPath::menu_item_price(0)));
}

use super::*;

#[test]
fn display_renders_scalar_and_indexed_paths() {
    assert_eq!(FieldPath::DeliveryPrice.to_string(), "deliveryPrice");
    assert_eq!(FieldPath::EstimatedDeliveryTime.to_string(), "estimatedDeliveryTime");
    assert_eq!(FieldPath::menu_item_price(2).to_string(), "menuItems[2].price");
    assert_eq!(FieldPath::menu_item_name(0).to_string(), "menuItems[0].name");
}

#[test]
fn from_str_parses_what_display_renders() {
    for path in [
        FieldPath::Name,
        FieldPath::Cuisines,
        FieldPath::MenuItems,
        FieldPath::SearchQuery,
        FieldPath::menu_item_name(11),
        FieldPath::menu_item_price(3),
    ] {
        assert_eq!(path.to_string().parse::<FieldPath>(), Ok(path));
    }
}

#[test]
fn from_str_rejects_malformed_paths() {
    assert!("menuItems[x].name".parse::<FieldPath>().is_err());
    assert!("menuItems[1].calories".parse::<FieldPath>().is_err());
    assert!("menuItems[1]".parse::<FieldPath>().is_err());
    assert!("address".parse::<FieldPath>().is_err());
}

#[test]
fn after_menu_item_removed_shifts_later_entries_down() {
    assert_eq!(FieldPath::menu_item_price(1).after_menu_item_removed(1), None);
    assert_eq!(
        FieldPath::menu_item_price(2).after_menu_item_removed(1),
        Some(FieldPath::menu_item_price(1))
    );
    assert_eq!(
        FieldPath::menu_item_name(0).after_menu_item_removed(1),
        Some(FieldPath::menu_item_name(0))
    );
    assert_eq!(FieldPath::City.after_menu_item_removed(0), Some(FieldPath::City));
}

#[test]
fn ordering_groups_menu_item_fields_by_index() {
    let mut paths = vec![
        FieldPath::menu_item_price(1),
        FieldPath::menu_item_name(1),
        FieldPath::menu_item_price(0),
    ];
    paths.sort();
    assert_eq!(
        paths,
        vec![FieldPath::menu_item_price(0), FieldPath::menu_item_name(1), FieldPath::menu_item_price(1)]
    );
}

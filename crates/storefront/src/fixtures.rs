//! Mock catalog and account data.
//!
//! Stands in for the restaurant and account providers until real ones are
//! wired up.

use quickbite_core::{
    Address, AddressBook, AddressError, AddressKind, Cart, CartItem, Catalog, MenuItem,
    MenuItemId, PaymentError, PaymentMethod, Restaurant, RestaurantId,
};
use rust_decimal::Decimal;

/// Cuisine chips offered on the discovery page.
pub const CUISINES: [&str; 7] = [
    "Italian",
    "Mexican",
    "Chinese",
    "Indian",
    "Japanese",
    "Fast Food",
    "Healthy",
];

const IMAGE_BASE: &str = "https://source.unsplash.com/random";

fn image(size: &str, query: &str) -> Option<String> {
    Some(format!("{IMAGE_BASE}/{size}?{query}"))
}

fn menu_item(id: &str, name: &str, description: &str, cents: i64, query: &str) -> MenuItem {
    MenuItem {
        id: MenuItemId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        price: Decimal::new(cents, 2),
        image_url: image("300x200", query),
    }
}

fn restaurant(
    id: &str,
    name: &str,
    query: &str,
    cuisines: &[&str],
    rating: f32,
    delivery_time: &str,
) -> Restaurant {
    Restaurant {
        id: RestaurantId::new(id),
        name: name.to_owned(),
        image_url: image("400x300", query),
        logo_url: None,
        cover_image_url: None,
        cuisines: cuisines.iter().map(|c| (*c).to_owned()).collect(),
        rating,
        delivery_time: delivery_time.to_owned(),
        menu: Vec::new(),
    }
}

/// The five demo restaurants; the first two carry menus.
#[must_use]
pub fn catalog() -> Catalog {
    let pizza = Restaurant {
        logo_url: image("100x100", "pizzeria"),
        cover_image_url: image("1200x400", "pizza-restaurant"),
        menu: vec![
            menu_item("m1", "Margherita Pizza", "Classic cheese and tomato pizza.", 1299, "margherita-pizza"),
            menu_item("m2", "Pepperoni Passion", "Loaded with pepperoni and mozzarella.", 1550, "pepperoni-pizza"),
            menu_item("m3", "Veggie Delight", "A mix of fresh garden vegetables.", 1400, "veggie-pizza"),
            menu_item("m4", "Coca-Cola", "Refreshing carbonated drink.", 250, "coca-cola"),
        ],
        ..restaurant("1", "Pizza Paradise", "pizza", &["Italian", "Pizza"], 4.5, "25-35 min")
    };
    let tacos = Restaurant {
        logo_url: image("100x100", "taqueria"),
        cover_image_url: image("1200x400", "mexican-food"),
        menu: vec![
            menu_item("m5", "Chicken Tacos (3)", "Grilled chicken, salsa, cilantro.", 999, "chicken-tacos"),
            menu_item("m6", "Beef Burrito", "Large burrito with beef, beans, rice.", 1250, "beef-burrito"),
        ],
        ..restaurant("2", "Taco Town", "taco", &["Mexican"], 4.2, "20-30 min")
    };

    Catalog::new(vec![
        pizza,
        tacos,
        restaurant("3", "Wok Wonders", "chinese-food", &["Chinese", "Asian"], 4.7, "30-40 min"),
        restaurant("4", "Curry Corner", "curry", &["Indian"], 4.6, "35-45 min"),
        restaurant("5", "Sushi Spot", "sushi", &["Japanese"], 4.8, "40-50 min"),
    ])
}

/// Saved delivery addresses; `addr1` is the default.
///
/// # Errors
///
/// Returns an error if a fixture record is malformed.
pub fn address_book() -> Result<AddressBook, AddressError> {
    let mut book = AddressBook::new();
    book.add(
        Address::new("addr1", AddressKind::Home, "123 Main St", None, "Anytown", "12345")?
            .as_default(),
    )?;
    book.add(Address::new(
        "addr2",
        AddressKind::Work,
        "456 Office Ave",
        Some("Suite 100"),
        "Anytown",
        "12346",
    )?)?;
    Ok(book)
}

/// Stored cards.
///
/// # Errors
///
/// Returns an error if a fixture record is malformed.
pub fn payment_methods() -> Result<Vec<PaymentMethod>, PaymentError> {
    Ok(vec![
        PaymentMethod::new("pay1", "Visa", "1234", "12/25")?,
        PaymentMethod::new("pay2", "Mastercard", "5678", "10/26")?,
    ])
}

/// One Margherita Pizza and two Coca-Colas.
#[must_use]
pub fn starter_cart(catalog: &Catalog) -> Cart {
    let pizza_paradise = RestaurantId::new("1");
    let lines = [("m1", 1), ("m4", 2)]
        .into_iter()
        .filter_map(|(id, quantity)| {
            let item = catalog
                .menu_item(&pizza_paradise, &MenuItemId::new(id))
                .ok()?;
            Some(std::iter::repeat_n(CartItem::from(item), quantity))
        })
        .flatten();
    Cart::with_items(lines)
}

//! Builders for domain entities and the canonical seed data set.
//!
//! The seed is small enough to reason about in assertions:
//!
//! | food_id | provider | food | qty | expiry | meal | location |
//! |---|---|---|---|---|---|---|
//! | 1 | 1 Green Grocer (Pune) | Rice | 10 | seed day | Lunch | Pune |
//! | 2 | 1 Green Grocer (Pune) | Bread | 2 | seed day + 5 | Breakfast | Pune |
//! | 3 | 2 Spice Route (Mumbai) | Chicken Curry | 6 | 2026-04-15 | Dinner | Mumbai |
//! | 4 | 2 Spice Route (Mumbai) | Salad | 4 | none | Lunch | Mumbai |
//!
//! Provider 3 (Daily Bread, Pune) has no listings. Claims: rice by receiver
//! 1 (Completed), curry by receiver 2 (Pending), rice by receiver 2
//! (Cancelled).

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::domain::entity::{ClaimStatus, NewClaim, NewFoodListing, NewProvider, NewReceiver};
use crate::port::outbound::store::{ClaimStore, ListingStore, ProviderStore, ReceiverStore};

/// The "today" the seed's expiry dates are laid out around.
pub fn seed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid seed date")
}

pub fn provider(name: &str, provider_type: &str, city: &str) -> NewProvider {
    NewProvider {
        name: name.to_string(),
        provider_type: provider_type.to_string(),
        address: format!("1 {name} Lane"),
        city: city.to_string(),
        contact: format!("{}@example.org", name.to_lowercase().replace(' ', ".")),
    }
}

pub fn receiver(name: &str, receiver_type: &str, city: &str) -> NewReceiver {
    NewReceiver {
        name: name.to_string(),
        receiver_type: receiver_type.to_string(),
        city: city.to_string(),
        contact: format!("{}@example.org", name.to_lowercase().replace(' ', ".")),
    }
}

pub fn listing(
    provider_id: i32,
    food_name: &str,
    quantity: i32,
    expiry_date: Option<NaiveDate>,
    food_type: &str,
    meal_type: &str,
    location: &str,
) -> NewFoodListing {
    NewFoodListing {
        provider_id,
        food_name: food_name.to_string(),
        quantity,
        expiry_date,
        food_type: Some(food_type.to_string()),
        meal_type: Some(meal_type.to_string()),
        location: Some(location.to_string()),
    }
}

pub fn claim(food_id: i32, receiver_id: i32, status: ClaimStatus, at: &str) -> NewClaim {
    NewClaim {
        food_id,
        receiver_id,
        quantity: None,
        status,
        timestamp: NaiveDateTime::parse_from_str(at, "%Y-%m-%d %H:%M:%S").ok(),
    }
}

/// Insert the canonical seed through `store`.
pub fn seed<S>(store: &S)
where
    S: ProviderStore + ReceiverStore + ListingStore + ClaimStore,
{
    let today = seed_today();

    for new in [
        provider("Green Grocer", "Grocery Store", "Pune"),
        provider("Spice Route", "Restaurant", "Mumbai"),
        provider("Daily Bread", "Bakery", "Pune"),
    ] {
        store.add_provider(&new).expect("seed provider");
    }

    for new in [
        receiver("Hope Shelter", "Shelter", "Pune"),
        receiver("Food For All", "NGO", "Mumbai"),
    ] {
        store.add_receiver(&new).expect("seed receiver");
    }

    for new in [
        listing(1, "Rice", 10, Some(today), "Vegetarian", "Lunch", "Pune"),
        listing(
            1,
            "Bread",
            2,
            Some(today + Duration::days(5)),
            "Vegetarian",
            "Breakfast",
            "Pune",
        ),
        listing(
            2,
            "Chicken Curry",
            6,
            NaiveDate::from_ymd_opt(2026, 4, 15),
            "Non-Vegetarian",
            "Dinner",
            "Mumbai",
        ),
        listing(2, "Salad", 4, None, "Vegan", "Lunch", "Mumbai"),
    ] {
        store.add_listing(&new).expect("seed listing");
    }

    let mut completed = claim(1, 1, ClaimStatus::Completed, "2026-02-27 10:00:00");
    completed.quantity = Some(5);
    let mut pending = claim(3, 2, ClaimStatus::Pending, "2026-02-28 18:30:00");
    pending.quantity = Some(6);
    let cancelled = claim(1, 2, ClaimStatus::Cancelled, "2026-02-28 19:00:00");

    for new in [completed, pending, cancelled] {
        store.add_claim(&new).expect("seed claim");
    }
}

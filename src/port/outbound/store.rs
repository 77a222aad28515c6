//! Write-side persistence ports for the four entities.
//!
//! Every operation is a single parameterized statement. Storage rejections
//! (foreign key or check violations, connection loss) come back as errors
//! and are never retried here.

use crate::domain::entity::{
    Claim, ClaimChanges, FoodListing, FoodListingChanges, NewClaim, NewFoodListing, NewProvider,
    NewReceiver, Provider, ProviderChanges, Receiver, ReceiverChanges,
};
use crate::error::Result;

/// Storage operations for providers.
pub trait ProviderStore {
    /// Insert a provider and return the stored row.
    fn add_provider(&self, provider: &NewProvider) -> Result<Provider>;

    /// Apply the non-empty fields of `changes` to provider `id`.
    fn update_provider(&self, id: i32, changes: &ProviderChanges) -> Result<Provider>;

    /// Delete provider `id`.
    fn delete_provider(&self, id: i32) -> Result<()>;

    fn provider(&self, id: i32) -> Result<Option<Provider>>;

    fn providers(&self) -> Result<Vec<Provider>>;
}

/// Storage operations for receivers.
pub trait ReceiverStore {
    fn add_receiver(&self, receiver: &NewReceiver) -> Result<Receiver>;

    fn update_receiver(&self, id: i32, changes: &ReceiverChanges) -> Result<Receiver>;

    fn delete_receiver(&self, id: i32) -> Result<()>;

    fn receiver(&self, id: i32) -> Result<Option<Receiver>>;

    fn receivers(&self) -> Result<Vec<Receiver>>;
}

/// Storage operations for food listings.
pub trait ListingStore {
    fn add_listing(&self, listing: &NewFoodListing) -> Result<FoodListing>;

    fn update_listing(&self, id: i32, changes: &FoodListingChanges) -> Result<FoodListing>;

    fn delete_listing(&self, id: i32) -> Result<()>;

    fn listing(&self, id: i32) -> Result<Option<FoodListing>>;

    fn listings(&self) -> Result<Vec<FoodListing>>;
}

/// Storage operations for claims.
pub trait ClaimStore {
    fn add_claim(&self, claim: &NewClaim) -> Result<Claim>;

    fn update_claim(&self, id: i32, changes: &ClaimChanges) -> Result<Claim>;

    fn delete_claim(&self, id: i32) -> Result<()>;

    fn claim(&self, id: i32) -> Result<Option<Claim>>;

    fn claims(&self) -> Result<Vec<Claim>>;
}

//! SQLite entity store implementation.
//!
//! Provides persistent storage for providers, receivers, food listings and
//! claims using SQLite and Diesel ORM. Each operation is a single
//! parameterized statement; constraint violations surface as
//! [`Error::Database`].

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use tracing::{debug, info};

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{
    ClaimChangeset, ClaimRow, FoodListingChangeset, FoodListingRow, NewClaimRow,
    NewFoodListingRow, NewProviderRow, NewReceiverRow, ProviderChangeset, ProviderRow,
    ReceiverChangeset, ReceiverRow,
};
use crate::adapter::outbound::sqlite::database::schema::{
    claims, food_listings, providers, receivers,
};
use crate::domain::entity::{
    Claim, ClaimChanges, FoodListing, FoodListingChanges, NewClaim, NewFoodListing, NewProvider,
    NewReceiver, Provider, ProviderChanges, Receiver, ReceiverChanges,
};
use crate::domain::error::DomainError;
use crate::error::{Error, Result};
use crate::port::outbound::store::{ClaimStore, ListingStore, ProviderStore, ReceiverStore};

type Conn = PooledConnection<ConnectionManager<diesel::SqliteConnection>>;

/// SQLite-backed store for the four donation entities.
#[derive(Clone)]
pub struct SqliteStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteStore {
    /// Create a new store over the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<Conn> {
        self.pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))
    }
}

fn database_error(err: diesel::result::Error) -> Error {
    Error::Database(err.to_string())
}

/// Map a zero-row delete to `NotFound`.
fn expect_deleted(deleted: usize, entity: &'static str, id: i32) -> Result<()> {
    if deleted == 0 {
        return Err(Error::NotFound { entity, id });
    }
    info!(entity, id, "Deleted row");
    Ok(())
}

impl ProviderStore for SqliteStore {
    fn add_provider(&self, provider: &NewProvider) -> Result<Provider> {
        let mut conn = self.conn()?;
        let row = diesel::insert_into(providers::table)
            .values(NewProviderRow::from(provider))
            .returning(ProviderRow::as_returning())
            .get_result::<ProviderRow>(&mut conn)
            .map_err(database_error)?;
        info!(provider_id = row.provider_id, "Provider added");
        Ok(row.into())
    }

    fn update_provider(&self, id: i32, changes: &ProviderChanges) -> Result<Provider> {
        if changes.is_empty() {
            return Err(DomainError::EmptyUpdate {
                entity: "provider",
                id,
            }
            .into());
        }
        let mut conn = self.conn()?;
        let row = diesel::update(providers::table.find(id))
            .set(ProviderChangeset::from(changes))
            .returning(ProviderRow::as_returning())
            .get_result::<ProviderRow>(&mut conn)
            .optional()
            .map_err(database_error)?
            .ok_or(Error::NotFound {
                entity: "provider",
                id,
            })?;
        info!(provider_id = id, "Provider updated");
        Ok(row.into())
    }

    fn delete_provider(&self, id: i32) -> Result<()> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(providers::table.find(id))
            .execute(&mut conn)
            .map_err(database_error)?;
        expect_deleted(deleted, "provider", id)
    }

    fn provider(&self, id: i32) -> Result<Option<Provider>> {
        let mut conn = self.conn()?;
        let row = providers::table
            .find(id)
            .select(ProviderRow::as_select())
            .first::<ProviderRow>(&mut conn)
            .optional()
            .map_err(database_error)?;
        Ok(row.map(Provider::from))
    }

    fn providers(&self) -> Result<Vec<Provider>> {
        let mut conn = self.conn()?;
        let rows = providers::table
            .order(providers::provider_id)
            .select(ProviderRow::as_select())
            .load::<ProviderRow>(&mut conn)
            .map_err(database_error)?;
        debug!(count = rows.len(), "Loaded providers");
        Ok(rows.into_iter().map(Provider::from).collect())
    }
}

impl ReceiverStore for SqliteStore {
    fn add_receiver(&self, receiver: &NewReceiver) -> Result<Receiver> {
        let mut conn = self.conn()?;
        let row = diesel::insert_into(receivers::table)
            .values(NewReceiverRow::from(receiver))
            .returning(ReceiverRow::as_returning())
            .get_result::<ReceiverRow>(&mut conn)
            .map_err(database_error)?;
        info!(receiver_id = row.receiver_id, "Receiver added");
        Ok(row.into())
    }

    fn update_receiver(&self, id: i32, changes: &ReceiverChanges) -> Result<Receiver> {
        if changes.is_empty() {
            return Err(DomainError::EmptyUpdate {
                entity: "receiver",
                id,
            }
            .into());
        }
        let mut conn = self.conn()?;
        let row = diesel::update(receivers::table.find(id))
            .set(ReceiverChangeset::from(changes))
            .returning(ReceiverRow::as_returning())
            .get_result::<ReceiverRow>(&mut conn)
            .optional()
            .map_err(database_error)?
            .ok_or(Error::NotFound {
                entity: "receiver",
                id,
            })?;
        info!(receiver_id = id, "Receiver updated");
        Ok(row.into())
    }

    fn delete_receiver(&self, id: i32) -> Result<()> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(receivers::table.find(id))
            .execute(&mut conn)
            .map_err(database_error)?;
        expect_deleted(deleted, "receiver", id)
    }

    fn receiver(&self, id: i32) -> Result<Option<Receiver>> {
        let mut conn = self.conn()?;
        let row = receivers::table
            .find(id)
            .select(ReceiverRow::as_select())
            .first::<ReceiverRow>(&mut conn)
            .optional()
            .map_err(database_error)?;
        Ok(row.map(Receiver::from))
    }

    fn receivers(&self) -> Result<Vec<Receiver>> {
        let mut conn = self.conn()?;
        let rows = receivers::table
            .order(receivers::receiver_id)
            .select(ReceiverRow::as_select())
            .load::<ReceiverRow>(&mut conn)
            .map_err(database_error)?;
        Ok(rows.into_iter().map(Receiver::from).collect())
    }
}

impl ListingStore for SqliteStore {
    fn add_listing(&self, listing: &NewFoodListing) -> Result<FoodListing> {
        let mut conn = self.conn()?;
        let row = diesel::insert_into(food_listings::table)
            .values(NewFoodListingRow::from(listing))
            .returning(FoodListingRow::as_returning())
            .get_result::<FoodListingRow>(&mut conn)
            .map_err(database_error)?;
        info!(
            food_id = row.food_id,
            provider_id = row.provider_id,
            "Food listing added"
        );
        Ok(row.into())
    }

    fn update_listing(&self, id: i32, changes: &FoodListingChanges) -> Result<FoodListing> {
        if changes.is_empty() {
            return Err(DomainError::EmptyUpdate {
                entity: "food listing",
                id,
            }
            .into());
        }
        let mut conn = self.conn()?;
        let row = diesel::update(food_listings::table.find(id))
            .set(FoodListingChangeset::from(changes))
            .returning(FoodListingRow::as_returning())
            .get_result::<FoodListingRow>(&mut conn)
            .optional()
            .map_err(database_error)?
            .ok_or(Error::NotFound {
                entity: "food listing",
                id,
            })?;
        info!(food_id = id, "Food listing updated");
        Ok(row.into())
    }

    fn delete_listing(&self, id: i32) -> Result<()> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(food_listings::table.find(id))
            .execute(&mut conn)
            .map_err(database_error)?;
        expect_deleted(deleted, "food listing", id)
    }

    fn listing(&self, id: i32) -> Result<Option<FoodListing>> {
        let mut conn = self.conn()?;
        let row = food_listings::table
            .find(id)
            .select(FoodListingRow::as_select())
            .first::<FoodListingRow>(&mut conn)
            .optional()
            .map_err(database_error)?;
        Ok(row.map(FoodListing::from))
    }

    fn listings(&self) -> Result<Vec<FoodListing>> {
        let mut conn = self.conn()?;
        let rows = food_listings::table
            .order(food_listings::food_id)
            .select(FoodListingRow::as_select())
            .load::<FoodListingRow>(&mut conn)
            .map_err(database_error)?;
        Ok(rows.into_iter().map(FoodListing::from).collect())
    }
}

impl ClaimStore for SqliteStore {
    fn add_claim(&self, claim: &NewClaim) -> Result<Claim> {
        let now = chrono::Local::now().naive_local();
        let mut conn = self.conn()?;
        let row = diesel::insert_into(claims::table)
            .values(NewClaimRow::new(claim, now))
            .returning(ClaimRow::as_returning())
            .get_result::<ClaimRow>(&mut conn)
            .map_err(database_error)?;
        info!(
            claim_id = row.claim_id,
            food_id = row.food_id,
            receiver_id = row.receiver_id,
            status = %row.status,
            "Claim added"
        );
        row.try_into()
    }

    fn update_claim(&self, id: i32, changes: &ClaimChanges) -> Result<Claim> {
        if changes.is_empty() {
            return Err(DomainError::EmptyUpdate { entity: "claim", id }.into());
        }
        let mut conn = self.conn()?;
        let row = diesel::update(claims::table.find(id))
            .set(ClaimChangeset::from(changes))
            .returning(ClaimRow::as_returning())
            .get_result::<ClaimRow>(&mut conn)
            .optional()
            .map_err(database_error)?
            .ok_or(Error::NotFound { entity: "claim", id })?;
        info!(claim_id = id, "Claim updated");
        row.try_into()
    }

    fn delete_claim(&self, id: i32) -> Result<()> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(claims::table.find(id))
            .execute(&mut conn)
            .map_err(database_error)?;
        expect_deleted(deleted, "claim", id)
    }

    fn claim(&self, id: i32) -> Result<Option<Claim>> {
        let mut conn = self.conn()?;
        let row = claims::table
            .find(id)
            .select(ClaimRow::as_select())
            .first::<ClaimRow>(&mut conn)
            .optional()
            .map_err(database_error)?;
        row.map(Claim::try_from).transpose()
    }

    fn claims(&self) -> Result<Vec<Claim>> {
        let mut conn = self.conn()?;
        let rows = claims::table
            .order(claims::claim_id)
            .select(ClaimRow::as_select())
            .load::<ClaimRow>(&mut conn)
            .map_err(database_error)?;
        rows.into_iter().map(Claim::try_from).collect()
    }
}

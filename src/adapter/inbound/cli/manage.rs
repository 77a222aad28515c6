//! Handlers for the record-management command groups.
//!
//! `provider`, `receiver`, `listing` and `claim` share one shape: `add`
//! inserts and echoes the stored row, `update` changes only the flags that
//! were passed, `delete` asks for confirmation unless `--yes`, and `show`
//! prints one row or the whole table.

use std::io::IsTerminal;

use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use serde::Serialize;
use serde_json::json;
use tabled::Tabled;
use tracing::info;

use crate::adapter::inbound::cli::command::{
    ClaimAddArgs, ClaimCommand, ClaimUpdateArgs, DeleteArgs, ListingAddArgs, ListingCommand,
    ListingUpdateArgs, ProviderAddArgs, ProviderCommand, ProviderUpdateArgs, ReceiverAddArgs,
    ReceiverCommand, ReceiverUpdateArgs,
};
use crate::adapter::inbound::cli::output;
use crate::adapter::inbound::cli::view::{self, ClaimRow, ListingRow, ProviderRow, ReceiverRow};
use crate::domain::entity::{
    ClaimChanges, FoodListingChanges, NewClaim, NewFoodListing, NewProvider, NewReceiver,
    ProviderChanges, ReceiverChanges,
};
use crate::domain::error::DomainError;
use crate::error::{Error, Result};
use crate::port::outbound::store::{ClaimStore, ListingStore, ProviderStore, ReceiverStore};

impl From<ProviderAddArgs> for NewProvider {
    fn from(args: ProviderAddArgs) -> Self {
        Self {
            name: args.name,
            provider_type: args.provider_type,
            address: args.address,
            city: args.city,
            contact: args.contact,
        }
    }
}

impl From<ProviderUpdateArgs> for ProviderChanges {
    fn from(args: ProviderUpdateArgs) -> Self {
        Self {
            name: args.name,
            provider_type: args.provider_type,
            address: args.address,
            city: args.city,
            contact: args.contact,
        }
    }
}

impl From<ReceiverAddArgs> for NewReceiver {
    fn from(args: ReceiverAddArgs) -> Self {
        Self {
            name: args.name,
            receiver_type: args.receiver_type,
            city: args.city,
            contact: args.contact,
        }
    }
}

impl From<ReceiverUpdateArgs> for ReceiverChanges {
    fn from(args: ReceiverUpdateArgs) -> Self {
        Self {
            name: args.name,
            receiver_type: args.receiver_type,
            city: args.city,
            contact: args.contact,
        }
    }
}

impl From<ListingAddArgs> for NewFoodListing {
    fn from(args: ListingAddArgs) -> Self {
        Self {
            provider_id: args.provider_id,
            food_name: args.food_name,
            quantity: args.quantity,
            expiry_date: args.expiry_date,
            food_type: args.food_type,
            meal_type: args.meal_type,
            location: args.location,
        }
    }
}

impl From<ListingUpdateArgs> for FoodListingChanges {
    fn from(args: ListingUpdateArgs) -> Self {
        Self {
            provider_id: args.provider_id,
            food_name: args.food_name,
            quantity: args.quantity,
            expiry_date: args.expiry_date,
            food_type: args.food_type,
            meal_type: args.meal_type,
            location: args.location,
        }
    }
}

impl From<ClaimAddArgs> for NewClaim {
    fn from(args: ClaimAddArgs) -> Self {
        Self {
            food_id: args.food_id,
            receiver_id: args.receiver_id,
            quantity: args.quantity,
            status: args.status,
            timestamp: args.timestamp,
        }
    }
}

impl From<ClaimUpdateArgs> for ClaimChanges {
    fn from(args: ClaimUpdateArgs) -> Self {
        Self {
            food_id: args.food_id,
            receiver_id: args.receiver_id,
            quantity: args.quantity,
            status: args.status,
            timestamp: args.timestamp,
        }
    }
}

/// Execute a `provider` subcommand.
pub fn provider<S>(store: &S, command: ProviderCommand) -> Result<()>
where
    S: ProviderStore + ?Sized,
{
    match command {
        ProviderCommand::Add(args) => {
            let provider = store.add_provider(&args.into())?;
            saved(
                "provider.add",
                "Added",
                "provider",
                provider.provider_id,
                &provider,
                ProviderRow::from(&provider),
            )
        }
        ProviderCommand::Update(args) => {
            let id = args.id;
            let provider = store.update_provider(id, &args.into())?;
            saved(
                "provider.update",
                "Updated",
                "provider",
                id,
                &provider,
                ProviderRow::from(&provider),
            )
        }
        ProviderCommand::Delete(args) => {
            if confirm_delete("provider", &args)? {
                store.delete_provider(args.id)?;
                deleted("provider.delete", "provider", args.id);
            }
            Ok(())
        }
        ProviderCommand::Show(args) => match args.id {
            Some(id) => {
                let provider = store.provider(id)?.ok_or(Error::NotFound {
                    entity: "provider",
                    id,
                })?;
                shown("provider.show", "Provider", &provider, ProviderRow::from(&provider))
            }
            None => {
                let providers = store.providers()?;
                listed(
                    "provider.show",
                    "Providers",
                    &providers,
                    view::rows::<_, ProviderRow>(&providers),
                )
            }
        },
    }
}

/// Execute a `receiver` subcommand.
pub fn receiver<S>(store: &S, command: ReceiverCommand) -> Result<()>
where
    S: ReceiverStore + ?Sized,
{
    match command {
        ReceiverCommand::Add(args) => {
            let receiver = store.add_receiver(&args.into())?;
            saved(
                "receiver.add",
                "Added",
                "receiver",
                receiver.receiver_id,
                &receiver,
                ReceiverRow::from(&receiver),
            )
        }
        ReceiverCommand::Update(args) => {
            let id = args.id;
            let receiver = store.update_receiver(id, &args.into())?;
            saved(
                "receiver.update",
                "Updated",
                "receiver",
                id,
                &receiver,
                ReceiverRow::from(&receiver),
            )
        }
        ReceiverCommand::Delete(args) => {
            if confirm_delete("receiver", &args)? {
                store.delete_receiver(args.id)?;
                deleted("receiver.delete", "receiver", args.id);
            }
            Ok(())
        }
        ReceiverCommand::Show(args) => match args.id {
            Some(id) => {
                let receiver = store.receiver(id)?.ok_or(Error::NotFound {
                    entity: "receiver",
                    id,
                })?;
                shown("receiver.show", "Receiver", &receiver, ReceiverRow::from(&receiver))
            }
            None => {
                let receivers = store.receivers()?;
                listed(
                    "receiver.show",
                    "Receivers",
                    &receivers,
                    view::rows::<_, ReceiverRow>(&receivers),
                )
            }
        },
    }
}

/// Execute a `listing` subcommand.
pub fn listing<S>(store: &S, command: ListingCommand) -> Result<()>
where
    S: ListingStore + ?Sized,
{
    match command {
        ListingCommand::Add(args) => {
            let listing = store.add_listing(&args.into())?;
            saved(
                "listing.add",
                "Added",
                "food listing",
                listing.food_id,
                &listing,
                ListingRow::from(&listing),
            )
        }
        ListingCommand::Update(args) => {
            let id = args.id;
            let listing = store.update_listing(id, &args.into())?;
            saved(
                "listing.update",
                "Updated",
                "food listing",
                id,
                &listing,
                ListingRow::from(&listing),
            )
        }
        ListingCommand::Delete(args) => {
            if confirm_delete("food listing", &args)? {
                store.delete_listing(args.id)?;
                deleted("listing.delete", "food listing", args.id);
            }
            Ok(())
        }
        ListingCommand::Show(args) => match args.id {
            Some(id) => {
                let listing = store.listing(id)?.ok_or(Error::NotFound {
                    entity: "food listing",
                    id,
                })?;
                shown("listing.show", "Food Listing", &listing, ListingRow::from(&listing))
            }
            None => {
                let listings = store.listings()?;
                listed(
                    "listing.show",
                    "Food Listings",
                    &listings,
                    view::rows::<_, ListingRow>(&listings),
                )
            }
        },
    }
}

/// Execute a `claim` subcommand.
pub fn claim<S>(store: &S, command: ClaimCommand) -> Result<()>
where
    S: ClaimStore + ?Sized,
{
    match command {
        ClaimCommand::Add(args) => {
            let claim = store.add_claim(&args.into())?;
            saved(
                "claim.add",
                "Added",
                "claim",
                claim.claim_id,
                &claim,
                ClaimRow::from(&claim),
            )
        }
        ClaimCommand::Update(args) => {
            let id = args.id;
            let claim = store.update_claim(id, &args.into())?;
            saved(
                "claim.update",
                "Updated",
                "claim",
                id,
                &claim,
                ClaimRow::from(&claim),
            )
        }
        ClaimCommand::Delete(args) => {
            if confirm_delete("claim", &args)? {
                store.delete_claim(args.id)?;
                deleted("claim.delete", "claim", args.id);
            }
            Ok(())
        }
        ClaimCommand::Show(args) => match args.id {
            Some(id) => {
                let claim = store.claim(id)?.ok_or(Error::NotFound {
                    entity: "claim",
                    id,
                })?;
                shown("claim.show", "Claim", &claim, ClaimRow::from(&claim))
            }
            None => {
                let claims = store.claims()?;
                listed(
                    "claim.show",
                    "Claims",
                    &claims,
                    view::rows::<_, ClaimRow>(&claims),
                )
            }
        },
    }
}

/// Ask before deleting; `--yes` skips the prompt.
///
/// Without a terminal there is nobody to ask, so the flag is required.
fn confirm_delete(entity: &str, args: &DeleteArgs) -> Result<bool> {
    if args.yes {
        return Ok(true);
    }
    if output::is_json() || !std::io::stdin().is_terminal() {
        return Err(DomainError::InvalidInput(format!(
            "refusing to delete {entity} {} without confirmation (pass --yes)",
            args.id
        ))
        .into());
    }

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Delete {entity} {}?", args.id))
        .default(false)
        .interact()?;
    if !confirmed {
        output::note("Nothing deleted.");
    }
    Ok(confirmed)
}

fn saved<T, V>(
    command: &str,
    verb: &str,
    entity: &str,
    id: i32,
    record: &T,
    row: V,
) -> Result<()>
where
    T: Serialize,
    V: Tabled,
{
    info!(entity, id, "{verb} record");
    if output::is_json() {
        output::json_command(command, record)?;
        return Ok(());
    }
    output::success(&format!("{verb} {entity} {}", output::highlight(id)));
    output::rows(&[row], "");
    Ok(())
}

fn deleted(command: &str, entity: &str, id: i32) {
    info!(entity, id, "Deleted record");
    if output::is_json() {
        output::json_output(json!({
            "command": command,
            "payload": { "deleted": id },
        }));
        return;
    }
    output::success(&format!("Deleted {entity} {}", output::highlight(id)));
}

fn shown<T, V>(command: &str, title: &str, record: &T, row: V) -> Result<()>
where
    T: Serialize,
    V: Tabled,
{
    if output::is_json() {
        output::json_command(command, record)?;
        return Ok(());
    }
    output::section(title);
    output::rows(&[row], "");
    Ok(())
}

fn listed<T, V>(command: &str, title: &str, records: &[T], rows: Vec<V>) -> Result<()>
where
    T: Serialize,
    V: Tabled,
{
    if output::is_json() {
        output::json_command(command, &records)?;
        return Ok(());
    }
    output::section(title);
    output::rows(&rows, "no rows yet");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::inbound::cli::command::ShowArgs;
    use crate::domain::entity::ClaimStatus;
    use crate::testkit::TempDatabase;

    fn add_provider_args(city: &str) -> ProviderAddArgs {
        ProviderAddArgs {
            name: "Corner Cafe".to_string(),
            provider_type: "Restaurant".to_string(),
            address: "1 Main St".to_string(),
            city: city.to_string(),
            contact: "555-0100".to_string(),
        }
    }

    #[test]
    fn provider_lifecycle() {
        let db = TempDatabase::create("cli-manage-provider");
        let store = db.store();

        provider(&store, ProviderCommand::Add(add_provider_args("Pune"))).unwrap();
        let id = store.providers().unwrap()[0].provider_id;

        provider(
            &store,
            ProviderCommand::Update(ProviderUpdateArgs {
                id,
                name: None,
                provider_type: None,
                address: None,
                city: Some("Nagpur".to_string()),
                contact: None,
            }),
        )
        .unwrap();
        assert_eq!(store.provider(id).unwrap().unwrap().city, "Nagpur");

        provider(&store, ProviderCommand::Show(ShowArgs { id: Some(id) })).unwrap();
        provider(&store, ProviderCommand::Delete(DeleteArgs { id, yes: true })).unwrap();
        assert!(store.provider(id).unwrap().is_none());
    }

    #[test]
    fn show_unknown_id_is_not_found() {
        let db = TempDatabase::create("cli-manage-missing");
        let result = receiver(&db.store(), ReceiverCommand::Show(ShowArgs { id: Some(42) }));
        assert!(matches!(
            result,
            Err(Error::NotFound {
                entity: "receiver",
                id: 42
            })
        ));
    }

    #[test]
    fn update_without_fields_is_rejected() {
        let db = TempDatabase::seeded("cli-manage-empty-update");
        let result = claim(
            &db.store(),
            ClaimCommand::Update(ClaimUpdateArgs {
                id: 1,
                food_id: None,
                receiver_id: None,
                quantity: None,
                status: None,
                timestamp: None,
            }),
        );
        assert!(matches!(
            result,
            Err(Error::Domain(DomainError::EmptyUpdate { .. }))
        ));
    }

    #[test]
    fn claim_add_converts_arguments() {
        let args = ClaimAddArgs {
            food_id: 1,
            receiver_id: 2,
            quantity: Some(3),
            status: ClaimStatus::Completed,
            timestamp: None,
        };
        let claim = NewClaim::from(args);
        assert_eq!(claim.quantity, Some(3));
        assert_eq!(claim.status, ClaimStatus::Completed);
        assert!(claim.timestamp.is_none());
    }

    #[test]
    fn listing_show_all_on_seeded_data() {
        let db = TempDatabase::seeded("cli-manage-listings");
        assert!(listing(&db.store(), ListingCommand::Show(ShowArgs { id: None })).is_ok());
    }
}

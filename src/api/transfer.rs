//! Transfer resources: instant transfers plus automatic and reserved schedules.

// crates.io
use time::{Date, PrimitiveDateTime};
// self
use crate::{
	_prelude::*,
	gateway::{Gateway, RequestDescriptor},
	http::ApiTransport,
};

const TRANSFER_PATH: &str = "/transfer";
const AUTO_TRANSFER_REGISTER_PATH: &str = "/auto-transfer/register";
const RESERVE_TRANSFER_REGISTER_PATH: &str = "/reserve-transfer/register";

/// Instant transfer order. Amounts are integral won.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
	/// Withdrawing account identifier.
	pub from_account_id: i64,
	/// Receiving account number.
	pub to_account_number: String,
	/// Amount to move, in won.
	pub amount: i64,
	/// Withdrawing account's password.
	pub password: String,
}

/// Fields for registering or updating a monthly automatic transfer.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoTransferRequest {
	/// Owning user identifier.
	pub user_id: i64,
	/// Withdrawing account identifier.
	pub from_account_id: i64,
	/// Receiving account number.
	pub to_account_number: String,
	/// Amount to move each month, in won.
	pub amount: i64,
	/// Statement description.
	pub description: String,
	/// Day of month the transfer executes; the backend validates month lengths.
	pub transfer_day: u8,
	/// First month the schedule applies.
	#[serde(with = "crate::api::backend_date")]
	pub start_date: Date,
	/// Last month the schedule applies.
	#[serde(with = "crate::api::backend_date")]
	pub end_date: Date,
	/// Withdrawing account's password.
	pub password: String,
}

/// Registered automatic transfer schedule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoTransfer {
	/// Backend schedule identifier.
	pub id: i64,
	/// Withdrawing account identifier.
	pub from_account_id: i64,
	/// Receiving account number.
	pub to_account_number: String,
	/// Amount moved each month, in won.
	pub amount: i64,
	/// Statement description.
	pub description: String,
	/// Day of month the transfer executes.
	pub transfer_day: u8,
	/// Next scheduled execution date.
	#[serde(with = "crate::api::backend_date")]
	pub next_transfer_date: Date,
	/// First month the schedule applies.
	#[serde(with = "crate::api::backend_date")]
	pub start_date: Date,
	/// Last month the schedule applies.
	#[serde(with = "crate::api::backend_date")]
	pub end_date: Date,
}

/// Fields for registering or updating a one-shot reserved transfer.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveTransferRequest {
	/// Owning user identifier.
	pub user_id: i64,
	/// Withdrawing account identifier.
	pub from_account_id: i64,
	/// Receiving account number.
	pub to_account_number: String,
	/// Amount to move, in won.
	pub amount: i64,
	/// Statement description.
	pub description: String,
	/// Instant the transfer executes; must be in the future.
	#[serde(with = "crate::api::backend_datetime")]
	pub reserved_at: PrimitiveDateTime,
	/// Withdrawing account's password.
	pub password: String,
}

/// Registered reserved transfer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveTransfer {
	/// Backend reservation identifier.
	pub id: i64,
	/// Withdrawing account identifier.
	pub from_account_id: i64,
	/// Receiving account number.
	pub to_account_number: String,
	/// Amount to move, in won.
	pub amount: i64,
	/// Statement description.
	pub description: String,
	/// Instant the transfer executes.
	#[serde(with = "crate::api::backend_datetime")]
	pub reserved_at: PrimitiveDateTime,
}

impl<T> Gateway<T>
where
	T: ?Sized + ApiTransport,
{
	/// Executes an instant transfer. The backend answers `true` on success and rejects
	/// failures with a domain error the gateway passes through.
	pub async fn transfer(&self, request: &TransferRequest) -> Result<bool> {
		self.send_as(RequestDescriptor::post(TRANSFER_PATH).json(request)?).await
	}

	/// Registers a monthly automatic transfer.
	pub async fn register_auto_transfer(
		&self,
		request: &AutoTransferRequest,
	) -> Result<AutoTransfer> {
		self.send_as(RequestDescriptor::post(AUTO_TRANSFER_REGISTER_PATH).json(request)?).await
	}

	/// Fetches one automatic transfer schedule.
	pub async fn auto_transfer(&self, auto_transfer_id: i64) -> Result<AutoTransfer> {
		self.send_as(RequestDescriptor::get(format!("/auto-transfer/{auto_transfer_id}"))).await
	}

	/// Lists a user's automatic transfer schedules.
	pub async fn auto_transfers_of(&self, user_id: i64) -> Result<Vec<AutoTransfer>> {
		self.send_as(RequestDescriptor::get(format!("/auto-transfer/list/{user_id}"))).await
	}

	/// Replaces an automatic transfer schedule.
	pub async fn update_auto_transfer(
		&self,
		auto_transfer_id: i64,
		request: &AutoTransferRequest,
	) -> Result<AutoTransfer> {
		self.send_as(
			RequestDescriptor::put(format!("/auto-transfer/{auto_transfer_id}")).json(request)?,
		)
		.await
	}

	/// Cancels an automatic transfer schedule.
	pub async fn delete_auto_transfer(&self, auto_transfer_id: i64) -> Result<()> {
		self.send(RequestDescriptor::delete(format!("/auto-transfer/{auto_transfer_id}"))).await?;

		Ok(())
	}

	/// Registers a one-shot reserved transfer.
	pub async fn register_reserve_transfer(
		&self,
		request: &ReserveTransferRequest,
	) -> Result<ReserveTransfer> {
		self.send_as(RequestDescriptor::post(RESERVE_TRANSFER_REGISTER_PATH).json(request)?).await
	}

	/// Fetches one reserved transfer.
	pub async fn reserve_transfer(&self, reserve_transfer_id: i64) -> Result<ReserveTransfer> {
		self.send_as(RequestDescriptor::get(format!("/reserve-transfer/{reserve_transfer_id}")))
			.await
	}

	/// Lists a user's reserved transfers.
	pub async fn reserve_transfers_of(&self, user_id: i64) -> Result<Vec<ReserveTransfer>> {
		self.send_as(RequestDescriptor::get(format!("/reserve-transfer/list/{user_id}"))).await
	}

	/// Replaces a reserved transfer.
	pub async fn update_reserve_transfer(
		&self,
		reserve_transfer_id: i64,
		request: &ReserveTransferRequest,
	) -> Result<ReserveTransfer> {
		self.send_as(
			RequestDescriptor::put(format!("/reserve-transfer/{reserve_transfer_id}"))
				.json(request)?,
		)
		.await
	}

	/// Cancels a reserved transfer.
	pub async fn delete_reserve_transfer(&self, reserve_transfer_id: i64) -> Result<()> {
		self.send(RequestDescriptor::delete(format!("/reserve-transfer/{reserve_transfer_id}")))
			.await?;

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn auto_transfer_round_trips_its_dates() {
		let schedule = AutoTransfer {
			id: 4,
			from_account_id: 3,
			to_account_number: "110-1234-5678".into(),
			amount: 50_000,
			description: "rent".into(),
			transfer_day: 25,
			next_transfer_date: macros::date!(2025-07-25),
			start_date: macros::date!(2025-01-01),
			end_date: macros::date!(2025-12-31),
		};
		let json = serde_json::to_string(&schedule).expect("Schedule fixture should serialize.");

		assert!(json.contains("\"nextTransferDate\":\"2025-07-25\""));
		assert_eq!(
			serde_json::from_str::<AutoTransfer>(&json)
				.expect("Schedule fixture should deserialize."),
			schedule,
		);
	}
}

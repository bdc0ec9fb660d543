//! Transaction resource: per-account history, newest first.

// crates.io
use time::PrimitiveDateTime;
// self
use crate::{
	_prelude::*,
	gateway::{Gateway, RequestDescriptor},
	http::ApiTransport,
};

/// One ledger entry on an account. Amounts are integral won.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
	/// Backend transaction identifier.
	pub id: i64,
	/// Account the entry belongs to.
	pub account_id: i64,
	/// Instant the transaction was booked, in the backend's local time.
	#[serde(with = "crate::api::backend_datetime")]
	pub transaction_date_time: PrimitiveDateTime,
	/// Entry kind as reported by the backend (deposit/withdrawal).
	pub transaction_type: String,
	/// Counterparty that sent the funds.
	pub sender: String,
	/// Counterparty that received the funds.
	pub receiver: String,
	/// Amount withdrawn, in won.
	pub withdrawal_amount: i64,
	/// Amount deposited, in won.
	pub deposit_amount: i64,
	/// Balance after the entry, in won.
	pub balance: i64,
}

impl<T> Gateway<T>
where
	T: ?Sized + ApiTransport,
{
	/// Lists an account's full history, ordered newest first by the backend.
	pub async fn transactions_of(&self, account_id: i64) -> Result<Vec<Transaction>> {
		self.send_as(RequestDescriptor::get(format!("/transaction/transactions/{account_id}")))
			.await
	}
}

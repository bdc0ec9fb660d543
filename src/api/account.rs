//! Account resource: product catalog, opening, and lookups.

// self
use crate::{
	_prelude::*,
	gateway::{Gateway, RequestDescriptor},
	http::ApiTransport,
};

const ACCOUNT_TYPES_PATH: &str = "/account/account-types";
const ACCOUNT_CREATE_PATH: &str = "/account/create";

/// Account product offered by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountType {
	/// Product code referenced when opening an account.
	pub code: String,
	/// Display name.
	pub name: String,
	/// Marketing description.
	#[serde(default)]
	pub description: Option<String>,
	/// Annual interest rate in percent.
	pub interest_rate: f64,
	/// Minimum opening balance in won.
	#[serde(default)]
	pub minimum_balance: Option<i64>,
}

/// Account owned by a user. Balances are integral won.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
	/// Backend account identifier.
	pub id: i64,
	/// Product display name.
	pub account_name: String,
	/// Human-facing account number.
	pub account_number: String,
	/// Current balance in won.
	pub balance: i64,
	/// Annual interest rate in percent.
	pub interest_rate: f64,
}

/// Fields for opening a new account.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCreateRequest {
	/// Owning user identifier.
	pub user_id: i64,
	/// Product code from [`AccountType::code`].
	pub account_type_code: String,
	/// Opening balance in won.
	pub balance: i64,
	/// Account password used to authorize withdrawals.
	pub password: String,
}

impl<T> Gateway<T>
where
	T: ?Sized + ApiTransport,
{
	/// Lists the account products on offer. Anonymous: no bearer required.
	pub async fn account_types(&self) -> Result<Vec<AccountType>> {
		self.send_as(RequestDescriptor::get(ACCOUNT_TYPES_PATH)).await
	}

	/// Opens a new account for the provided user.
	pub async fn create_account(&self, request: &AccountCreateRequest) -> Result<Account> {
		self.send_as(RequestDescriptor::post(ACCOUNT_CREATE_PATH).json(request)?).await
	}

	/// Lists every account owned by a user.
	pub async fn accounts_of(&self, user_id: i64) -> Result<Vec<Account>> {
		self.send_as(RequestDescriptor::get(format!("/account/accounts/{user_id}"))).await
	}

	/// Fetches a single account by its identifier.
	pub async fn account(&self, account_id: i64) -> Result<Account> {
		self.send_as(RequestDescriptor::get(format!("/account/{account_id}"))).await
	}

	/// Fetches a single account by its human-facing number.
	pub async fn account_by_number(&self, account_number: &str) -> Result<Account> {
		self.send_as(RequestDescriptor::get(format!("/account/number/{account_number}"))).await
	}
}

#![cfg(all(feature = "reqwest", feature = "test"))]

// crates.io
use httpmock::prelude::*;
use time::macros;
// self
use bearer_gateway::{
	_preludet::*,
	api::{AccountCreateRequest, AutoTransferRequest, TransferRequest},
	store::SessionContext,
};

async fn start_authenticated() -> (MockServer, ReqwestTestGateway, SessionContext, String) {
	let server = MockServer::start_async().await;
	let (gateway, session) = build_reqwest_test_gateway(&server.base_url());
	let token = seed_session(&session, Duration::minutes(30));

	(server, gateway, session, token)
}

#[tokio::test]
async fn account_types_are_listed_anonymously() {
	let server = MockServer::start_async().await;
	let (gateway, _session) = build_reqwest_test_gateway(&server.base_url());
	let types_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/account/account-types");
			then.status(200).json_body(serde_json::json!([
				{"code": "FREE", "name": "Free Savings", "interestRate": 2.5},
				{
					"code": "FIXED",
					"name": "Fixed Deposit",
					"description": "12-month term",
					"interestRate": 4.0,
					"minimumBalance": 1000000,
				},
			]));
		})
		.await;
	let types = gateway.account_types().await.expect("Account types should list.");

	types_mock.assert_async().await;

	assert_eq!(types.len(), 2);
	assert_eq!(types[0].code, "FREE");
	assert_eq!(types[1].minimum_balance, Some(1_000_000));
}

#[tokio::test]
async fn accounts_are_created_and_listed_with_the_bearer_header() {
	let (server, gateway, _session, token) = start_authenticated().await;
	let create_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/account/create")
				.header("authorization", format!("Bearer {token}"))
				.json_body(serde_json::json!({
					"userId": 7,
					"accountTypeCode": "FREE",
					"balance": 100000,
					"password": "4321",
				}));
			then.status(201).json_body(serde_json::json!({
				"id": 3,
				"accountName": "Free Savings",
				"accountNumber": "110-1234-5678",
				"balance": 100000,
				"interestRate": 2.5,
			}));
		})
		.await;
	let list_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/account/accounts/7")
				.header("authorization", format!("Bearer {token}"));
			then.status(200).json_body(serde_json::json!([{
				"id": 3,
				"accountName": "Free Savings",
				"accountNumber": "110-1234-5678",
				"balance": 100000,
				"interestRate": 2.5,
			}]));
		})
		.await;
	let created = gateway
		.create_account(&AccountCreateRequest {
			user_id: 7,
			account_type_code: "FREE".into(),
			balance: 100_000,
			password: "4321".into(),
		})
		.await
		.expect("Account creation should succeed.");
	let accounts = gateway.accounts_of(7).await.expect("Account listing should succeed.");

	create_mock.assert_async().await;
	list_mock.assert_async().await;

	assert_eq!(created.id, 3);
	assert_eq!(accounts, vec![created]);
}

#[tokio::test]
async fn transactions_decode_the_ledger_shape() {
	let (server, gateway, _session, _token) = start_authenticated().await;
	let history_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/transaction/transactions/3");
			then.status(200).json_body(serde_json::json!([{
				"id": 9,
				"accountId": 3,
				"transactionDateTime": "2025-02-01T14:05:00",
				"transactionType": "withdrawal",
				"sender": "Kim",
				"receiver": "Lee",
				"withdrawalAmount": 10000,
				"depositAmount": 0,
				"balance": 240000,
			}]));
		})
		.await;
	let history = gateway.transactions_of(3).await.expect("History should list.");

	history_mock.assert_async().await;

	assert_eq!(history.len(), 1);
	assert_eq!(history[0].transaction_date_time, macros::datetime!(2025-02-01 14:05:00));
}

#[tokio::test]
async fn instant_transfers_succeed_and_fail_through() {
	let (server, gateway, _session, _token) = start_authenticated().await;
	let transfer_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/transfer").json_body(serde_json::json!({
				"fromAccountId": 3,
				"toAccountNumber": "110-9999-0000",
				"amount": 10000,
				"password": "4321",
			}));
			then.status(200).json_body(serde_json::json!(true));
		})
		.await;
	let order = TransferRequest {
		from_account_id: 3,
		to_account_number: "110-9999-0000".into(),
		amount: 10_000,
		password: "4321".into(),
	};

	assert!(gateway.transfer(&order).await.expect("Transfer should succeed."));

	transfer_mock.assert_async().await;
	transfer_mock.delete_async().await;

	let rejected_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/transfer");
			then.status(400).json_body(serde_json::json!({"message": "transfer failed"}));
		})
		.await;
	let err = gateway
		.transfer(&order)
		.await
		.expect_err("Domain rejections should surface to the caller.");

	assert!(matches!(
		err,
		Error::Backend { status: 400, ref message } if message.as_deref() == Some("transfer failed"),
	));

	rejected_mock.assert_async().await;
}

#[tokio::test]
async fn auto_transfer_schedules_round_trip_through_their_crud_surface() {
	let (server, gateway, _session, _token) = start_authenticated().await;
	let schedule = serde_json::json!({
		"id": 4,
		"fromAccountId": 3,
		"toAccountNumber": "110-9999-0000",
		"amount": 50000,
		"description": "rent",
		"transferDay": 25,
		"nextTransferDate": "2025-07-25",
		"startDate": "2025-01-01",
		"endDate": "2025-12-31",
	});
	let register_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/auto-transfer/register");
			then.status(201).json_body(schedule.clone());
		})
		.await;
	let get_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/auto-transfer/4");
			then.status(200).json_body(schedule.clone());
		})
		.await;
	let list_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/auto-transfer/list/7");
			then.status(200).json_body(serde_json::json!([schedule]));
		})
		.await;
	let delete_mock = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/auto-transfer/4");
			then.status(200);
		})
		.await;
	let request = AutoTransferRequest {
		user_id: 7,
		from_account_id: 3,
		to_account_number: "110-9999-0000".into(),
		amount: 50_000,
		description: "rent".into(),
		transfer_day: 25,
		start_date: macros::date!(2025-01-01),
		end_date: macros::date!(2025-12-31),
		password: "4321".into(),
	};
	let registered = gateway
		.register_auto_transfer(&request)
		.await
		.expect("Schedule registration should succeed.");

	assert_eq!(registered.next_transfer_date, macros::date!(2025-07-25));
	assert_eq!(
		gateway.auto_transfer(4).await.expect("Schedule fetch should succeed."),
		registered,
	);
	assert_eq!(
		gateway.auto_transfers_of(7).await.expect("Schedule listing should succeed."),
		vec![registered],
	);

	gateway.delete_auto_transfer(4).await.expect("Schedule cancellation should succeed.");

	register_mock.assert_async().await;
	get_mock.assert_async().await;
	list_mock.assert_async().await;
	delete_mock.assert_async().await;
}

#[tokio::test]
async fn reserve_transfers_list_for_their_owner() {
	let (server, gateway, _session, _token) = start_authenticated().await;
	let list_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/reserve-transfer/list/7");
			then.status(200).json_body(serde_json::json!([{
				"id": 6,
				"fromAccountId": 3,
				"toAccountNumber": "110-9999-0000",
				"amount": 30000,
				"description": "gift",
				"reservedAt": "2025-09-01T09:00:00",
			}]));
		})
		.await;
	let reservations =
		gateway.reserve_transfers_of(7).await.expect("Reservation listing should succeed.");

	list_mock.assert_async().await;

	assert_eq!(reservations.len(), 1);
	assert_eq!(reservations[0].reserved_at, macros::datetime!(2025-09-01 09:00:00));
}

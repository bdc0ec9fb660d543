#![cfg(all(feature = "reqwest", feature = "test"))]

// std
use std::{
	sync::atomic::{AtomicUsize, Ordering},
	time::Duration as StdDuration,
};
// crates.io
use httpmock::prelude::*;
// self
use bearer_gateway::{
	_preludet::*,
	gateway::RequestDescriptor,
	store::{SessionContext, SessionEvent},
};

const PING_PATH: &str = "/ping";

async fn start() -> (MockServer, ReqwestTestGateway, SessionContext) {
	let server = MockServer::start_async().await;
	let (gateway, session) = build_reqwest_test_gateway(&server.base_url());

	(server, gateway, session)
}

fn count_cleared(session: &SessionContext) -> Arc<AtomicUsize> {
	let cleared = Arc::new(AtomicUsize::new(0));
	let seen = cleared.clone();

	session.on_change(move |event| {
		if matches!(event, SessionEvent::Cleared) {
			seen.fetch_add(1, Ordering::SeqCst);
		}
	});

	cleared
}

#[tokio::test]
async fn logout_clears_even_when_the_backend_notification_fails() {
	let (server, gateway, session) = start().await;
	let cleared = count_cleared(&session);
	let token = seed_session(&session, Duration::minutes(30));
	let logout_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/user/logout")
				.header("authorization", format!("Bearer {token}"));
			then.status(500);
		})
		.await;

	gateway.logout().await.expect("Logout should succeed despite the failed notification.");

	logout_mock.assert_async().await;

	assert!(session.session().expect("Session load should succeed.").is_none());
	assert_eq!(cleared.load(Ordering::SeqCst), 1);
	assert!(!gateway.logout_in_progress());
}

#[tokio::test]
async fn repeated_logouts_signal_the_landing_view_once() {
	let (server, gateway, session) = start().await;
	let cleared = count_cleared(&session);

	seed_session(&session, Duration::minutes(30));

	let logout_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/user/logout");
			then.status(200);
		})
		.await;

	gateway.logout().await.expect("First logout should succeed.");
	gateway.logout().await.expect("Second logout should succeed.");
	gateway.logout().await.expect("Third logout should succeed.");

	// Only the first teardown had a token to announce and a session to clear.
	logout_mock.assert_calls_async(1).await;
	assert_eq!(cleared.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn in_progress_logout_suppresses_the_refresh_path() {
	let (server, gateway, session) = start().await;
	let token = seed_session(&session, Duration::minutes(5));
	let logout_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/user/logout");
			then.status(200).delay(StdDuration::from_millis(500));
		})
		.await;
	let refresh_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/user/refresh");
			then.status(200).json_body(serde_json::json!({"accessToken": "unused"}));
		})
		.await;
	let ping_mock = server
		.mock_async(|when, then| {
			when.method(GET).path(PING_PATH).header("authorization", format!("Bearer {token}"));
			then.status(200).json_body(serde_json::json!({"ok": true}));
		})
		.await;
	let teardown = {
		let gateway = gateway.clone();

		tokio::spawn(async move { gateway.logout().await })
	};

	tokio::time::sleep(StdDuration::from_millis(100)).await;

	assert!(gateway.logout_in_progress());

	// Near-expiry token, yet no refresh: the call rides the existing credential.
	gateway
		.send(RequestDescriptor::get(PING_PATH))
		.await
		.expect("Request during teardown should ride the existing token.");

	refresh_mock.assert_calls_async(0).await;
	ping_mock.assert_async().await;

	teardown
		.await
		.expect("Teardown task should join.")
		.expect("Logout should complete successfully.");

	logout_mock.assert_async().await;
	assert!(session.session().expect("Session load should succeed.").is_none());
}

#[tokio::test]
async fn sends_failing_during_logout_converge_on_one_landing_signal() {
	let (server, gateway, session) = start().await;
	let cleared = count_cleared(&session);

	seed_session(&session, Duration::minutes(30));

	let ping_mock = server
		.mock_async(|when, then| {
			when.method(GET).path(PING_PATH);
			then.status(401);
		})
		.await;
	let logout_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/user/logout");
			then.status(200);
		})
		.await;
	let (first, second, third) = tokio::join!(
		gateway.send(RequestDescriptor::get(PING_PATH)),
		gateway.send(RequestDescriptor::get(PING_PATH)),
		gateway.send(RequestDescriptor::get(PING_PATH)),
	);

	assert!(first.is_err() && second.is_err() && third.is_err());

	ping_mock.assert_calls_async(3).await;

	assert!(session.session().expect("Session load should succeed.").is_none());
	assert_eq!(cleared.load(Ordering::SeqCst), 1);
	assert!(logout_mock.calls_async().await <= 1);
}

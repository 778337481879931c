mod common;

// crates.io
use httpmock::{Mock, prelude::*};
use serde_json::json;
// self
use common::{EXPECTED_TOKEN_FORM, build_test_client};
use line_liff::{
	api::{
		BotPrompt, CreateAppRequest, LiffScope, PermanentLinkPattern, UpdateAppRequest, ViewType,
	},
	auth::LiffId,
	error::{DecodeError, Error},
};

const TOKEN_PATH: &str = "/oauth2/v3/token";
const APPS_PATH: &str = "/liff/v1/apps";
const BEARER_HEADER: &str = "Bearer app-token";

async fn mock_token<'a>(server: &'a MockServer) -> Mock<'a> {
	server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH).body(EXPECTED_TOKEN_FORM);
			then.status(200).header("content-type", "application/json").body(
				"{\"token_type\":\"Bearer\",\"access_token\":\"app-token\",\"expires_in\":900}",
			);
		})
		.await
}

async fn mock_list<'a>(server: &'a MockServer, apps: serde_json::Value) -> Mock<'a> {
	server
		.mock_async(move |when, then| {
			when.method(GET).path(APPS_PATH).header("authorization", BEARER_HEADER);
			then.status(200).json_body(json!({ "apps": apps }));
		})
		.await
}

fn liff_id(value: &str) -> LiffId {
	LiffId::new(value).expect("LIFF id fixture should be valid.")
}

fn two_apps() -> serde_json::Value {
	json!([
		{
			"liffId": "A",
			"view": { "type": "full", "url": "https://a.example/" },
			"description": "first"
		},
		{
			"liffId": "B",
			"view": { "type": "tall", "url": "https://b.example/", "moduleMode": true },
			"description": "second",
			"features": { "ble": false, "qrCode": true },
			"scope": ["profile", "openid"],
			"botPrompt": "normal"
		}
	])
}

#[tokio::test]
async fn list_apps_sends_bearer_token() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_test_client(&server.base_url());
	let token = mock_token(&server).await;
	let list = mock_list(&server, two_apps()).await;
	let apps = client.list_apps().await.expect("Listing apps should succeed.");

	assert_eq!(apps.len(), 2);
	assert_eq!(apps[0].liff_id, liff_id("A"));
	assert_eq!(apps[1].view.kind, ViewType::Tall);
	assert_eq!(apps[1].scope, vec![LiffScope::Profile, LiffScope::OpenId]);
	assert_eq!(apps[1].bot_prompt, Some(BotPrompt::Normal));

	token.assert_async().await;
	list.assert_async().await;
}

#[tokio::test]
async fn list_apps_treats_missing_array_as_empty() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_test_client(&server.base_url());
	let _token = mock_token(&server).await;
	let _list = server
		.mock_async(|when, then| {
			when.method(GET).path(APPS_PATH);
			then.status(200).json_body(json!({}));
		})
		.await;
	let apps = client.list_apps().await.expect("Empty listing should succeed.");

	assert!(apps.is_empty());
}

#[tokio::test]
async fn list_apps_keeps_records_with_unfamiliar_values() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_test_client(&server.base_url());
	let _token = mock_token(&server).await;
	let _list = mock_list(
		&server,
		json!([
			{
				"liffId": "A",
				"view": { "type": "full", "url": "https://a.example/" },
				"permanentLinkPattern": "replace",
				"botPrompt": "eager"
			},
			{
				"liffId": "B",
				"view": { "type": "tall", "url": "https://b.example/" },
				"permanentLinkPattern": "concat"
			}
		]),
	)
	.await;
	let apps = client.list_apps().await.expect("Unfamiliar values should not fail the listing.");

	assert_eq!(apps.len(), 2);
	assert_eq!(
		apps[0].permanent_link_pattern,
		Some(PermanentLinkPattern::Other("replace".into()))
	);
	assert_eq!(apps[0].bot_prompt, Some(BotPrompt::Other("eager".into())));
	assert_eq!(apps[1].permanent_link_pattern, Some(PermanentLinkPattern::Concat));

	let app = client.get_app(&liff_id("B")).await.expect("B should be found.");

	assert_eq!(app.view.kind, ViewType::Tall);
}

#[tokio::test]
async fn malformed_list_body_is_a_decode_error() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_test_client(&server.base_url());
	let _token = mock_token(&server).await;
	let _list = server
		.mock_async(|when, then| {
			when.method(GET).path(APPS_PATH);
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"apps\":[{\"liffId\":7}]}");
		})
		.await;
	let err = client.list_apps().await.expect_err("Numeric ids should fail the listing.");

	assert!(matches!(err, Error::Decode(DecodeError { endpoint: "list_apps", .. })));
	assert!(err.to_string().contains("apps[0].liffId"), "unexpected message: {err}");

	let err = client.get_app(&liff_id("A")).await.expect_err("Lookups share the list decode.");

	assert!(matches!(err, Error::Decode(DecodeError { endpoint: "list_apps", .. })));
}

#[tokio::test]
async fn get_app_scans_the_list() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_test_client(&server.base_url());
	let _token = mock_token(&server).await;
	let list = mock_list(&server, two_apps()).await;
	let app = client.get_app(&liff_id("B")).await.expect("B should be found.");

	assert_eq!(app.description.as_deref(), Some("second"));
	assert!(app.features.qr_code);

	let err = client.get_app(&liff_id("C")).await.expect_err("C should be missing.");

	assert!(matches!(err, Error::NotFound { ref liff_id } if liff_id == "C"));

	list.assert_calls_async(2).await;
}

#[tokio::test]
async fn token_is_reused_across_operations() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_test_client(&server.base_url());
	let token = mock_token(&server).await;
	let _list = mock_list(&server, two_apps()).await;

	client.list_apps().await.expect("First listing should succeed.");
	client.get_app(&liff_id("A")).await.expect("Lookup should succeed.");
	client.list_apps().await.expect("Second listing should succeed.");

	token.assert_calls_async(1).await;
}

#[tokio::test]
async fn create_app_omits_unset_fields() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_test_client(&server.base_url());
	let _token = mock_token(&server).await;
	let create = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(APPS_PATH)
				.header("authorization", BEARER_HEADER)
				.header("content-type", "application/json")
				.json_body(json!({ "view": { "type": "full", "url": "https://x.example/" } }));
			then.status(200).json_body(json!({ "liffId": "1234" }));
		})
		.await;
	let created = client
		.create_app(&CreateAppRequest::new(ViewType::Full, "https://x.example/"))
		.await
		.expect("Creation should succeed.");

	assert_eq!(created, liff_id("1234"));

	create.assert_async().await;
}

#[tokio::test]
async fn create_and_fetch_reads_the_new_record() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_test_client(&server.base_url());
	let token = mock_token(&server).await;
	let create = server
		.mock_async(|when, then| {
			when.method(POST).path(APPS_PATH).json_body(json!({
				"view": { "type": "full", "url": "https://x.example/" },
				"description": "demo"
			}));
			then.status(200).json_body(json!({ "liffId": "1234" }));
		})
		.await;
	let list = mock_list(
		&server,
		json!([
			{ "liffId": "0001", "view": { "type": "tall", "url": "https://other.example/" } },
			{
				"liffId": "1234",
				"view": { "type": "full", "url": "https://x.example/" },
				"description": "demo",
				"scope": ["profile", "chat_message.write", "profile"]
			}
		]),
	)
	.await;
	let request = CreateAppRequest::new(ViewType::Full, "https://x.example/").description("demo");
	let app = client.create_and_fetch(&request).await.expect("Create and fetch should succeed.");

	assert_eq!(app.liff_id, liff_id("1234"));
	assert_eq!(app.view.kind, ViewType::Full);
	assert_eq!(app.description.as_deref(), Some("demo"));
	assert_eq!(
		app.scope,
		vec![LiffScope::Profile, LiffScope::ChatMessageWrite, LiffScope::Profile]
	);

	token.assert_calls_async(1).await;
	create.assert_async().await;
	list.assert_async().await;
}

#[tokio::test]
async fn update_app_sends_partial_body() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_test_client(&server.base_url());
	let _token = mock_token(&server).await;
	let update = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path("/liff/v1/apps/1234")
				.header("authorization", BEARER_HEADER)
				.json_body(json!({ "description": "renamed", "features": { "qrCode": true } }));
			then.status(200);
		})
		.await;
	let patch = UpdateAppRequest::new().description("renamed").qr_code(true);

	client.update_app(&liff_id("1234"), &patch).await.expect("Update should succeed.");

	update.assert_async().await;
}

#[tokio::test]
async fn update_and_fetch_returns_reconciled_record() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_test_client(&server.base_url());
	let _token = mock_token(&server).await;
	let update = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path("/liff/v1/apps/B")
				.json_body(json!({ "view": { "url": "https://b.example/next" } }));
			then.status(200);
		})
		.await;
	let list = mock_list(
		&server,
		json!([{
			"liffId": "B",
			"view": { "type": "tall", "url": "https://b.example/next", "moduleMode": true },
			"description": "second"
		}]),
	)
	.await;
	let patch = UpdateAppRequest::new().url("https://b.example/next");
	let app = client
		.update_and_fetch(&liff_id("B"), &patch)
		.await
		.expect("Update and fetch should succeed.");

	assert_eq!(app.view.url, "https://b.example/next");
	assert_eq!(app.view.kind, ViewType::Tall);
	assert_eq!(app.description.as_deref(), Some("second"));

	update.assert_async().await;
	list.assert_async().await;
}

#[tokio::test]
async fn delete_app_issues_single_delete() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_test_client(&server.base_url());
	let _token = mock_token(&server).await;
	let delete = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/liff/v1/apps/1234").header("authorization", BEARER_HEADER);
			then.status(200);
		})
		.await;

	client.delete_app(&liff_id("1234")).await.expect("Deletion should succeed.");

	delete.assert_calls_async(1).await;
}

#[tokio::test]
async fn non_200_statuses_surface_exact_codes() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_test_client(&server.base_url());
	let _token = mock_token(&server).await;
	let _list = server
		.mock_async(|when, then| {
			when.method(GET).path(APPS_PATH);
			then.status(500).json_body(json!({ "apps": [] }));
		})
		.await;
	let _create = server
		.mock_async(|when, then| {
			when.method(POST).path(APPS_PATH);
			then.status(400).json_body(json!({ "message": "invalid view" }));
		})
		.await;
	let _update = server
		.mock_async(|when, then| {
			when.method(PUT).path("/liff/v1/apps/1234");
			then.status(404);
		})
		.await;
	let _delete = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/liff/v1/apps/1234");
			then.status(204);
		})
		.await;
	let id = liff_id("1234");
	let err = client.list_apps().await.expect_err("500 should fail the listing.");

	assert!(matches!(err, Error::UnexpectedStatus { endpoint: "list_apps", status: 500 }));
	assert!(err.is_retryable());

	let err = client
		.create_app(&CreateAppRequest::new(ViewType::Full, "https://x.example/"))
		.await
		.expect_err("400 should fail the creation.");

	assert!(matches!(err, Error::UnexpectedStatus { endpoint: "create_app", status: 400 }));
	assert!(!err.is_retryable());

	let err = client
		.update_app(&id, &UpdateAppRequest::new().description("x"))
		.await
		.expect_err("404 should fail the update.");

	assert!(matches!(err, Error::UnexpectedStatus { endpoint: "update_app", status: 404 }));

	let err = client.delete_app(&id).await.expect_err("Only 200 counts as success.");

	assert!(matches!(err, Error::UnexpectedStatus { endpoint: "delete_app", status: 204 }));
}

#[tokio::test]
async fn token_failure_aborts_the_call() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_test_client(&server.base_url());
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(401).json_body(json!({ "error": "invalid_client" }));
		})
		.await;
	let list = mock_list(&server, two_apps()).await;
	let err = client.list_apps().await.expect_err("Token failure should abort the listing.");

	assert!(matches!(err, Error::UnexpectedStatus { endpoint: "issue_token", status: 401 }));

	token.assert_async().await;
	list.assert_calls_async(0).await;
}

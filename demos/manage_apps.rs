//! Demonstrates building a [`LiffClient`] from a [`ClientConfig`] and walking one LIFF app
//! through create, update, and delete against a local mock of the LINE API.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use line_liff::{
	api::{BotPrompt, CreateAppRequest, LiffClient, UpdateAppRequest, ViewType},
	config::ClientConfig,
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/v3/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"token_type\":\"Bearer\",\"access_token\":\"demo-token\",\"expires_in\":2592000}",
			);
		})
		.await;
	let _create_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/liff/v1/apps");
			then.status(200).json_body(json!({ "liffId": "1657-demo" }));
		})
		.await;
	let _update_mock = server
		.mock_async(|when, then| {
			when.method(PUT).path("/liff/v1/apps/1657-demo");
			then.status(200);
		})
		.await;
	let _list_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/liff/v1/apps");
			then.status(200).json_body(json!({
				"apps": [{
					"liffId": "1657-demo",
					"view": { "type": "tall", "url": "https://demo.example/liff" },
					"description": "Demo shop",
					"features": { "ble": false, "qrCode": true },
					"scope": ["openid", "profile"],
					"botPrompt": "normal"
				}]
			}));
		})
		.await;
	let delete_mock = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/liff/v1/apps/1657-demo");
			then.status(200);
		})
		.await;
	let config = ClientConfig::builder()
		.endpoint(Url::parse(&server.base_url())?)
		.channel_id("1234567890")
		.channel_secret("demo-secret")
		.build()?;
	let client = LiffClient::new(config)?;
	let request = CreateAppRequest::new(ViewType::Full, "https://demo.example/liff")
		.description("Demo shop")
		.scope(["openid", "profile"])
		.bot_prompt(BotPrompt::Normal);
	let liff_id = client.create_app(&request).await?;

	println!("Created LIFF app {liff_id}.");

	let patch = UpdateAppRequest::new().view_type(ViewType::Tall).qr_code(true);
	let app = client.update_and_fetch(&liff_id, &patch).await?;

	println!("Reconciled record: {app:?}.");

	client.delete_app(&liff_id).await?;

	println!("Deleted LIFF app {liff_id}.");

	token_mock.assert_calls_async(1).await;
	delete_mock.assert_async().await;

	Ok(())
}

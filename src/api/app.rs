//! LIFF app wire model.
//!
//! Response records use `#[serde(default)]` for fields the service may omit. Request payloads
//! keep every optional field as `Option<T>` with `skip_serializing_if`, so an unset field is
//! left out of the JSON object instead of being sent as `null`. Partial updates depend on that
//! distinction.

// self
use crate::{_prelude::*, auth::LiffId};

macro_rules! open_enum {
	(
		$(#[$meta:meta])*
		$name:ident {
			$($(#[$variant_meta:meta])* $variant:ident => $wire:literal,)+
		}
	) => {
		$(#[$meta])*
		///
		/// Values this crate does not know are kept verbatim in `Other`, so one unfamiliar
		/// record never fails a whole listing.
		#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(from = "String", into = "String")]
		pub enum $name {
			$($(#[$variant_meta])* $variant,)+
			/// Any value this crate does not know about yet.
			Other(String),
		}
		impl $name {
			/// Wire representation.
			pub fn as_str(&self) -> &str {
				match self {
					$(Self::$variant => $wire,)+
					Self::Other(value) => value,
				}
			}
		}
		impl From<String> for $name {
			fn from(value: String) -> Self {
				match value.as_str() {
					$($wire => Self::$variant,)+
					_ => Self::Other(value),
				}
			}
		}
		impl From<&str> for $name {
			fn from(value: &str) -> Self {
				Self::from(value.to_owned())
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				match value {
					$name::Other(value) => value,
					known => known.as_str().to_owned(),
				}
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(self.as_str())
			}
		}
	};
}

open_enum! {
	/// Screen size of a LIFF app.
	ViewType {
		/// Full screen.
		Full => "full",
		/// 80% of the screen height.
		Tall => "tall",
		/// 50% of the screen height.
		Compact => "compact",
	}
}

open_enum! {
	/// How additional path, query, and fragment parts are added to the LIFF URL.
	PermanentLinkPattern {
		/// Append to the endpoint URL.
		Concat => "concat",
	}
}

open_enum! {
	/// Add-friend option shown when the LIFF app opens.
	BotPrompt {
		/// Show the add-friend option in the consent screen.
		Normal => "normal",
		/// Show a separate add-friend screen after consent.
		Aggressive => "aggressive",
		/// Do not show the add-friend option.
		None => "none",
	}
}

open_enum! {
	/// Permission requested by a LIFF app.
	LiffScope {
		/// `openid`
		OpenId => "openid",
		/// `profile`
		Profile => "profile",
		/// `email`
		Email => "email",
		/// `chat_message.write`
		ChatMessageWrite => "chat_message.write",
	}
}

/// View settings of an existing LIFF app.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiffView {
	/// Screen size.
	#[serde(rename = "type")]
	pub kind: ViewType,
	/// HTTPS endpoint URL of the LIFF app.
	pub url: String,
	/// Whether the app runs in module mode.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub module_mode: Option<bool>,
}

/// Feature flags of an existing LIFF app.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiffFeatures {
	/// Bluetooth LE support; read-only.
	#[serde(default)]
	pub ble: bool,
	/// 2D code reader availability.
	#[serde(default)]
	pub qr_code: bool,
}

/// A LIFF app record as returned by the list endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiffApp {
	/// Server-assigned identifier.
	pub liff_id: LiffId,
	/// View settings.
	pub view: LiffView,
	/// Human-readable name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Feature flags.
	#[serde(default)]
	pub features: LiffFeatures,
	/// Permanent link pattern.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub permanent_link_pattern: Option<PermanentLinkPattern>,
	/// Requested permissions, in server order.
	#[serde(default)]
	pub scope: Vec<LiffScope>,
	/// Add-friend option.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub bot_prompt: Option<BotPrompt>,
}

/// Body of `GET liff/v1/apps`.
#[derive(Debug, Deserialize)]
pub(crate) struct AppList {
	#[serde(default)]
	pub(crate) apps: Vec<LiffApp>,
}

/// Body of `POST liff/v1/apps`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatedApp {
	pub(crate) liff_id: LiffId,
}

/// View settings sent when creating an app.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppView {
	/// Screen size.
	#[serde(rename = "type")]
	pub kind: ViewType,
	/// HTTPS endpoint URL.
	pub url: String,
	/// Module mode flag; omitted when unset.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub module_mode: Option<bool>,
}

/// Writable feature flags; omitted fields keep the server default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesPatch {
	/// 2D code reader availability.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub qr_code: Option<bool>,
}

/// Payload of `POST liff/v1/apps`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppRequest {
	/// View settings (required).
	pub view: CreateAppView,
	/// Human-readable name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Writable feature flags.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub features: Option<FeaturesPatch>,
	/// Permanent link pattern.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub permanent_link_pattern: Option<PermanentLinkPattern>,
	/// Requested permissions, sent in the given order.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub scope: Option<Vec<LiffScope>>,
	/// Add-friend option.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bot_prompt: Option<BotPrompt>,
}
impl CreateAppRequest {
	/// Starts a request for an app with the given view type and endpoint URL.
	pub fn new(kind: ViewType, url: impl Into<String>) -> Self {
		Self {
			view: CreateAppView { kind, url: url.into(), module_mode: None },
			description: None,
			features: None,
			permanent_link_pattern: None,
			scope: None,
			bot_prompt: None,
		}
	}

	/// Sets the module mode flag.
	pub fn module_mode(mut self, enabled: bool) -> Self {
		self.view.module_mode = Some(enabled);

		self
	}

	/// Sets the description.
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());

		self
	}

	/// Sets the QR code flag.
	pub fn qr_code(mut self, enabled: bool) -> Self {
		self.features = Some(FeaturesPatch { qr_code: Some(enabled) });

		self
	}

	/// Sets the permanent link pattern.
	pub fn permanent_link_pattern(mut self, pattern: PermanentLinkPattern) -> Self {
		self.permanent_link_pattern = Some(pattern);

		self
	}

	/// Sets the scope list; order and duplicates are preserved as given.
	pub fn scope<I, S>(mut self, scope: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<LiffScope>,
	{
		self.scope = Some(scope.into_iter().map(Into::into).collect());

		self
	}

	/// Sets the add-friend option.
	pub fn bot_prompt(mut self, prompt: BotPrompt) -> Self {
		self.bot_prompt = Some(prompt);

		self
	}
}

/// View fields sent when updating an app; each one is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewPatch {
	/// Screen size.
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub kind: Option<ViewType>,
	/// HTTPS endpoint URL.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	/// Module mode flag.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub module_mode: Option<bool>,
}

/// Payload of `PUT liff/v1/apps/{liffId}`; only populated fields are sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppRequest {
	/// View fields to change.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub view: Option<ViewPatch>,
	/// New description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Writable feature flags to change.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub features: Option<FeaturesPatch>,
	/// New permanent link pattern.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub permanent_link_pattern: Option<PermanentLinkPattern>,
	/// Replacement scope list.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub scope: Option<Vec<LiffScope>>,
	/// New add-friend option.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bot_prompt: Option<BotPrompt>,
}
impl UpdateAppRequest {
	/// Starts an empty patch.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns `true` when no field would be sent.
	pub fn is_empty(&self) -> bool {
		self == &Self::default()
	}

	/// Changes the view type.
	pub fn view_type(mut self, kind: ViewType) -> Self {
		self.view.get_or_insert_with(ViewPatch::default).kind = Some(kind);

		self
	}

	/// Changes the endpoint URL.
	pub fn url(mut self, url: impl Into<String>) -> Self {
		self.view.get_or_insert_with(ViewPatch::default).url = Some(url.into());

		self
	}

	/// Changes the module mode flag.
	pub fn module_mode(mut self, enabled: bool) -> Self {
		self.view.get_or_insert_with(ViewPatch::default).module_mode = Some(enabled);

		self
	}

	/// Changes the description.
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());

		self
	}

	/// Changes the QR code flag.
	pub fn qr_code(mut self, enabled: bool) -> Self {
		self.features = Some(FeaturesPatch { qr_code: Some(enabled) });

		self
	}

	/// Changes the permanent link pattern.
	pub fn permanent_link_pattern(mut self, pattern: PermanentLinkPattern) -> Self {
		self.permanent_link_pattern = Some(pattern);

		self
	}

	/// Replaces the scope list; order and duplicates are preserved as given.
	pub fn scope<I, S>(mut self, scope: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<LiffScope>,
	{
		self.scope = Some(scope.into_iter().map(Into::into).collect());

		self
	}

	/// Changes the add-friend option.
	pub fn bot_prompt(mut self, prompt: BotPrompt) -> Self {
		self.bot_prompt = Some(prompt);

		self
	}
}

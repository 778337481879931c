//! Strongly typed identifiers for LINE channels and LIFF apps.
//!
//! Both identifiers share one representation, [`Id<K>`], tagged with a zero-sized kind so a
//! channel id can never be passed where a LIFF id is expected. LIFF ids are interpolated into
//! request paths, so separators are rejected along with whitespace.

// std
use std::{borrow::Borrow, hash::Hash, marker::PhantomData, ops::Deref};
// crates.io
use serde::{Deserializer, Serializer, de::Error as _};
// self
use crate::_prelude::*;

/// Identifier families understood by [`Id`].
pub trait IdKind {
	/// Label used in error messages and `Debug` output.
	const LABEL: &'static str;
	/// Maximum accepted byte length.
	const MAX_LEN: usize = 128;
}

/// Marker for LINE channel identifiers.
#[derive(Debug)]
pub enum Channel {}
impl IdKind for Channel {
	const LABEL: &'static str = "Channel";
}

/// Marker for LIFF app identifiers.
#[derive(Debug)]
pub enum Liff {}
impl IdKind for Liff {
	const LABEL: &'static str = "LIFF";
}

/// Identifier of the LINE channel that owns the LIFF apps.
pub type ChannelId = Id<Channel>;
/// Server-assigned identifier of a LIFF app.
pub type LiffId = Id<Liff>;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Identifier family.
		kind: &'static str,
	},
	/// Whitespace anywhere in the identifier.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Identifier family.
		kind: &'static str,
	},
	/// A `/`, `?`, or `#` that would break out of the URL path segment.
	#[error("{kind} identifier contains a URL separator.")]
	ContainsSeparator {
		/// Identifier family.
		kind: &'static str,
	},
	/// The identifier exceeded the allowed length.
	#[error("{kind} identifier exceeds {max} bytes.")]
	TooLong {
		/// Identifier family.
		kind: &'static str,
		/// Maximum permitted byte length.
		max: usize,
	},
}

/// Validated identifier of kind `K`.
pub struct Id<K> {
	value: String,
	kind: PhantomData<fn() -> K>,
}
impl<K> Id<K>
where
	K: IdKind,
{
	/// Validates `value` and wraps it.
	pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
		let value = value.into();

		check::<K>(&value)?;

		Ok(Self { value, kind: PhantomData })
	}

	/// Borrows the raw identifier.
	pub fn as_str(&self) -> &str {
		&self.value
	}
}
impl<K> Clone for Id<K> {
	fn clone(&self) -> Self {
		Self { value: self.value.clone(), kind: PhantomData }
	}
}
impl<K> PartialEq for Id<K> {
	fn eq(&self, other: &Self) -> bool {
		self.value == other.value
	}
}
impl<K> Eq for Id<K> {}
impl<K> Hash for Id<K> {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.value.hash(state);
	}
}
impl<K> Deref for Id<K> {
	type Target = str;

	fn deref(&self) -> &str {
		&self.value
	}
}
impl<K> AsRef<str> for Id<K> {
	fn as_ref(&self) -> &str {
		&self.value
	}
}
impl<K> Borrow<str> for Id<K> {
	fn borrow(&self) -> &str {
		&self.value
	}
}
impl<K> Debug for Id<K>
where
	K: IdKind,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}({})", K::LABEL, self.value)
	}
}
impl<K> Display for Id<K> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.value)
	}
}
impl<K> FromStr for Id<K>
where
	K: IdKind,
{
	type Err = IdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl<K> TryFrom<String> for Id<K>
where
	K: IdKind,
{
	type Error = IdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl<K> From<Id<K>> for String {
	fn from(id: Id<K>) -> Self {
		id.value
	}
}
impl<K> Serialize for Id<K> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&self.value)
	}
}
impl<'de, K> Deserialize<'de> for Id<K>
where
	K: IdKind,
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = String::deserialize(deserializer)?;

		Self::new(raw).map_err(D::Error::custom)
	}
}

fn check<K>(value: &str) -> Result<(), IdentifierError>
where
	K: IdKind,
{
	let kind = K::LABEL;

	if value.is_empty() {
		Err(IdentifierError::Empty { kind })
	} else if value.len() > K::MAX_LEN {
		Err(IdentifierError::TooLong { kind, max: K::MAX_LEN })
	} else if value.chars().any(char::is_whitespace) {
		Err(IdentifierError::ContainsWhitespace { kind })
	} else if value.contains(['/', '?', '#']) {
		Err(IdentifierError::ContainsSeparator { kind })
	} else {
		Ok(())
	}
}

//! Unverified JWT payload inspection for expiry scheduling.
//!
//! The gateway only needs the `exp` claim to decide whether to refresh before a call;
//! signature verification stays with the backend, which re-validates every request.
//! Decoding therefore splits the compact form, base64url-decodes the payload segment,
//! and parses the JSON claims without touching the header or signature.

// crates.io
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
// self
use crate::_prelude::*;

/// Errors produced while decoding a compact JWT payload.
#[derive(Debug, ThisError)]
pub enum ClaimsError {
	/// Token is not a three-segment compact JWT.
	#[error("Token is not a three-segment compact JWT.")]
	MalformedCompactForm,
	/// Payload segment is not valid base64url.
	#[error("Token payload segment is not valid base64url.")]
	PayloadEncoding {
		/// Underlying decode failure.
		#[source]
		source: base64::DecodeError,
	},
	/// Payload JSON is malformed or missing required claims.
	#[error("Token payload JSON is malformed or missing required claims.")]
	PayloadJson {
		/// Underlying parse failure.
		#[source]
		source: serde_json::Error,
	},
	/// The `exp` claim does not map onto a representable instant.
	#[error("The exp claim ({value}) is outside the representable time range.")]
	ExpiryOutOfRange {
		/// Raw `exp` value carried by the token.
		value: i64,
	},
}

/// Claims the gateway reads from an access token, without signature verification.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccessClaims {
	/// Subject, typically the user identifier.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sub: Option<String>,
	/// Expiry instant as a Unix timestamp. Required; a token without one is unusable.
	pub exp: i64,
	/// Issued-at instant as a Unix timestamp.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub iat: Option<i64>,
	/// Remaining claims the gateway carries through untouched.
	#[serde(flatten)]
	pub additional: HashMap<String, serde_json::Value>,
}
impl AccessClaims {
	/// Decodes the payload segment of a compact JWT.
	pub fn decode(compact: &str) -> Result<Self, ClaimsError> {
		let mut segments = compact.split('.');
		let (Some(_header), Some(payload), Some(_signature), None) =
			(segments.next(), segments.next(), segments.next(), segments.next())
		else {
			return Err(ClaimsError::MalformedCompactForm);
		};
		let bytes = URL_SAFE_NO_PAD
			.decode(payload)
			.map_err(|source| ClaimsError::PayloadEncoding { source })?;

		serde_json::from_slice(&bytes).map_err(|source| ClaimsError::PayloadJson { source })
	}

	/// Converts the `exp` claim into an instant.
	pub fn expires_at(&self) -> Result<OffsetDateTime, ClaimsError> {
		OffsetDateTime::from_unix_timestamp(self.exp)
			.map_err(|_| ClaimsError::ExpiryOutOfRange { value: self.exp })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn encode_payload(json: &str) -> String {
		format!("aGVhZGVy.{}.c2ln", URL_SAFE_NO_PAD.encode(json.as_bytes()))
	}

	#[test]
	fn decodes_exp_and_passes_extra_claims_through() {
		let token = encode_payload("{\"sub\":\"42\",\"exp\":1750000000,\"role\":\"user\"}");
		let claims = AccessClaims::decode(&token).expect("Claims fixture should decode.");

		assert_eq!(claims.sub.as_deref(), Some("42"));
		assert_eq!(claims.exp, 1_750_000_000);
		assert_eq!(claims.additional.get("role"), Some(&serde_json::json!("user")));
		assert_eq!(
			claims.expires_at().expect("Expiry fixture should convert.").unix_timestamp(),
			1_750_000_000,
		);
	}

	#[test]
	fn rejects_wrong_segment_counts() {
		assert!(matches!(
			AccessClaims::decode("only-one-segment"),
			Err(ClaimsError::MalformedCompactForm),
		));
		assert!(matches!(
			AccessClaims::decode("a.b.c.d"),
			Err(ClaimsError::MalformedCompactForm),
		));
	}

	#[test]
	fn rejects_bad_encoding_and_missing_exp() {
		assert!(matches!(
			AccessClaims::decode("header.!!!.signature"),
			Err(ClaimsError::PayloadEncoding { .. }),
		));

		let missing_exp = encode_payload("{\"sub\":\"42\"}");

		assert!(matches!(
			AccessClaims::decode(&missing_exp),
			Err(ClaimsError::PayloadJson { .. }),
		));
	}
}

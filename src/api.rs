//! Typed resource surface over the gateway.
//!
//! Each submodule pairs one canonical DTO schema per resource with the operations the
//! backend exposes for it, all funneled through [`Gateway::send`](crate::gateway::Gateway::send)
//! so token mechanics stay out of call sites. Wire casing is the backend's camelCase;
//! date-time fields use the backend's zone-less ISO shapes declared below.

pub mod account;
pub mod transaction;
pub mod transfer;
pub mod user;

pub use account::*;
pub use transaction::*;
pub use transfer::*;
pub use user::*;

// crates.io
use time::{Date, PrimitiveDateTime};

time::serde::format_description!(
	backend_datetime,
	PrimitiveDateTime,
	"[year]-[month]-[day]T[hour]:[minute]:[second]"
);
time::serde::format_description!(backend_date, Date, "[year]-[month]-[day]");

#[cfg(test)]
mod tests {
	// crates.io
	use serde::{Deserialize, Serialize};
	use time::macros;
	// self
	use super::*;

	#[derive(Debug, PartialEq, Serialize, Deserialize)]
	struct Stamped {
		#[serde(with = "backend_datetime")]
		at: PrimitiveDateTime,
		#[serde(with = "backend_date")]
		on: Date,
	}

	#[test]
	fn wire_formats_match_the_backend_shapes() {
		let stamped = Stamped {
			at: macros::datetime!(2025-03-15 09:30:00),
			on: macros::date!(2025-03-15),
		};
		let json = serde_json::to_string(&stamped).expect("Stamp fixture should serialize.");

		assert_eq!(json, "{\"at\":\"2025-03-15T09:30:00\",\"on\":\"2025-03-15\"}");
		assert_eq!(
			serde_json::from_str::<Stamped>(&json).expect("Stamp fixture should deserialize."),
			stamped,
		);
	}
}

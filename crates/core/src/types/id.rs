//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.
//!
//! All Copperleaf identifiers are server-assigned opaque strings. Holding one
//! of these types therefore always means "replica of a server-owned entity";
//! the client never mints them.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>` and `From<&str>` implementations
///
/// # Example
///
/// ```rust
/// # use copperleaf_core::define_id;
/// define_id!(ProductId);
/// define_id!(OrderId);
///
/// let product_id = ProductId::new("p_1209");
/// let order_id = OrderId::new("o_1209");
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            pub fn new(id: impl ::core::convert::Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying `String`.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(CategoryId);
define_id!(ProductId);
define_id!(OrderId);
define_id!(PaymentId);
define_id!(ShipmentId);
define_id!(ZoneId);
define_id!(RateId);
define_id!(CouponId);
define_id!(ReviewId);
define_id!(CustomerId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    define_id!(TestId);

    #[test]
    fn test_construction_and_access() {
        let id = TestId::new("t_42");
        assert_eq!(id.as_str(), "t_42");
        assert_eq!(id.clone().into_inner(), "t_42");
        assert_eq!(format!("{id}"), "t_42");
    }

    #[test]
    fn test_from_conversions() {
        let from_str: TestId = "t_1".into();
        let from_string: TestId = String::from("t_1").into();
        assert_eq!(from_str, from_string);
    }

    #[test]
    fn test_serde_transparent() {
        let id = TestId::new("t_7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"t_7\"");

        let parsed: TestId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}

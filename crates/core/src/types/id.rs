//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro for numeric IDs and `define_string_id!` for
//! opaque string IDs. Both prevent accidentally mixing IDs of different
//! entity types.

/// Macro to define a type-safe numeric ID wrapper.
///
/// Creates a newtype wrapper around the given integer type with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `PartialOrd`, `Ord`, `Hash`
/// - Conversion methods: `new()`, `get()`
/// - `From` conversions in both directions, `Display` and `FromStr`
///
/// # Example
///
/// ```rust
/// # use grado_core::define_id;
/// define_id!(DishId, u32);
/// define_id!(TicketId, u32);
///
/// let dish = DishId::new(1);
/// let ticket = TicketId::new(1);
/// assert_eq!(dish.get(), ticket.get());
///
/// // These are different types, so this won't compile:
/// // let _: DishId = ticket;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident, $inner:ty) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name($inner);

        impl $name {
            /// Create a new ID from its raw value.
            #[must_use]
            pub const fn new(id: $inner) -> Self {
                Self(id)
            }

            /// Get the underlying raw value.
            #[must_use]
            pub const fn get(&self) -> $inner {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = <$inner as ::core::str::FromStr>::Err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }

        impl From<$inner> for $name {
            fn from(id: $inner) -> Self {
                Self(id)
            }
        }

        impl From<$name> for $inner {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

/// Macro to define a type-safe string ID wrapper.
#[macro_export]
macro_rules! define_string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

define_id!(MenuItemId, u32);
define_id!(ReviewId, i64);

define_string_id!(UserId);
define_string_id!(OrderId);

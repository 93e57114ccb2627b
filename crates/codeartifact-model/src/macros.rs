//! Declarative builders for wire types.
//!
//! Every structure exchanged with the service has the same shape: optional
//! fields, camelCase wire names, fluent setters, structural equality and a
//! debug rendering that lists only present fields. [`model!`] expands a field
//! list into that shape; [`wire_enum!`] does the same for closed string sets.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};

/// Field names whose values never appear in debug output.
const REDACTED_FIELDS: &[&str] = &["authorization_token"];

/// Returns true if `field` holds a credential.
#[doc(hidden)]
#[must_use]
pub fn is_redacted(field: &str) -> bool {
    REDACTED_FIELDS.contains(&field)
}

/// Inserts `key` into a lazily created map, refusing to overwrite.
///
/// # Errors
///
/// Returns [`Error::DuplicateKey`] if `key` is already present. The map is
/// not modified in that case.
pub fn insert_unique<K, V>(
    map: &mut Option<BTreeMap<K, V>>,
    field: &'static str,
    key: K,
    value: V,
) -> Result<()>
where
    K: Ord + fmt::Display,
{
    match map.get_or_insert_with(BTreeMap::new).entry(key) {
        Entry::Occupied(existing) => Err(Error::DuplicateKey {
            field,
            key: existing.key().to_string(),
        }),
        Entry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
    }
}

/// Declares a wire structure.
///
/// Each listed field becomes `pub <field>: Option<T>` serialized under its
/// camelCase name and omitted when absent. The macro also generates
/// `with_<field>` / `clear_<field>` fluent setters and a `Debug` impl that
/// skips absent fields.
#[doc(hidden)]
#[macro_export]
macro_rules! model {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Default, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            $(
                $(#[$fmeta])*
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        $crate::__private::paste! {
            impl $name {
                $(
                    #[doc = concat!("Sets `", stringify!($field), "`, replacing any previous value.")]
                    #[must_use]
                    pub fn [<with_ $field>](mut self, value: impl Into<$ty>) -> Self {
                        self.$field = Some(value.into());
                        self
                    }

                    #[doc = concat!("Clears `", stringify!($field), "`, leaving it absent.")]
                    #[must_use]
                    pub fn [<clear_ $field>](mut self) -> Self {
                        self.$field = None;
                        self
                    }
                )*
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let mut out = f.debug_struct(stringify!($name));
                $(
                    if let Some(value) = &self.$field {
                        if $crate::macros::is_redacted(stringify!($field)) {
                            out.field(stringify!($field), &format_args!("<redacted>"));
                        } else {
                            out.field(stringify!($field), value);
                        }
                    }
                )*
                out.finish()
            }
        }
    };
}

/// Declares a closed, string-backed enumeration.
///
/// The generated type serializes as its wire string and refuses to parse or
/// deserialize any string outside the declared set.
#[doc(hidden)]
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $wire:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Every accepted wire string, in declaration order.
            pub const WIRE_VALUES: &'static [&'static str] = &[$($wire),+];

            /// Returns the canonical wire string.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(value: &str) -> ::std::result::Result<Self, Self::Err> {
                match value {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err($crate::Error::UnknownVariant {
                        type_name: stringify!($name),
                        value: value.to_string(),
                    }),
                }
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let value = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                value.parse().map_err(|_| {
                    <D::Error as ::serde::de::Error>::unknown_variant(&value, Self::WIRE_VALUES)
                })
            }
        }
    };
}

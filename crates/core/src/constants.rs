//! Explicit tables for Java enum constants.
//!
//! A Java enum is declared once with [`java_enum!`](crate::java_enum), listing
//! every constant and its Java name. Lookups by name go through a
//! [`ConstantTable`] built on first use, and the three operations a Java enum
//! offers stay separate: [`JavaEnum::values`], [`JavaEnum::value_of`] and
//! [`JavaEnum::name`].

use std::collections::HashMap;
use std::sync::OnceLock;

use thiserror::Error;

use crate::registry::{RegistryKey, RegistryKeyError, DEFAULT_NAMESPACE};

/// Failure to resolve a constant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstantError {
    /// No constant with this name exists on the class.
    #[error("no enum constant {class}.{name}")]
    UnknownConstant {
        /// Fully qualified Java class name.
        class: &'static str,
        /// Name that failed to resolve.
        name: String,
    },
}

/// A fixed set of named constants mirroring a Java enum.
pub trait JavaEnum: Copy + Eq + Send + Sync + 'static {
    /// Fully qualified Java class name, e.g. `org.bukkit.Difficulty`.
    const CLASS: &'static str;

    /// All constants in declaration (ordinal) order.
    fn values() -> &'static [Self];

    /// Java constant name, e.g. `PEACEFUL`.
    fn name(self) -> &'static str;

    /// Lookup table shared by every call to [`JavaEnum::value_of`].
    fn table() -> &'static ConstantTable<Self>;

    /// Resolve a constant by its exact Java name.
    fn value_of(name: &str) -> Result<Self, ConstantError> {
        Self::table()
            .get(name)
            .ok_or_else(|| ConstantError::UnknownConstant {
                class: Self::CLASS,
                name: name.to_string(),
            })
    }

    /// Position in [`JavaEnum::values`].
    fn ordinal(self) -> usize {
        Self::values()
            .iter()
            .position(|value| *value == self)
            .unwrap_or_default()
    }

    /// Lower-cased `minecraft:` key for this constant.
    fn key(self) -> Result<RegistryKey, RegistryKeyError> {
        RegistryKey::minecraft(&self.name().to_ascii_lowercase())
    }

    /// Resolve a constant from its `minecraft:` key.
    fn from_key(key: &RegistryKey) -> Result<Self, ConstantError> {
        if key.namespace() != DEFAULT_NAMESPACE {
            return Err(ConstantError::UnknownConstant {
                class: Self::CLASS,
                name: key.to_string(),
            });
        }
        Self::value_of(&key.path().to_ascii_uppercase())
    }
}

/// Name-to-constant map, built on the first lookup.
#[derive(Debug)]
pub struct ConstantTable<T> {
    by_name: OnceLock<HashMap<&'static str, T>>,
}

impl<T: JavaEnum> ConstantTable<T> {
    /// An empty table; usable in a `static`.
    pub const fn new() -> Self {
        Self {
            by_name: OnceLock::new(),
        }
    }

    /// Constant with the given Java name.
    pub fn get(&self, name: &str) -> Option<T> {
        self.index().get(name).copied()
    }

    /// Number of constants.
    pub fn len(&self) -> usize {
        self.index().len()
    }

    /// Whether the enum declares no constants.
    pub fn is_empty(&self) -> bool {
        self.index().is_empty()
    }

    /// Whether the table has been built yet.
    pub fn is_built(&self) -> bool {
        self.by_name.get().is_some()
    }

    fn index(&self) -> &HashMap<&'static str, T> {
        self.by_name.get_or_init(|| {
            tracing::trace!(class = T::CLASS, "building constant table");
            T::values().iter().map(|value| (value.name(), *value)).collect()
        })
    }
}

impl<T: JavaEnum> Default for ConstantTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Declare a Rust enum mirroring a Java enum.
///
/// ```
/// use mcrand_core::{java_enum, JavaEnum};
///
/// java_enum! {
///     /// Server difficulty.
///     pub enum Difficulty: "org.bukkit.Difficulty" {
///         Peaceful = "PEACEFUL",
///         Easy = "EASY",
///     }
/// }
///
/// assert_eq!(Difficulty::value_of("EASY"), Ok(Difficulty::Easy));
/// assert_eq!(Difficulty::Peaceful.ordinal(), 0);
/// ```
#[macro_export]
macro_rules! java_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $class:literal {
            $($(#[$vmeta:meta])* $variant:ident = $java:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::constants::JavaEnum for $name {
            const CLASS: &'static str = $class;

            fn values() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $java),+
                }
            }

            fn table() -> &'static $crate::constants::ConstantTable<Self> {
                static TABLE: $crate::constants::ConstantTable<$name> =
                    $crate::constants::ConstantTable::new();
                &TABLE
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::constants::JavaEnum::name(*self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::constants::ConstantError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                <Self as $crate::constants::JavaEnum>::value_of(s)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::java_enum! {
        enum GameMode: "org.bukkit.GameMode" {
            Creative = "CREATIVE",
            Survival = "SURVIVAL",
            Adventure = "ADVENTURE",
            Spectator = "SPECTATOR",
        }
    }

    #[test]
    fn values_keep_declaration_order() {
        assert_eq!(
            GameMode::values(),
            &[
                GameMode::Creative,
                GameMode::Survival,
                GameMode::Adventure,
                GameMode::Spectator
            ]
        );
        assert_eq!(GameMode::Adventure.ordinal(), 2);
    }

    #[test]
    fn value_of_resolves_exact_names() {
        assert_eq!(GameMode::value_of("SURVIVAL"), Ok(GameMode::Survival));
        assert_eq!("SPECTATOR".parse::<GameMode>(), Ok(GameMode::Spectator));
        assert!(GameMode::table().is_built());
        assert_eq!(GameMode::table().len(), 4);
    }

    #[test]
    fn value_of_reports_unknown_names() {
        let err = GameMode::value_of("survival").unwrap_err();
        assert_eq!(err.to_string(), "no enum constant org.bukkit.GameMode.survival");
    }

    #[test]
    fn keys_round_trip() {
        let key = GameMode::Creative.key().unwrap();
        assert_eq!(key.to_string(), "minecraft:creative");
        assert_eq!(GameMode::from_key(&key), Ok(GameMode::Creative));

        let foreign = RegistryKey::parse("mypack:creative").unwrap();
        assert!(GameMode::from_key(&foreign).is_err());
    }

    #[test]
    fn display_uses_java_name() {
        assert_eq!(GameMode::Survival.to_string(), "SURVIVAL");
    }
}

//! # ParamFlux Tools
//!
//! Parameter schemas for the supported search engines. Each module defines
//! the engine's parameter object, with its documented defaults, and a
//! `schema()` function describing how the object is edited.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Declares a named choice enum usable as an `Enum` field.
///
/// Each variant carries the label shown in the combo box, which is also the
/// value stored in the codec.
macro_rules! named_choice {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
        default $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Codec listing every variant in declaration order.
            pub fn codec() -> Result<paramflux_inspector::EnumCodec, paramflux_inspector::SchemaError> {
                paramflux_inspector::EnumCodec::names(&[$($label),+])
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl paramflux_inspector::ChoiceValue for $name {
            fn to_enum_value(&self) -> paramflux_inspector::EnumValue {
                paramflux_inspector::EnumValue::name(self.as_str())
            }

            fn from_enum_value(value: &paramflux_inspector::EnumValue) -> Option<Self> {
                match value {
                    paramflux_inspector::EnumValue::Name(name) => {
                        Self::ALL.iter().copied().find(|variant| variant.as_str() == name)
                    }
                    paramflux_inspector::EnumValue::Code(_) => None,
                }
            }
        }
    };
}

pub mod comet;
pub mod metamorpheus;
pub mod omssa;
pub mod sage;
pub mod xtandem;

/// The supported search engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchEngine {
    Comet,
    MetaMorpheus,
    Omssa,
    Sage,
    XTandem,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown search engine `{0}`")]
pub struct UnknownEngine(pub String);

impl SearchEngine {
    pub const ALL: [SearchEngine; 5] = [
        SearchEngine::Comet,
        SearchEngine::MetaMorpheus,
        SearchEngine::Omssa,
        SearchEngine::Sage,
        SearchEngine::XTandem,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SearchEngine::Comet => "Comet",
            SearchEngine::MetaMorpheus => "MetaMorpheus",
            SearchEngine::Omssa => "OMSSA",
            SearchEngine::Sage => "Sage",
            SearchEngine::XTandem => "X!Tandem",
        }
    }

    pub fn help_url(self) -> &'static str {
        match self {
            SearchEngine::Comet => comet::HELP_URL,
            SearchEngine::MetaMorpheus => metamorpheus::HELP_URL,
            SearchEngine::Omssa => omssa::HELP_URL,
            SearchEngine::Sage => sage::HELP_URL,
            SearchEngine::XTandem => xtandem::HELP_URL,
        }
    }
}

impl fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchEngine {
    type Err = UnknownEngine;

    /// Case-insensitive; punctuation is ignored so `xtandem` matches `X!Tandem`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        SearchEngine::ALL
            .into_iter()
            .find(|engine| {
                let name: String = engine
                    .name()
                    .chars()
                    .filter(char::is_ascii_alphanumeric)
                    .map(|c| c.to_ascii_lowercase())
                    .collect();
                name == wanted
            })
            .ok_or_else(|| UnknownEngine(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_from_str() {
        assert_eq!("comet".parse(), Ok(SearchEngine::Comet));
        assert_eq!("X!Tandem".parse(), Ok(SearchEngine::XTandem));
        assert_eq!("xtandem".parse(), Ok(SearchEngine::XTandem));
        assert_eq!("omssa".parse(), Ok(SearchEngine::Omssa));
        assert_eq!(
            "mascot".parse::<SearchEngine>(),
            Err(UnknownEngine("mascot".to_string()))
        );
    }
}

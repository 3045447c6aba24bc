//! XML wire format helpers.
//!
//! | Type | Role |
//! |------|------|
//! | [`XmlElement`] | Owned element tree built with the quick-xml pull parser |
//! | [`XmlWriter`] | Request body writer (declaration + two-space indent) |
//! | [`XmlResource`] | Resource types that can be read from an element |
//! | [`WireEnum`] | Enums with lower-snake wire names |

mod element;
mod writer;

use thiserror::Error;

pub use element::XmlElement;
pub use writer::XmlWriter;

/// XML decoding and encoding errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum XmlError {
    #[error("malformed XML: {0}")]
    Malformed(String),
    #[error("document has no root element")]
    EmptyDocument,
    #[error("expected root element <{expected}>, found <{found}>")]
    UnexpectedRoot { expected: String, found: String },
    #[error("element <{element}> has invalid value '{value}', expected {expected}")]
    InvalidValue {
        element: String,
        value: String,
        expected: &'static str,
    },
    #[error("failed to write XML: {0}")]
    Write(String),
}

/// A resource that maps to one XML element.
pub trait XmlResource: Sized {
    const ELEMENT_NAME: &'static str;

    fn from_element(element: &XmlElement) -> Result<Self, XmlError>;

    /// Parse a whole response document whose root is this resource.
    fn from_xml(body: &str) -> Result<Self, XmlError> {
        let root = XmlElement::parse(body)?;
        root.expect_name(Self::ELEMENT_NAME)?;
        Self::from_element(&root)
    }
}

/// Enums whose wire form is a fixed lower-snake token.
pub trait WireEnum: Copy + Sized {
    fn as_str(self) -> &'static str;
    fn parse_wire(value: &str) -> Option<Self>;
}

/// Declare an enum with its wire names. Parsing is case-insensitive.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "snake_case")]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::xml::WireEnum for $name {
            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }

            fn parse_wire(value: &str) -> Option<Self> {
                let value = value.trim();
                $(
                    if value.eq_ignore_ascii_case($wire) {
                        return Some(Self::$variant);
                    }
                )+
                None
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::xml::WireEnum::as_str(*self))
            }
        }
    };
}

pub(crate) use wire_enum;

use serde::{Deserialize, Serialize};

use crate::xml::{XmlElement, XmlError, XmlResource, XmlWriter};

/// Postal address. Appears wrapped in `<address>` on accounts and inline on billing info.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn read_fields(element: &XmlElement) -> Self {
        Self {
            address1: element.child_string("address1"),
            address2: element.child_string("address2"),
            city: element.child_string("city"),
            state: element.child_string("state"),
            zip: element.child_string("zip"),
            country: element.child_string("country"),
            phone: element.child_string("phone"),
        }
    }

    /// `address2` and `phone` are written as nil when blank so updates clear them.
    pub(crate) fn write_fields(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.element_if_provided("address1", self.address1.as_deref())?;
        writer.element_nillable("address2", self.address2.as_deref())?;
        writer.element_if_provided("city", self.city.as_deref())?;
        writer.element_if_provided("state", self.state.as_deref())?;
        writer.element_if_provided("zip", self.zip.as_deref())?;
        writer.element_if_provided("country", self.country.as_deref())?;
        writer.element_nillable("phone", self.phone.as_deref())
    }

    pub(crate) fn write_xml(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.start(Self::ELEMENT_NAME)?;
        self.write_fields(writer)?;
        writer.end(Self::ELEMENT_NAME)
    }
}

impl XmlResource for Address {
    const ELEMENT_NAME: &'static str = "address";

    fn from_element(element: &XmlElement) -> Result<Self, XmlError> {
        Ok(Self::read_fields(element))
    }
}

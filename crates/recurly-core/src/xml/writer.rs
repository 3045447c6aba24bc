use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{WireEnum, XmlError};
use crate::UtcDateTime;

/// Writes request bodies: XML declaration, then two-space indented elements.
pub struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self {
            inner: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    /// Build a complete document with `build` and return it as a string.
    pub fn document<F>(build: F) -> Result<String, XmlError>
    where
        F: FnOnce(&mut XmlWriter) -> Result<(), XmlError>,
    {
        let mut writer = Self::new();
        writer.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        build(&mut writer)?;
        writer.finish()
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), XmlError> {
        self.inner
            .write_event(event)
            .map_err(|e| XmlError::Write(e.to_string()))
    }

    pub fn start(&mut self, name: &str) -> Result<(), XmlError> {
        self.write(Event::Start(BytesStart::new(name)))
    }

    pub fn end(&mut self, name: &str) -> Result<(), XmlError> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    /// `<name>value</name>`, or `<name/>` when the value is empty.
    pub fn element(&mut self, name: &str, value: &str) -> Result<(), XmlError> {
        if value.is_empty() {
            return self.write(Event::Empty(BytesStart::new(name)));
        }
        self.write(Event::Start(BytesStart::new(name)))?;
        self.write(Event::Text(BytesText::new(value)))?;
        self.end(name)
    }

    /// Writes the element only when the value is present and non-blank.
    pub fn element_if_provided(&mut self, name: &str, value: Option<&str>) -> Result<(), XmlError> {
        match value {
            Some(value) if !value.trim().is_empty() => self.element(name, value),
            _ => Ok(()),
        }
    }

    /// Writes `<name nil="nil"/>` for a blank value so the server clears the field.
    pub fn element_nillable(&mut self, name: &str, value: Option<&str>) -> Result<(), XmlError> {
        match value {
            Some(value) if !value.trim().is_empty() => self.element(name, value),
            _ => {
                let mut start = BytesStart::new(name);
                start.push_attribute(("nil", "nil"));
                self.write(Event::Empty(start))
            }
        }
    }

    pub fn element_int(&mut self, name: &str, value: i64) -> Result<(), XmlError> {
        self.element(name, &value.to_string())
    }

    pub fn element_int_if_provided(&mut self, name: &str, value: Option<i64>) -> Result<(), XmlError> {
        match value {
            Some(value) => self.element_int(name, value),
            None => Ok(()),
        }
    }

    pub fn element_bool(&mut self, name: &str, value: bool) -> Result<(), XmlError> {
        self.element(name, if value { "true" } else { "false" })
    }

    pub fn element_bool_if_provided(&mut self, name: &str, value: Option<bool>) -> Result<(), XmlError> {
        match value {
            Some(value) => self.element_bool(name, value),
            None => Ok(()),
        }
    }

    pub fn element_datetime_if_provided(
        &mut self,
        name: &str,
        value: Option<UtcDateTime>,
    ) -> Result<(), XmlError> {
        match value {
            Some(value) => self.element(name, &value.format_rfc3339()),
            None => Ok(()),
        }
    }

    pub fn element_enum<T: WireEnum>(&mut self, name: &str, value: T) -> Result<(), XmlError> {
        self.element(name, value.as_str())
    }

    /// Writes `<name>` wrapping one entry per item, even when empty.
    pub fn list<T, F>(&mut self, name: &str, items: &[T], mut write_item: F) -> Result<(), XmlError>
    where
        F: FnMut(&mut XmlWriter, &T) -> Result<(), XmlError>,
    {
        self.start(name)?;
        for item in items {
            write_item(self, item)?;
        }
        self.end(name)
    }

    pub fn list_if_any<T, F>(&mut self, name: &str, items: &[T], write_item: F) -> Result<(), XmlError>
    where
        F: FnMut(&mut XmlWriter, &T) -> Result<(), XmlError>,
    {
        if items.is_empty() {
            return Ok(());
        }
        self.list(name, items, write_item)
    }

    pub fn finish(self) -> Result<String, XmlError> {
        String::from_utf8(self.inner.into_inner()).map_err(|e| XmlError::Write(e.to_string()))
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::XmlElement;

    #[test]
    fn writes_declaration_and_escaped_text() {
        let xml = XmlWriter::document(|w| {
            w.start("account")?;
            w.element("account_code", "a&b")?;
            w.element_if_provided("username", None)?;
            w.element_nillable("address2", Some("  "))?;
            w.element_bool("taxable", true)?;
            w.end("account")
        })
        .expect("must write");

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<account_code>a&amp;b</account_code>"));
        assert!(xml.contains(r#"<address2 nil="nil"/>"#));
        assert!(!xml.contains("username"));

        let root = XmlElement::parse(&xml).expect("output parses");
        assert_eq!(root.child_string("account_code").as_deref(), Some("a&b"));
        assert_eq!(root.child_bool("taxable").expect("bool"), Some(true));
    }

    #[test]
    fn empty_lists_are_skipped_only_by_list_if_any() {
        let codes: Vec<String> = Vec::new();
        let skipped = XmlWriter::document(|w| {
            w.start("coupon")?;
            w.list_if_any("plan_codes", &codes, |w, code| w.element("plan_code", code))?;
            w.end("coupon")
        })
        .expect("must write");
        assert!(!skipped.contains("plan_codes"));

        let written = XmlWriter::document(|w| {
            w.list("plan_codes", &codes, |w, code| w.element("plan_code", code))
        })
        .expect("must write");
        assert!(written.contains("plan_codes"));
    }
}

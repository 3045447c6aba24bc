use std::collections::BTreeMap;
use std::str::FromStr;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{WireEnum, XmlError};
use crate::UtcDateTime;

/// Owned XML element: name, attributes, trimmed text and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: BTreeMap<String, String>,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Pull-parse a document into its root element.
    pub fn parse(input: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => stack.push(Self::from_start(&start)?),
                Ok(Event::Empty(start)) => {
                    let element = Self::from_start(&start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| XmlError::Malformed(String::from("unbalanced end tag")))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(text)) => {
                    let text = text
                        .unescape()
                        .map_err(|e| XmlError::Malformed(e.to_string()))?;
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&text);
                    }
                }
                Ok(Event::CData(data)) => {
                    if let Some(current) = stack.last_mut() {
                        current
                            .text
                            .push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(XmlError::Malformed(format!(
                        "at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
            }
        }

        if !stack.is_empty() {
            return Err(XmlError::Malformed(String::from("unclosed element")));
        }

        root.ok_or(XmlError::EmptyDocument)
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let mut element = Self::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| XmlError::Malformed(e.to_string()))?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .map_err(|e| XmlError::Malformed(e.to_string()))?
                .into_owned();
            element.attributes.insert(key, value);
        }
        Ok(element)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    pub fn expect_name(&self, expected: &str) -> Result<(), XmlError> {
        if self.name != expected {
            return Err(XmlError::UnexpectedRoot {
                expected: expected.to_owned(),
                found: self.name.clone(),
            });
        }
        Ok(())
    }

    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// `nil="nil"` (or `nil="true"`) marks an explicitly empty value.
    pub fn is_nil(&self) -> bool {
        matches!(self.attr("nil"), Some("nil") | Some("true"))
    }

    /// Trimmed text, or `None` when nil or blank.
    pub fn value(&self) -> Option<&str> {
        if self.is_nil() {
            return None;
        }
        let trimmed = self.text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Last path segment of the `href` attribute, e.g. the account code of
    /// `<account href="https://x.recurly.com/v2/accounts/abc"/>`.
    pub fn href_id(&self) -> Option<&str> {
        self.attr("href")?
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
    }

    pub fn child_string(&self, name: &str) -> Option<String> {
        self.child(name)?.value().map(str::to_owned)
    }

    pub fn child_href_id(&self, name: &str) -> Option<String> {
        self.child(name)?.href_id().map(|id| {
            urlencoding::decode(id)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| id.to_owned())
        })
    }

    fn child_parsed<T: FromStr>(&self, name: &str, expected: &'static str) -> Result<Option<T>, XmlError> {
        let Some(value) = self.child(name).and_then(XmlElement::value) else {
            return Ok(None);
        };
        value
            .parse::<T>()
            .map(Some)
            .map_err(|_| invalid_value(name, value, expected))
    }

    pub fn child_i64(&self, name: &str) -> Result<Option<i64>, XmlError> {
        self.child_parsed(name, "an integer")
    }

    pub fn child_u32(&self, name: &str) -> Result<Option<u32>, XmlError> {
        self.child_parsed(name, "a non-negative integer")
    }

    pub fn child_u64(&self, name: &str) -> Result<Option<u64>, XmlError> {
        self.child_parsed(name, "a non-negative integer")
    }

    pub fn child_bool(&self, name: &str) -> Result<Option<bool>, XmlError> {
        let Some(value) = self.child(name).and_then(XmlElement::value) else {
            return Ok(None);
        };
        if value.eq_ignore_ascii_case("true") || value == "1" {
            Ok(Some(true))
        } else if value.eq_ignore_ascii_case("false") || value == "0" {
            Ok(Some(false))
        } else {
            Err(invalid_value(name, value, "true or false"))
        }
    }

    pub fn child_datetime(&self, name: &str) -> Result<Option<UtcDateTime>, XmlError> {
        let Some(value) = self.child(name).and_then(XmlElement::value) else {
            return Ok(None);
        };
        UtcDateTime::parse(value)
            .map(Some)
            .map_err(|_| invalid_value(name, value, "an RFC3339 timestamp"))
    }

    pub fn child_enum<T: WireEnum>(&self, name: &str) -> Result<Option<T>, XmlError> {
        let Some(value) = self.child(name).and_then(XmlElement::value) else {
            return Ok(None);
        };
        T::parse_wire(value)
            .map(Some)
            .ok_or_else(|| invalid_value(name, value, "a known enum value"))
    }

    /// Parse the `type` (or any other) attribute as a wire enum.
    pub fn attr_enum<T: WireEnum>(&self, name: &str) -> Result<Option<T>, XmlError> {
        let Some(value) = self.attr(name) else {
            return Ok(None);
        };
        T::parse_wire(value)
            .map(Some)
            .ok_or_else(|| invalid_value(name, value, "a known enum value"))
    }
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), XmlError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(XmlError::Malformed(String::from("multiple root elements")));
    }
    *root = Some(element);
    Ok(())
}

fn invalid_value(element: &str, value: &str, expected: &'static str) -> XmlError {
    XmlError::InvalidValue {
        element: element.to_owned(),
        value: value.to_owned(),
        expected,
    }
}

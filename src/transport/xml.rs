//! Convert an XML document into the same generic tree JSON bodies decode to.
//!
//! Mapping rules:
//! - the root element's content becomes the document value,
//! - attributes and child elements become object fields,
//! - an element with neither attributes nor children becomes its text,
//! - repeated child names collect into an array,
//! - text mixed with fields is kept under `$text`.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};

const TEXT_KEY: &str = "$text";

#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    #[error("malformed XML: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("unexpected closing tag")]
    UnbalancedClose,

    #[error("unexpected end of document inside an element")]
    UnexpectedEof,

    #[error("document has no root element")]
    NoRoot,
}

struct Frame {
    name: String,
    fields: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let mut fields = Map::new();
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            fields.insert(key, Value::String(value));
        }
        Ok(Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            fields,
            text: String::new(),
        })
    }

    fn close(self) -> (String, Value) {
        let text = self.text.trim().to_owned();
        let value = if self.fields.is_empty() {
            Value::String(text)
        } else {
            let mut fields = self.fields;
            if !text.is_empty() {
                fields.insert(TEXT_KEY.to_owned(), Value::String(text));
            }
            Value::Object(fields)
        };
        (self.name, value)
    }
}

pub fn xml_to_value(xml: &str) -> Result<Value, XmlError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<Value> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Frame::open(&start)?),
            Event::Empty(start) => {
                let (name, value) = Frame::open(&start)?.close();
                attach(&mut stack, &mut root, name, value);
            }
            Event::End(_) => {
                let frame = stack.pop().ok_or(XmlError::UnbalancedClose)?;
                let (name, value) = frame.close();
                attach(&mut stack, &mut root, name, value);
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(XmlError::UnexpectedEof);
    }
    root.ok_or(XmlError::NoRoot)
}

fn attach(stack: &mut [Frame], root: &mut Option<Value>, name: String, value: Value) {
    let Some(parent) = stack.last_mut() else {
        if root.is_none() {
            *root = Some(value);
        }
        return;
    };

    match parent.fields.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            parent.fields.insert(name, value);
        }
    }
}

//! The legacy import/export line format.
//!
//! One line per record: for every non-empty schema attribute, in schema order,
//! `name<ETX>{"type":value}` followed by `<STX>`, with the last `<STX>` dropped and a
//! trailing newline. Values are JSON-encoded with `/` escaped and non-ASCII characters
//! written as `\uXXXX` UTF-16 escapes, as the tooling reading this format expects.

use crate::common::{
    schema::Schema,
    value::{Attributes, Value},
};

use serde::Serialize;
use std::io;

const ETX: char = '\u{3}';
const STX: char = '\u{2}';

struct LegacyFormatter;

impl serde_json::ser::Formatter for LegacyFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, character) in fragment.char_indices() {
            if character != '/' && character.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..index].as_bytes())?;
            if character == '/' {
                writer.write_all(b"\\/")?;
            } else {
                let mut units = [0u16; 2];
                for unit in character.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
            start = index + character.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Binary(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}

fn payload(value: &Value) -> Option<serde_json::Value> {
    match value {
        Value::List(members) if members.is_empty() => None,
        Value::List(members) => members
            .iter()
            .map(|member| text(member).map(serde_json::Value::String))
            .collect::<Option<Vec<_>>>()
            .map(serde_json::Value::Array),
        value if value.is_empty_scalar() => None,
        value => text(value).map(serde_json::Value::String),
    }
}

fn encode(type_name: &str, payload: serde_json::Value) -> Option<String> {
    let mut object = serde_json::Map::with_capacity(1);
    object.insert(type_name.to_string(), payload);
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, LegacyFormatter);
    object.serialize(&mut serializer).ok()?;
    String::from_utf8(buffer).ok()
}

/// Render `data` as one line of the import/export format.
///
/// Null, empty and non-text values are skipped, as are binaries that are not UTF-8.
///
/// ```rust
/// use dynamodb_orm::{common::{schema::{AttributeType, Schema}, value::{Attributes, Value}}, export};
///
/// let schema = Schema::from([("id", AttributeType::S), ("age", AttributeType::N)]);
/// let data = Attributes::from([
///     ("id".to_string(), Value::from("a/b")),
///     ("age".to_string(), Value::from(20)),
/// ]);
/// assert_eq!(
///     export::to_import_format(&schema, &data),
///     "id\u{3}{\"s\":\"a\\/b\"}\u{2}age\u{3}{\"n\":\"20\"}\n"
/// );
/// ```
pub fn to_import_format(schema: &Schema, data: &Attributes) -> String {
    let mut line = String::new();
    for (name, attribute_type) in schema.iter() {
        let Some(payload) = data.get(name).and_then(payload) else {
            continue;
        };
        let type_name = attribute_type.as_str().to_ascii_lowercase();
        let Some(json) = encode(&type_name, payload) else {
            continue;
        };
        line.push_str(name);
        line.push(ETX);
        line.push_str(&json);
        line.push(STX);
    }
    let mut line = line.trim_end_matches(STX).to_string();
    line.push('\n');
    line
}

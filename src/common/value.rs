use aws_sdk_dynamodb::primitives::Blob;
use indexmap::IndexMap;
use std::fmt;

/// Plain attribute map of a record, in insertion order.
pub type Attributes = IndexMap<String, Value>;

/// Plain attribute value.
///
/// Numbers have no variant of their own: they are kept as their decimal text, which is how
/// the store carries them on the wire.
///
/// ```rust
/// use dynamodb_orm::common::value::Value;
///
/// assert_eq!(Value::from(20), Value::String("20".to_string()));
/// assert_eq!(Value::from(vec!["a", "b"]).to_string(), "a,b");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absent value.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// String or number text.
    String(String),
    /// Raw bytes.
    Binary(Vec<u8>),
    /// Ordered list, used for sets and multi-value operands.
    List(Vec<Value>),
    /// Nested map.
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Binary value from raw bytes.
    pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Binary(bytes.into())
    }

    /// Whether the value is null or the empty string.
    pub fn is_empty_scalar(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Borrow the text of a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Borrow the elements of a list value.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }

    /// The bytes of the value: raw for binaries, UTF-8 text otherwise.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Binary(bytes) => bytes.clone(),
            other => other.to_string().into_bytes(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::String(text) => f.write_str(text),
            Self::Binary(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
            Self::List(values) => {
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{value}")?;
                }
                Ok(())
            }
            Self::Map(map) => {
                for (index, (key, value)) in map.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{key}={value}")?;
                }
                Ok(())
            }
        }
    }
}

macro_rules! impl_from_number {
    ($($number:ty),*) => {
        $(
            impl From<$number> for Value {
                fn from(number: $number) -> Self {
                    Self::String(number.to_string())
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::String(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::String(text)
    }
}

impl From<&String> for Value {
    fn from(text: &String) -> Self {
        Self::String(text.clone())
    }
}

impl From<Blob> for Value {
    fn from(blob: Blob) -> Self {
        Self::Binary(blob.into_inner())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Self::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::integer(Value::from(42), "42")]
    #[case::negative(Value::from(-7i64), "-7")]
    #[case::float(Value::from(1.5), "1.5")]
    #[case::whole_float(Value::from(20.0), "20")]
    #[case::text(Value::from("John"), "John")]
    #[case::null(Value::Null, "")]
    #[case::flag(Value::from(true), "true")]
    #[case::list(Value::from(vec![1, 2, 3]), "1,2,3")]
    #[case::binary(Value::binary(b"abc".to_vec()), "abc")]
    fn test_value_display(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[rstest]
    #[case::null(Value::Null, true)]
    #[case::empty_string(Value::from(""), true)]
    #[case::zero(Value::from(0), false)]
    #[case::space(Value::from(" "), false)]
    #[case::empty_list(Value::List(vec![]), false)]
    #[case::false_flag(Value::from(false), false)]
    fn test_value_is_empty_scalar(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(value.is_empty_scalar(), expected);
    }

    #[test]
    fn test_value_from_option() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::String("a".to_string()));
    }
}

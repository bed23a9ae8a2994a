use crate::error::{Error, Result};

use indexmap::IndexMap;
use std::{fmt, str};

/// Wire type tag of an attribute.
///
/// ```rust
/// use dynamodb_orm::common::schema::AttributeType;
///
/// let tag: AttributeType = "NS".parse().unwrap();
/// assert_eq!(tag, AttributeType::Ns);
/// assert_eq!(tag.element_type(), AttributeType::N);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum AttributeType {
    /// String.
    #[default]
    S,
    /// Number, carried as its decimal text.
    N,
    /// Binary.
    B,
    /// Set of strings.
    Ss,
    /// Set of numbers.
    Ns,
    /// Set of binaries.
    Bs,
}

impl AttributeType {
    /// The wire tag, e.g. `"SS"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S => "S",
            Self::N => "N",
            Self::B => "B",
            Self::Ss => "SS",
            Self::Ns => "NS",
            Self::Bs => "BS",
        }
    }

    /// Whether the tag denotes a set.
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Ss | Self::Ns | Self::Bs)
    }

    /// The scalar type of a single element: sets map to their member type, scalars to themselves.
    pub fn element_type(&self) -> Self {
        match self {
            Self::S | Self::Ss => Self::S,
            Self::N | Self::Ns => Self::N,
            Self::B | Self::Bs => Self::B,
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl str::FromStr for AttributeType {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self> {
        match tag {
            "S" => Ok(Self::S),
            "N" => Ok(Self::N),
            "B" => Ok(Self::B),
            "SS" => Ok(Self::Ss),
            "NS" => Ok(Self::Ns),
            "BS" => Ok(Self::Bs),
            other => Err(Error::InvalidAttributeType(other.to_string())),
        }
    }
}

/// Attribute name to wire type mapping of a table.
///
/// Names that are not declared resolve to [`AttributeType::S`].
///
/// ```rust
/// use dynamodb_orm::common::schema::{AttributeType, Schema};
///
/// let schema = Schema::from([
///     ("id", AttributeType::S),
///     ("age", AttributeType::N),
/// ]);
/// assert_eq!(schema.resolve("age"), AttributeType::N);
/// assert_eq!(schema.resolve("nickname"), AttributeType::S);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema(IndexMap<String, AttributeType>);

impl Schema {
    /// Resolve the wire type of an attribute.
    pub fn resolve(&self, name: &str) -> AttributeType {
        self.0.get(name).copied().unwrap_or_default()
    }

    /// Whether the attribute is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Declared attributes, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, AttributeType)> {
        self.0.iter().map(|(name, tag)| (name.as_str(), *tag))
    }

    /// Declared attribute names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of declared attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no attribute is declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, AttributeType)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, AttributeType)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(name, tag)| (name.into(), tag)).collect())
    }
}

impl<K: Into<String>, const N: usize> From<[(K, AttributeType); N]> for Schema {
    fn from(attributes: [(K, AttributeType); N]) -> Self {
        attributes.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::string("S", AttributeType::S)]
    #[case::number("N", AttributeType::N)]
    #[case::binary("B", AttributeType::B)]
    #[case::string_set("SS", AttributeType::Ss)]
    #[case::number_set("NS", AttributeType::Ns)]
    #[case::binary_set("BS", AttributeType::Bs)]
    fn test_attribute_type_tag(#[case] tag: &str, #[case] expected: AttributeType) {
        let actual: AttributeType = tag.parse().unwrap();
        assert_eq!(actual, expected);
        assert_eq!(actual.as_str(), tag);
    }

    #[rstest]
    #[case::lowercase("s")]
    #[case::empty("")]
    #[case::map("M")]
    fn test_attribute_type_invalid(#[case] tag: &str) {
        let error = tag.parse::<AttributeType>().unwrap_err();
        assert!(matches!(error, Error::InvalidAttributeType(ref actual) if actual == tag));
    }

    #[rstest]
    #[case::declared_number("age", AttributeType::N)]
    #[case::declared_set("tags", AttributeType::Ss)]
    #[case::undeclared("nickname", AttributeType::S)]
    #[case::empty_name("", AttributeType::S)]
    fn test_schema_resolve(#[case] name: &str, #[case] expected: AttributeType) {
        let schema = Schema::from([
            ("id", AttributeType::S),
            ("age", AttributeType::N),
            ("tags", AttributeType::Ss),
        ]);
        assert_eq!(schema.resolve(name), expected);
    }

    #[test]
    fn test_schema_keeps_declaration_order() {
        let schema = Schema::from([
            ("z", AttributeType::S),
            ("a", AttributeType::N),
            ("m", AttributeType::B),
        ]);
        let names: Vec<&str> = schema.names().collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }
}

use crate::{
    common::{codec, schema::Schema, value::Value},
    error::{Error, Result},
};

use aws_sdk_dynamodb::types;
use std::collections;

fn lookup_operator(token: &str) -> Option<types::ComparisonOperator> {
    let operator = match token {
        "=" | "EQ" => types::ComparisonOperator::Eq,
        "!=" | "NE" => types::ComparisonOperator::Ne,
        ">" | "GT" => types::ComparisonOperator::Gt,
        ">=" | "GE" => types::ComparisonOperator::Ge,
        "<" | "LT" => types::ComparisonOperator::Lt,
        "<=" | "LE" => types::ComparisonOperator::Le,
        "~" | "BETWEEN" => types::ComparisonOperator::Between,
        "^" | "BEGINS_WITH" => types::ComparisonOperator::BeginsWith,
        "NOT_NULL" => types::ComparisonOperator::NotNull,
        "NULL" => types::ComparisonOperator::Null,
        "CONTAINS" => types::ComparisonOperator::Contains,
        "NOT_CONTAINS" => types::ComparisonOperator::NotContains,
        "IN" => types::ComparisonOperator::In,
        _ => return None,
    };
    Some(operator)
}

/// Convert an operator token to its comparison operator.
///
/// Symbolic aliases (`=`, `!=`, `>`, `>=`, `<`, `<=`, `~`, `^`) and canonical names are accepted.
/// Any other token silently means equality.
///
/// ```rust
/// use aws_sdk_dynamodb::types::ComparisonOperator;
/// use dynamodb_orm::common::condition;
///
/// assert_eq!(condition::convert_operator("~"), ComparisonOperator::Between);
/// assert_eq!(condition::convert_operator("bogus"), ComparisonOperator::Eq);
/// ```
pub fn convert_operator(token: &str) -> types::ComparisonOperator {
    lookup_operator(token).unwrap_or(types::ComparisonOperator::Eq)
}

/// Convert an operator token, rejecting tokens outside the alias table.
pub fn convert_operator_strict(token: &str) -> Result<types::ComparisonOperator> {
    lookup_operator(token).ok_or_else(|| Error::UnknownOperator(token.to_string()))
}

/// One comparison on one attribute.
#[derive(Clone, Debug, PartialEq)]
pub struct Clause {
    /// The attribute name.
    pub name: String,
    /// The comparison operator.
    pub operator: types::ComparisonOperator,
    /// The operand: a scalar, or a list for `BETWEEN` and `IN`.
    pub value: Value,
}

/// Ordered sequence of clauses, used for key conditions and filters.
///
/// ```rust
/// use dynamodb_orm::common::{condition::Clauses, schema::{AttributeType, Schema}};
///
/// let mut clauses = Clauses::default();
/// clauses.equals("id", "u1").op("age", "~", vec![18, 30]);
///
/// let schema = Schema::from([("age", AttributeType::N)]);
/// let conditions = clauses.build(&schema).unwrap();
/// assert_eq!(conditions["age"].attribute_value_list().len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Clauses(Vec<Clause>);

impl Clauses {
    /// Append an equality clause.
    pub fn equals(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.push(name, types::ComparisonOperator::Eq, value)
    }

    /// Append a clause, converting the operator token leniently.
    pub fn op(
        &mut self,
        name: impl Into<String>,
        token: &str,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.push(name, convert_operator(token), value)
    }

    /// Append a clause, failing on an unknown operator token.
    pub fn try_op(
        &mut self,
        name: impl Into<String>,
        token: &str,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        let operator = convert_operator_strict(token)?;
        Ok(self.push(name, operator, value))
    }

    /// Append a clause with an already converted operator.
    pub fn push(
        &mut self,
        name: impl Into<String>,
        operator: types::ComparisonOperator,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.0.push(Clause {
            name: name.into(),
            operator,
            value: value.into(),
        });
        self
    }

    /// Whether no clause was added.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of clauses.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Remove every clause.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Clauses in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.0.iter()
    }

    /// Build the condition map, keyed by attribute name.
    ///
    /// Operands are encoded with the element type of the attribute, so a `CONTAINS` on a
    /// string set compares against a single string. A later clause on the same attribute
    /// replaces an earlier one.
    pub fn build(
        &self,
        schema: &Schema,
    ) -> Result<collections::HashMap<String, types::Condition>> {
        let mut conditions = collections::HashMap::with_capacity(self.0.len());
        for clause in &self.0 {
            let attribute_type = schema.resolve(&clause.name).element_type();
            let operands = match &clause.operator {
                types::ComparisonOperator::Null | types::ComparisonOperator::NotNull => None,
                _ => {
                    let values = match &clause.value {
                        Value::List(values) => values
                            .iter()
                            .map(|value| codec::encode_value(attribute_type, value))
                            .collect(),
                        value => vec![codec::encode_value(attribute_type, value)],
                    };
                    Some(values)
                }
            };
            let condition = types::Condition::builder()
                .comparison_operator(clause.operator.clone())
                .set_attribute_value_list(operands)
                .build()?;
            conditions.insert(clause.name.clone(), condition);
        }
        Ok(conditions)
    }
}

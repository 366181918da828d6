use crate::errors::PregelError;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display, Formatter},
    sync::Arc,
};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ValueType {
    Long,
    Double,
    LongArray,
    DoubleArray,
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let type_str = match self {
            ValueType::Long => "LONG",
            ValueType::Double => "DOUBLE",
            ValueType::LongArray => "LONG_ARRAY",
            ValueType::DoubleArray => "DOUBLE_ARRAY",
        };
        write!(f, "{}", type_str)
    }
}

/// Private elements are scratch space for the computation and are not
/// meant to be exported.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// A single typed node value
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum NodeValue {
    Long(i64),
    Double(f64),
    LongArray(Vec<i64>),
    DoubleArray(Vec<f64>),
}

impl NodeValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            NodeValue::Long(_) => ValueType::Long,
            NodeValue::Double(_) => ValueType::Double,
            NodeValue::LongArray(_) => ValueType::LongArray,
            NodeValue::DoubleArray(_) => ValueType::DoubleArray,
        }
    }

    pub fn default_for(value_type: ValueType) -> Self {
        match value_type {
            ValueType::Long => NodeValue::Long(0),
            ValueType::Double => NodeValue::Double(0.0),
            ValueType::LongArray => NodeValue::LongArray(vec![]),
            ValueType::DoubleArray => NodeValue::DoubleArray(vec![]),
        }
    }
}

impl From<i64> for NodeValue {
    fn from(value: i64) -> Self {
        NodeValue::Long(value)
    }
}

impl From<f64> for NodeValue {
    fn from(value: f64) -> Self {
        NodeValue::Double(value)
    }
}

impl From<Vec<i64>> for NodeValue {
    fn from(value: Vec<i64>) -> Self {
        NodeValue::LongArray(value)
    }
}

impl From<Vec<f64>> for NodeValue {
    fn from(value: Vec<f64>) -> Self {
        NodeValue::DoubleArray(value)
    }
}

impl From<&[i64]> for NodeValue {
    fn from(value: &[i64]) -> Self {
        NodeValue::LongArray(value.to_vec())
    }
}

impl From<&[f64]> for NodeValue {
    fn from(value: &[f64]) -> Self {
        NodeValue::DoubleArray(value.to_vec())
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Element {
    pub key: String,
    pub value_type: ValueType,
    pub visibility: Visibility,
    pub default_value: NodeValue,
}

/// Ordered layout of the per-node values of a computation
#[derive(Clone, Debug, Default)]
pub struct PregelSchema {
    elements: Arc<[Element]>,
    index: Arc<FxHashMap<String, usize>>,
}

impl PartialEq for PregelSchema {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl PregelSchema {
    pub fn builder() -> PregelSchemaBuilder {
        PregelSchemaBuilder::default()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn element(&self, key: &str) -> Option<&Element> {
        self.position(key).map(|i| &self.elements[i])
    }

    /// Position of `key`, panicking if it is not part of the schema
    #[track_caller]
    pub(crate) fn expect_position(&self, key: &str) -> usize {
        self.position(key)
            .unwrap_or_else(|| PregelError::UnknownElement(key.to_owned()).raise())
    }

    pub fn public_elements(&self) -> impl Iterator<Item = &Element> + '_ {
        self.elements
            .iter()
            .filter(|e| e.visibility == Visibility::Public)
    }
}

#[derive(Debug, Default)]
pub struct PregelSchemaBuilder {
    elements: Vec<Element>,
}

impl PregelSchemaBuilder {
    pub fn add(self, key: impl Into<String>, value_type: ValueType) -> Self {
        self.add_with_visibility(key, value_type, Visibility::Public)
    }

    pub fn add_with_visibility(
        mut self,
        key: impl Into<String>,
        value_type: ValueType,
        visibility: Visibility,
    ) -> Self {
        self.elements.push(Element {
            key: key.into(),
            value_type,
            visibility,
            default_value: NodeValue::default_for(value_type),
        });
        self
    }

    /// Add an element whose nodes start out with `default_value` instead of zero
    pub fn add_with_default(
        mut self,
        key: impl Into<String>,
        value_type: ValueType,
        default_value: impl Into<NodeValue>,
        visibility: Visibility,
    ) -> Self {
        self.elements.push(Element {
            key: key.into(),
            value_type,
            visibility,
            default_value: default_value.into(),
        });
        self
    }

    pub fn build(self) -> Result<PregelSchema, PregelError> {
        let mut index = FxHashMap::default();
        for (i, element) in self.elements.iter().enumerate() {
            if element.default_value.value_type() != element.value_type {
                return Err(PregelError::DefaultValueTypeMismatch {
                    key: element.key.clone(),
                    expected: element.value_type,
                    actual: element.default_value.value_type(),
                });
            }
            if index.insert(element.key.clone(), i).is_some() {
                return Err(PregelError::DuplicateSchemaElement(element.key.clone()));
            }
        }
        Ok(PregelSchema {
            elements: self.elements.into(),
            index: Arc::new(index),
        })
    }
}

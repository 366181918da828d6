pub mod node_values;
pub mod schema;

pub use node_values::{Column, NodeValueStore, PartitionValues};
pub use schema::{Element, NodeValue, PregelSchema, PregelSchemaBuilder, ValueType, Visibility};

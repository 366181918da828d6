use super::schema::{NodeValue, PregelSchema, ValueType, Visibility};
use crate::errors::PregelError;
use pregel_api::core::entities::VID;
use serde::Serialize;
use std::ops::Range;

/// Backing storage for one schema element, indexed by node id
#[derive(Clone, PartialEq, Debug, Serialize)]
pub enum Column {
    Long(Vec<i64>),
    Double(Vec<f64>),
    LongArray(Vec<Vec<i64>>),
    DoubleArray(Vec<Vec<f64>>),
}

impl Column {
    fn new(default_value: &NodeValue, len: usize) -> Self {
        match default_value {
            NodeValue::Long(v) => Column::Long(vec![*v; len]),
            NodeValue::Double(v) => Column::Double(vec![*v; len]),
            NodeValue::LongArray(v) => Column::LongArray(vec![v.clone(); len]),
            NodeValue::DoubleArray(v) => Column::DoubleArray(vec![v.clone(); len]),
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Column::Long(_) => ValueType::Long,
            Column::Double(_) => ValueType::Double,
            Column::LongArray(_) => ValueType::LongArray,
            Column::DoubleArray(_) => ValueType::DoubleArray,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Long(v) => v.len(),
            Column::Double(v) => v.len(),
            Column::LongArray(v) => v.len(),
            Column::DoubleArray(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> NodeValue {
        match self {
            Column::Long(v) => NodeValue::Long(v[index]),
            Column::Double(v) => NodeValue::Double(v[index]),
            Column::LongArray(v) => NodeValue::LongArray(v[index].clone()),
            Column::DoubleArray(v) => NodeValue::DoubleArray(v[index].clone()),
        }
    }

    fn as_slice_mut(&mut self) -> ColumnSliceMut<'_> {
        match self {
            Column::Long(v) => ColumnSliceMut::Long(v.as_mut_slice()),
            Column::Double(v) => ColumnSliceMut::Double(v.as_mut_slice()),
            Column::LongArray(v) => ColumnSliceMut::LongArray(v.as_mut_slice()),
            Column::DoubleArray(v) => ColumnSliceMut::DoubleArray(v.as_mut_slice()),
        }
    }

    fn split_mut(&mut self, ranges: &[Range<usize>]) -> Vec<ColumnSliceMut<'_>> {
        match self {
            Column::Long(v) => split_by_ranges(v, ranges)
                .into_iter()
                .map(ColumnSliceMut::Long)
                .collect(),
            Column::Double(v) => split_by_ranges(v, ranges)
                .into_iter()
                .map(ColumnSliceMut::Double)
                .collect(),
            Column::LongArray(v) => split_by_ranges(v, ranges)
                .into_iter()
                .map(ColumnSliceMut::LongArray)
                .collect(),
            Column::DoubleArray(v) => split_by_ranges(v, ranges)
                .into_iter()
                .map(ColumnSliceMut::DoubleArray)
                .collect(),
        }
    }
}

/// Cut `slice` into consecutive chunks, one per range.
///
/// `ranges` must be contiguous and start at 0.
fn split_by_ranges<'a, T>(mut slice: &'a mut [T], ranges: &[Range<usize>]) -> Vec<&'a mut [T]> {
    let mut offset = 0;
    let mut chunks = Vec::with_capacity(ranges.len());
    for range in ranges {
        assert_eq!(
            range.start, offset,
            "partition ranges must be contiguous, expected a range starting at {offset} but got {range:?}"
        );
        let (chunk, rest) = std::mem::take(&mut slice).split_at_mut(range.end - offset);
        chunks.push(chunk);
        slice = rest;
        offset = range.end;
    }
    chunks
}

/// Mutable view of a contiguous run of one column
#[derive(Debug)]
pub(crate) enum ColumnSliceMut<'a> {
    Long(&'a mut [i64]),
    Double(&'a mut [f64]),
    LongArray(&'a mut [Vec<i64>]),
    DoubleArray(&'a mut [Vec<f64>]),
}

impl ColumnSliceMut<'_> {
    fn value_type(&self) -> ValueType {
        match self {
            ColumnSliceMut::Long(_) => ValueType::Long,
            ColumnSliceMut::Double(_) => ValueType::Double,
            ColumnSliceMut::LongArray(_) => ValueType::LongArray,
            ColumnSliceMut::DoubleArray(_) => ValueType::DoubleArray,
        }
    }

    fn reborrow(&mut self) -> ColumnSliceMut<'_> {
        match self {
            ColumnSliceMut::Long(c) => ColumnSliceMut::Long(&mut **c),
            ColumnSliceMut::Double(c) => ColumnSliceMut::Double(&mut **c),
            ColumnSliceMut::LongArray(c) => ColumnSliceMut::LongArray(&mut **c),
            ColumnSliceMut::DoubleArray(c) => ColumnSliceMut::DoubleArray(&mut **c),
        }
    }
}

/// Per-node values of every schema element.
///
/// The store is owned by the task runner for the duration of a run. During a
/// superstep it is handed out as disjoint [`PartitionValues`], one per
/// partition, so every compute step has exclusive write access to its own
/// nodes without locking.
#[derive(Clone, Debug)]
pub struct NodeValueStore {
    schema: PregelSchema,
    columns: Vec<Column>,
    node_count: usize,
}

impl NodeValueStore {
    pub fn new(schema: PregelSchema, node_count: usize) -> Self {
        let columns = schema
            .elements()
            .iter()
            .map(|e| Column::new(&e.default_value, node_count))
            .collect();
        Self {
            schema,
            columns,
            node_count,
        }
    }

    pub fn schema(&self) -> &PregelSchema {
        &self.schema
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Column for `key`, for exporters that walk the schema by name
    pub fn column(&self, key: &str) -> Result<&Column, PregelError> {
        self.schema
            .position(key)
            .map(|i| &self.columns[i])
            .ok_or_else(|| PregelError::UnknownElement(key.to_owned()))
    }

    /// The public elements alongside their values
    pub fn public_columns(&self) -> impl Iterator<Item = (&str, &Column)> + '_ {
        self.schema
            .elements()
            .iter()
            .zip(self.columns.iter())
            .filter(|(e, _)| e.visibility == Visibility::Public)
            .map(|(e, column)| (e.key.as_str(), column))
    }

    #[track_caller]
    fn typed_column(&self, key: &str, expected: ValueType) -> &Column {
        let column = &self.columns[self.schema.expect_position(key)];
        check_type(key, expected, column.value_type());
        column
    }

    #[track_caller]
    fn typed_column_mut(&mut self, key: &str, expected: ValueType) -> &mut Column {
        let column = &mut self.columns[self.schema.expect_position(key)];
        check_type(key, expected, column.value_type());
        column
    }

    #[track_caller]
    pub fn long_properties(&self, key: &str) -> &[i64] {
        match self.typed_column(key, ValueType::Long) {
            Column::Long(v) => v.as_slice(),
            _ => unreachable!(),
        }
    }

    #[track_caller]
    pub fn double_properties(&self, key: &str) -> &[f64] {
        match self.typed_column(key, ValueType::Double) {
            Column::Double(v) => v.as_slice(),
            _ => unreachable!(),
        }
    }

    #[track_caller]
    pub fn long_array_properties(&self, key: &str) -> &[Vec<i64>] {
        match self.typed_column(key, ValueType::LongArray) {
            Column::LongArray(v) => v.as_slice(),
            _ => unreachable!(),
        }
    }

    #[track_caller]
    pub fn double_array_properties(&self, key: &str) -> &[Vec<f64>] {
        match self.typed_column(key, ValueType::DoubleArray) {
            Column::DoubleArray(v) => v.as_slice(),
            _ => unreachable!(),
        }
    }

    #[track_caller]
    pub fn long_value(&self, key: &str, node: VID) -> i64 {
        self.long_properties(key)[node.index()]
    }

    #[track_caller]
    pub fn double_value(&self, key: &str, node: VID) -> f64 {
        self.double_properties(key)[node.index()]
    }

    #[track_caller]
    pub fn long_array_value(&self, key: &str, node: VID) -> &[i64] {
        &self.long_array_properties(key)[node.index()]
    }

    #[track_caller]
    pub fn double_array_value(&self, key: &str, node: VID) -> &[f64] {
        &self.double_array_properties(key)[node.index()]
    }

    #[track_caller]
    pub fn set_node_value(&mut self, key: &str, node: VID, value: impl Into<NodeValue>) {
        let value = value.into();
        let column = self.typed_column_mut(key, value.value_type());
        write_value(column.as_slice_mut(), node.index(), value);
    }

    /// Split the store into one mutable view per range.
    ///
    /// `ranges` must be contiguous and cover `[0, node_count)`.
    pub(crate) fn partitions_mut(&mut self, ranges: &[Range<usize>]) -> Vec<PartitionValues<'_>> {
        let covered = ranges.last().map_or(0, |r| r.end);
        assert_eq!(
            covered, self.node_count,
            "partitions cover {covered} nodes but the store holds {}",
            self.node_count
        );
        let schema = &self.schema;
        let mut partitions: Vec<_> = ranges
            .iter()
            .map(|range| PartitionValues {
                range: range.clone(),
                schema,
                columns: Vec::with_capacity(self.columns.len()),
            })
            .collect();
        for column in self.columns.iter_mut() {
            for (partition, slice) in partitions.iter_mut().zip(column.split_mut(ranges)) {
                partition.columns.push(slice);
            }
        }
        partitions
    }
}

#[track_caller]
fn check_type(key: &str, expected: ValueType, actual: ValueType) {
    if expected != actual {
        PregelError::TypeMismatch {
            key: key.to_owned(),
            expected,
            actual,
        }
        .raise()
    }
}

#[track_caller]
fn write_value(column: ColumnSliceMut<'_>, index: usize, value: NodeValue) {
    match (column, value) {
        (ColumnSliceMut::Long(c), NodeValue::Long(v)) => c[index] = v,
        (ColumnSliceMut::Double(c), NodeValue::Double(v)) => c[index] = v,
        (ColumnSliceMut::LongArray(c), NodeValue::LongArray(v)) => c[index] = v,
        (ColumnSliceMut::DoubleArray(c), NodeValue::DoubleArray(v)) => c[index] = v,
        _ => unreachable!("type checked by the caller"),
    }
}

/// Exclusive mutable access to the values of the nodes in `range`
#[derive(Debug)]
pub struct PartitionValues<'a> {
    range: Range<usize>,
    schema: &'a PregelSchema,
    columns: Vec<ColumnSliceMut<'a>>,
}

impl<'a> PartitionValues<'a> {
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn schema(&self) -> &PregelSchema {
        self.schema
    }

    #[track_caller]
    fn local(&self, node: VID) -> usize {
        let i = node.index();
        if !self.range.contains(&i) {
            panic!(
                "node {node} is not owned by the partition covering {:?}",
                self.range
            );
        }
        i - self.range.start
    }

    #[track_caller]
    fn column(&self, key: &str, expected: ValueType) -> &ColumnSliceMut<'a> {
        let column = &self.columns[self.schema.expect_position(key)];
        check_type(key, expected, column.value_type());
        column
    }

    #[track_caller]
    pub fn long_value(&self, key: &str, node: VID) -> i64 {
        let i = self.local(node);
        match self.column(key, ValueType::Long) {
            ColumnSliceMut::Long(c) => c[i],
            _ => unreachable!(),
        }
    }

    #[track_caller]
    pub fn double_value(&self, key: &str, node: VID) -> f64 {
        let i = self.local(node);
        match self.column(key, ValueType::Double) {
            ColumnSliceMut::Double(c) => c[i],
            _ => unreachable!(),
        }
    }

    #[track_caller]
    pub fn long_array_value(&self, key: &str, node: VID) -> &[i64] {
        let i = self.local(node);
        match self.column(key, ValueType::LongArray) {
            ColumnSliceMut::LongArray(c) => &c[i],
            _ => unreachable!(),
        }
    }

    #[track_caller]
    pub fn double_array_value(&self, key: &str, node: VID) -> &[f64] {
        let i = self.local(node);
        match self.column(key, ValueType::DoubleArray) {
            ColumnSliceMut::DoubleArray(c) => &c[i],
            _ => unreachable!(),
        }
    }

    #[track_caller]
    pub fn set_node_value(&mut self, key: &str, node: VID, value: NodeValue) {
        let i = self.local(node);
        let position = self.schema.expect_position(key);
        let column = &mut self.columns[position];
        check_type(key, value.value_type(), column.value_type());
        write_value(column.reborrow(), i, value);
    }
}

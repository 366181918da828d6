//! Online combiners for messages addressed to the same node.
//!
//! A reducer must be associative and commutative: messages reach an inbox in
//! whatever order the worker threads happen to send them.
use std::fmt::Debug;

pub trait Reducer: Debug + Send + Sync {
    /// State of an inbox before any message arrived
    fn identity(&self) -> f64;

    fn reduce(&self, current: f64, message: f64) -> f64;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sum;

impl Reducer for Sum {
    fn identity(&self) -> f64 {
        0.0
    }

    fn reduce(&self, current: f64, message: f64) -> f64 {
        current + message
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Min;

impl Reducer for Min {
    fn identity(&self) -> f64 {
        f64::INFINITY
    }

    fn reduce(&self, current: f64, message: f64) -> f64 {
        current.min(message)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Max;

impl Reducer for Max {
    fn identity(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn reduce(&self, current: f64, message: f64) -> f64 {
        current.max(message)
    }
}

/// Number of messages received, ignoring their payload
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Count;

impl Reducer for Count {
    fn identity(&self) -> f64 {
        0.0
    }

    fn reduce(&self, current: f64, _message: f64) -> f64 {
        current + 1.0
    }
}

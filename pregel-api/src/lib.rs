pub mod atomic_extra;
pub mod compute;
pub mod core;

#[cfg(test)]
#[macro_use]
extern crate quickcheck_macros;

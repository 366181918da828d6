use std::sync::atomic::{AtomicU64, Ordering};

mod bitset;

pub use bitset::AtomicBitSet;

/// Allocate `len` atomic slots holding the bits of `value`
pub fn atomic_f64_vec(len: usize, value: f64) -> Vec<AtomicU64> {
    let bits = value.to_bits();
    (0..len).map(|_| AtomicU64::new(bits)).collect()
}

#[inline]
pub fn load_f64(slot: &AtomicU64, order: Ordering) -> f64 {
    f64::from_bits(slot.load(order))
}

#[inline]
pub fn store_f64(slot: &AtomicU64, value: f64, order: Ordering) {
    slot.store(value.to_bits(), order)
}

/// Atomically replace the f64 stored in `slot` with `f(current)`.
///
/// Returns `(previous, new)`. The closure may run more than once under
/// contention and must therefore be pure.
#[inline]
pub fn update_f64(slot: &AtomicU64, f: impl Fn(f64) -> f64) -> (f64, f64) {
    let mut current = slot.load(Ordering::Relaxed);
    loop {
        let new = f(f64::from_bits(current)).to_bits();
        if new == current {
            return (f64::from_bits(current), f64::from_bits(new));
        }
        match slot.compare_exchange_weak(current, new, Ordering::AcqRel, Ordering::Relaxed) {
            Ok(_) => return (f64::from_bits(current), f64::from_bits(new)),
            Err(actual) => current = actual,
        }
    }
}

//! AtomicFloat

use crate::pbrt::Float;
use std::sync::atomic::{AtomicU32, Ordering};

/// Implement atomic floating point value using `AtomicU32`.
#[derive(Debug)]
pub struct AtomicFloat {
    /// Bit representation of floating point value.
    bits: AtomicU32,
}

impl AtomicFloat {
    /// Create a new `AtomicFloat`.
    ///
    /// * `v` - The value.
    pub fn new(v: Float) -> Self {
        Self {
            bits: AtomicU32::new(v.to_bits()),
        }
    }

    /// Add a floating point value. Concurrent adds are never lost; the
    /// compare-exchange loop retries until its update lands.
    ///
    /// * `v` - The value to add.
    pub fn add(&self, v: Float) {
        let mut old_bits = self.bits.load(Ordering::Relaxed);
        loop {
            let new_bits = (Float::from_bits(old_bits) + v).to_bits();
            match self
                .bits
                .compare_exchange_weak(old_bits, new_bits, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => break,
                Err(x) => old_bits = x,
            }
        }
    }

    /// Loads the floating point value.
    ///
    /// * `order` - Memory ordering of this operation
    pub fn load(&self, order: Ordering) -> Float {
        Float::from_bits(self.bits.load(order))
    }

    /// Stores the floating point value.
    ///
    /// * `v`     - The value.
    /// * `order` - Memory ordering of this operation
    pub fn store(&self, v: Float, order: Ordering) {
        self.bits.store(v.to_bits(), order);
    }
}

impl Default for AtomicFloat {
    /// Returns an `AtomicFloat` holding zero.
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn concurrent_adds_are_not_lost() {
        let f = AtomicFloat::default();
        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..1000 {
                        f.add(0.5);
                    }
                });
            }
        });
        assert_eq!(f.load(Ordering::SeqCst), 4000.0);
    }

    #[test]
    fn store_then_load() {
        let f = AtomicFloat::new(1.5);
        assert_eq!(f.load(Ordering::Relaxed), 1.5);
        f.store(-2.0, Ordering::Relaxed);
        assert_eq!(f.load(Ordering::Relaxed), -2.0);
    }
}

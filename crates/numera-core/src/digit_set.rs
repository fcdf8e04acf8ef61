//! A set of digits 1-9, stored as a bitset.

use crate::Digit;

/// An allocation-free set of digits 1-9.
///
/// Bits 0-8 of the backing `u16` represent digits 1-9 respectively. The
/// fixed 9-digit universe makes this the natural representation for
/// per-cell candidate annotations.
///
/// # Examples
///
/// ```
/// use numera_core::{Digit, DigitSet};
///
/// let mut set = DigitSet::EMPTY;
/// set.insert(Digit::D5);
/// set.insert(Digit::D1);
///
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(Digit::D5));
///
/// // Iteration is always ascending.
/// let digits: Vec<_> = set.into_iter().collect();
/// assert_eq!(digits, [Digit::D1, Digit::D5]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct DigitSet {
    bits: u16,
}

impl DigitSet {
    const MASK: u16 = 0x1ff;

    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };

    /// The set containing every digit 1-9.
    pub const FULL: Self = Self { bits: Self::MASK };

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates a set containing a single digit.
    #[must_use]
    pub const fn from_elem(digit: Digit) -> Self {
        Self {
            bits: 1 << (digit.value() - 1),
        }
    }

    /// Creates a set from raw bits, or `None` if any bit outside the
    /// digit range 1-9 is set.
    ///
    /// Use this when reading persisted bit patterns.
    #[must_use]
    pub const fn try_from_bits(bits: u16) -> Option<Self> {
        if bits & !Self::MASK == 0 {
            Some(Self { bits })
        } else {
            None
        }
    }

    /// Returns the raw bit representation.
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.bits
    }

    /// Returns whether the set contains `digit`.
    #[must_use]
    pub const fn contains(self, digit: Digit) -> bool {
        self.bits & Self::from_elem(digit).bits != 0
    }

    /// Inserts `digit` into the set.
    pub const fn insert(&mut self, digit: Digit) {
        self.bits |= Self::from_elem(digit).bits;
    }

    /// Removes `digit` from the set.
    pub const fn remove(&mut self, digit: Digit) {
        self.bits &= !Self::from_elem(digit).bits;
    }

    /// Toggles `digit` and returns whether it is present afterwards.
    pub const fn toggle(&mut self, digit: Digit) -> bool {
        self.bits ^= Self::from_elem(digit).bits;
        self.contains(digit)
    }

    /// Returns the number of digits in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }
}

impl FromIterator<Digit> for DigitSet {
    fn from_iter<T: IntoIterator<Item = Digit>>(iter: T) -> Self {
        let mut set = Self::EMPTY;
        for digit in iter {
            set.insert(digit);
        }
        set
    }
}

impl IntoIterator for DigitSet {
    type Item = Digit;
    type IntoIter = Iter;

    fn into_iter(self) -> Self::IntoIter {
        Iter { bits: self.bits }
    }
}

/// Ascending iterator over the digits of a [`DigitSet`].
#[derive(Debug, Clone)]
pub struct Iter {
    bits: u16,
}

impl Iterator for Iter {
    type Item = Digit;

    fn next(&mut self) -> Option<Digit> {
        if self.bits == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let value = self.bits.trailing_zeros() as u8 + 1;
        self.bits &= self.bits - 1;
        Digit::try_from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_insert_remove_contains() {
        let mut set = DigitSet::new();
        assert!(set.is_empty());

        set.insert(Digit::D3);
        set.insert(Digit::D3);
        set.insert(Digit::D7);
        assert_eq!(set.len(), 2);
        assert!(set.contains(Digit::D3));
        assert!(!set.contains(Digit::D1));

        set.remove(Digit::D3);
        assert!(!set.contains(Digit::D3));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_toggle() {
        let mut set = DigitSet::new();
        assert!(set.toggle(Digit::D4));
        assert!(set.contains(Digit::D4));
        assert!(!set.toggle(Digit::D4));
        assert!(set.is_empty());
    }

    #[test]
    fn test_constants() {
        assert_eq!(DigitSet::EMPTY.len(), 0);
        assert_eq!(DigitSet::FULL.len(), 9);
        for digit in Digit::ALL {
            assert!(DigitSet::FULL.contains(digit));
        }
    }

    #[test]
    fn test_try_from_bits() {
        assert_eq!(DigitSet::try_from_bits(0), Some(DigitSet::EMPTY));
        assert_eq!(DigitSet::try_from_bits(0x1ff), Some(DigitSet::FULL));
        assert_eq!(DigitSet::try_from_bits(0x200), None);
    }

    #[test]
    fn test_iteration_is_ascending() {
        let set: DigitSet = [Digit::D9, Digit::D1, Digit::D5].into_iter().collect();
        let digits: Vec<_> = set.into_iter().collect();
        assert_eq!(digits, [Digit::D1, Digit::D5, Digit::D9]);
    }

    proptest! {
        #[test]
        fn prop_bits_round_trip(bits in 0u16..=0x1ff) {
            let set = DigitSet::try_from_bits(bits).unwrap();
            prop_assert_eq!(set.bits(), bits);
            let rebuilt: DigitSet = set.into_iter().collect();
            prop_assert_eq!(rebuilt, set);
        }

        #[test]
        fn prop_iter_matches_contains(bits in 0u16..=0x1ff) {
            let set = DigitSet::try_from_bits(bits).unwrap();
            for digit in Digit::ALL {
                let iterated = set.into_iter().any(|d| d == digit);
                prop_assert_eq!(iterated, set.contains(digit));
            }
            prop_assert_eq!(set.into_iter().count(), set.len());
        }
    }
}

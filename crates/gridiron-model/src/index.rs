// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Strongly Typed Indices (Zero-Cost)
//!
//! Transparent `usize` newtypes that prevent mixing indices from different
//! domains (candidates vs. roster slots vs. teams). A lineup optimizer juggles
//! three index spaces concurrently; raw `usize` invites accidental swaps and
//! hard-to-trace bugs, so each space gets its own type that compiles down to a
//! plain machine word.

macro_rules! typed_index {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(usize);

        impl $name {
            /// Creates a new index from a raw `usize`.
            #[inline(always)]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Returns the underlying `usize` index.
            #[inline(always)]
            pub const fn get(&self) -> usize {
                self.0
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", $label, self.0)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", $label, self.0)
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                Self::new(index)
            }
        }

        impl From<$name> for usize {
            fn from(index: $name) -> Self {
                index.0
            }
        }
    };
}

typed_index!(
    /// A typed index into the flat candidate arena of a `LineupModel`.
    CandidateIndex,
    "CandidateIndex"
);

typed_index!(
    /// A typed index into the ordered slot-instance list of a `LineupModel`.
    SlotIndex,
    "SlotIndex"
);

typed_index!(
    /// A typed index into the interned team table of a `LineupModel`.
    TeamIndex,
    "TeamIndex"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_get() {
        let c = CandidateIndex::new(7);
        assert_eq!(c.get(), 7);
        let s = SlotIndex::new(0);
        assert_eq!(s.get(), 0);
    }

    #[test]
    fn test_conversions() {
        let t: TeamIndex = 3.into();
        assert_eq!(t.get(), 3);
        let raw: usize = t.into();
        assert_eq!(raw, 3);
    }

    #[test]
    fn test_debug_and_display() {
        let c = CandidateIndex::new(12);
        assert_eq!(format!("{}", c), "CandidateIndex(12)");
        assert_eq!(format!("{:?}", c), "CandidateIndex(12)");
        assert_eq!(format!("{}", TeamIndex::new(1)), "TeamIndex(1)");
    }

    #[test]
    fn test_ordering() {
        assert!(SlotIndex::new(1) < SlotIndex::new(2));
        assert_eq!(CandidateIndex::new(5), CandidateIndex::new(5));
    }
}

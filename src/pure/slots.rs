// Slot-Array Primitives
// Every node mutation goes through these two shifts. A slot array is a
// fixed-capacity slice whose first `len` entries are live and whose tail is
// vacant (`S::default()`).

/// Make room at `index` by moving the live slots `index..len` one place to the
/// right, then write `value` into the hole.
///
/// # Panics
/// Panics if `len >= slots.len()` (no vacant slot to shift into) or
/// `index > len`.
pub fn shift_right_insert<S: Default>(slots: &mut [S], index: usize, len: usize, value: S) {
    debug_assert!(len < slots.len(), "slot array is full");
    slots[index..=len].rotate_right(1);
    slots[index] = value;
}

/// Remove the slot at `index` and pull the live slots after it one place to the
/// left. The freed tail slot is left vacant.
///
/// # Panics
/// Panics if `index >= len` or `len > slots.len()`.
pub fn shift_left_delete<S: Default>(slots: &mut [S], index: usize, len: usize) -> S {
    debug_assert!(index < len, "delete past the live region");
    let removed = std::mem::take(&mut slots[index]);
    slots[index..len].rotate_left(1);
    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_into_middle() {
        let mut slots = [Some(1), Some(3), Some(4), None];
        shift_right_insert(&mut slots, 1, 3, Some(2));
        assert_eq!(slots, [Some(1), Some(2), Some(3), Some(4)]);
    }

    #[test]
    fn test_insert_at_front_and_back() {
        let mut slots = [Some(2), None, None];
        shift_right_insert(&mut slots, 0, 1, Some(1));
        shift_right_insert(&mut slots, 2, 2, Some(3));
        assert_eq!(slots, [Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_insert_into_empty() {
        let mut slots: [Option<u8>; 2] = [None, None];
        shift_right_insert(&mut slots, 0, 0, Some(7));
        assert_eq!(slots, [Some(7), None]);
    }

    #[test]
    fn test_delete_compacts_left() {
        let mut slots = [Some('a'), Some('b'), Some('c'), None];
        let removed = shift_left_delete(&mut slots, 0, 3);
        assert_eq!(removed, Some('a'));
        assert_eq!(slots, [Some('b'), Some('c'), None, None]);
    }

    #[test]
    fn test_delete_last_live_slot() {
        let mut slots = [Some(1), Some(2), None];
        let removed = shift_left_delete(&mut slots, 1, 2);
        assert_eq!(removed, Some(2));
        assert_eq!(slots, [Some(1), None, None]);
    }

    #[test]
    fn test_delete_leaves_tail_untouched() {
        // Slots past `len` are not part of the live region and must not move.
        let mut slots = [Some(1), Some(2), Some(3), Some(9)];
        shift_left_delete(&mut slots, 0, 3);
        assert_eq!(slots, [Some(2), Some(3), None, Some(9)]);
    }
}

pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        (index - 1) % len
    }
}

pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

/// Moves `index` by `delta` rows, stopping at either end of `len` rows.
pub const fn clamp_offset(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    let moved = index.saturating_add_signed(delta);
    if moved >= len {
        len - 1
    } else {
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping_handles_empty_lists() {
        assert_eq!(wrap_increment(0, 0), 0);
        assert_eq!(wrap_decrement(0, 0), 0);
        assert_eq!(wrap_decrement(0, 3), 2);
        assert_eq!(wrap_increment(2, 3), 0);
    }

    #[test]
    fn offsets_stop_at_the_ends() {
        assert_eq!(clamp_offset(0, -5, 10), 0);
        assert_eq!(clamp_offset(8, 5, 10), 9);
        assert_eq!(clamp_offset(3, 1, 10), 4);
        assert_eq!(clamp_offset(3, 1, 0), 0);
    }
}

//! Fixed-width bit manipulation primitives.
//!
//! These operate on plain `u32` values (with a 64-bit popcount for the board
//! layer) and are independent of any board geometry. Out-of-range positions
//! are absorbed rather than rejected: set/clear/toggle are no-ops, `get_bit`
//! is false, and shifting by the full width or more yields zero.

/// Width of the demonstration integer type.
pub const WIDTH: u32 = u32::BITS;

fn in_range(position: u32) -> bool {
    position < WIDTH
}

/// Returns `value` with the bit at `position` set.
pub fn set_bit(value: u32, position: u32) -> u32 {
    if !in_range(position) {
        return value;
    }
    value | (1u32 << position)
}

/// Returns `value` with the bit at `position` cleared.
pub fn clear_bit(value: u32, position: u32) -> u32 {
    if !in_range(position) {
        return value;
    }
    value & !(1u32 << position)
}

/// Returns `value` with the bit at `position` flipped.
pub fn toggle_bit(value: u32, position: u32) -> u32 {
    if !in_range(position) {
        return value;
    }
    value ^ (1u32 << position)
}

/// Reads the bit at `position`; false when `position` is out of range.
pub fn get_bit(value: u32, position: u32) -> bool {
    if !in_range(position) {
        return false;
    }
    (value >> position) & 1 != 0
}

/// Population count via Kernighan's method: each iteration clears the
/// lowest set bit, so the loop runs once per set bit.
pub fn count_bits(mut value: u32) -> u32 {
    let mut count = 0;
    while value != 0 {
        value &= value - 1;
        count += 1;
    }
    count
}

/// 64-bit Kernighan popcount, used by the board layer for piece counts.
pub fn count_bits64(mut value: u64) -> u32 {
    let mut count = 0;
    while value != 0 {
        value &= value - 1;
        count += 1;
    }
    count
}

/// Left shift that saturates to zero once the shift amount reaches the
/// integer width, instead of overflowing.
pub fn shift_left(value: u32, positions: u32) -> u32 {
    if positions >= WIDTH {
        return 0;
    }
    value << positions
}

/// Right shift with the same saturation rule as [`shift_left`].
pub fn shift_right(value: u32, positions: u32) -> u32 {
    if positions >= WIDTH {
        return 0;
    }
    value >> positions
}

/// Renders `value` as 32 binary digits grouped in nibbles, high bit first.
pub fn format_binary(value: u32) -> String {
    let mut out = String::with_capacity(39);
    for i in (0..WIDTH).rev() {
        out.push(if get_bit(value, i) { '1' } else { '0' });
        if i % 4 == 0 && i != 0 {
            out.push(' ');
        }
    }
    out
}

/// Renders `value` as fixed-width hex, e.g. `0x0000002A`.
pub fn format_hex(value: u32) -> String {
    format!("{value:#010X}")
}

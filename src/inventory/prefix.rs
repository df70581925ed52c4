//! Prefix length calculation from network masks.

/// Returns the number of leading set bits in `mask`, read big-endian.
///
/// Counting stops at the first clear bit. Masks are assumed to be contiguous
/// and are not validated: `0b1111_0001` yields 4, not 5. Existing consumers
/// of the output depend on this truncation.
///
/// # Examples
///
/// ```
/// use ifshow::inventory::prefix_length;
///
/// assert_eq!(prefix_length(&[255, 255, 255, 0]), 24);
/// assert_eq!(prefix_length(&[0b1111_0001]), 4);
/// assert_eq!(prefix_length(&[]), 0);
/// ```
#[must_use]
pub fn prefix_length(mask: &[u8]) -> u32 {
    let mut prefix = 0;
    for &byte in mask {
        let ones = byte.leading_ones();
        prefix += ones;
        if ones < u8::BITS {
            break;
        }
    }
    prefix
}

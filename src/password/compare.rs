use subtle::{Choice, ConstantTimeEq};

/// Constant-time equality for byte slices.
///
/// Both inputs are walked to the longer length (missing positions read as zero)
/// and the length check is folded in at the end, so neither the position of the
/// first difference nor a length mismatch shortens the loop.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let longest = a.len().max(b.len());
    let mut equal = Choice::from(1u8);

    for i in 0..longest {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        equal &= x.ct_eq(&y);
    }

    equal &= (a.len() as u64).ct_eq(&(b.len() as u64));

    equal.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal() {
        assert!(constant_time_eq(b"", b""));
        assert!(constant_time_eq(&[3, 4, 5], &[3, 4, 5]));
    }

    #[test]
    fn test_differs_anywhere() {
        let base = [7u8; 32];
        for i in 0..base.len() {
            let mut other = base;
            other[i] ^= 0x01;
            assert!(!constant_time_eq(&base, &other), "difference at {i}");
        }
    }

    #[test]
    fn test_length_mismatch() {
        assert!(!constant_time_eq(&[1, 2, 3], &[1, 2]));
        assert!(!constant_time_eq(&[1, 2], &[1, 2, 3]));
        assert!(!constant_time_eq(&[], &[0]));
    }

    #[test]
    fn test_zero_padding_does_not_match() {
        // A shorter input is not equal to a longer one padded with zeros.
        assert!(!constant_time_eq(&[1, 0], &[1]));
    }
}

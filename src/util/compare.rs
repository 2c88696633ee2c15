use subtle::{Choice, ConstantTimeEq};

/// Compares two byte strings without short-circuiting.
///
/// Every byte position up to the longer input's length is visited and the
/// length check is folded into the same accumulator, so neither the
/// position of the first difference nor a length mismatch causes an early
/// return. Do not swap this for `subtle`'s slice `ct_eq`, which returns
/// immediately on a length mismatch.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let len = a.len().max(b.len());
    let mut equal: Choice = (a.len() as u64).ct_eq(&(b.len() as u64));

    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        equal &= x.ct_eq(&y);
    }

    equal.into()
}

pub fn constant_time_eq_str(a: &str, b: &str) -> bool {
    constant_time_eq(a.as_bytes(), b.as_bytes())
}

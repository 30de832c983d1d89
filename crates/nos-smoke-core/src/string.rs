//! String operations: strlen, strcpy, strcat, strcmp, strncmp.
//!
//! C strings are modelled as byte slices. A string ends at the first NUL byte,
//! or at the end of the slice when no NUL is present.

/// Returns the length of the C string in `s`.
///
/// Equivalent to C `strlen`, bounded by the slice length.
pub fn strlen(s: &[u8]) -> usize {
    s.iter().position(|&b| b == 0).unwrap_or(s.len())
}

/// `strlen` over a possibly-null reference.
///
/// A null (`None`) reference reports 0 instead of faulting.
pub fn strlen_nullable(s: Option<&[u8]>) -> usize {
    s.map_or(0, strlen)
}

/// Copies the C string `src` (including its terminator) into `dest`.
///
/// Equivalent to C `strcpy`. Copies at most `dest.len() - 1` string bytes and
/// always NUL-terminates a non-empty `dest`. Returns the number of string
/// bytes copied.
pub fn strcpy(dest: &mut [u8], src: &[u8]) -> usize {
    if dest.is_empty() {
        return 0;
    }
    let count = strlen(src).min(dest.len() - 1);
    dest[..count].copy_from_slice(&src[..count]);
    dest[count] = 0;
    count
}

/// Appends the C string `src` to the C string already in `dest`.
///
/// Equivalent to C `strcat`. Truncates to fit and keeps `dest` terminated.
/// Returns the resulting string length.
pub fn strcat(dest: &mut [u8], src: &[u8]) -> usize {
    let start = strlen(dest);
    if start >= dest.len() {
        return start;
    }
    start + strcpy(&mut dest[start..], src)
}

/// Compares two C strings byte by byte.
///
/// Equivalent to C `strcmp`: returns the difference of the first mismatching
/// bytes (as unsigned), or 0 when equal.
pub fn strcmp(a: &[u8], b: &[u8]) -> i32 {
    strncmp(a, b, usize::MAX)
}

/// Compares at most `n` bytes of two C strings.
///
/// Equivalent to C `strncmp`.
pub fn strncmp(a: &[u8], b: &[u8], n: usize) -> i32 {
    for i in 0..n {
        let ca = a.get(i).copied().unwrap_or(0);
        let cb = b.get(i).copied().unwrap_or(0);
        if ca != cb {
            return i32::from(ca) - i32::from(cb);
        }
        if ca == 0 {
            return 0;
        }
    }
    0
}

/// Views the C string in `buf` as UTF-8 text, lossily.
pub fn as_text(buf: &[u8]) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(&buf[..strlen(buf)])
}

//! Bounded Fibonacci generator.

/// Hard cap on the number of emitted terms.
pub const FIB_MAX_TERMS: usize = 20;

/// Iterator over the first `min(n, FIB_MAX_TERMS)` Fibonacci numbers,
/// starting `0, 1`.
#[derive(Debug, Clone)]
pub struct Fibonacci {
    current: i32,
    next: i32,
    remaining: usize,
}

impl Fibonacci {
    /// Creates a generator for `count` terms. Non-positive counts are empty.
    #[must_use]
    pub fn new(count: i32) -> Self {
        let remaining = usize::try_from(count).unwrap_or(0).min(FIB_MAX_TERMS);
        Self {
            current: 0,
            next: 1,
            remaining,
        }
    }
}

impl Iterator for Fibonacci {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let term = self.current;
        // The 20-term cap keeps this far below i32::MAX (fib(19) = 4181).
        let following = self.current + self.next;
        self.current = self.next;
        self.next = following;
        Some(term)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Fibonacci {}

/// Shorthand for [`Fibonacci::new`].
#[must_use]
pub fn fibonacci(count: i32) -> Fibonacci {
    Fibonacci::new(count)
}

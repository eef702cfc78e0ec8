//! UTF-8 validity state machine and forbidden control-byte table.
//!
//! The tracker only answers two questions per byte: did a well-formed unit
//! just close, and has the sequence gone bad. It never assembles code points.

/// Control bytes that are rare in real text.
///
/// NUL and most C0 codes are marked. TAB, LF, CR and DC2 (0x12) stay
/// allowed, as do DEL and everything at or above 0x80.
const FORBIDDEN_BYTES: [u8; 28] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 11, 12, 14, 15, 16, 17, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29,
    30, 31,
];

const fn forbidden_table() -> [bool; 256] {
    let mut table = [false; 256];
    let mut i = 0;
    while i < FORBIDDEN_BYTES.len() {
        table[FORBIDDEN_BYTES[i] as usize] = true;
        i += 1;
    }
    table
}

static FORBIDDEN: [bool; 256] = forbidden_table();

/// Returns true if `byte` counts as evidence against a text classification.
#[inline]
pub fn is_forbidden(byte: u8) -> bool {
    FORBIDDEN[byte as usize]
}

const CONT_LO: u8 = 0x80;
const CONT_HI: u8 = 0xBF;

/// Incremental UTF-8 validator.
///
/// Feed bytes with [`update`](Self::update). After each call:
///
/// - [`done`](Self::done) is true only if that byte closed a well-formed unit
/// - [`err`](Self::err) is true once the sequence is invalid, and stays true
///   until [`reset`](Self::reset)
///
/// Validation is strict: overlong forms, UTF-16 surrogates, and values above
/// U+10FFFF are rejected by narrowing the range of the first continuation
/// byte, so no code point is ever assembled.
///
/// # Example
///
/// ```
/// use segtag::TextValidityTracker;
///
/// let mut t = TextValidityTracker::new();
/// t.update(0xC3);
/// assert!(!t.done());
/// t.update(0xA9); // "é"
/// assert!(t.done());
/// t.update(0xFF);
/// assert!(t.err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextValidityTracker {
    /// Continuation bytes still expected for the open unit.
    pending: u8,
    /// Accepted range for the next continuation byte.
    lo: u8,
    hi: u8,
    done: bool,
    err: bool,
}

impl TextValidityTracker {
    /// Creates a tracker expecting a lead byte.
    pub const fn new() -> Self {
        Self {
            pending: 0,
            lo: CONT_LO,
            hi: CONT_HI,
            done: false,
            err: false,
        }
    }

    /// Returns to the initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advances the state machine by one byte.
    pub fn update(&mut self, byte: u8) {
        self.done = false;
        if self.err {
            return;
        }

        if self.pending == 0 {
            let (pending, lo, hi) = match byte {
                0x00..=0x7F => {
                    self.done = true;
                    return;
                }
                0xC2..=0xDF => (1, CONT_LO, CONT_HI),
                0xE0 => (2, 0xA0, CONT_HI),
                0xE1..=0xEC | 0xEE..=0xEF => (2, CONT_LO, CONT_HI),
                0xED => (2, CONT_LO, 0x9F),
                0xF0 => (3, 0x90, CONT_HI),
                0xF1..=0xF3 => (3, CONT_LO, CONT_HI),
                0xF4 => (3, CONT_LO, 0x8F),
                // Stray continuation, overlong C0/C1, or F5..FF.
                _ => {
                    self.err = true;
                    return;
                }
            };
            self.pending = pending;
            self.lo = lo;
            self.hi = hi;
            return;
        }

        if byte < self.lo || byte > self.hi {
            self.err = true;
            self.pending = 0;
            return;
        }

        self.pending -= 1;
        self.lo = CONT_LO;
        self.hi = CONT_HI;
        if self.pending == 0 {
            self.done = true;
        }
    }

    /// True only for the update that completed a unit.
    #[inline]
    pub fn done(&self) -> bool {
        self.done
    }

    /// True once an invalid byte has been seen.
    #[inline]
    pub fn err(&self) -> bool {
        self.err
    }

    /// Continuation bytes still expected.
    #[inline]
    pub fn pending(&self) -> u8 {
        self.pending
    }
}

impl Default for TextValidityTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(bytes: &[u8]) -> (TextValidityTracker, Vec<bool>) {
        let mut t = TextValidityTracker::new();
        let done = bytes
            .iter()
            .map(|&b| {
                t.update(b);
                t.done()
            })
            .collect();
        (t, done)
    }

    #[test]
    fn test_ascii_completes_every_byte() {
        let (t, done) = feed(b"hi!");
        assert!(!t.err());
        assert_eq!(done, vec![true, true, true]);
    }

    #[test]
    fn test_multibyte_done_only_on_last() {
        // U+20AC EURO SIGN, U+1F600
        let (t, done) = feed("€😀".as_bytes());
        assert!(!t.err());
        assert_eq!(done, vec![false, false, true, false, false, false, true]);
    }

    #[test]
    fn test_matches_std_on_valid_text() {
        let s = "Grüße, 世界! \u{10FFFF}\u{80}\u{7FF}\u{800}\u{FFFF}\u{10000}";
        let (t, done) = feed(s.as_bytes());
        assert!(!t.err());
        assert_eq!(done.iter().filter(|&&d| d).count(), s.chars().count());
    }

    #[test]
    fn test_invalid_leads() {
        for lead in [0x80u8, 0xBF, 0xC0, 0xC1, 0xF5, 0xF8, 0xFF] {
            let (t, _) = feed(&[lead]);
            assert!(t.err(), "lead {:#x} must be rejected", lead);
        }
    }

    #[test]
    fn test_bad_continuation() {
        let (t, done) = feed(&[0xC3, 0x41]);
        assert!(t.err());
        assert_eq!(done, vec![false, false]);
        assert_eq!(t.pending(), 0);
    }

    #[test]
    fn test_overlong_and_surrogates_rejected() {
        assert!(feed(&[0xE0, 0x80, 0x80]).0.err());
        assert!(feed(&[0xF0, 0x80, 0x80, 0x80]).0.err());
        assert!(feed(&[0xED, 0xA0, 0x80]).0.err());
        assert!(feed(&[0xF4, 0x90, 0x80, 0x80]).0.err());
    }

    #[test]
    fn test_err_is_sticky_until_reset() {
        let mut t = TextValidityTracker::new();
        t.update(0xFF);
        t.update(b'a');
        assert!(t.err());
        assert!(!t.done());
        t.reset();
        t.update(b'a');
        assert!(!t.err());
        assert!(t.done());
    }

    #[test]
    fn test_forbidden_table() {
        for b in [0u8, 1, 8, 11, 12, 14, 17, 19, 27, 31] {
            assert!(is_forbidden(b), "{} should be forbidden", b);
        }
        for b in [b'\t', b'\n', b'\r', 0x12, b' ', b'~', 0x7F, 0x80, 0xFF] {
            assert!(!is_forbidden(b), "{} should be allowed", b);
        }
    }
}

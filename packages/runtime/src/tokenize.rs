//! Delimiter tokenizer with an explicit cursor.
//!
//! The cursor is a plain value: the unconsumed tail of the input plus the
//! delimiter set. Each step hands back the token and the advanced cursor, so
//! any number of tokenizations can be in flight at once and the input is
//! never modified.

/// Cursor over a byte buffer split on a delimiter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer<'a> {
    rest: &'a [u8],
    delims: &'a [u8],
}

impl<'a> Tokenizer<'a> {
    /// Begin tokenizing `input` on any byte of `delims`.
    pub fn new(input: &'a [u8], delims: &'a [u8]) -> Self {
        Self {
            rest: input,
            delims,
        }
    }

    /// Split off the next token.
    ///
    /// Leading delimiters are skipped, and the token runs to the next
    /// delimiter or the end of input. The delimiter that ended the token is
    /// consumed. Returns `None` once only delimiters remain.
    pub fn next_token(self) -> Option<(&'a [u8], Tokenizer<'a>)> {
        let start = self
            .rest
            .iter()
            .position(|b| !self.delims.contains(b))?;
        let tail = &self.rest[start..];

        let (token, rest) = match tail.iter().position(|b| self.delims.contains(b)) {
            Some(end) => (&tail[..end], &tail[end + 1..]),
            None => (tail, &tail[tail.len()..]),
        };

        Some((
            token,
            Tokenizer {
                rest,
                delims: self.delims,
            },
        ))
    }

    /// Input not yet consumed.
    pub fn remainder(&self) -> &'a [u8] {
        self.rest
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Some((token, advanced)) => {
                *self = advanced;
                Some(token)
            }
            None => {
                self.rest = &[];
                None
            }
        }
    }
}

//! Text form of a credential.
//!
//! ```text
//! $<id>,<key>=<int>,...$<base64url-salt>$<base64url-hash>
//! ```
//!
//! Decoding is a single left-to-right pass over the bytes with four states
//! (`ScanId`, `ScanParams`, `ScanSalt`, `ScanHash`). There is no backtracking:
//! the first violation ends the scan and reports the cursor position, so a
//! given malformed input always fails at the same offset with the same error.

use super::{Error, Result};
use base64ct::{Base64Url, Base64UrlUnpadded, Encoding};

const DELIMITER: u8 = b'$';
const SEPARATOR: u8 = b',';
const ASSIGN: u8 = b'=';

/// Shape of one scheme's serialized form.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    /// Identifier the first segment must carry.
    pub id: &'static str,
    /// Accepted parameter keys; each must appear exactly once.
    pub keys: &'static [&'static str],
    /// Key whose value is the salt and hash length in bytes.
    pub len_key: &'static str,
}

/// A parsed parameter value and the offset of its first digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub value: u64,
    pub offset: usize,
}

/// Result of a successful decode. `params` follows the order of `Layout::keys`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<'a> {
    pub id: &'a str,
    pub params: Vec<Param>,
    pub salt: Vec<u8>,
    pub hash: Vec<u8>,
}

impl Decoded<'_> {
    #[must_use]
    pub fn values(&self) -> Vec<u64> {
        self.params.iter().map(|param| param.value).collect()
    }
}

/// Render a credential into its canonical text form.
///
/// # Errors
/// Returns [`Error::InvalidObject`] if the identifier is empty or contains a
/// delimiter, or if the salt or hash is empty.
pub fn encode(id: &str, params: &[(&str, u64)], salt: &[u8], hash: &[u8]) -> Result<String> {
    if !valid_id(id) || salt.is_empty() || hash.is_empty() {
        return Err(Error::InvalidObject);
    }

    let mut out = String::with_capacity(16 + id.len() + (salt.len() + hash.len()) * 4 / 3);
    out.push('$');
    out.push_str(id);
    for (key, value) in params {
        out.push(',');
        out.push_str(key);
        out.push('=');
        out.push_str(&value.to_string());
    }
    out.push('$');
    out.push_str(&Base64Url::encode_string(salt));
    out.push('$');
    out.push_str(&Base64Url::encode_string(hash));

    Ok(out)
}

/// Read only the identifier segment.
///
/// # Errors
/// Returns [`Error::InvalidSerialization`] if the leading `$` is missing, the
/// identifier is empty, or the input ends inside it.
pub fn peek_id(src: &str) -> Result<&str> {
    let mut scanner = Scanner::new(src);
    scanner.scan_id()
}

/// Decode `src` according to `layout`.
///
/// # Errors
/// - [`Error::InvalidSerialization`] on any grammar violation.
/// - [`Error::UnknownId`] if the identifier is not `layout.id`.
/// - [`Error::InvalidParameter`] if a parameter value is zero.
pub fn decode<'a>(src: &'a str, layout: &Layout) -> Result<Decoded<'a>> {
    let mut scanner = Scanner::new(src);
    let mut state = State::ScanId;

    let mut id = "";
    let mut params = Vec::new();
    let mut len = 0u64;
    let mut salt = Vec::new();
    let mut hash = Vec::new();

    loop {
        state = match state {
            State::ScanId => {
                id = scanner.scan_id()?;
                if id != layout.id {
                    return Err(Error::UnknownId(id.to_string()));
                }
                State::ScanParams
            }
            State::ScanParams => {
                params = scanner.scan_params(layout.keys)?;
                len = layout
                    .keys
                    .iter()
                    .position(|key| *key == layout.len_key)
                    .and_then(|index| params.get(index))
                    .map(|param| param.value)
                    .ok_or_else(|| Error::serialization(scanner.pos, "missing length parameter"))?;
                State::ScanSalt
            }
            State::ScanSalt => {
                scanner.expect(DELIMITER, "missing '$' before salt")?;
                salt = scanner.scan_segment(len)?;
                State::ScanHash
            }
            State::ScanHash => {
                scanner.expect(DELIMITER, "missing '$' before hash")?;
                hash = scanner.scan_segment(len)?;
                if !scanner.at_end() {
                    return Err(Error::serialization(scanner.pos, "unexpected trailing data"));
                }
                State::Done
            }
            State::Done => break,
        };
    }

    Ok(Decoded {
        id,
        params,
        salt,
        hash,
    })
}

fn valid_id(id: &str) -> bool {
    !id.is_empty() && !id.bytes().any(|b| b == DELIMITER || b == SEPARATOR)
}

const fn is_base64(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'=')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ScanId,
    ScanParams,
    ScanSalt,
    ScanHash,
    Done,
}

struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    const fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn expect(&mut self, byte: u8, reason: &'static str) -> Result<()> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(Error::serialization(self.pos, reason))
        }
    }

    /// Advance while `pred` holds and return the consumed slice.
    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if !pred(byte) {
                break;
            }
            self.pos += 1;
        }
        // Every stop position is either the end or an ASCII byte, so this is
        // always a char boundary.
        let text = self.text;
        &text[start..self.pos]
    }

    fn scan_id(&mut self) -> Result<&'a str> {
        self.expect(DELIMITER, "missing leading '$'")?;
        let start = self.pos;
        let id = self.take_while(|b| b != SEPARATOR && b != DELIMITER);
        if id.is_empty() {
            return Err(Error::serialization(start, "empty scheme identifier"));
        }
        if self.at_end() {
            return Err(Error::serialization(self.pos, "truncated after identifier"));
        }
        Ok(id)
    }

    fn scan_params(&mut self, keys: &'static [&'static str]) -> Result<Vec<Param>> {
        let mut values: Vec<Option<Param>> = vec![None; keys.len()];

        loop {
            match self.peek() {
                Some(SEPARATOR) => {
                    self.pos += 1;
                    self.scan_param(keys, &mut values)?;
                }
                Some(DELIMITER) => break,
                None => return Err(Error::serialization(self.pos, "truncated parameter list")),
                Some(_) => return Err(Error::serialization(self.pos, "expected ',' or '$'")),
            }
        }

        values
            .into_iter()
            .map(|value| value.ok_or_else(|| Error::serialization(self.pos, "missing parameter")))
            .collect()
    }

    fn scan_param(
        &mut self,
        keys: &'static [&'static str],
        values: &mut [Option<Param>],
    ) -> Result<()> {
        let key_start = self.pos;
        let key = self.take_while(|b| b != ASSIGN && b != SEPARATOR && b != DELIMITER);
        let Some(index) = keys.iter().position(|known| *known == key) else {
            return Err(Error::serialization(key_start, "unrecognized parameter"));
        };
        let Some(slot) = values.get_mut(index) else {
            return Err(Error::serialization(key_start, "unrecognized parameter"));
        };
        if slot.is_some() {
            return Err(Error::serialization(key_start, "duplicate parameter"));
        }

        self.expect(ASSIGN, "expected '='")?;

        let value_start = self.pos;
        let value = self.scan_uint()?;
        if value == 0 {
            return Err(Error::InvalidParameter {
                key: keys.get(index).copied().unwrap_or_default(),
                offset: value_start,
            });
        }

        *slot = Some(Param {
            value,
            offset: value_start,
        });
        Ok(())
    }

    fn scan_uint(&mut self) -> Result<u64> {
        let start = self.pos;
        let digits = self.take_while(|b| b.is_ascii_digit());
        if digits.is_empty() {
            return Err(Error::serialization(start, "expected unsigned integer"));
        }

        digits.bytes().try_fold(0u64, |acc, digit| {
            acc.checked_mul(10)
                .and_then(|acc| acc.checked_add(u64::from(digit - b'0')))
                .ok_or_else(|| Error::serialization(start, "integer overflow"))
        })
    }

    /// Consume a base64 run and return its first `len` decoded bytes.
    ///
    /// The run must hold at least `len` symbols. Surplus decoded bytes past
    /// `len` are dropped.
    fn scan_segment(&mut self, len: u64) -> Result<Vec<u8>> {
        let start = self.pos;
        let run = self.take_while(is_base64);

        if (run.len() as u64) < len {
            return Err(Error::serialization(
                start,
                "segment shorter than declared length",
            ));
        }

        let decoded = if run.ends_with('=') {
            Base64Url::decode_vec(run)
        } else {
            Base64UrlUnpadded::decode_vec(run)
        };
        let mut bytes = decoded.map_err(|_| Error::serialization(start, "invalid base64"))?;

        bytes.truncate(usize::try_from(len).unwrap_or(usize::MAX));
        if bytes.is_empty() {
            return Err(Error::serialization(start, "empty base64 segment"));
        }

        Ok(bytes)
    }
}

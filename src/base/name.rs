//! Domain names.
//!
//! A domain name on the wire is a sequence of labels, each prefixed by a
//! length octet, terminated by a label of length zero. Inside a message a
//! name may be *compressed:* a length octet with its top two bits set
//! introduces a pointer, an absolute offset into the message at which
//! reading continues. Since pointers can target any earlier (or, in
//! principle, later) part of the message, parsing a name needs access to
//! the whole message buffer, which is why [`Name::parse`] operates on a
//! repositionable [`Parser`] spanning the full message.
//!
//! This client keeps names in their presentation format: the labels joined
//! by dots, without a trailing dot. Comparisons are case-sensitive byte
//! comparisons on that form; callers are expected to normalize.

use super::wire::{ParseError, Parser};
use core::{fmt, str};
use octseq::builder::OctetsBuilder;

/// The maximum length of a name on the wire, including the root label.
const MAX_WIRE_LEN: usize = 255;

/// The maximum length of a single label on the wire.
const MAX_LABEL_LEN: usize = 63;

/// How many compression pointers we follow within one name.
///
/// A legitimate name needs at most a handful; a message whose pointers
/// chain deeper than this, or loop back onto themselves, is broken and
/// fails to decode instead of hanging the parser.
const MAX_COMPRESSION_HOPS: usize = 20;

//------------ Name ----------------------------------------------------------

/// A domain name in presentation format.
///
/// Values are valid by construction: every label is between 1 and 63
/// bytes long and the name fits the wire-format limit of 255 octets.
/// The empty name represents the root.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Name {
    inner: String,
}

impl Name {
    /// Returns the presentation form of the name.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns whether this is the root name.
    pub fn is_root(&self) -> bool {
        self.inner.is_empty()
    }
}

/// # Parsing and Composing
///
impl Name {
    /// Parses a name from the beginning of `parser`.
    ///
    /// The parser must span the entire message, since a compression
    /// pointer may send us anywhere within it. Literal labels advance the
    /// parser; once a pointer has been followed the parser rests directly
    /// behind the pointer and decoding continues on a shadow copy.
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
    ) -> Result<Self, ParseError> {
        let mut inner = String::new();
        let mut wire_len = 0;

        // Phase one: literal labels on the live parser. Ends either at the
        // root label or at the first compression pointer.
        let mut ptr = loop {
            match LabelType::parse(parser)? {
                LabelType::Normal(0) => {
                    return Ok(Name { inner });
                }
                LabelType::Normal(label_len) => {
                    parse_label(parser, label_len, &mut inner, &mut wire_len)?;
                }
                LabelType::Compressed(ptr) => break ptr,
            }
        };

        // Phase two: compression has occured. The live parser has reached
        // the end of the name, so we chase pointers on a copy.
        let mut parser = *parser;
        let mut hops = 0;
        loop {
            hops += 1;
            if hops > MAX_COMPRESSION_HOPS {
                return Err(ParseError::form_error(
                    "too many compression pointers",
                ));
            }
            parser.seek(ptr)?;
            loop {
                match LabelType::parse(&mut parser)? {
                    LabelType::Normal(0) => {
                        return Ok(Name { inner });
                    }
                    LabelType::Normal(label_len) => {
                        parse_label(
                            &mut parser,
                            label_len,
                            &mut inner,
                            &mut wire_len,
                        )?;
                    }
                    LabelType::Compressed(new_ptr) => {
                        ptr = new_ptr;
                        break;
                    }
                }
            }
        }
    }

    /// Appends the wire format of the name to `target`.
    ///
    /// Names are always composed uncompressed.
    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        if !self.inner.is_empty() {
            for label in self.inner.split('.') {
                target.append_slice(&[label.len() as u8])?;
                target.append_slice(label.as_bytes())?;
            }
        }
        target.append_slice(&[0])
    }
}

/// Reads one literal label of `label_len` bytes into `inner`.
fn parse_label<Octs: AsRef<[u8]> + ?Sized>(
    parser: &mut Parser<'_, Octs>,
    label_len: usize,
    inner: &mut String,
    wire_len: &mut usize,
) -> Result<(), ParseError> {
    *wire_len += label_len + 1;
    if *wire_len + 1 > MAX_WIRE_LEN {
        return Err(ParseError::form_error("long domain name"));
    }
    let mut buf = [0u8; MAX_LABEL_LEN];
    let buf = &mut buf[..label_len];
    parser.parse_buf(buf)?;
    let label = str::from_utf8(buf)
        .map_err(|_| ParseError::form_error("invalid label"))?;
    if !inner.is_empty() {
        inner.push('.');
    }
    inner.push_str(label);
    Ok(())
}

//--- FromStr and Display

impl str::FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_suffix('.').unwrap_or(s);
        if s.is_empty() {
            return Ok(Name {
                inner: String::new(),
            });
        }
        if s.len() + 2 > MAX_WIRE_LEN {
            return Err(NameError::LongName);
        }
        for label in s.split('.') {
            if label.is_empty() {
                return Err(NameError::EmptyLabel);
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(NameError::LongLabel);
            }
        }
        Ok(Name {
            inner: s.into(),
        })
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.inner.is_empty() {
            f.pad(".")
        } else {
            f.pad(&self.inner)
        }
    }
}

//============ Error Types ===================================================

//------------ NameError -----------------------------------------------------

/// A string did not contain a valid domain name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameError {
    /// The name contains an empty label.
    EmptyLabel,

    /// A label is longer than 63 bytes.
    LongLabel,

    /// The name is longer than 255 wire-format octets.
    LongName,
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            NameError::EmptyLabel => f.write_str("empty label"),
            NameError::LongLabel => f.write_str("label too long"),
            NameError::LongName => f.write_str("name too long"),
        }
    }
}

impl std::error::Error for NameError {}

//------------ LabelType -----------------------------------------------------

/// The type of a label header octet.
enum LabelType {
    /// A literal label of the given length.
    Normal(usize),

    /// A compression pointer to the given message offset.
    Compressed(usize),
}

impl LabelType {
    fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
    ) -> Result<Self, ParseError> {
        let ltype = parser.parse_u8()?;
        match ltype {
            0..=0x3F => Ok(LabelType::Normal(ltype as usize)),
            0xC0..=0xFF => {
                let ptr = usize::from(parser.parse_u8()?)
                    | (usize::from(ltype & 0x3F) << 8);
                Ok(LabelType::Compressed(ptr))
            }
            _ => Err(ParseError::form_error("reserved label type")),
        }
    }
}

//============ Testing =======================================================

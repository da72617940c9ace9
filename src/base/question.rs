//! A single question of a DNS message.

use super::iana::{Class, Rtype};
use super::name::Name;
use super::wire::{ParseError, Parser};
use core::fmt;
use octseq::builder::OctetsBuilder;

//------------ Question ------------------------------------------------------

/// A question in a DNS message.
///
/// A question carries the domain name the query is about, the record type
/// asked for, and the class, which for this client is always [`Class::IN`].
/// The same encoding also prefixes every resource record, which is why
/// record parsing starts out question-shaped.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Question {
    /// The domain name of the question.
    qname: Name,

    /// The record type of the question.
    qtype: Rtype,

    /// The class of the question.
    qclass: Class,
}

impl Question {
    /// Creates a new question from a name and a type, in class IN.
    pub fn new(qname: Name, qtype: Rtype) -> Self {
        Question {
            qname,
            qtype,
            qclass: Class::IN,
        }
    }

    /// Returns the requested domain name.
    pub fn qname(&self) -> &Name {
        &self.qname
    }

    /// Returns the requested record type.
    pub fn qtype(&self) -> Rtype {
        self.qtype
    }

    /// Returns the class of the question.
    pub fn qclass(&self) -> Class {
        self.qclass
    }
}

/// # Parsing and Composing
///
impl Question {
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
    ) -> Result<Self, ParseError> {
        Ok(Question {
            qname: Name::parse(parser)?,
            qtype: Rtype::from_int(parser.parse_u16_be()?),
            qclass: Class::from_int(parser.parse_u16_be()?),
        })
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.qname.compose(target)?;
        target.append_slice(&self.qtype.to_int().to_be_bytes())?;
        target.append_slice(&self.qclass.to_int().to_be_bytes())
    }
}

//--- Display

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.qname, self.qclass, self.qtype)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use octseq::builder::infallible;
    use std::str::FromStr;

    #[test]
    fn compose() {
        let question = Question::new(
            Name::from_str("www.example.com").unwrap(),
            Rtype::AAAA,
        );
        let mut buf = Vec::new();
        infallible(question.compose(&mut buf));
        assert_eq!(
            buf,
            b"\x03www\x07example\x03com\x00\x00\x1c\x00\x01"
        );
    }

    #[test]
    fn roundtrip() {
        let question = Question::new(
            Name::from_str("example.com").unwrap(),
            Rtype::from_int(0xfff0),
        );
        let mut buf = Vec::new();
        infallible(question.compose(&mut buf));
        let mut parser = Parser::from_ref(buf.as_slice());
        assert_eq!(Question::parse(&mut parser).unwrap(), question);
        assert_eq!(parser.remaining(), 0);
    }
}

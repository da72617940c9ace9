//! Resource records.

use super::iana::{Class, Rtype};
use super::name::Name;
use super::wire::{ParseError, Parser};
use core::fmt;
use octseq::builder::{infallible, OctetsBuilder};
use std::net::{Ipv4Addr, Ipv6Addr};

//------------ Record --------------------------------------------------------

/// A DNS resource record.
///
/// A record binds some data to a domain name, its *owner.* The record type
/// states what kind of data it is and the TTL for how many seconds the
/// record may be kept around. Two records that differ only in their TTL
/// are distinct values; the cache deliberately does not collapse them.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Record {
    /// The owner of the record.
    owner: Name,

    /// The record type.
    rtype: Rtype,

    /// The time-to-live value of the record, in seconds.
    ttl: u32,

    /// The record data.
    data: RecordData,
}

impl Record {
    /// Creates a new record.
    pub fn new(owner: Name, rtype: Rtype, ttl: u32, data: RecordData) -> Self {
        Record {
            owner,
            rtype,
            ttl,
            data,
        }
    }

    /// Returns the owner of the record.
    pub fn owner(&self) -> &Name {
        &self.owner
    }

    /// Returns the record type.
    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    /// Returns the TTL of the record in seconds.
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Returns the record data.
    pub fn data(&self) -> &RecordData {
        &self.data
    }
}

/// # Parsing and Composing
///
impl Record {
    /// Parses a record from the beginning of `parser`.
    ///
    /// The parser must span the entire message: both the owner name and
    /// any domain name inside the record data may be compressed. Whatever
    /// the data, the parser ends up positioned directly behind the
    /// record's RDATA.
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
    ) -> Result<Self, ParseError> {
        let owner = Name::parse(parser)?;
        let rtype = Rtype::from_int(parser.parse_u16_be()?);
        let _class = Class::from_int(parser.parse_u16_be()?);
        let ttl = parser.parse_u32_be()?;
        let rdlen = usize::from(parser.parse_u16_be()?);
        if rdlen > parser.remaining() {
            return Err(ParseError::ShortInput);
        }
        let end = parser.pos() + rdlen;
        let data = RecordData::parse(parser, rtype, rdlen)?;
        if parser.pos() > end {
            return Err(ParseError::form_error("record data overrun"));
        }
        parser.seek(end)?;
        Ok(Record {
            owner,
            rtype,
            ttl,
            data,
        })
    }

    /// Appends the wire format of the record to `target`.
    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.owner.compose(target)?;
        target.append_slice(&self.rtype.to_int().to_be_bytes())?;
        target.append_slice(&Class::IN.to_int().to_be_bytes())?;
        target.append_slice(&self.ttl.to_be_bytes())?;
        let mut rdata = Vec::new();
        match self.data {
            RecordData::A(addr) => {
                rdata.extend_from_slice(&addr.octets());
            }
            RecordData::Aaaa(addr) => {
                rdata.extend_from_slice(&addr.octets());
            }
            RecordData::Ns(ref name) | RecordData::Cname(ref name) => {
                infallible(name.compose(&mut rdata));
            }
            RecordData::Other => {}
        }
        target.append_slice(&(rdata.len() as u16).to_be_bytes())?;
        target.append_slice(&rdata)
    }
}

//--- Display

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.owner, self.ttl, self.rtype, self.data
        )
    }
}

//------------ RecordData ----------------------------------------------------

/// The data of a resource record.
///
/// Only the record types the resolution algorithm acts upon are
/// interpreted; everything else is kept as an opaque placeholder. The
/// record's [`Rtype`] still identifies what the placeholder stood for.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum RecordData {
    /// An IPv4 host address.
    A(Ipv4Addr),

    /// An IPv6 host address.
    Aaaa(Ipv6Addr),

    /// The host name of an authoritative name server.
    Ns(Name),

    /// The canonical name for the owner, which is an alias.
    Cname(Name),

    /// Uninterpreted data of any other record type.
    Other,
}

impl RecordData {
    /// Parses the record data for `rtype` from `parser`.
    ///
    /// The parser must span the entire message so that compressed names
    /// in NS and CNAME data can be resolved. Data of uninterpreted types
    /// is left for the caller to skip over via the record length.
    fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
        rtype: Rtype,
        rdlen: usize,
    ) -> Result<Self, ParseError> {
        match rtype {
            Rtype::A => {
                if rdlen != 4 {
                    return Err(ParseError::form_error("invalid A rdata"));
                }
                let mut buf = [0u8; 4];
                parser.parse_buf(&mut buf)?;
                Ok(RecordData::A(Ipv4Addr::from(buf)))
            }
            Rtype::AAAA => {
                if rdlen != 16 {
                    return Err(ParseError::form_error("invalid AAAA rdata"));
                }
                let mut buf = [0u8; 16];
                parser.parse_buf(&mut buf)?;
                Ok(RecordData::Aaaa(Ipv6Addr::from(buf)))
            }
            Rtype::NS => Ok(RecordData::Ns(Name::parse(parser)?)),
            Rtype::CNAME => Ok(RecordData::Cname(Name::parse(parser)?)),
            _ => Ok(RecordData::Other),
        }
    }
}

//--- Display

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RecordData::A(ref addr) => fmt::Display::fmt(addr, f),
            RecordData::Aaaa(ref addr) => fmt::Display::fmt(addr, f),
            RecordData::Ns(ref name) => fmt::Display::fmt(name, f),
            RecordData::Cname(ref name) => fmt::Display::fmt(name, f),
            RecordData::Other => f.pad("----"),
        }
    }
}

//============ Testing =======================================================

//! Whole DNS messages.

use super::header::Header;
use super::iana::Rtype;
use super::name::Name;
use super::question::Question;
use super::record::Record;
use super::wire::{ParseError, Parser};
use octseq::builder::infallible;

//------------ Message -------------------------------------------------------

/// A DNS message.
///
/// A message consists of the header, the questions, and the three record
/// sections: answer, authority, and additional. The sections are treated
/// as sets: a record appearing twice on the wire is kept once. Records
/// keep their first-seen order, which is their wire order, so "the first
/// record" of a section is well-defined.
///
/// Which section a record belongs to is purely a matter of its position
/// on the wire relative to the header counts, never of its type.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Message {
    /// The message header.
    header: Header,

    /// The questions of the message.
    questions: Vec<Question>,

    /// The answer section.
    answer: Vec<Record>,

    /// The authority section.
    authority: Vec<Record>,

    /// The additional section.
    additional: Vec<Record>,
}

impl Message {
    /// Creates an empty message with the given header.
    pub fn new(header: Header) -> Self {
        Message {
            header,
            ..Default::default()
        }
    }

    /// Creates a query for the given question.
    ///
    /// The query gets the given message ID and leaves every flag unset; in
    /// particular, RD stays clear since an iterative client wants
    /// referrals, not recursion.
    pub fn query(question: Question, id: u16) -> Self {
        let mut header = Header::new();
        header.set_id(id);
        Message {
            header,
            questions: vec![question],
            ..Default::default()
        }
    }

    /// Returns the message header.
    pub fn header(&self) -> Header {
        self.header
    }

    /// Returns a mutable reference to the message header.
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Returns the questions of the message.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Returns the first question of the message, if there is one.
    pub fn first_question(&self) -> Option<&Question> {
        self.questions.first()
    }

    /// Returns the records of the answer section.
    pub fn answer(&self) -> &[Record] {
        &self.answer
    }

    /// Returns the records of the authority section.
    pub fn authority(&self) -> &[Record] {
        &self.authority
    }

    /// Returns the records of the additional section.
    pub fn additional(&self) -> &[Record] {
        &self.additional
    }

    /// Returns an iterator over the records of all three sections.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.answer
            .iter()
            .chain(self.authority.iter())
            .chain(self.additional.iter())
    }

    /// Returns the target host names of the NS records in the authority
    /// section, in wire order.
    ///
    /// Records of any other type that ended up in the authority section
    /// are of no use for referral processing and are skipped.
    pub fn referral_targets(&self) -> Vec<&Name> {
        self.authority
            .iter()
            .filter(|record| record.rtype() == Rtype::NS)
            .filter_map(|record| match record.data() {
                super::record::RecordData::Ns(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    /// Appends a question.
    pub fn push_question(&mut self, question: Question) {
        self.questions.push(question);
    }

    /// Appends a record to the answer section, ignoring duplicates.
    pub fn push_answer(&mut self, record: Record) {
        push_unique(&mut self.answer, record);
    }

    /// Appends a record to the authority section, ignoring duplicates.
    pub fn push_authority(&mut self, record: Record) {
        push_unique(&mut self.authority, record);
    }

    /// Appends a record to the additional section, ignoring duplicates.
    pub fn push_additional(&mut self, record: Record) {
        push_unique(&mut self.additional, record);
    }
}

/// # Parsing and Composing
///
impl Message {
    /// Parses a message from the octets of one datagram.
    ///
    /// Any error anywhere in the message fails the whole decode; there
    /// are no partially parsed messages.
    pub fn parse(buf: &[u8]) -> Result<Self, ParseError> {
        let mut parser = Parser::from_ref(buf);
        let header = Header::parse(&mut parser)?;
        let mut res = Message::new(header);
        for _ in 0..header.qdcount() {
            let question = Question::parse(&mut parser)?;
            res.questions.push(question);
        }
        let ancount = usize::from(header.ancount());
        let nscount = usize::from(header.nscount());
        let arcount = usize::from(header.arcount());
        for i in 0..ancount + nscount + arcount {
            let record = Record::parse(&mut parser)?;
            if i < ancount {
                push_unique(&mut res.answer, record);
            } else if i < ancount + nscount {
                push_unique(&mut res.authority, record);
            } else {
                push_unique(&mut res.additional, record);
            }
        }
        Ok(res)
    }

    /// Returns the wire format of the message.
    ///
    /// The counts in the composed header are taken from the actual
    /// section sizes.
    pub fn compose(&self) -> Vec<u8> {
        let mut target = Vec::new();
        let mut header = self.header;
        header.set_qdcount(self.questions.len() as u16);
        header.set_ancount(self.answer.len() as u16);
        header.set_nscount(self.authority.len() as u16);
        header.set_arcount(self.additional.len() as u16);
        infallible(header.compose(&mut target));
        for question in &self.questions {
            infallible(question.compose(&mut target));
        }
        for record in self.records() {
            infallible(record.compose(&mut target));
        }
        target
    }
}

/// Appends `record` to `section` unless an equal record is already there.
fn push_unique(section: &mut Vec<Record>, record: Record) {
    if !section.contains(&record) {
        section.push(record);
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::record::RecordData;
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    fn a_record(owner: &str, ttl: u32, addr: [u8; 4]) -> Record {
        Record::new(
            name(owner),
            Rtype::A,
            ttl,
            RecordData::A(Ipv4Addr::from(addr)),
        )
    }

    #[test]
    fn roundtrip() {
        let mut msg = Message::new(Header::new());
        msg.header_mut().set_id(0x4711);
        msg.header_mut().set_qr(true);
        msg.header_mut().set_aa(true);
        msg.push_question(Question::new(name("example.com"), Rtype::A));
        msg.push_answer(a_record("example.com", 3600, [93, 184, 216, 34]));
        msg.push_authority(Record::new(
            name("example.com"),
            Rtype::NS,
            86400,
            RecordData::Ns(name("a.iana-servers.net")),
        ));
        msg.push_additional(a_record(
            "a.iana-servers.net",
            86400,
            [199, 43, 135, 53],
        ));

        let wire = msg.compose();
        let parsed = Message::parse(&wire).unwrap();
        assert_eq!(parsed.header().id(), 0x4711);
        assert!(parsed.header().qr());
        assert!(parsed.header().aa());
        assert_eq!(parsed.questions(), msg.questions());
        assert_eq!(parsed.answer(), msg.answer());
        assert_eq!(parsed.authority(), msg.authority());
        assert_eq!(parsed.additional(), msg.additional());
    }

    #[test]
    fn wire_order_decides_section() {
        // A CNAME sitting in the authority section must stay there.
        let mut msg = Message::new(Header::new());
        msg.push_authority(Record::new(
            name("x.example"),
            Rtype::CNAME,
            60,
            RecordData::Cname(name("y.example")),
        ));
        let parsed = Message::parse(&msg.compose()).unwrap();
        assert!(parsed.answer().is_empty());
        assert_eq!(parsed.authority().len(), 1);
        assert_eq!(parsed.authority()[0].rtype(), Rtype::CNAME);
        assert!(parsed.referral_targets().is_empty());
    }

    #[test]
    fn duplicate_records_collapse() {
        let record = a_record("dup.example", 60, [10, 0, 0, 1]);
        let mut wire = Vec::new();
        let mut header = Header::new();
        header.set_ancount(2);
        octseq::builder::infallible(header.compose(&mut wire));
        octseq::builder::infallible(record.compose(&mut wire));
        octseq::builder::infallible(record.compose(&mut wire));
        let parsed = Message::parse(&wire).unwrap();
        assert_eq!(parsed.answer().len(), 1);

        // Differing TTLs keep both records apart.
        let mut wire = Vec::new();
        octseq::builder::infallible(header.compose(&mut wire));
        octseq::builder::infallible(record.compose(&mut wire));
        octseq::builder::infallible(
            a_record("dup.example", 61, [10, 0, 0, 1]).compose(&mut wire),
        );
        let parsed = Message::parse(&wire).unwrap();
        assert_eq!(parsed.answer().len(), 2);
    }

    #[test]
    fn counts_exceeding_data_fail() {
        let mut wire = Vec::new();
        let mut header = Header::new();
        header.set_ancount(1);
        octseq::builder::infallible(header.compose(&mut wire));
        assert_eq!(Message::parse(&wire), Err(ParseError::ShortInput));
    }

    #[test]
    fn referral_targets_in_wire_order() {
        let mut msg = Message::new(Header::new());
        msg.push_authority(Record::new(
            name("example"),
            Rtype::NS,
            60,
            RecordData::Ns(name("ns2.example")),
        ));
        msg.push_authority(Record::new(
            name("example"),
            Rtype::NS,
            60,
            RecordData::Ns(name("ns1.example")),
        ));
        let parsed = Message::parse(&msg.compose()).unwrap();
        assert_eq!(
            parsed.referral_targets(),
            [&name("ns2.example"), &name("ns1.example")]
        );
    }
}

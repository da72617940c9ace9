//! The header of a DNS message.
//!
//! Each DNS message starts with a twelve octet long header section
//! containing some general information related to the message as well as
//! the number of records in each of the four sections that follow. Its
//! content and format are defined in section 4.1.1 of [RFC 1035].
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use super::iana::{Opcode, Rcode};
use super::wire::{ParseError, Parser};
use octseq::builder::OctetsBuilder;

//------------ Header --------------------------------------------------------

/// The header of a DNS message.
///
/// This type represents the message ID, the flags word, and the four
/// section counts. It keeps all twelve octets in wire representation,
/// i.e., in network byte order. The data is layed out like this:
///
/// ```text
///                                 1  1  1  1  1  1
///   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      ID                       |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |QR|   Opcode  |AA|TC|RD|RA|    Z   |   RCODE   |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    QDCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    ANCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    NSCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    ARCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
///
/// Z is the three bit reserved field of the original RFC 1035 layout and
/// must be zero in all queries and responses.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Header {
    /// The actual header in its wire format representation.
    inner: [u8; 12],
}

/// # Creation and Conversion
///
impl Header {
    /// Creates a new header.
    ///
    /// The new header has all fields as either zero or false. Thus, the
    /// opcode will be [`Opcode::QUERY`] and the response code will be
    /// [`Rcode::NOERROR`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a reference to the underlying octets slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.inner
    }
}

/// # Field Access
///
impl Header {
    /// Returns the value of the ID field.
    ///
    /// The ID field is an identifier chosen by whoever created a query
    /// and is copied into a response by a server. It allows matching
    /// incoming responses to their queries.
    pub fn id(self) -> u16 {
        self.get_u16(0)
    }

    /// Sets the value of the ID field.
    pub fn set_id(&mut self, value: u16) {
        self.set_u16(0, value)
    }

    /// Sets the value of the ID field to a randomly chosen number.
    pub fn set_random_id(&mut self) {
        self.set_id(::rand::random())
    }

    /// Returns whether the QR bit is set.
    ///
    /// The bit specifies whether a message is a query (`false`) or a
    /// response (`true`).
    pub fn qr(self) -> bool {
        self.get_bit(2, 7)
    }

    /// Sets the value of the QR bit.
    pub fn set_qr(&mut self, set: bool) {
        self.set_bit(2, 7, set)
    }

    /// Returns the value of the Opcode field.
    ///
    /// This field specifies the kind of query a message contains. Normal
    /// queries have the variant [`Opcode::QUERY`] which is also the
    /// default value when creating a new header.
    pub fn opcode(self) -> Opcode {
        Opcode::from_int((self.inner[2] >> 3) & 0x0F)
    }

    /// Sets the value of the opcode field.
    pub fn set_opcode(&mut self, opcode: Opcode) {
        self.inner[2] = self.inner[2] & 0x87 | ((opcode.to_int() & 0x0F) << 3);
    }

    /// Returns whether the AA bit is set.
    ///
    /// Using this bit, a name server generating a response states whether
    /// it is authoritative for the requested domain name, i.e., whether
    /// this response is an *authoritative answer.*
    pub fn aa(self) -> bool {
        self.get_bit(2, 2)
    }

    /// Sets the value of the AA bit.
    pub fn set_aa(&mut self, set: bool) {
        self.set_bit(2, 2, set)
    }

    /// Returns whether the TC bit is set.
    ///
    /// The *truncation* bit is set if there was more data available than
    /// fit into the message.
    pub fn tc(self) -> bool {
        self.get_bit(2, 1)
    }

    /// Sets the value of the TC bit.
    pub fn set_tc(&mut self, set: bool) {
        self.set_bit(2, 1, set)
    }

    /// Returns whether the RD bit is set.
    ///
    /// The *recursion desired* bit may be set in a query to ask the name
    /// server to try and recursively gather a response. An iterative
    /// client leaves it unset.
    pub fn rd(self) -> bool {
        self.get_bit(2, 0)
    }

    /// Sets the value of the RD bit.
    pub fn set_rd(&mut self, set: bool) {
        self.set_bit(2, 0, set)
    }

    /// Returns whether the RA bit is set.
    ///
    /// In a response, the *recursion available* bit denotes whether the
    /// responding name server supports recursion.
    pub fn ra(self) -> bool {
        self.get_bit(3, 7)
    }

    /// Sets the value of the RA bit.
    pub fn set_ra(&mut self, set: bool) {
        self.set_bit(3, 7, set)
    }

    /// Returns the value of the reserved Z field.
    ///
    /// The field occupies bits 4 to 6 of the flags word and must be zero.
    pub fn z(self) -> u8 {
        (self.inner[3] >> 4) & 0x07
    }

    /// Sets the value of the reserved Z field.
    pub fn set_z(&mut self, value: u8) {
        self.inner[3] = self.inner[3] & 0x8F | ((value & 0x07) << 4);
    }

    /// Returns the value of the RCODE field.
    ///
    /// The *response code* is used in a response to indicate what happened
    /// when processing the query. See the [`Rcode`] type for the possible
    /// values and their meaning.
    pub fn rcode(self) -> Rcode {
        Rcode::from_int(self.inner[3] & 0x0F)
    }

    /// Sets the value of the RCODE field.
    pub fn set_rcode(&mut self, rcode: Rcode) {
        self.inner[3] = self.inner[3] & 0xF0 | (rcode.to_int() & 0x0F);
    }

    //--- Count fields

    /// Returns the value of the QDCOUNT field.
    ///
    /// This field contains the number of questions in the first section
    /// of the message.
    pub fn qdcount(self) -> u16 {
        self.get_u16(4)
    }

    /// Sets the value of the QDCOUNT field.
    pub fn set_qdcount(&mut self, value: u16) {
        self.set_u16(4, value)
    }

    /// Returns the value of the ANCOUNT field.
    ///
    /// This field contains the number of resource records in the answer
    /// section of the message.
    pub fn ancount(self) -> u16 {
        self.get_u16(6)
    }

    /// Sets the value of the ANCOUNT field.
    pub fn set_ancount(&mut self, value: u16) {
        self.set_u16(6, value)
    }

    /// Returns the value of the NSCOUNT field.
    ///
    /// This field contains the number of resource records in the
    /// authority section of the message.
    pub fn nscount(self) -> u16 {
        self.get_u16(8)
    }

    /// Sets the value of the NSCOUNT field.
    pub fn set_nscount(&mut self, value: u16) {
        self.set_u16(8, value)
    }

    /// Returns the value of the ARCOUNT field.
    ///
    /// This field contains the number of resource records in the
    /// additional section of the message.
    pub fn arcount(self) -> u16 {
        self.get_u16(10)
    }

    /// Sets the value of the ARCOUNT field.
    pub fn set_arcount(&mut self, value: u16) {
        self.set_u16(10, value)
    }

    //--- Internal helpers

    /// Returns the value of the bit at the given position.
    ///
    /// The argument `offset` gives the byte offset into the wire
    /// representation and `bit` gives the number of the bit with the most
    /// significant bit being 7.
    fn get_bit(self, offset: usize, bit: usize) -> bool {
        self.inner[offset] & (1 << bit) != 0
    }

    /// Sets or resets the given bit.
    fn set_bit(&mut self, offset: usize, bit: usize, set: bool) {
        if set {
            self.inner[offset] |= 1 << bit
        } else {
            self.inner[offset] &= !(1 << bit)
        }
    }

    /// Returns the value of the 16 bit integer starting at a given offset.
    fn get_u16(self, offset: usize) -> u16 {
        u16::from_be_bytes(self.inner[offset..offset + 2].try_into().unwrap())
    }

    /// Sets the value of the 16 bit integer starting at a given offset.
    fn set_u16(&mut self, offset: usize, value: u16) {
        self.inner[offset..offset + 2].copy_from_slice(&value.to_be_bytes())
    }
}

/// # Parsing and Composing
///
impl Header {
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
    ) -> Result<Self, ParseError> {
        let mut res = Self::default();
        parser.parse_buf(&mut res.inner)?;
        Ok(res)
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&self.inner)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::{Opcode, Rcode};
    use octseq::builder::infallible;

    macro_rules! test_field {
        ($get:ident, $set:ident, $default:expr, $($value:expr),*) => {
            $({
                let mut h = Header::new();
                assert_eq!(h.$get(), $default);
                h.$set($value);
                assert_eq!(h.$get(), $value);
            })*
        }
    }

    #[test]
    fn header() {
        test_field!(id, set_id, 0, 0x1234);
        test_field!(qr, set_qr, false, true, false);
        test_field!(opcode, set_opcode, Opcode::QUERY, Opcode::NOTIFY);
        test_field!(aa, set_aa, false, true, false);
        test_field!(tc, set_tc, false, true, false);
        test_field!(rd, set_rd, false, true, false);
        test_field!(ra, set_ra, false, true, false);
        test_field!(z, set_z, 0, 1, 7, 0);
        test_field!(rcode, set_rcode, Rcode::NOERROR, Rcode::REFUSED);
        test_field!(qdcount, set_qdcount, 0, 0x8642);
        test_field!(ancount, set_ancount, 0, 1);
        test_field!(nscount, set_nscount, 0, 0xffff);
        test_field!(arcount, set_arcount, 0, 13);
    }

    #[test]
    fn opcode_and_rcode_ranges() {
        for value in 0..16 {
            let mut h = Header::new();
            h.set_opcode(Opcode::from_int(value));
            assert_eq!(h.opcode(), Opcode::from_int(value));
            h.set_rcode(Rcode::from_int(value));
            assert_eq!(h.rcode(), Rcode::from_int(value));
        }
    }

    #[test]
    fn fields_are_independent() {
        let mut h = Header::new();
        h.set_qr(true);
        h.set_opcode(Opcode::from_int(0x0F));
        h.set_aa(true);
        h.set_tc(true);
        h.set_rd(true);
        h.set_ra(true);
        h.set_z(7);
        h.set_rcode(Rcode::from_int(0x0F));
        assert_eq!(&h.as_slice()[2..4], b"\xFF\xFF");
        h.set_opcode(Opcode::QUERY);
        assert!(h.qr());
        assert!(h.aa());
        assert_eq!(h.rcode(), Rcode::from_int(0x0F));
        h.set_z(0);
        assert!(h.ra());
        assert_eq!(h.rcode(), Rcode::from_int(0x0F));
    }

    #[test]
    fn wire_layout() {
        let mut h = Header::new();
        h.set_id(0x0102);
        h.set_qr(true);
        h.set_opcode(Opcode::from_int(2));
        h.set_rd(true);
        h.set_rcode(Rcode::NXDOMAIN);
        h.set_qdcount(1);
        h.set_ancount(2);
        h.set_nscount(3);
        h.set_arcount(4);
        assert_eq!(
            h.as_slice(),
            b"\x01\x02\x91\x03\x00\x01\x00\x02\x00\x03\x00\x04"
        );
    }

    #[test]
    fn parse_compose() {
        let wire = b"\x12\x34\x85\x80\x00\x01\x00\x02\x00\x00\x00\x01";
        let mut parser = Parser::from_ref(wire.as_slice());
        let header = Header::parse(&mut parser).unwrap();
        assert_eq!(header.id(), 0x1234);
        assert!(header.qr());
        assert!(header.aa());
        assert!(header.rd());
        assert!(header.ra());
        assert_eq!(header.qdcount(), 1);
        assert_eq!(header.ancount(), 2);
        assert_eq!(header.arcount(), 1);
        let mut composed = Vec::new();
        infallible(header.compose(&mut composed));
        assert_eq!(composed.as_slice(), wire.as_slice());
    }

    #[test]
    fn short_header() {
        let mut parser = Parser::from_ref(b"\x12\x34\x00".as_slice());
        assert_eq!(
            Header::parse(&mut parser),
            Err(ParseError::ShortInput)
        );
    }
}

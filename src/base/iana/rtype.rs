//! Resource Record (RR) TYPEs.

//------------ Rtype ---------------------------------------------------------

int_enum! {
    /// Resource Record Types.
    ///
    /// Each resource record has a 16 bit type value indicating what kind of
    /// information is represented by the record. A query includes the type
    /// of record information is requested for.
    ///
    /// The currently assigned values are maintained in an [IANA registry].
    /// Only the types this client can meet in a referral walk get a
    /// constant here; all other codes are carried as their raw value.
    ///
    /// [IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-4
    =>
    Rtype, u16;

    /// A host address.
    (A => 1, "A")

    /// An authoritative name server.
    (NS => 2, "NS")

    /// The canonical name for an alias.
    (CNAME => 5, "CNAME")

    /// Marks the start of a zone of authority.
    (SOA => 6, "SOA")

    /// A domain name pointer.
    (PTR => 12, "PTR")

    /// Mail exchange.
    (MX => 15, "MX")

    /// Text strings.
    (TXT => 16, "TXT")

    /// IPv6 address.
    (AAAA => 28, "AAAA")
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::Rtype;
    use std::str::FromStr;

    #[test]
    fn unknown_codes_are_lossless() {
        let rtype = Rtype::from_int(0xfff0);
        assert_eq!(rtype.to_int(), 0xfff0);
        assert_eq!(rtype.to_mnemonic(), None);
        assert_eq!(format!("{}", rtype), "65520");
    }

    #[test]
    fn from_str() {
        assert_eq!(Rtype::from_str("A"), Ok(Rtype::A));
        assert_eq!(Rtype::from_str("aaaa"), Ok(Rtype::AAAA));
        assert_eq!(Rtype::from_str("Cname"), Ok(Rtype::CNAME));
        assert_eq!(Rtype::from_str("28"), Ok(Rtype::AAAA));
        assert_eq!(Rtype::from_str("65520"), Ok(Rtype::from_int(0xfff0)));
        assert!(Rtype::from_str("no such type").is_err());
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Rtype::MX), "MX");
        assert_eq!(format!("{:<5}|", Rtype::A), "A    |");
    }
}

//! DNS CLASSes.

//------------ Class ---------------------------------------------------------

int_enum! {
    /// DNS CLASSes.
    ///
    /// The class of a resource record determines the type of network the
    /// record's information pertains to. In practice everything lives in
    /// the Internet class; queries sent by this client always use it.
    =>
    Class, u16;

    /// Internet (IN).
    (IN => 1, "IN")

    /// Chaos (CH).
    (CH => 3, "CH")

    /// Hesiod (HS).
    (HS => 4, "HS")
}

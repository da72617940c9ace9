//! DNS OpCodes.

//------------ Opcode --------------------------------------------------------

int_enum! {
    /// DNS OpCodes.
    ///
    /// The opcode specifies the kind of query to be performed. It lives in
    /// the four bits 11 to 14 of the flags word of the message header.
    =>
    Opcode, u8;

    /// A standard query.
    (QUERY => 0, "QUERY")

    /// An inverse query (IQUERY) (obsolete).
    (IQUERY => 1, "IQUERY")

    /// A server status request.
    (STATUS => 2, "STATUS")

    /// A NOTIFY query.
    (NOTIFY => 4, "NOTIFY")

    /// An UPDATE query.
    (UPDATE => 5, "UPDATE")
}

//! DNS response codes.

//------------ Rcode ---------------------------------------------------------

int_enum! {
    /// DNS response codes.
    ///
    /// The response code of a message indicates what happened when the
    /// server processed the query. It lives in the lower four bits of the
    /// flags word of the message header.
    =>
    Rcode, u8;

    /// No error condition.
    (NOERROR => 0, "NOERROR")

    /// The server was unable to interpret the query.
    (FORMERR => 1, "FORMERR")

    /// The server ran into a problem processing the query.
    (SERVFAIL => 2, "SERVFAIL")

    /// The queried domain name does not exist.
    ///
    /// Only meaningful in responses from an authoritative server.
    (NXDOMAIN => 3, "NXDOMAIN")

    /// The server does not support the requested kind of query.
    (NOTIMP => 4, "NOTIMP")

    /// The server refused to perform the operation.
    (REFUSED => 5, "REFUSED")
}

//! IANA definitions for DNS.
//!
//! Various parameters of a DNS message are numeric values from registries
//! maintained by IANA. Each such parameter gets its own type wrapping the
//! raw integer, with associated constants for the well-known values. The
//! wrapping keeps unknown codes lossless: a value that arrives with a code
//! we have no mnemonic for round-trips unchanged and displays as its
//! decimal number.

pub use self::class::Class;
pub use self::opcode::Opcode;
pub use self::rcode::Rcode;
pub use self::rtype::Rtype;

#[macro_use]
mod macros;

pub mod class;
pub mod opcode;
pub mod rcode;
pub mod rtype;

use core::fmt;

//------------ FromStrError --------------------------------------------------

/// A string did not contain a known mnemonic or a decimal value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FromStrError(pub(crate) &'static str);

impl fmt::Display for FromStrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "illegal {} value", self.0)
    }
}

impl std::error::Error for FromStrError {}

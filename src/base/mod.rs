//! DNS data and wire format.
//!
//! This module provides the types that make up a DNS message and the means
//! to convert them from and to their binary representation. We use the term
//! *parsing* for extracting data from the wire format and *composing* for
//! producing it. Both happen on buffers holding a complete message, since
//! compressed domain names reference other parts of the message by
//! absolute offset.

pub use self::header::Header;
pub use self::message::Message;
pub use self::name::Name;
pub use self::question::Question;
pub use self::record::{Record, RecordData};
pub use self::wire::ParseError;

pub mod header;
pub mod iana;
pub mod message;
pub mod name;
pub mod question;
pub mod record;
pub mod wire;

//! An iterative DNS resolver client.
//!
//! This crate walks the DNS delegation hierarchy by hand: starting from a
//! root server it issues non-recursive UDP queries and follows referrals
//! until it arrives at an authoritative answer, chasing CNAME aliases along
//! the way. Every record it ever sees is kept in a process-lifetime cache.
//!
//! # Modules
//!
//! * [base] contains the DNS data types and the wire-format codec,
//!   including message compression, and
//! * [resolv] contains the cache, the datagram transport, and the resolver
//!   driving the iterative walk.
//!
//! The accompanying `dnslookup` binary wraps the resolver in a small
//! interactive command loop.

pub mod base;
pub mod resolv;

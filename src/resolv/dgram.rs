//! The UDP transport.

use bytes::Bytes;
use std::io;
use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
use std::time::Duration;

/// The size of the receive buffer.
///
/// Plenty for the plain, EDNS-less queries this client sends; a datagram
/// that fills the buffer completely cannot be told apart from a truncated
/// one and is treated as a hard failure.
const RECV_BUF_SIZE: usize = 1024;

//------------ UdpTransport --------------------------------------------------

/// A datagram transport for DNS queries.
///
/// The transport owns a single socket bound to an ephemeral local port
/// for the lifetime of the resolver. There is never more than one query
/// in flight: [`query`][Self::query] sends one datagram and then blocks
/// until one datagram arrives or the read timeout expires.
#[derive(Debug)]
pub struct UdpTransport {
    /// The socket for sending and receiving.
    sock: UdpSocket,
}

impl UdpTransport {
    /// Creates a new transport with the given receive timeout.
    pub fn new(timeout: Duration) -> io::Result<Self> {
        let sock = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
        sock.set_read_timeout(Some(timeout))?;
        Ok(UdpTransport { sock })
    }

    /// Performs one query round trip against `server`.
    ///
    /// Sends `request` and waits for a single datagram. Returns
    /// `Ok(None)` if the wait timed out. An oversized response is an
    /// error; so is any other problem with the socket.
    pub fn query(
        &self,
        request: &[u8],
        server: SocketAddr,
    ) -> io::Result<Option<Bytes>> {
        self.sock.send_to(request, server)?;
        let mut buf = vec![0u8; RECV_BUF_SIZE];
        match self.sock.recv_from(&mut buf) {
            Ok((len, from)) => {
                if len == buf.len() {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        "oversized response datagram",
                    ));
                }
                tracing::trace!(%from, len, "received datagram");
                buf.truncate(len);
                Ok(Some(buf.into()))
            }
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
                ) =>
            {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

//============ Testing =======================================================

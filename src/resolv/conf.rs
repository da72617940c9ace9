//! Resolver configuration.

use std::net::IpAddr;
use std::time::Duration;

/// The port name servers listen on.
const DEFAULT_DNS_PORT: u16 = 53;

/// How long to wait for a response before a query counts as timed out.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

//------------ ResolvConf ----------------------------------------------------

/// Resolver configuration.
///
/// This type collects all information necessary to configure how the
/// resolver talks to the name servers. A value is created from the address
/// of the root server to start every walk at; the remaining members carry
/// their defaults and can be manipulated directly.
#[derive(Clone, Debug)]
pub struct ResolvConf {
    /// Address of the root server resolution starts at.
    pub server: IpAddr,

    /// The port to send queries to.
    pub port: u16,

    /// How long to wait for an answer to a query.
    pub timeout: Duration,

    /// Whether to print a trace of every query and response.
    pub verbose: bool,
}

impl ResolvConf {
    /// Creates a new configuration starting resolution at `server`.
    pub fn new(server: IpAddr) -> Self {
        ResolvConf {
            server,
            port: DEFAULT_DNS_PORT,
            timeout: DEFAULT_TIMEOUT,
            verbose: false,
        }
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn defaults() {
        let conf = ResolvConf::new(IpAddr::V4(Ipv4Addr::new(198, 41, 0, 4)));
        assert_eq!(conf.port, 53);
        assert_eq!(conf.timeout, Duration::from_secs(5));
        assert!(!conf.verbose);
    }
}

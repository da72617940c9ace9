//! The iterative resolver.

use super::cache::Cache;
use super::conf::ResolvConf;
use super::dgram::UdpTransport;
use crate::base::iana::{Rcode, Rtype};
use crate::base::record::RecordData;
use crate::base::{Message, Name, Question, Record};
use core::fmt;
use std::io;
use std::net::{IpAddr, SocketAddr};

/// How many chained CNAME indirections a single lookup may take.
pub const MAX_INDIRECTION: usize = 10;

/// How many referral hops one lookup may take before giving up.
///
/// The budget covers the whole walk of a lookup, including nested walks
/// for glueless name servers, so a pair of zones delegating to each other
/// cannot keep the resolver busy forever.
const MAX_REFERRAL_HOPS: usize = 20;

//------------ Node ----------------------------------------------------------

/// The key of a resolution: a host name and a record type.
///
/// Names are compared case-sensitively as stored; callers are expected to
/// normalize.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Node {
    /// The host name to resolve.
    name: Name,

    /// The record type asked for.
    rtype: Rtype,
}

impl Node {
    /// Creates a new node.
    pub fn new(name: Name, rtype: Rtype) -> Self {
        Node { name, rtype }
    }

    /// Returns the host name of the node.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the record type of the node.
    pub fn rtype(&self) -> Rtype {
        self.rtype
    }
}

//------------ Resolver ------------------------------------------------------

/// An iterative resolver.
///
/// The resolver owns everything a lookup needs: the configuration, the
/// socket, the cache, and the retry state that carries across queries.
/// It is strictly synchronous; a lookup blocks until it has either found
/// records or run out of servers to ask.
#[derive(Debug)]
pub struct Resolver {
    /// The configuration.
    conf: ResolvConf,

    /// The datagram transport queries go out on.
    transport: UdpTransport,

    /// Everything we ever learned.
    cache: Cache,

    /// The ID used for the most recent query.
    last_id: u16,

    /// Whether the most recent query round-tripped.
    ///
    /// After a timeout this is `false` and the next send reuses
    /// `last_id`, resending the identical transaction rather than
    /// fabricating a new one.
    query_success: bool,
}

impl Resolver {
    /// Creates a new resolver for the given configuration.
    pub fn new(conf: ResolvConf) -> io::Result<Self> {
        let transport = UdpTransport::new(conf.timeout)?;
        Ok(Resolver {
            conf,
            transport,
            cache: Cache::new(),
            last_id: 0,
            query_success: true,
        })
    }

    /// Returns a reference to the configuration.
    pub fn conf(&self) -> &ResolvConf {
        &self.conf
    }

    /// Changes the root server used by subsequent lookups.
    pub fn set_server(&mut self, server: IpAddr) {
        self.conf.server = server;
    }

    /// Switches verbose tracing on or off.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.conf.verbose = verbose;
    }

    /// Returns a reference to the cache.
    pub fn cache(&self) -> &Cache {
        &self.cache
    }
}

/// # Resolution
///
impl Resolver {
    /// Finds all records for the given node.
    ///
    /// If the cache already holds records for the exact node, they are
    /// returned without any network traffic. Otherwise the resolver walks
    /// the delegation hierarchy from the configured root server, chasing
    /// CNAME aliases with the original query type for up to
    /// [`MAX_INDIRECTION`] indirections. A lookup that runs out of
    /// servers, times out twice in a row, or receives a negative answer
    /// yields an empty set; only blowing the indirection limit is an
    /// error.
    pub fn resolve(&mut self, node: &Node) -> Result<Vec<Record>, ResolveError> {
        let mut node = node.clone();
        for _ in 0..=MAX_INDIRECTION {
            if !self.cache.get_cached_results(&node).is_empty() {
                return Ok(self.cache.get_cached_results(&node).to_vec());
            }
            let mut hops = 0;
            self.query_walk(&node, self.conf.server, &mut hops);
            let results = self.cache.get_cached_results(&node);
            if !results.is_empty() {
                return Ok(results.to_vec());
            }
            // No direct results; maybe the name is an alias.
            let cname_node = Node::new(node.name.clone(), Rtype::CNAME);
            let target = self
                .cache
                .get_cached_results(&cname_node)
                .iter()
                .find_map(|record| match record.data() {
                    RecordData::Cname(name) => Some(name.clone()),
                    _ => None,
                });
            match target {
                Some(target) => {
                    tracing::debug!(
                        alias = %node.name, cname = %target,
                        "following CNAME"
                    );
                    node = Node::new(target, node.rtype);
                }
                None => return Ok(Vec::new()),
            }
        }
        Err(ResolveError::IndirectionLimit)
    }

    /// Walks the delegation hierarchy for `node`, starting at `server`.
    ///
    /// Each round sends one query and classifies the response: an answer
    /// or a dead end finishes the walk, a referral moves it to the next
    /// server. All results end up in the cache; the walk itself returns
    /// nothing. `hops` is the referral budget shared with nested walks
    /// for glueless name servers.
    fn query_walk(&mut self, node: &Node, server: IpAddr, hops: &mut usize) {
        let mut current = server;
        loop {
            *hops += 1;
            if *hops > MAX_REFERRAL_HOPS {
                tracing::warn!(
                    name = %node.name(),
                    "referral limit reached, giving up"
                );
                return;
            }

            let response = match self.exchange(node, current) {
                Some(response) => response,
                None => return,
            };
            for record in response.records() {
                self.cache.add_result(record.clone());
            }
            let rcode = response.header().rcode();
            if rcode == Rcode::NXDOMAIN || rcode == Rcode::REFUSED {
                tracing::debug!(%rcode, "negative response, stopping");
                return;
            }
            if self.conf.verbose {
                print_response(&response);
            }
            if !response.answer().is_empty() {
                // The cache holds the answer now.
                return;
            }

            let targets: Vec<Name> = response
                .referral_targets()
                .into_iter()
                .cloned()
                .collect();
            if targets.is_empty() {
                return;
            }
            if let Some(addr) =
                targets.iter().find_map(|name| self.cached_address(name))
            {
                current = addr;
                continue;
            }

            // None of the name servers came with glue. Resolve the first
            // one's address from the root, on the same hop budget.
            let target = targets[0].clone();
            tracing::debug!(ns = %target, "no glue, resolving name server");
            let ns_node = Node::new(target.clone(), Rtype::A);
            self.query_walk(&ns_node, self.conf.server, hops);
            match self.cached_address(&target) {
                Some(addr) => current = addr,
                None => return,
            }
        }
    }

    /// Returns a cached address for the name server `name`, if any.
    fn cached_address(&self, name: &Name) -> Option<IpAddr> {
        let node = Node::new(name.clone(), Rtype::A);
        self.cache
            .get_cached_results(&node)
            .iter()
            .find_map(|record| match record.data() {
                RecordData::A(addr) => Some(IpAddr::V4(*addr)),
                _ => None,
            })
    }

    /// Sends one query for `node` to `server` and awaits the response.
    ///
    /// A fresh random ID is used unless the previous query timed out, in
    /// which case the identical transaction is resent. The first timeout
    /// in a row retries once against the same server; the second gives up.
    /// Undecodable responses and socket errors also yield `None` — the
    /// caller only ever learns "no response this round."
    fn exchange(&mut self, node: &Node, server: IpAddr) -> Option<Message> {
        let server = SocketAddr::new(server, self.conf.port);
        loop {
            let id = if self.query_success {
                rand::random()
            } else {
                self.last_id
            };
            let query = Message::query(
                Question::new(node.name.clone(), node.rtype),
                id,
            );
            if self.conf.verbose {
                print_query(&query, server.ip());
            }
            tracing::debug!(
                id, name = %node.name(), rtype = %node.rtype(), %server,
                "sending query"
            );
            let reply = match self.transport.query(&query.compose(), server) {
                Ok(reply) => reply,
                Err(err) => {
                    tracing::warn!(%err, %server, "query failed");
                    self.last_id = id;
                    return None;
                }
            };
            match reply {
                Some(buf) => {
                    self.query_success = true;
                    self.last_id = id;
                    match Message::parse(&buf) {
                        Ok(response) => return Some(response),
                        Err(err) => {
                            tracing::debug!(
                                %err,
                                "discarding undecodable response"
                            );
                            return None;
                        }
                    }
                }
                None => {
                    self.last_id = id;
                    if self.query_success {
                        // First timeout in a row: resend the identical
                        // transaction once.
                        tracing::debug!(id, %server, "timeout, retrying");
                        self.query_success = false;
                    } else {
                        tracing::debug!(id, %server, "timeout, giving up");
                        self.query_success = true;
                        return None;
                    }
                }
            }
        }
    }
}

//------------ Trace output --------------------------------------------------

/// Prints the trace line for an outgoing query.
fn print_query(query: &Message, server: IpAddr) {
    if let Some(question) = query.first_question() {
        println!(
            "\nQuery ID     {} {}  {} --> {}",
            query.header().id(),
            question.qname(),
            question.qtype(),
            server,
        );
    }
}

/// Prints the trace dump of a received response.
fn print_response(response: &Message) {
    println!(
        "Response ID: {} Authoritative = {}",
        response.header().id(),
        response.header().aa(),
    );
    print_section("Answers", response.answer());
    print_section("Nameservers", response.authority());
    print_section("Additional Information", response.additional());
}

/// Prints one section of a response.
fn print_section(label: &str, records: &[Record]) {
    println!("  {} ({})", label, records.len());
    for record in records {
        println!(
            "       {:<30} {:<10} {:<4} {}",
            record.owner().to_string(),
            record.ttl(),
            record.rtype().to_string(),
            record.data(),
        );
    }
}

//============ Error Types ===================================================

//------------ ResolveError --------------------------------------------------

/// An error surfaced by a lookup.
///
/// Network and protocol failures degrade to empty result sets instead of
/// turning into errors, so the only thing that can actually go wrong for
/// a caller is an over-long alias chain.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolveError {
    /// The lookup followed more than [`MAX_INDIRECTION`] CNAME aliases.
    IndirectionLimit,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ResolveError::IndirectionLimit => {
                f.write_str("maximum number of indirection levels reached")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

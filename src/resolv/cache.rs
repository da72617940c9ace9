//! The result cache.

use super::resolver::Node;
use crate::base::Record;
use std::collections::HashMap;

//------------ Cache ---------------------------------------------------------

/// A process-lifetime cache of resource records.
///
/// The cache maps a [`Node`] — the owner name and record type — to the set
/// of records received under that key, in first-seen order. Lookups only
/// ever return the exact key's records, never partial matches.
///
/// Entries are never evicted: TTLs are stored but deliberately not acted
/// upon, which is fine for the short-lived interactive sessions this
/// client is built for. There is no locking either; the cache is owned by
/// the single-threaded resolver.
#[derive(Clone, Debug, Default)]
pub struct Cache {
    /// The cached records keyed by owner name and record type.
    entries: HashMap<Node, Vec<Record>>,
}

impl Cache {
    /// Creates a new, empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record to the cache.
    ///
    /// The record is stored under its owner name and type, creating the
    /// entry if this is the first record for that key. A record equal to
    /// one already stored is dropped; records differing in any field,
    /// including the TTL, are kept separately.
    pub fn add_result(&mut self, record: Record) {
        let node = Node::new(record.owner().clone(), record.rtype());
        let records = self.entries.entry(node).or_default();
        if !records.contains(&record) {
            records.push(record);
        }
    }

    /// Returns the records cached for the exact key `node`.
    ///
    /// The returned slice is empty if nothing is known for the key.
    pub fn get_cached_results(&self, node: &Node) -> &[Record] {
        self.entries
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Calls `op` for every node with the records cached for it.
    ///
    /// The iteration order is unspecified.
    pub fn for_each<F: FnMut(&Node, &[Record])>(&self, mut op: F) {
        for (node, records) in &self.entries {
            op(node, records);
        }
    }

    /// Returns whether the cache has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::Rtype;
    use crate::base::record::RecordData;
    use crate::base::Name;
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    fn a_record(owner: &str, ttl: u32, last: u8) -> Record {
        Record::new(
            Name::from_str(owner).unwrap(),
            Rtype::A,
            ttl,
            RecordData::A(Ipv4Addr::new(10, 0, 0, last)),
        )
    }

    fn node(owner: &str, rtype: Rtype) -> Node {
        Node::new(Name::from_str(owner).unwrap(), rtype)
    }

    #[test]
    fn exact_key_lookup() {
        let mut cache = Cache::new();
        cache.add_result(a_record("www.example.com", 60, 1));
        cache.add_result(a_record("example.com", 60, 2));

        let results = cache.get_cached_results(&node(
            "www.example.com",
            Rtype::A,
        ));
        assert_eq!(results, [a_record("www.example.com", 60, 1)]);

        // Neither other names nor other types leak in.
        assert!(cache
            .get_cached_results(&node("example.org", Rtype::A))
            .is_empty());
        assert!(cache
            .get_cached_results(&node("www.example.com", Rtype::AAAA))
            .is_empty());
    }

    #[test]
    fn duplicates_and_ttl_drift() {
        let mut cache = Cache::new();
        cache.add_result(a_record("example.com", 60, 1));
        cache.add_result(a_record("example.com", 60, 1));
        assert_eq!(
            cache.get_cached_results(&node("example.com", Rtype::A)).len(),
            1
        );

        // A different TTL is a different record.
        cache.add_result(a_record("example.com", 59, 1));
        assert_eq!(
            cache.get_cached_results(&node("example.com", Rtype::A)).len(),
            2
        );
    }

    #[test]
    fn no_ttl_eviction() {
        let mut cache = Cache::new();
        cache.add_result(a_record("example.com", 0, 1));
        assert_eq!(
            cache.get_cached_results(&node("example.com", Rtype::A)).len(),
            1
        );
    }

    #[test]
    fn case_sensitive_keys() {
        let mut cache = Cache::new();
        cache.add_result(a_record("Example.com", 60, 1));
        assert!(cache
            .get_cached_results(&node("example.com", Rtype::A))
            .is_empty());
    }

    #[test]
    fn for_each_sees_everything() {
        let mut cache = Cache::new();
        cache.add_result(a_record("a.example", 60, 1));
        cache.add_result(a_record("b.example", 60, 2));
        cache.add_result(a_record("b.example", 60, 3));
        let mut nodes = 0;
        let mut records = 0;
        cache.for_each(|_, recs| {
            nodes += 1;
            records += recs.len();
        });
        assert_eq!(nodes, 2);
        assert_eq!(records, 3);
    }
}

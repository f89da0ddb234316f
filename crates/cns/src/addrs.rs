//! Address enumeration over prefixes

use ipnet::{IpAddrRange, IpNet, Ipv4AddrRange, Ipv6AddrRange};
use std::net::IpAddr;

/// Lazy iterator over every address in a prefix
///
/// Starts at the masked network address and runs through the last address of the
/// prefix. Network and broadcast addresses are both yielded; nothing is reserved.
#[derive(Debug, Clone)]
pub struct PrefixAddrs(IpAddrRange);

impl PrefixAddrs {
    pub fn new(net: IpNet) -> Self {
        Self(match net {
            IpNet::V4(net) => IpAddrRange::V4(Ipv4AddrRange::new(net.network(), net.broadcast())),
            IpNet::V6(net) => IpAddrRange::V6(Ipv6AddrRange::new(net.network(), net.broadcast())),
        })
    }
}

impl Iterator for PrefixAddrs {
    type Item = IpAddr;

    fn next(&mut self) -> Option<IpAddr> {
        self.0.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addrs(prefix: &str) -> Vec<String> {
        PrefixAddrs::new(prefix.parse().unwrap())
            .map(|a| a.to_string())
            .collect()
    }

    #[test]
    fn test_includes_network_and_broadcast() {
        assert_eq!(addrs("10.0.0.0/30"), ["10.0.0.0", "10.0.0.1", "10.0.0.2", "10.0.0.3"]);
    }

    #[test]
    fn test_masks_host_bits() {
        assert_eq!(addrs("10.0.0.2/31"), ["10.0.0.2", "10.0.0.3"]);
        assert_eq!(addrs("10.0.0.5/30"), addrs("10.0.0.4/30"));
    }

    #[test]
    fn test_single_address_prefix() {
        assert_eq!(addrs("192.168.1.7/32"), ["192.168.1.7"]);
        assert_eq!(addrs("fd00::7/128"), ["fd00::7"]);
    }

    #[test]
    fn test_stops_at_end_of_address_space() {
        assert_eq!(addrs("255.255.255.254/31"), ["255.255.255.254", "255.255.255.255"]);
        let last = PrefixAddrs::new("ffff:ffff:ffff:ffff:ffff:ffff:ffff:fffe/127".parse().unwrap());
        assert_eq!(last.count(), 2);
    }

    #[test]
    fn test_ipv6_count() {
        assert_eq!(PrefixAddrs::new("fd00::/120".parse().unwrap()).count(), 256);
    }

    #[test]
    fn test_restartable() {
        let iter = PrefixAddrs::new("10.0.0.0/29".parse().unwrap());
        let first: Vec<_> = iter.clone().collect();
        let second: Vec<_> = iter.collect();
        assert_eq!(first, second);
    }
}

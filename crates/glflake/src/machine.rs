use std::{
    io,
    net::{IpAddr, Ipv4Addr, UdpSocket},
};

// The default route first (RFC 5737 documentation address), then one address
// inside each private range, so an interface on a private network is found
// even when the default route leaves through a public one.
const ROUTE_TARGETS: [Ipv4Addr; 4] = [
    Ipv4Addr::new(192, 0, 2, 1),
    Ipv4Addr::new(10, 255, 255, 254),
    Ipv4Addr::new(172, 31, 255, 254),
    Ipv4Addr::new(192, 168, 255, 254),
];

/// Returns the first private IPv4 address this host would send from.
///
/// Each candidate comes from connecting a UDP socket towards a route target
/// and reading the local address the kernel picked. No packets are sent. An
/// interface without a route into 10/8, 172.16/12 or 192.168/16 is not found.
///
/// # Errors
///
/// Returns an error if no candidate address is in 10/8, 172.16/12 or
/// 192.168/16.
pub fn private_ipv4() -> io::Result<Ipv4Addr> {
    let candidates = ROUTE_TARGETS
        .into_iter()
        .filter_map(|target| local_addr_towards(target).ok());
    first_private(candidates).ok_or_else(|| {
        io::Error::new(io::ErrorKind::AddrNotAvailable, "no private ip address")
    })
}

/// The default machine ID: the lower 16 bits of [`private_ipv4`].
///
/// # Errors
///
/// Propagates any error from [`private_ipv4`].
pub fn lower_16_bit_private_ip() -> io::Result<u16> {
    private_ipv4().map(lower_16_bits)
}

fn local_addr_towards(target: Ipv4Addr) -> io::Result<IpAddr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.connect((target, 9))?;
    Ok(socket.local_addr()?.ip())
}

pub(crate) fn first_private(candidates: impl IntoIterator<Item = IpAddr>) -> Option<Ipv4Addr> {
    candidates.into_iter().find_map(|ip| match ip {
        IpAddr::V4(ip) if is_private_ipv4(ip) => Some(ip),
        _ => None,
    })
}

pub(crate) fn is_private_ipv4(ip: Ipv4Addr) -> bool {
    !ip.is_loopback() && ip.is_private()
}

pub(crate) fn lower_16_bits(ip: Ipv4Addr) -> u16 {
    let [_, _, hi, lo] = ip.octets();
    u16::from_be_bytes([hi, lo])
}

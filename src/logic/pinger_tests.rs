use super::pinger::resolve;
use std::net::IpAddr;

#[tokio::test]
async fn test_resolve_ipv4_literal() {
    let ip = resolve("127.0.0.1").await;
    assert_eq!(ip, Some("127.0.0.1".parse::<IpAddr>().unwrap()));
}

#[tokio::test]
async fn test_resolve_ipv6_literal() {
    let ip = resolve("::1").await;
    assert_eq!(ip, Some("::1".parse::<IpAddr>().unwrap()));
}

#[tokio::test]
async fn test_resolve_bracketed_ipv6() {
    // "[::1]".parse::<IpAddr>() fails, so the brackets must be stripped first
    let ip = resolve("[::1]").await;
    assert_eq!(ip, Some("::1".parse::<IpAddr>().unwrap()));
}

#[tokio::test]
async fn test_resolve_full_ipv6_address() {
    let address = "2001:0db8:85a3:0000:0000:8a2e:0370:7334";
    assert!(resolve(address).await.is_some());
}

#[tokio::test]
async fn test_resolve_localhost_name() {
    let ip = resolve("localhost").await;
    assert!(ip.is_some());
    assert!(ip.unwrap().is_loopback());
}

#[tokio::test]
async fn test_resolve_garbage_is_none() {
    assert_eq!(resolve("no such host, really").await, None);
}

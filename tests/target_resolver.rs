use fips_tls_probe::checks::target;
use fips_tls_probe::utils::ProbeError;

#[test]
fn test_explicit_port() {
    let endpoint = target::resolve("https://tls-proxy:8443").unwrap();
    assert_eq!(endpoint.host, "tls-proxy");
    assert_eq!(endpoint.port, 8443);
    assert_eq!(endpoint.to_string(), "https://tls-proxy:8443");
}

#[test]
fn test_default_port() {
    let endpoint = target::resolve("https://example.com").unwrap();
    assert_eq!(endpoint.host, "example.com");
    assert_eq!(endpoint.port, 443);
}

#[test]
fn test_path_and_query_ignored() {
    let endpoint = target::resolve("https://example.com:9443/login?next=/").unwrap();
    assert_eq!(endpoint.host, "example.com");
    assert_eq!(endpoint.port, 9443);
}

#[test]
fn test_http_rejected() {
    let err = target::resolve("http://example.com").unwrap_err();
    assert!(matches!(err, ProbeError::InvalidScheme { ref scheme, .. } if scheme == "http"));
    assert!(err.is_configuration());
}

#[test]
fn test_garbage_rejected() {
    let err = target::resolve("not a url").unwrap_err();
    assert!(matches!(err, ProbeError::InvalidUrl { .. }));
    assert!(err.is_configuration());
}

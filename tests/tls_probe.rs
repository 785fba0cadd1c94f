use fips_tls_probe::checks::target;
use fips_tls_probe::config::TlsSettings;
use fips_tls_probe::runner::{probe_endpoint, TlsOutcome};
use fips_tls_probe::utils::ProbeError;
use rustls::crypto::ring::{cipher_suite, default_provider};
use rustls::pki_types::{PrivateKeyDer, PrivatePkcs8KeyDer};
use rustls::ServerConfig;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;

/// TLS alert record: version 3.1, fatal protocol_version
const PROTOCOL_VERSION_ALERT: [u8; 7] = [0x15, 0x03, 0x01, 0x00, 0x02, 0x02, 0x46];

/// TLSv1.2-only server offering a single ECDHE AES-128-GCM suite
fn tls12_gcm_server_config() -> ServerConfig {
    let certified = rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
    let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(certified.key_pair.serialize_der()));

    let mut provider = default_provider();
    provider.cipher_suites = vec![cipher_suite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256];

    ServerConfig::builder_with_provider(Arc::new(provider))
        .with_protocol_versions(&[&rustls::version::TLS12])
        .unwrap()
        .with_no_client_auth()
        .with_single_cert(vec![certified.cert.der().clone()], key)
        .unwrap()
}

async fn spawn_tls_server(config: ServerConfig) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let acceptor = TlsAcceptor::from(Arc::new(config));

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                if let Ok(mut tls) = acceptor.accept(stream).await {
                    let mut buf = [0u8; 64];
                    let _ = tls.read(&mut buf).await;
                }
            });
        }
    });

    port
}

/// Server that answers any ClientHello with a protocol_version alert, the way
/// a TLSv1.0-only peer does
async fn spawn_tls10_only_server() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;
            let _ = stream.write_all(&PROTOCOL_VERSION_ALERT).await;
            let _ = stream.shutdown().await;
        }
    });

    port
}

fn settings(accept_invalid_certs: bool) -> TlsSettings {
    TlsSettings {
        connect_timeout_secs: 5,
        handshake_timeout_secs: 5,
        accept_invalid_certs,
    }
}

#[tokio::test]
async fn test_tls12_aes_gcm_server_passes() {
    let port = spawn_tls_server(tls12_gcm_server_config()).await;
    let endpoint = target::resolve(&format!("https://127.0.0.1:{}", port)).unwrap();

    let report = probe_endpoint(endpoint, &settings(true)).await.unwrap();
    let verdict = report.verdict();
    assert!(verdict.ok, "{}", verdict.detail);

    match &report.outcome {
        TlsOutcome::Negotiated { handshake, policy } => {
            assert!(policy.passed);
            assert_eq!(handshake.session.protocol_version, "TLSv1.2");
            assert_eq!(
                handshake.session.cipher_suite.as_deref(),
                Some("TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256")
            );
            assert!(!handshake.trust_verified);
            assert_eq!(handshake.peer_certificates, 1);
        }
        other => panic!("expected a negotiated session, got {:?}", other),
    }
    assert!(verdict.detail.contains("TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256"));
}

#[tokio::test]
async fn test_self_signed_rejected_when_validating() {
    let port = spawn_tls_server(tls12_gcm_server_config()).await;
    let endpoint = target::resolve(&format!("https://127.0.0.1:{}", port)).unwrap();

    let report = probe_endpoint(endpoint, &settings(false)).await.unwrap();
    assert!(!report.passed());
    assert!(matches!(
        report.outcome,
        TlsOutcome::ConnectionFailed(ProbeError::Connection { .. })
    ));
}

#[tokio::test]
async fn test_tls10_only_server_is_connection_failure() {
    let port = spawn_tls10_only_server().await;
    let endpoint = target::resolve(&format!("https://127.0.0.1:{}", port)).unwrap();

    let report = probe_endpoint(endpoint, &settings(true)).await.unwrap();
    let verdict = report.verdict();
    assert!(!verdict.ok);
    match &report.outcome {
        TlsOutcome::ConnectionFailed(ProbeError::Connection { message, .. }) => {
            assert!(message.contains("ProtocolVersion"), "{}", message);
        }
        other => panic!("expected a connection failure, got {:?}", other),
    }
    assert!(verdict.detail.contains("TLS handshake"));
}

#[tokio::test]
async fn test_nothing_listening_is_connection_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let endpoint = target::resolve(&format!("https://127.0.0.1:{}", port)).unwrap();
    let report = probe_endpoint(endpoint, &settings(true)).await.unwrap();
    assert!(matches!(report.outcome, TlsOutcome::ConnectionFailed(_)));
}

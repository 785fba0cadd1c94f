//! TLS handshake prober
//!
//! Performs one cold TLS handshake against an endpoint and reports the
//! negotiated protocol version and cipher suite. Only TLS 1.3 and TLS 1.2 are
//! advertised, so a peer limited to TLS 1.1 or older fails the handshake
//! instead of being downgraded.
//!
//! Certificate validation is on unless `accept_invalid_certs` is set. That
//! flag exists for self-signed test endpoints and must never be enabled
//! against untrusted real-world peers.

use crate::config::TlsSettings;
use crate::models::{Endpoint, NegotiatedSession, UNKNOWN_PROTOCOL};
use crate::utils::{ProbeError, Result};
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{CryptoProvider, WebPkiSupportedAlgorithms};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{
    ClientConfig, DigitallySignedStruct, Error as RustlsError, ProtocolVersion, RootCertStore,
    SignatureScheme, SupportedProtocolVersion,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tracing::{debug, warn};

/// Protocol versions offered in the ClientHello
static OFFERED_VERSIONS: &[&SupportedProtocolVersion] =
    &[&rustls::version::TLS13, &rustls::version::TLS12];

/// A certificate verifier that accepts any certificate chain.
///
/// Handshake signatures are still checked, so the peer must hold the key for
/// the certificate it presents.
#[derive(Debug)]
struct AcceptAnyCertVerifier {
    algorithms: WebPkiSupportedAlgorithms,
}

impl ServerCertVerifier for AcceptAnyCertVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> std::result::Result<ServerCertVerified, RustlsError> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, RustlsError> {
        rustls::crypto::verify_tls12_signature(message, cert, dss, &self.algorithms)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, RustlsError> {
        rustls::crypto::verify_tls13_signature(message, cert, dss, &self.algorithms)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.algorithms.supported_schemes()
    }
}

/// Parameters observed on one completed handshake
#[derive(Debug, Clone, Serialize)]
pub struct HandshakeInfo {
    pub session: NegotiatedSession,
    /// False when the certificate chain was accepted without validation
    pub trust_verified: bool,
    /// Whether the client crypto provider reports FIPS operation
    pub client_fips: bool,
    /// Number of certificates the peer presented
    pub peer_certificates: usize,
    pub handshake_ms: f64,
}

/// TLS handshake prober
pub struct TlsProber {
    settings: TlsSettings,
    provider: Arc<CryptoProvider>,
}

impl TlsProber {
    /// Create a prober using the ring crypto provider
    pub fn new(settings: TlsSettings) -> Self {
        Self {
            settings,
            provider: Arc::new(rustls::crypto::ring::default_provider()),
        }
    }

    fn client_config(&self) -> Result<ClientConfig> {
        let builder = ClientConfig::builder_with_provider(Arc::clone(&self.provider))
            .with_protocol_versions(OFFERED_VERSIONS)?;

        let config = if self.settings.accept_invalid_certs {
            let verifier = AcceptAnyCertVerifier {
                algorithms: self.provider.signature_verification_algorithms,
            };
            builder
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(verifier))
                .with_no_client_auth()
        } else {
            let root_store =
                RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
            builder
                .with_root_certificates(root_store)
                .with_no_client_auth()
        };

        Ok(config)
    }

    /// Connect, handshake, inspect the session and close the connection.
    ///
    /// Any network or handshake failure is returned as
    /// [`ProbeError::Connection`]. There is no retry.
    pub async fn probe(&self, endpoint: &Endpoint) -> Result<HandshakeInfo> {
        let config = Arc::new(self.client_config()?);
        let client_fips = config.fips();
        let connector = TlsConnector::from(config);

        let target = endpoint.to_string();
        let connection_error = |message: String| ProbeError::Connection {
            target: target.clone(),
            message,
        };

        if self.settings.accept_invalid_certs {
            warn!(%target, "certificate validation disabled for this probe (test endpoints only)");
        }

        let server_name = ServerName::try_from(endpoint.host.clone())
            .map_err(|_| connection_error(format!("invalid server name: {}", endpoint.host)))?;

        debug!(%target, "opening TCP connection");
        let stream = tokio::time::timeout(
            self.settings.connect_timeout(),
            TcpStream::connect((endpoint.host.as_str(), endpoint.port)),
        )
        .await
        .map_err(|_| connection_error("TCP connection timed out".to_string()))?
        .map_err(|e| connection_error(e.to_string()))?;

        let started = Instant::now();
        let mut tls_stream = tokio::time::timeout(
            self.settings.handshake_timeout(),
            connector.connect(server_name, stream),
        )
        .await
        .map_err(|_| connection_error("TLS handshake timed out".to_string()))?
        .map_err(|e| connection_error(format!("TLS handshake failed: {}", e)))?;
        let handshake_ms = started.elapsed().as_secs_f64() * 1000.0;

        let (_, client_connection) = tls_stream.get_ref();
        let session = NegotiatedSession::new(
            protocol_name(client_connection.protocol_version()),
            client_connection
                .negotiated_cipher_suite()
                .map(|cs| format!("{:?}", cs.suite())),
        );
        let peer_certificates = client_connection
            .peer_certificates()
            .map(|certs| certs.len())
            .unwrap_or(0);

        debug!(
            protocol = %session.protocol_version,
            cipher = %session.cipher_display(),
            "handshake complete"
        );

        if let Err(e) = tls_stream.shutdown().await {
            debug!("close_notify failed: {}", e);
        }

        Ok(HandshakeInfo {
            session,
            trust_verified: !self.settings.accept_invalid_certs,
            client_fips,
            peer_certificates,
            handshake_ms,
        })
    }
}

/// Name a negotiated protocol version the way OpenSSL does
fn protocol_name(version: Option<ProtocolVersion>) -> String {
    match version {
        Some(ProtocolVersion::TLSv1_3) => "TLSv1.3".to_string(),
        Some(ProtocolVersion::TLSv1_2) => "TLSv1.2".to_string(),
        Some(ProtocolVersion::TLSv1_1) => "TLSv1.1".to_string(),
        Some(ProtocolVersion::TLSv1_0) => "TLSv1".to_string(),
        Some(ProtocolVersion::SSLv3) => "SSLv3".to_string(),
        Some(other) => format!("{:?}", other),
        None => UNKNOWN_PROTOCOL.to_string(),
    }
}

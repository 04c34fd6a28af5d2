//! Plaintext and TLS accept loops serving the shared [`Router`].
//!
//! Each listener runs independently; neither shares mutable state with the
//! other. Both run until the process is killed or the bind fails.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use hyper::{body::Incoming, Request};
use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server::conn::auto,
};
use rustls::ServerConfig;
use tokio::net::{TcpListener, TcpStream};
use tokio_rustls::TlsAcceptor;
use tower::ServiceExt;
use tracing::{debug, error, info, warn};

/// Serve `router` over plain HTTP on `addr`.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server stops.
pub async fn serve_http(addr: SocketAddr, router: Router) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind http listener on {addr}"))?;
    info!(addr = %addr, "http server listening");

    axum::serve(listener, router)
        .await
        .context("http server stopped")
}

/// Serve `router` over HTTPS on `addr`, terminating TLS with `tls_config`.
///
/// Handshake and connection errors are logged per connection and never stop
/// the accept loop.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound.
pub async fn serve_https(addr: SocketAddr, tls_config: Arc<ServerConfig>, router: Router) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind https listener on {addr}"))?;
    let acceptor = TlsAcceptor::from(tls_config);
    info!(addr = %addr, "https server listening");

    loop {
        match listener.accept().await {
            Ok((tcp_stream, peer_addr)) => {
                debug!(%peer_addr, "accepted TCP connection");
                let acceptor = acceptor.clone();
                let router = router.clone();
                tokio::spawn(async move {
                    handle_tls_connection(tcp_stream, peer_addr, acceptor, router).await;
                });
            }
            Err(e) => {
                error!(error = %e, "accept error");
            }
        }
    }
}

/// Complete the TLS handshake and serve HTTP/1.1 or HTTP/2 on one connection.
async fn handle_tls_connection(
    tcp_stream: TcpStream,
    peer_addr: SocketAddr,
    acceptor: TlsAcceptor,
    router: Router,
) {
    let tls_stream = match acceptor.accept(tcp_stream).await {
        Ok(s) => s,
        Err(e) => {
            warn!(%peer_addr, error = %e, "tls handshake failed");
            return;
        }
    };

    let service = hyper::service::service_fn(move |req: Request<Incoming>| router.clone().oneshot(req));

    if let Err(e) = auto::Builder::new(TokioExecutor::new())
        .serve_connection(TokioIo::new(tls_stream), service)
        .await
    {
        debug!(%peer_addr, error = %e, "connection closed with error");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{header, StatusCode},
    };
    use bytes::Bytes;
    use rustls::{pki_types::ServerName, ClientConfig, RootCertStore};
    use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
    use tokio_rustls::TlsConnector;

    use crate::server::{router, state::AppState, tls};

    /// Reserve an ephemeral port, then release it for the server under test.
    async fn free_addr() -> SocketAddr {
        let reserved = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = reserved.local_addr().unwrap();
        drop(reserved);
        addr
    }

    async fn connect(addr: SocketAddr) -> TcpStream {
        for _ in 0..200 {
            if let Ok(s) = TcpStream::connect(addr).await {
                return s;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("server on {addr} never accepted");
    }

    /// Send `POST /v2/p` over `io` with an HTTP/1.1 client and collect the
    /// decoded response body.
    async fn post_echo<I>(io: I) -> (StatusCode, Bytes)
    where
        I: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(io))
            .await
            .unwrap();
        tokio::spawn(conn);

        let req = Request::builder()
            .method("POST")
            .uri("/v2/p")
            .header(header::HOST, "localhost")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::empty())
            .unwrap();
        let resp = sender.send_request(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(Body::new(resp.into_body()), usize::MAX)
            .await
            .unwrap();
        (status, body)
    }

    fn client_config(trusted: &tls::test_support::SelfSigned) -> Arc<ClientConfig> {
        let mut roots = RootCertStore::empty();
        roots.add(trusted.cert_der.clone()).unwrap();
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let mut config = ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()
            .unwrap()
            .with_root_certificates(roots)
            .with_no_client_auth();
        config.alpn_protocols = vec![b"http/1.1".to_vec()];
        Arc::new(config)
    }

    #[tokio::test]
    async fn http_bind_conflict_is_reported() {
        let held = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = held.local_addr().unwrap();
        let err = serve_http(addr, Router::new()).await.unwrap_err();
        assert!(err.to_string().contains("failed to bind http listener"));
    }

    #[tokio::test]
    async fn http_listener_serves_router() {
        let addr = free_addr().await;
        let app = router::build(AppState::default());
        tokio::spawn(serve_http(addr, app));

        let (status, body) = post_echo(connect(addr).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body[..], b"pong");
    }

    #[tokio::test]
    async fn https_listener_serves_router() {
        let pair = tls::test_support::self_signed_localhost();
        let server_config = tls::build_server_config(&pair.cert_pem, &pair.key_pem).unwrap();

        let addr = free_addr().await;
        let app = router::build(AppState::default());
        tokio::spawn(serve_https(addr, server_config, app));

        let tcp = connect(addr).await;
        let connector = TlsConnector::from(client_config(&pair));
        let tls_stream = connector
            .connect(ServerName::try_from("localhost").unwrap(), tcp)
            .await
            .unwrap();
        assert_eq!(tls_stream.get_ref().1.alpn_protocol(), Some(&b"http/1.1"[..]));

        let (status, body) = post_echo(tls_stream).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body[..], b"pong");
    }

    #[tokio::test]
    async fn failed_handshake_does_not_stop_https_listener() {
        let pair = tls::test_support::self_signed_localhost();
        let server_config = tls::build_server_config(&pair.cert_pem, &pair.key_pem).unwrap();

        let addr = free_addr().await;
        tokio::spawn(serve_https(addr, server_config, router::build(AppState::default())));

        // A plaintext request is not a TLS ClientHello; the server drops it.
        let mut plain = connect(addr).await;
        plain
            .write_all(b"POST /v2/p HTTP/1.1\r\nHost: localhost\r\n\r\n")
            .await
            .unwrap();
        let mut discarded = Vec::new();
        let _ = plain.read_to_end(&mut discarded).await;

        let tcp = connect(addr).await;
        let tls_stream = TlsConnector::from(client_config(&pair))
            .connect(ServerName::try_from("localhost").unwrap(), tcp)
            .await
            .unwrap();
        let (status, body) = post_echo(tls_stream).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body[..], b"pong");
    }
}

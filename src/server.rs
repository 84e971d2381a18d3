use std::{net::SocketAddr, path::Path};

use axum::Router;
use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server::conn::auto,
    service::TowerToHyperService,
};
use native_tls::Identity;
use tokio::net::TcpListener;
use tokio_native_tls::TlsAcceptor;
use tokio_util::sync::CancellationToken;

use crate::{Res, error::SetupError, info, success, warning};

/// Builds a TLS acceptor from a PKCS#12 (`.pfx`) bundle.
///
/// # Errors
///
/// - [`SetupError::Io`] if the bundle cannot be read
/// - [`SetupError::Tls`] if the passphrase is wrong or the bundle is not a
///   usable identity
pub async fn load_tls_acceptor(
    pfx_path: &Path,
    passphrase: &str,
) -> Result<TlsAcceptor, SetupError> {
    let der = async_fs::read(pfx_path)
        .await
        .map_err(|source| SetupError::Io {
            path: pfx_path.to_path_buf(),
            source,
        })?;

    let identity = Identity::from_pkcs12(&der, passphrase)?;
    let acceptor = native_tls::TlsAcceptor::new(identity)?;
    Ok(TlsAcceptor::from(acceptor))
}

/// Serves `app` over TLS on `0.0.0.0:port` until `shutdown` is cancelled.
///
/// Each accepted connection gets its own task: TLS handshake first, then
/// HTTP/1.1 or HTTP/2 depending on what the client speaks. A failing
/// handshake or connection is logged and does not affect the listener.
pub async fn start_api_server(
    app: Router,
    acceptor: TlsAcceptor,
    port: u16,
    shutdown: CancellationToken,
) -> Res<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    success!("Server running at https://localhost:{}", port);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Shutting down listener");
                break;
            }
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        warning!("Failed to accept connection: {}", e);
                        continue;
                    }
                };

                let acceptor = acceptor.clone();
                let app = app.clone();
                tokio::spawn(async move {
                    let tls = match acceptor.accept(stream).await {
                        Ok(tls) => tls,
                        Err(e) => {
                            warning!("TLS handshake with {} failed: {}", peer, e);
                            return;
                        }
                    };

                    let service = TowerToHyperService::new(app);
                    if let Err(e) = auto::Builder::new(TokioExecutor::new())
                        .serve_connection(TokioIo::new(tls), service)
                        .await
                    {
                        warning!("Connection with {} ended with error: {}", peer, e);
                    }
                });
            }
        }
    }

    Ok(())
}

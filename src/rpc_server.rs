use crate::error::ConnectorError;
use crate::ethereum::EthConnector;
use crate::ffcapi::{LiveResponse, ReadyResponse, TransactionSendRequest, TransactionSendResponse};
use jsonrpsee::{
    core::{async_trait, RpcResult},
    proc_macros::rpc,
    server::{ServerBuilder, ServerHandle},
    types::ErrorObjectOwned,
};
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

const INTERNAL_ERROR_CODE: i32 = -32603;

// Define the JSON-RPC interface
#[rpc(server)]
pub trait ConnectorRpc {
    #[method(name = "send_transaction")]
    async fn send_transaction(
        &self,
        request: TransactionSendRequest,
    ) -> RpcResult<TransactionSendResponse>;

    #[method(name = "is_live")]
    async fn is_live(&self) -> RpcResult<LiveResponse>;

    #[method(name = "is_ready")]
    async fn is_ready(&self) -> RpcResult<ReadyResponse>;
}

pub struct ConnectorRpcImpl {
    connector: Arc<EthConnector>,
}

impl ConnectorRpcImpl {
    pub fn new(connector: Arc<EthConnector>) -> Self {
        Self { connector }
    }
}

/// The message carries the error text; `data` carries `{ reason, error, code }`.
fn to_rpc_error(err: ConnectorError) -> ErrorObjectOwned {
    ErrorObjectOwned::owned(INTERNAL_ERROR_CODE, err.to_string(), Some(err.to_response()))
}

#[async_trait]
impl ConnectorRpcServer for ConnectorRpcImpl {
    async fn send_transaction(
        &self,
        request: TransactionSendRequest,
    ) -> RpcResult<TransactionSendResponse> {
        self.connector
            .transaction_send(&request)
            .await
            .map_err(to_rpc_error)
    }

    async fn is_live(&self) -> RpcResult<LiveResponse> {
        Ok(self.connector.is_live())
    }

    async fn is_ready(&self) -> RpcResult<ReadyResponse> {
        // A probe always answers; a failed check is reported as not ready.
        match self.connector.is_ready().await {
            Ok(ready) => Ok(ready),
            Err(err) => {
                warn!(method = err.method(), "readiness check failed: {err}");
                Ok(ReadyResponse {
                    ready: false,
                    downstream_details: Some(json!(err.to_response())),
                })
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: jsonrpsee::core::Error,
    },
    #[error("server already stopped")]
    AlreadyStopped,
}

/// Running JSON-RPC endpoint for the connector.
pub struct RpcServer {
    handle: ServerHandle,
    addr: SocketAddr,
}

impl RpcServer {
    pub async fn new(bind_addr: SocketAddr, connector: Arc<EthConnector>) -> Result<Self, ServerError> {
        let bind_failed = |source| ServerError::Bind {
            addr: bind_addr,
            source,
        };

        // Browser-based clients call the connector directly.
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_headers(Any)
            .allow_methods(Any);

        let server = ServerBuilder::default()
            .set_middleware(tower::ServiceBuilder::new().layer(cors))
            .build(bind_addr)
            .await
            .map_err(bind_failed)?;
        let addr = server.local_addr().map_err(bind_failed)?;

        let handle = server.start(ConnectorRpcImpl::new(connector).into_rpc());
        Ok(Self { handle, addr })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop accepting requests and wait for in-flight ones to finish.
    pub async fn stop(self) -> Result<(), ServerError> {
        self.handle.stop().map_err(|_| ServerError::AlreadyStopped)?;
        self.handle.stopped().await;
        Ok(())
    }
}

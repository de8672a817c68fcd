//! Send-then-receive helper shared by the state machines

use bytes::Bytes;
use heatlink_core::{hex_dump, SessionResult};
use heatlink_transport::TransportLayer;

/// Send one request and wait for its reply
///
/// The reply is dumped at debug level under `label`.
pub async fn exchange<T: TransportLayer + ?Sized>(
    transport: &mut T,
    payload: &[u8],
    label: &str,
) -> SessionResult<Bytes> {
    transport.send(payload).await?;
    receive_logged(transport, label).await
}

/// Wait for one reply without sending anything first
pub async fn receive_logged<T: TransportLayer + ?Sized>(
    transport: &mut T,
    label: &str,
) -> SessionResult<Bytes> {
    let reply = transport.receive().await?;
    if log::log_enabled!(log::Level::Debug) {
        log::debug!("{} ({} bytes):\n{}", label, reply.len(), hex_dump(&reply));
    }
    Ok(reply)
}

use crate::constants::ACK_REPLY;
use crate::core_command::{Request, TransferOutcome};
use crate::core_error::SessionError;
use crate::core_network::data::DataChannel;
use crate::helpers::send_line;
use crate::session::Session;
use log::{info, warn};
use tokio::io::BufReader;
use tokio::net::TcpStream;

/// Serves one control connection from the first command line to the final
/// status line.
///
/// The data listener is bound before the acknowledgment goes out, so the
/// client may connect as soon as it has read `1`. If the bind fails the
/// session ends without an acknowledgment.
pub async fn handle_control_connection(
    socket: TcpStream,
    session: Session,
) -> Result<TransferOutcome, SessionError> {
    let host = session.client_host();
    info!("Connection from {}", host);

    let mut stream = BufReader::new(socket);

    let request = match Request::read_from(&mut stream).await {
        Ok(request) => Some(request),
        Err(e @ SessionError::Parse(_)) => {
            warn!("Invalid request from {}: {}", host, e);
            None
        }
        Err(e) => return Err(e),
    };

    let outcome = match request {
        Some(request) => {
            info!("{} requested {}", host, request);

            let channel =
                DataChannel::bind(session.data_bind_address, request.data_port()).await?;
            send_line(stream.get_mut(), ACK_REPLY).await?;

            channel.serve(&session, &request).await?
        }
        None => TransferOutcome::InvalidCommand,
    };

    match outcome.control_reply() {
        Some(reply) => {
            info!(
                "Sending \"{}\" to {}:{}",
                reply,
                host,
                session.peer.port()
            );
            send_line(stream.get_mut(), reply).await?;
        }
        None => info!("Transfer to {} complete", host),
    }

    Ok(outcome)
}

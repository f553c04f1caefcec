use crate::constants::NOT_FOUND_SIZE;
use crate::core_command::{Command, Request, TransferOutcome};
use crate::core_error::SessionError;
use crate::core_fs::{list_regular_files, open_file};
use crate::helpers::send_line;
use crate::session::Session;
use log::{debug, error, info};
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt, BufWriter};
use tokio::net::TcpListener;

/// The listening side of one data connection.
///
/// Bound once per request and consumed by [`DataChannel::serve`], which
/// accepts a single connection and closes the listener.
#[derive(Debug)]
pub struct DataChannel {
    listener: TcpListener,
    port: u16,
}

impl DataChannel {
    /// Binds the data listener on `address:port`.
    pub async fn bind(address: IpAddr, port: u16) -> Result<Self, SessionError> {
        let listener = TcpListener::bind((address, port))
            .await
            .map_err(|source| SessionError::Bind { port, source })?;
        debug!("Data listener set up on {}:{}", address, port);
        Ok(Self { listener, port })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts one connection, sends the payload for `request` and closes.
    ///
    /// Whoever connects first gets the payload; the peer is not checked
    /// against the control connection.
    pub async fn serve(
        self,
        session: &Session,
        request: &Request,
    ) -> Result<TransferOutcome, SessionError> {
        let local = self.local_addr()?;
        let DataChannel { listener, port } = self;
        let (stream, peer) = listener.accept().await?;
        drop(listener);
        debug!("Accepted data connection from {} on {}", peer, local);

        let mut writer = BufWriter::with_capacity(session.download_buffer_size, stream);
        let result = match request.command() {
            Command::List => {
                info!("List directory requested on port {}", port);
                send_listing(&mut writer, &session.root_dir).await
            }
            Command::Get => {
                let filename = request.filename().unwrap_or_default();
                info!("File {} requested on port {}", filename, port);
                send_file(&mut writer, &session.root_dir, filename).await
            }
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Data transfer to {} failed: {}", peer, e);
                return Err(e);
            }
        };

        writer.shutdown().await?;
        Ok(outcome)
    }
}

/// Writes one line per regular file in `root`. The end of the listing is
/// signalled by closing the connection.
pub async fn send_listing<W>(writer: &mut W, root: &Path) -> Result<TransferOutcome, SessionError>
where
    W: AsyncWrite + Unpin,
{
    let names = list_regular_files(root).await?;
    for name in &names {
        writer.write_all(name.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }
    writer.flush().await?;

    debug!("Sent {} directory entries", names.len());
    Ok(TransferOutcome::Success)
}

/// Writes the size line followed by exactly that many raw bytes, or a `0`
/// size line when the file is unavailable.
pub async fn send_file<W>(
    writer: &mut W,
    root: &Path,
    filename: &str,
) -> Result<TransferOutcome, SessionError>
where
    W: AsyncWrite + Unpin,
{
    let source = match open_file(root, filename).await {
        Ok(source) => source,
        Err(SessionError::NotFound(name)) => {
            info!("File not found: {}", name);
            send_line(writer, NOT_FOUND_SIZE).await?;
            return Ok(TransferOutcome::FileNotFound);
        }
        Err(e) => return Err(e),
    };

    info!("Sending {:?} ({} bytes)", source.path, source.size);
    send_line(writer, &source.size.to_string()).await?;

    let mut content = source.file.take(source.size);
    let sent = tokio::io::copy(&mut content, writer).await?;
    if sent < source.size {
        return Err(SessionError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "{} shrank during transfer: sent {} of {} bytes",
                filename, sent, source.size
            ),
        )));
    }
    writer.flush().await?;

    Ok(TransferOutcome::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::collections::HashSet;
    use tokio::net::TcpStream;

    fn sample_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"test").unwrap();
        std::fs::write(dir.path().join("notes"), b"").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_send_listing() {
        let dir = sample_dir();
        let mut out: Vec<u8> = Vec::new();

        let outcome = send_listing(&mut out, dir.path()).await.unwrap();
        assert_eq!(outcome, TransferOutcome::Success);

        let text = String::from_utf8(out).unwrap();
        let names: HashSet<&str> = text.lines().collect();
        assert_eq!(text.lines().count(), 2);
        assert_eq!(names, HashSet::from(["a.txt", "notes"]));
    }

    #[tokio::test]
    async fn test_send_file() {
        let dir = sample_dir();
        let mut out: Vec<u8> = Vec::new();

        let outcome = send_file(&mut out, dir.path(), "a.txt").await.unwrap();
        assert_eq!(outcome, TransferOutcome::Success);
        assert_eq!(out, b"4\ntest");
    }

    #[tokio::test]
    async fn test_send_empty_file() {
        let dir = sample_dir();
        let mut out: Vec<u8> = Vec::new();

        let outcome = send_file(&mut out, dir.path(), "notes").await.unwrap();
        assert_eq!(outcome, TransferOutcome::Success);
        assert_eq!(out, b"0\n");
    }

    #[tokio::test]
    async fn test_send_binary_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let content: Vec<u8> = (0..=255u8).cycle().take(3000).collect();
        std::fs::write(dir.path().join("blob.bin"), &content).unwrap();
        let mut out: Vec<u8> = Vec::new();

        send_file(&mut out, dir.path(), "blob.bin").await.unwrap();

        let (size_line, payload) = out.split_at(5);
        assert_eq!(size_line, b"3000\n");
        assert_eq!(payload, &content[..]);
    }

    #[tokio::test]
    async fn test_send_missing_or_directory() {
        let dir = sample_dir();

        for name in ["missing.txt", "sub"] {
            let mut out: Vec<u8> = Vec::new();
            let outcome = send_file(&mut out, dir.path(), name).await.unwrap();
            assert_eq!(outcome, TransferOutcome::FileNotFound);
            assert_eq!(out, b"0\n");
        }
    }

    #[tokio::test]
    async fn test_bind_conflict_is_bind_error() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();

        let err = DataChannel::bind("127.0.0.1".parse().unwrap(), port)
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Bind { port: p, .. } if p == port));
    }

    #[tokio::test]
    async fn test_serve_single_connection() {
        let dir = sample_dir();
        let mut config = Config::default();
        config.server.root_dir = dir.path().to_path_buf();
        let session = Session::new("127.0.0.1:40000".parse().unwrap(), &config).unwrap();

        let channel = DataChannel::bind("127.0.0.1".parse().unwrap(), 0)
            .await
            .unwrap();
        let addr = channel.local_addr().unwrap();

        let client = tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            let mut received = Vec::new();
            stream.read_to_end(&mut received).await.unwrap();
            received
        });

        let request = Request::get("a.txt", addr.port());
        let outcome = channel.serve(&session, &request).await.unwrap();
        assert_eq!(outcome, TransferOutcome::Success);
        assert_eq!(client.await.unwrap(), b"4\ntest");

        // The listener is gone once the transfer is over
        assert!(TcpStream::connect(addr).await.is_err());
    }
}

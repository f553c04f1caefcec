use crate::core_error::SessionError;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Reads one line, stripping the `\n` or `\r\n` terminator.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
/// garbled line still reaches the command parser. End of stream before any
/// byte arrives is reported as an unexpected EOF; `what` names the missing
/// line in that error.
pub async fn read_line<R>(reader: &mut R, what: &str) -> Result<String, SessionError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buffer = Vec::new();
    let n = reader.read_until(b'\n', &mut buffer).await?;
    if n == 0 {
        return Err(SessionError::unexpected_eof(what));
    }

    if buffer.ends_with(b"\n") {
        buffer.pop();
    }
    if buffer.ends_with(b"\r") {
        buffer.pop();
    }
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Sends a single `\n`-terminated line and flushes it.
pub async fn send_line<W>(writer: &mut W, message: &str) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(message.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

//! Message framing over a byte stream.
//!
//! One connection carries exactly one message and the message ends where the
//! sender shuts down its write direction. There is no length prefix and no
//! checksum. Nothing outside this module relies on that, so a framed transport
//! can replace these two functions without touching export or import.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::constants::replication::RECEIVE_BUFFER_CAPACITY;

/// Write the whole message, then half-close so the reader sees end-of-stream.
pub async fn write_message<W>(stream: &mut W, bytes: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    stream.write_all(bytes).await?;
    stream.flush().await?;
    stream.shutdown().await
}

/// Accumulate bytes until the peer half-closes.
///
/// No timeout: a peer that never closes its write side keeps this pending.
pub async fn read_message<R>(stream: &mut R) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = Vec::with_capacity(RECEIVE_BUFFER_CAPACITY);
    stream.read_to_end(&mut buffer).await?;
    Ok(buffer)
}

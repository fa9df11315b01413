use crate::model::ReadStopReason;
use futures::FutureExt;
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};

#[derive(Debug, Clone, Default)]
pub struct ReadResult {
    pub bytes: Vec<u8>,
    pub reason: ReadStopReason,
}

/// Reads whatever is already available, one byte at a time, handing each
/// byte to `emit` as it arrives.
///
/// Each read is polled exactly once. The first read that is not immediately
/// ready ends the drain, so this never waits for the peer.
pub fn drain<T, F>(stream: &mut T, mut emit: F) -> io::Result<ReadResult>
where
    T: AsyncRead + Unpin,
    F: FnMut(u8) -> io::Result<()>,
{
    let mut result = ReadResult::default();
    let mut byte = [0u8; 1];
    loop {
        match stream.read(&mut byte).now_or_never() {
            None => {
                result.reason = ReadStopReason::Drained;
                break;
            }
            Some(Ok(0)) => {
                result.reason = ReadStopReason::ConnectionClosed;
                break;
            }
            Some(Ok(_)) => {
                emit(byte[0])?;
                result.bytes.push(byte[0]);
            }
            Some(Err(err)) => return Err(err),
        }
    }
    Ok(result)
}

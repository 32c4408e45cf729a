//! JSON-lines message channel
//!
//! Reads one message per line and writes one response per line. Messages
//! are handled one at a time.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use craft_core::{CompletionProvider, Error, Result};

use crate::messages::Response;
use crate::service::EnhancementService;

/// Serve messages from `reader` until end of input; returns how many were answered
pub async fn serve<P, R, W>(service: &EnhancementService<P>, mut reader: R, mut writer: W) -> Result<usize>
where
    P: CompletionProvider,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buffer = Vec::new();
    let mut answered = 0;

    info!("Message channel ready");

    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer).await? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buffer) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => service.handle_line(line.trim()).await,
            Err(e) => {
                warn!(error = %e, "Rejected message that is not UTF-8");
                Response::failure(&Error::InvalidMessage(format!("message is not valid UTF-8: {e}")))
            }
        };
        debug!(success = response.success, "Answered message");

        let mut output = response.to_line()?;
        output.push('\n');
        writer.write_all(output.as_bytes()).await?;
        writer.flush().await?;
        answered += 1;
    }

    info!(answered, "Message channel closed");
    Ok(answered)
}

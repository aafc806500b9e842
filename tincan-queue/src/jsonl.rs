//! Transport that writes each statement as one line of JSON.

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::error::Result;
use crate::traits::Transport;

/// Writes statements to an async writer, one JSON document per line.
pub struct JsonLinesTransport<W> {
    writer: Mutex<W>,
}

impl<W> JsonLinesTransport<W>
where
    W: AsyncWrite + Unpin + Send,
{
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<T, W> Transport<T> for JsonLinesTransport<W>
where
    T: Serialize + Send + Sync,
    W: AsyncWrite + Unpin + Send,
{
    async fn send(&self, statement: &T) -> Result<()> {
        let mut line = serde_json::to_vec(statement)?;
        line.push(b'\n');

        let mut writer = self.writer.lock().await;
        writer.write_all(&line).await?;
        writer.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn writes_one_line_per_statement() {
        let transport = JsonLinesTransport::new(Vec::new());

        transport.send(&json!({"verb": "started"})).await.unwrap();
        transport.send(&json!({"verb": "stopped"})).await.unwrap();

        let output = String::from_utf8(transport.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, vec![r#"{"verb":"started"}"#, r#"{"verb":"stopped"}"#]);
    }
}

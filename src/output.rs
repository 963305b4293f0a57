// ABOUTME: Demultiplexes a container's raw attach stream into clean lines.
// ABOUTME: Strips frame headers, splits lines, and prefixes with a label.

use crate::runtime::OutputStream;
use crate::types::{ContainerIdentity, ContainerKind};
use futures::StreamExt;
use tracing::warn;

/// Size of the header the daemon's stream-multiplexing protocol prepends
/// to each chunk on the attach socket.
const STREAM_HEADER_LEN: usize = 8;

/// Width of the name label in front of every output line.
const LABEL_WIDTH: usize = 16;

const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// Turns raw attach chunks into prefixed text lines.
///
/// Each chunk loses its frame header, is decoded as text, and is split
/// on `\r\n`, `\r`, or `\n`. Segments without a single word character
/// are dropped; the rest are prefixed with a fixed-width, color-coded
/// label derived from the container's friendly name.
pub struct OutputPrefixer {
    label: String,
}

impl OutputPrefixer {
    pub fn new(identity: &ContainerIdentity) -> Self {
        let color = match identity.kind() {
            ContainerKind::Router => MAGENTA,
            _ => CYAN,
        };

        let name: String = identity.friendly_name().chars().take(LABEL_WIDTH).collect();
        let label = format!("{color}{name:<width$}{RESET}", width = LABEL_WIDTH);

        Self { label }
    }

    /// Format one chunk into zero or more printable lines.
    pub fn lines(&self, chunk: &[u8]) -> Vec<String> {
        let payload = chunk.get(STREAM_HEADER_LEN..).unwrap_or_default();
        let text = String::from_utf8_lossy(payload);

        text.split(['\r', '\n'])
            .filter(|segment| segment.chars().any(|c| c.is_alphanumeric() || c == '_'))
            .map(|segment| format!(" {} {}", self.label, segment))
            .collect()
    }

    /// Consume the attach stream, printing each line as it arrives.
    /// Runs until the stream ends or errors.
    pub async fn pump(self, mut stream: OutputStream) {
        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(bytes) => {
                    for line in self.lines(&bytes) {
                        println!("{line}");
                    }
                }
                Err(e) => {
                    warn!("output stream error: {e}");
                    break;
                }
            }
        }
    }
}

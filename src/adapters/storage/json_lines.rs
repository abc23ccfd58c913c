use crate::core::{CalculationStorer, ExecutedCalculation, Result};
use crate::utils::error::ProbabilityError;
use std::io::SeekFrom;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;

/// Append-only calculation log, one JSON object per line. Only lines ending
/// in a newline are complete records.
#[derive(Debug, Clone)]
pub struct JsonLinesCalculationStorer {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonLinesCalculationStorer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Reads back every stored calculation, oldest first. A log that was
    /// never written is an empty history.
    pub async fn load_calculations(&self) -> Result<Vec<ExecutedCalculation>> {
        let _guard = self.lock.lock().await;

        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No calculation log at {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let complete = content.rfind('\n').map_or("", |i| &content[..=i]);
        if complete.len() < content.len() {
            tracing::warn!("Ignoring unterminated last line in {}", self.path.display());
        }

        complete
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(ProbabilityError::from))
            .collect()
    }
}

/// Length of the file up to and including its last newline.
async fn terminated_len(file: &mut File, len: u64) -> std::io::Result<u64> {
    if len == 0 {
        return Ok(0);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1)).await?;
    file.read_exact(&mut last).await?;
    if last[0] == b'\n' {
        return Ok(len);
    }

    let mut content = Vec::with_capacity(len as usize);
    file.seek(SeekFrom::Start(0)).await?;
    file.read_to_end(&mut content).await?;
    Ok(content
        .iter()
        .rposition(|b| *b == b'\n')
        .map_or(0, |i| i as u64 + 1))
}

impl CalculationStorer for JsonLinesCalculationStorer {
    async fn store_calculation(&self, calculation: ExecutedCalculation) -> Result<()> {
        let mut line = serde_json::to_string(&calculation)?;
        line.push('\n');

        let _guard = self.lock.lock().await;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .await?;

        let len = file.metadata().await?.len();
        let keep = terminated_len(&mut file, len).await?;
        if keep < len {
            tracing::warn!(
                "Dropping {} bytes of unterminated record from {}",
                len - keep,
                self.path.display()
            );
            file.set_len(keep).await?;
        }

        let written = async {
            file.write_all(line.as_bytes()).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = written {
            // Leave no half-written record behind.
            if let Err(truncate_error) = file.set_len(keep).await {
                tracing::error!(
                    "Could not remove partial record from {}: {}",
                    self.path.display(),
                    truncate_error
                );
            }
            return Err(e.into());
        }

        tracing::debug!("Stored calculation in {}", self.path.display());
        Ok(())
    }
}

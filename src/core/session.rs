use crate::domain::model::GenerationOutcome;
use crate::domain::ports::Storage;
use crate::utils::error::{ItineraryError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SESSION_FILE: &str = "last_itinerary.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SavedOutcome {
    saved_at: DateTime<Utc>,
    outcome: GenerationOutcome,
}

/// Holds the most recent result for redisplay. Each submission replaces it.
#[derive(Debug, Default, Clone)]
pub struct SessionSlot {
    last: Option<GenerationOutcome>,
    saved_at: Option<DateTime<Utc>>,
}

impl SessionSlot {
    pub fn store(&mut self, outcome: GenerationOutcome) -> &GenerationOutcome {
        self.saved_at = Some(Utc::now());
        self.last.insert(outcome)
    }

    pub fn last(&self) -> Option<&GenerationOutcome> {
        self.last.as_ref()
    }

    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        self.saved_at
    }

    pub async fn persist<S: Storage>(&self, storage: &S) -> Result<()> {
        let (Some(outcome), Some(saved_at)) = (&self.last, self.saved_at) else {
            tracing::debug!("Session slot empty, nothing to persist");
            return Ok(());
        };

        let saved = SavedOutcome {
            saved_at,
            outcome: outcome.clone(),
        };
        let data = serde_json::to_vec_pretty(&saved)?;
        storage.write_file(SESSION_FILE, &data).await?;
        tracing::debug!("Session slot saved to {}", SESSION_FILE);
        Ok(())
    }

    /// 讀回上一次的結果；檔案不存在時回傳空的 slot
    pub async fn restore<S: Storage>(storage: &S) -> Result<Self> {
        let data = match storage.read_file(SESSION_FILE).await {
            Ok(data) => data,
            Err(ItineraryError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => return Err(e),
        };

        let saved: SavedOutcome = serde_json::from_slice(&data)?;
        Ok(Self {
            last: Some(saved.outcome),
            saved_at: Some(saved.saved_at),
        })
    }
}

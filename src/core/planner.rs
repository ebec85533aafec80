use crate::core::prompt::build_prompt;
use crate::core::session::SessionSlot;
use crate::domain::model::{GenerationOutcome, TripRequest};
use crate::domain::ports::ChatModel;

pub struct ItineraryPlanner<M: ChatModel> {
    model: M,
}

impl<M: ChatModel> ItineraryPlanner<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Calls the model once. Errors never escape: every failure becomes
    /// `GenerationOutcome::Failed` carrying the fixed sentinel message.
    pub async fn generate(&self, request: &TripRequest) -> GenerationOutcome {
        let prompt = build_prompt(request);
        tracing::debug!(
            "Sending {} prompt chars to {} for {} ({} days, {})",
            prompt.len(),
            self.model.name(),
            request.location(),
            request.days(),
            request.month().name()
        );

        match self.model.complete(&prompt).await {
            Ok(text) => {
                tracing::info!("✅ Itinerary generated ({} chars)", text.len());
                GenerationOutcome::Itinerary(text)
            }
            Err(e) => {
                tracing::error!("Error generating itinerary: {}", e);
                tracing::debug!("💡 {}", e.recovery_suggestion());
                GenerationOutcome::failed(e.to_string())
            }
        }
    }

    /// 產生行程並覆寫 session 裡上一次的結果
    pub async fn submit<'a>(
        &self,
        request: &TripRequest,
        slot: &'a mut SessionSlot,
    ) -> &'a GenerationOutcome {
        let outcome = self.generate(request).await;
        slot.store(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FAILURE_SENTINEL;
    use crate::utils::error::{ItineraryError, Result};
    use async_trait::async_trait;
    use chrono::Month;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct ScriptedModel {
        reply: Option<String>,
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
    }

    impl ScriptedModel {
        fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            self.reply.clone().ok_or_else(|| ItineraryError::BackendError {
                backend: "scripted".to_string(),
                status: 429,
                body: "quota exceeded".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_generate_returns_model_text() {
        let planner = ItineraryPlanner::new(ScriptedModel::replying("**Day 1**: Ben Thanh Market"));
        let request = TripRequest::new("Ho Chi Minh", 2, Month::January).unwrap();

        let outcome = planner.generate(&request).await;

        assert_eq!(
            outcome,
            GenerationOutcome::Itinerary("**Day 1**: Ben Thanh Market".to_string())
        );
        assert_eq!(planner.model.calls.load(Ordering::SeqCst), 1);
        let prompt = planner.model.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("2-day travel itinerary for Ho Chi Minh in January"));
    }

    #[tokio::test]
    async fn test_generate_collapses_errors_into_sentinel() {
        let planner = ItineraryPlanner::new(ScriptedModel::failing());
        let request = TripRequest::new("Lisbon", 5, Month::June).unwrap();

        let outcome = planner.generate(&request).await;

        match outcome {
            GenerationOutcome::Failed { message, cause } => {
                assert_eq!(message, FAILURE_SENTINEL);
                assert!(cause.contains("429"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(planner.model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_submit_overwrites_slot() {
        let mut slot = SessionSlot::default();
        let request = TripRequest::new("Paris", 3, Month::May).unwrap();

        let first = ItineraryPlanner::new(ScriptedModel::replying("first plan"));
        first.submit(&request, &mut slot).await;
        assert_eq!(slot.last().map(|o| o.display_text()), Some("first plan"));

        let second = ItineraryPlanner::new(ScriptedModel::failing());
        let shown = second.submit(&request, &mut slot).await;
        assert_eq!(shown.display_text(), FAILURE_SENTINEL);
        assert_eq!(slot.last().map(|o| o.display_text()), Some(FAILURE_SENTINEL));
    }
}

//! Optional remote override for the lexicon classifier.
//!
//! The platform exposes a hosted `affect-classify` function backed by an
//! LLM. When configured, its result overrides the local reading; when the
//! call fails, the local reading stands and the failure is only logged;
//! classification never depends on the network.

use serde::Deserialize;
use tracing::warn;

use crate::classifier::{self, AffectReading, MAX_INTENSITY, MIN_INTENSITY};
use crate::error::AffectError;
use crate::lexicon::Emotion;

/// Reduced reading returned by the override endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteAffect {
    pub emotion: Emotion,
    pub intensity: u8,
}

/// Seam for the override call, so the pipeline tests without a network.
pub trait OverrideClient {
    fn classify(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<RemoteAffect, AffectError>> + Send;
}

/// Override client backed by a hosted function endpoint.
#[derive(Debug, Clone)]
pub struct FunctionOverride {
    client: reqwest::Client,
    endpoint: String,
    service_key: String,
}

impl FunctionOverride {
    /// Build a client for the given endpoint URL and service key.
    ///
    /// # Errors
    ///
    /// Returns [`AffectError::Remote`] if the HTTP client cannot be built.
    pub fn new(
        endpoint: String,
        service_key: String,
        timeout: std::time::Duration,
    ) -> Result<Self, AffectError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            service_key,
        })
    }
}

impl OverrideClient for FunctionOverride {
    async fn classify(&self, text: &str) -> Result<RemoteAffect, AffectError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.service_key)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await?
            .error_for_status()?;

        let remote = response
            .json::<RemoteAffect>()
            .await
            .map_err(|e| AffectError::InvalidResponse(e.to_string()))?;

        if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&remote.intensity) {
            return Err(AffectError::InvalidResponse(format!(
                "intensity {} outside {MIN_INTENSITY}..={MAX_INTENSITY}",
                remote.intensity
            )));
        }
        Ok(remote)
    }
}

/// Classify locally, then let the override replace emotion and intensity.
///
/// The response depth is recomputed from the overriding values so the lookup
/// table stays authoritative. A failed call falls back to the local reading.
pub async fn classify_with_override(
    text: &str,
    client: &impl OverrideClient,
) -> AffectReading {
    let mut reading = classifier::classify(text);
    match client.classify(text).await {
        Ok(remote) => {
            reading.emotion = remote.emotion;
            reading.intensity = remote.intensity;
            reading.depth = classifier::depth_for(remote.emotion, remote.intensity);
        }
        Err(error) => {
            warn!(%error, "affect override failed, using local reading");
        }
    }
    reading
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ResponseDepth;
    use pretty_assertions::assert_eq;

    struct FixedOverride(RemoteAffect);

    impl OverrideClient for FixedOverride {
        async fn classify(&self, _text: &str) -> Result<RemoteAffect, AffectError> {
            Ok(RemoteAffect {
                emotion: self.0.emotion,
                intensity: self.0.intensity,
            })
        }
    }

    struct FailingOverride;

    impl OverrideClient for FailingOverride {
        async fn classify(&self, _text: &str) -> Result<RemoteAffect, AffectError> {
            Err(AffectError::Remote("boom".into()))
        }
    }

    #[tokio::test]
    async fn override_replaces_emotion_and_recomputes_depth() {
        let client = FixedOverride(RemoteAffect {
            emotion: Emotion::Anxiety,
            intensity: 9,
        });
        let reading = classify_with_override("Scheduling note only.", &client).await;
        assert_eq!(reading.emotion, Emotion::Anxiety);
        assert_eq!(reading.intensity, 9);
        assert_eq!(reading.depth, ResponseDepth::Grounding);
    }

    #[tokio::test]
    async fn failure_falls_back_to_local_reading() {
        let reading = classify_with_override("I guess it's fine.", &FailingOverride).await;
        assert_eq!(reading.emotion, Emotion::Neutral);
        assert!(reading.markers.minimizing);
        assert_eq!(reading.depth, ResponseDepth::Light);
    }

    #[tokio::test]
    async fn markers_survive_an_override() {
        let client = FixedOverride(RemoteAffect {
            emotion: Emotion::Sadness,
            intensity: 5,
        });
        let reading = classify_with_override("It's fine, I guess.", &client).await;
        assert!(reading.markers.minimizing);
        assert_eq!(reading.emotion, Emotion::Sadness);
        assert_eq!(reading.depth, ResponseDepth::Standard);
    }
}

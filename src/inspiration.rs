use crate::{
    api::{Content, GeminiClient},
    constants::{IMAGE_ASPECT_RATIO, IMAGE_MIME_TYPE, INSPIRATION_PROMPT},
    errors::{GatewayError, TuraError, TuraResult},
    models::Role,
};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

/// A travel idea as produced by schema-constrained generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspirationIdea {
    pub destination_name: String,
    pub description: String,
    pub image_prompt: String,
}

impl InspirationIdea {
    /// Markdown shown in the placeholder once the idea arrives.
    pub fn headline(&self) -> String {
        format!("**{}**\n\n{}", self.destination_name, self.description)
    }
}

static INSPIRATION_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "OBJECT",
        "properties": {
            "destinationName": {
                "type": "STRING",
                "description": "The name of the travel destination."
            },
            "description": {
                "type": "STRING",
                "description": "A short, enticing description of the destination."
            },
            "imagePrompt": {
                "type": "STRING",
                "description": "A detailed, evocative prompt for an image generation model."
            }
        },
        "required": ["destinationName", "description", "imagePrompt"]
    })
});

/// Idea generation followed by image generation. The two stages are separate
/// calls so the caller can show the idea before the image is ready.
#[derive(Debug, Clone)]
pub struct InspirationPipeline {
    gateway: Arc<GeminiClient>,
    idea_model: String,
    image_model: String,
}

impl InspirationPipeline {
    pub fn new(
        gateway: Arc<GeminiClient>,
        idea_model: impl Into<String>,
        image_model: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            idea_model: idea_model.into(),
            image_model: image_model.into(),
        }
    }

    pub async fn get_idea(&self) -> TuraResult<InspirationIdea> {
        let payload = json!({
            "contents": [Content::from_text(Role::User, INSPIRATION_PROMPT)],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": &*INSPIRATION_SCHEMA,
            },
        });

        let response = self
            .gateway
            .generate_content(&self.idea_model, &payload)
            .await
            .map_err(TuraError::Idea)?;
        let text = response
            .text()
            .ok_or(TuraError::Idea(GatewayError::Empty("idea response contained no text")))?;

        let idea: InspirationIdea = serde_json::from_str(text.trim())
            .map_err(|e| TuraError::Idea(GatewayError::Decode(e)))?;
        log::info!("Inspiration idea: {}", idea.destination_name);
        Ok(idea)
    }

    /// Returns a self-contained `data:<mime>;base64,...` URI, using the
    /// reported mime type or `image/jpeg` when none is given.
    pub async fn generate_image(&self, prompt: &str) -> TuraResult<String> {
        let payload = json!({
            "instances": [{ "prompt": prompt }],
            "parameters": {
                "sampleCount": 1,
                "aspectRatio": IMAGE_ASPECT_RATIO,
                "outputOptions": { "mimeType": IMAGE_MIME_TYPE },
            },
        });

        let response = self
            .gateway
            .predict(&self.image_model, &payload)
            .await
            .map_err(TuraError::Image)?;

        let (encoded, mime_type) = response
            .predictions
            .into_iter()
            .find_map(|p| {
                let encoded = p.bytes_base64_encoded.filter(|b| !b.is_empty())?;
                let mime_type = p.mime_type.filter(|m| !m.is_empty());
                Some((encoded, mime_type))
            })
            .ok_or(TuraError::Image(GatewayError::Empty("no image was generated")))?;

        let mime_type = mime_type.as_deref().unwrap_or(IMAGE_MIME_TYPE);
        Ok(format!("data:{};base64,{}", mime_type, encoded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use wiremock::{
        matchers::{body_partial_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn pipeline(server: &MockServer) -> InspirationPipeline {
        let gateway = Arc::new(GeminiClient::new(&server.uri(), "test-api-key"));
        InspirationPipeline::new(gateway, "gemini-2.5-flash", "imagen-4.0-generate-001")
    }

    fn text_reply(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        }))
    }

    #[test]
    fn test_headline_format() {
        let idea = InspirationIdea {
            destination_name: "Lake Kivu".to_string(),
            description: "Calm water.".to_string(),
            image_prompt: "sunset".to_string(),
        };
        assert_eq!(idea.headline(), "**Lake Kivu**\n\nCalm water.");
    }

    #[tokio::test]
    async fn test_get_idea_requests_schema_and_parses() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .and(body_partial_json(json!({
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": {
                        "required": ["destinationName", "description", "imagePrompt"]
                    }
                }
            })))
            .respond_with(text_reply(
                r#"{"destinationName":"Lake Kivu","description":"Calm water.","imagePrompt":"sunset over Kivu"}"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        let idea = pipeline(&mock_server).get_idea().await.unwrap();
        assert_eq!(idea.destination_name, "Lake Kivu");
        assert_eq!(idea.image_prompt, "sunset over Kivu");
    }

    #[tokio::test]
    async fn test_get_idea_rejects_incomplete_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(text_reply(r#"{"destinationName":"Lake Kivu"}"#))
            .mount(&mock_server)
            .await;

        let err = pipeline(&mock_server).get_idea().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Idea);
    }

    #[tokio::test]
    async fn test_generate_image_builds_data_uri() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/imagen-4.0-generate-001:predict"))
            .and(body_partial_json(json!({
                "instances": [{ "prompt": "sunset over Kivu" }],
                "parameters": {
                    "sampleCount": 1,
                    "aspectRatio": "16:9",
                    "outputOptions": { "mimeType": "image/jpeg" }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "predictions": [{ "bytesBase64Encoded": "/9j/AAAA", "mimeType": "image/jpeg" }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let uri = pipeline(&mock_server)
            .generate_image("sunset over Kivu")
            .await
            .unwrap();
        assert_eq!(uri, "data:image/jpeg;base64,/9j/AAAA");
    }

    #[tokio::test]
    async fn test_generate_image_uses_reported_mime_type() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "predictions": [{ "bytesBase64Encoded": "iVBORw0K", "mimeType": "image/png" }]
            })))
            .mount(&mock_server)
            .await;

        let uri = pipeline(&mock_server).generate_image("terraces").await.unwrap();
        assert_eq!(uri, "data:image/png;base64,iVBORw0K");
    }

    #[tokio::test]
    async fn test_generate_image_with_no_predictions_fails() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "predictions": [] })))
            .mount(&mock_server)
            .await;

        let err = pipeline(&mock_server)
            .generate_image("anything")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Image);
    }
}

//! UDPipe REST Parser
//!
//! Client for a UDPipe 2 REST server. The server tokenizes, tags and parses
//! in one `/process` call and answers with CoNLL-U, which is read by
//! [`super::conllu`].

use super::{DependencyParser, ParseError, ParsedDocument, conllu};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use url::Url;

// =============================================================================
// REST API Response Types
// =============================================================================

/// Response from the `/models` endpoint.
#[derive(Debug, Deserialize)]
pub struct ModelsResponse {
    /// Model name -> components it provides ("tokenizer", "tagger", "parser")
    pub models: BTreeMap<String, Vec<String>>,
}

/// Response from the `/process` endpoint.
#[derive(Debug, Deserialize)]
pub struct ProcessResponse {
    pub model: String,
    pub result: String,
}

impl ModelsResponse {
    /// Resolve a requested model name the way UDPipe does: an exact name,
    /// otherwise the first model starting with the requested prefix. Only
    /// models shipping a dependency parser qualify.
    pub fn resolve(&self, requested: &str) -> Option<&str> {
        let has_parser = |components: &Vec<String>| components.iter().any(|c| c == "parser");

        if let Some((name, components)) = self.models.get_key_value(requested) {
            return has_parser(components).then_some(name.as_str());
        }

        self.models
            .iter()
            .find(|&(name, components)| name.starts_with(requested) && has_parser(components))
            .map(|(name, _)| name.as_str())
    }
}

// =============================================================================
// UDPipe Parser
// =============================================================================

/// Dependency parser backed by a UDPipe REST server, bound to one model.
#[derive(Debug, Clone)]
pub struct UdpipeParser {
    client: Client,
    process_url: Url,
    model: String,
}

impl UdpipeParser {
    /// Connect to the server at `base_url` and resolve `model` against the
    /// models it serves.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the UDPipe server (e.g., "http://localhost:8001")
    /// * `model` - Full model name or a prefix such as "chinese-gsd"
    pub async fn load(client: Client, base_url: &str, model: &str) -> Result<Self, ParseError> {
        let base = base_url_with_slash(base_url)?;
        let models_url = base.join("models")?;

        let response = client.get(models_url).send().await?;
        let models: ModelsResponse = ensure_success(response).await?.json().await?;

        let resolved = models
            .resolve(model)
            .ok_or_else(|| ParseError::ModelNotFound(model.to_string()))?
            .to_string();

        Ok(Self {
            client,
            process_url: base.join("process")?,
            model: resolved,
        })
    }
}

#[async_trait]
impl DependencyParser for UdpipeParser {
    async fn parse(&self, text: &str) -> Result<ParsedDocument, ParseError> {
        if text.trim().is_empty() {
            return Ok(ParsedDocument::default());
        }

        let form = [
            ("data", text),
            ("model", self.model.as_str()),
            ("tokenizer", ""),
            ("tagger", ""),
            ("parser", ""),
        ];

        let response = self
            .client
            .post(self.process_url.clone())
            .form(&form)
            .send()
            .await?;

        let processed: ProcessResponse = ensure_success(response).await?.json().await?;
        tracing::debug!(
            name: "parser.udpipe.processed",
            model = %processed.model,
            bytes = processed.result.len(),
            "UDPipe returned a parse"
        );
        conllu::parse(&processed.result)
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn backend_name(&self) -> &'static str {
        "udpipe"
    }
}

/// `Url::join` drops the last path segment unless the base ends with '/'.
fn base_url_with_slash(base_url: &str) -> Result<Url, ParseError> {
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Ok(Url::parse(&base)?)
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ParseError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(ParseError::Backend {
        status: status.as_u16(),
        message: message.trim().to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::parser::DepLabel;
    use axum::{
        Form, Json, Router,
        http::StatusCode,
        response::IntoResponse,
        routing::{get, post},
    };
    use serde_json::json;
    use std::collections::HashMap;

    const MANAGES_CONLLU: &str = "\
# text = Inspectors check welds
1\tInspectors\tinspector\tNOUN\tNNS\t_\t2\tnsubj\t_\t_
2\tcheck\tcheck\tVERB\tVBP\t_\t0\troot\t_\t_
3\twelds\tweld\tNOUN\tNNS\t_\t2\tobj\t_\t_

";

    async fn models() -> Json<serde_json::Value> {
        Json(json!({
            "models": {
                "chinese-gsd-ud-2.12-230717": ["tokenizer", "tagger", "parser"],
                "english-ewt-ud-2.12-230717": ["tokenizer", "tagger", "parser"],
                "english-tagger-only": ["tokenizer", "tagger"]
            },
            "default_model": "english-ewt-ud-2.12-230717"
        }))
    }

    async fn process(Form(form): Form<HashMap<String, String>>) -> impl IntoResponse {
        match form.get("model").map(String::as_str) {
            Some("english-ewt-ud-2.12-230717") => Json(json!({
                "model": "english-ewt-ud-2.12-230717",
                "acknowledgements": [],
                "result": MANAGES_CONLLU,
            }))
            .into_response(),
            other => (
                StatusCode::BAD_REQUEST,
                format!("Unknown model {other:?}\n"),
            )
                .into_response(),
        }
    }

    /// Serve a minimal UDPipe REST API on an ephemeral port.
    pub(crate) async fn spawn_mock_udpipe() -> String {
        let app = Router::new()
            .route("/models", get(models))
            .route("/process", post(process));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_resolve_exact_and_prefix() {
        let models: ModelsResponse = serde_json::from_value(json!({
            "models": {
                "english-ewt-ud-2.12-230717": ["tokenizer", "tagger", "parser"],
                "english-gum-ud-2.12-230717": ["tokenizer", "tagger", "parser"],
                "english-tagger-only": ["tokenizer", "tagger"]
            }
        }))
        .unwrap();

        assert_eq!(
            models.resolve("english-gum-ud-2.12-230717"),
            Some("english-gum-ud-2.12-230717")
        );
        assert_eq!(models.resolve("english"), Some("english-ewt-ud-2.12-230717"));
        assert_eq!(models.resolve("english-tagger-only"), None);
        assert_eq!(models.resolve("czech"), None);
    }

    #[test]
    fn test_base_url_keeps_path_prefix() {
        let base = base_url_with_slash("http://nlp.internal/udpipe").unwrap();
        assert_eq!(
            base.join("process").unwrap().as_str(),
            "http://nlp.internal/udpipe/process"
        );
        assert!(base_url_with_slash("not a url").is_err());
    }

    #[tokio::test]
    async fn test_load_and_parse_against_mock_server() {
        let base = spawn_mock_udpipe().await;
        let parser = UdpipeParser::load(Client::new(), &base, "english-ewt")
            .await
            .unwrap();
        assert_eq!(parser.model(), "english-ewt-ud-2.12-230717");
        assert_eq!(parser.backend_name(), "udpipe");

        let doc = parser.parse("Inspectors check welds").await.unwrap();
        assert_eq!(doc.sentences.len(), 1);
        assert_eq!(doc.sentences[0].tokens[1].dep, DepLabel::Root);
    }

    #[tokio::test]
    async fn test_missing_model_is_reported() {
        let base = spawn_mock_udpipe().await;
        let err = UdpipeParser::load(Client::new(), &base, "japanese")
            .await
            .unwrap_err();
        assert!(matches!(err, ParseError::ModelNotFound(name) if name == "japanese"));
    }

    #[tokio::test]
    async fn test_backend_error_status_is_surfaced() {
        let base = spawn_mock_udpipe().await;
        let parser = UdpipeParser::load(Client::new(), &base, "chinese")
            .await
            .unwrap();
        let err = parser.parse("质量部门负责质量流程").await.unwrap_err();
        match err {
            ParseError::Backend { status, message } => {
                assert_eq!(status, 400);
                assert!(message.starts_with("Unknown model"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blank_text_skips_request() {
        let parser = UdpipeParser {
            client: Client::new(),
            process_url: Url::parse("http://127.0.0.1:9/process").unwrap(),
            model: "english-ewt".to_string(),
        };
        assert!(parser.parse("   ").await.unwrap().is_empty());
    }
}

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{DrawResult, Embed, EmbedField, WebhookMessage};

pub const SUMMARY_WEBHOOK_VAR: &str = "DISCORD_WEBHOOK_URL_EMBED";
pub const DOCUMENT_WEBHOOK_VAR: &str = "DISCORD_WEBHOOK_URL_PDF";

const SUMMARY_TITLE: &str = "Resultado da Loteria";
const SUMMARY_DESCRIPTION: &str = "Confira os resultados mais recentes da loteria.";
const SUMMARY_COLOR: u32 = 0x00ff00;

pub fn summary_message(result: &DrawResult) -> WebhookMessage {
    let field = |name: &str, value: String, inline: bool| EmbedField {
        name: name.to_string(),
        value,
        inline,
    };

    WebhookMessage {
        embeds: vec![Embed {
            title: SUMMARY_TITLE.to_string(),
            description: SUMMARY_DESCRIPTION.to_string(),
            color: SUMMARY_COLOR,
            fields: vec![
                field("Concurso", result.draw_number.to_string(), true),
                field("Data de Apuração", result.settlement_date.clone(), true),
                field("Dezenas Sorteadas", result.drawn_numbers_display(), false),
                field("Tipo de Jogo", result.game_type.clone(), true),
            ],
        }],
    }
}

/// Posts draw notifications to the two chat webhooks.
///
/// Either URL may be absent; only the matching send fails in that case.
pub struct WebhookNotifier {
    client: reqwest::Client,
    summary_url: Option<String>,
    document_url: Option<String>,
}

impl WebhookNotifier {
    pub fn new(
        client: reqwest::Client,
        summary_url: Option<String>,
        document_url: Option<String>,
    ) -> Self {
        Self {
            client,
            summary_url: summary_url.filter(|url| !url.is_empty()),
            document_url: document_url.filter(|url| !url.is_empty()),
        }
    }

    pub async fn send_summary(&self, result: &DrawResult) -> Result<()> {
        let url = self
            .summary_url
            .as_deref()
            .ok_or(Error::Config(SUMMARY_WEBHOOK_VAR))?;

        let response = self
            .client
            .post(url)
            .json(&summary_message(result))
            .send()
            .await?;

        check_status(response, &[StatusCode::OK, StatusCode::NO_CONTENT]).await
    }

    pub async fn send_document(&self, path: &Path) -> Result<()> {
        let url = self
            .document_url
            .as_deref()
            .ok_or(Error::Config(DOCUMENT_WEBHOOK_VAR))?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Error::file(path, e))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| crate::reports::DEFAULT_REPORT_PATH.to_string());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/pdf")?;
        let form = Form::new().part("file", part);

        let response = self.client.post(url).multipart(form).send().await?;

        check_status(response, &[StatusCode::OK]).await
    }
}

async fn check_status(response: reqwest::Response, accepted: &[StatusCode]) -> Result<()> {
    let status = response.status();
    if accepted.contains(&status) {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::Remote {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn draw() -> DrawResult {
        DrawResult {
            is_rolled_over: true,
            settlement_date: "18/10/2025".to_string(),
            next_draw_date: "22/10/2025".to_string(),
            drawn_numbers: vec!["012345".to_string(), "067890".to_string()],
            game_type: "FEDERAL".to_string(),
            draw_number: 6011,
        }
    }

    #[test]
    fn summary_payload_shape() {
        let value = serde_json::to_value(summary_message(&draw())).unwrap();
        assert_eq!(
            value,
            json!({
                "embeds": [{
                    "title": "Resultado da Loteria",
                    "description": "Confira os resultados mais recentes da loteria.",
                    "color": 65280,
                    "fields": [
                        {"name": "Concurso", "value": "6011", "inline": true},
                        {"name": "Data de Apuração", "value": "18/10/2025", "inline": true},
                        {"name": "Dezenas Sorteadas", "value": "012345, 067890", "inline": false},
                        {"name": "Tipo de Jogo", "value": "FEDERAL", "inline": true}
                    ]
                }]
            })
        );
    }

    #[tokio::test]
    async fn summary_accepts_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embed"))
            .and(body_json(serde_json::to_value(summary_message(&draw())).unwrap()))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = WebhookNotifier::new(
            reqwest::Client::new(),
            Some(format!("{}/embed", server.uri())),
            None,
        );
        notifier.send_summary(&draw()).await.unwrap();
    }

    #[tokio::test]
    async fn summary_rejection_embeds_the_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Invalid Form Body"))
            .mount(&server)
            .await;

        let notifier = WebhookNotifier::new(reqwest::Client::new(), Some(server.uri()), None);
        match notifier.send_summary(&draw()).await {
            Err(Error::Remote { status, body }) => {
                assert_eq!(status, 400);
                assert_eq!(body, "Invalid Form Body");
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_urls_count_as_unconfigured() {
        let notifier =
            WebhookNotifier::new(reqwest::Client::new(), Some(String::new()), Some(String::new()));

        let err = notifier.send_summary(&draw()).await.unwrap_err();
        assert!(matches!(err, Error::Config(SUMMARY_WEBHOOK_VAR)));

        let err = notifier
            .send_document(Path::new("resultado_loteria.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(DOCUMENT_WEBHOOK_VAR)));
    }

    #[tokio::test]
    async fn document_is_uploaded_as_multipart_file() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("resultado_loteria.pdf");
        std::fs::write(&report, b"%PDF-1.3 test").unwrap();

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pdf"))
            .and(header_regex("content-type", "^multipart/form-data; boundary="))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = WebhookNotifier::new(
            reqwest::Client::new(),
            None,
            Some(format!("{}/pdf", server.uri())),
        );
        notifier.send_document(&report).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"file\""));
        assert!(body.contains("filename=\"resultado_loteria.pdf\""));
        assert!(body.contains("%PDF-1.3 test"));
    }

    #[tokio::test]
    async fn document_requires_exactly_ok() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("resultado_loteria.pdf");
        std::fs::write(&report, b"%PDF").unwrap();

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let notifier = WebhookNotifier::new(reqwest::Client::new(), None, Some(server.uri()));
        let err = notifier.send_document(&report).await.unwrap_err();
        assert!(matches!(err, Error::Remote { status: 204, .. }));
    }

    #[tokio::test]
    async fn missing_document_is_a_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = WebhookNotifier::new(
            reqwest::Client::new(),
            None,
            Some("http://127.0.0.1:9/pdf".to_string()),
        );
        let err = notifier
            .send_document(&dir.path().join("missing.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::File { .. }));
    }
}

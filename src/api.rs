use crate::error::Result;
use crate::types::DrawResult;
use crate::utils::join_url;

pub const DEFAULT_API_BASE_URL: &str = "https://servicebus2.caixa.gov.br/portaldeloterias/api";

/// Fetches the latest published draw for `game_id`.
///
/// The response status is not inspected: any body that decodes into a
/// [`DrawResult`] is accepted.
pub async fn fetch_draw_result(
    client: &reqwest::Client,
    base_url: &str,
    game_id: &str,
) -> Result<DrawResult> {
    let url = join_url(base_url, game_id);

    let response = client.get(&url).send().await?;
    let status = response.status();
    let body = response.text().await?;
    tracing::debug!(%url, status = status.as_u16(), bytes = body.len(), "lottery API responded");

    let result: DrawResult = serde_json::from_str(&body)?;
    Ok(result)
}

use serde::{Deserialize, Serialize};

/// One draw as published by the lottery API.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DrawResult {
    #[serde(rename = "acumulado")]
    pub is_rolled_over: bool,
    #[serde(rename = "dataApuracao")]
    pub settlement_date: String,
    #[serde(rename = "dataProximoConcurso")]
    pub next_draw_date: String,
    #[serde(rename = "dezenasSorteadasOrdemSorteio")]
    pub drawn_numbers: Vec<String>,
    #[serde(rename = "tipoJogo")]
    pub game_type: String,
    #[serde(rename = "numero")]
    pub draw_number: i64,
}

impl DrawResult {
    pub fn drawn_numbers_display(&self) -> String {
        self.drawn_numbers.join(", ")
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct DrawRecordRow {
    pub id: i64,
    pub draw_number: i64,
    pub settlement_date: String,
    pub drawn_numbers: String,
    pub recorded_at: String,
    pub game_type: String,
}

#[derive(Serialize, Debug)]
pub struct WebhookMessage {
    pub embeds: Vec<Embed>,
}

#[derive(Serialize, Debug)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
}

#[derive(Serialize, Debug)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

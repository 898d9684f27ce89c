use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::DrawResult;

pub const DEFAULT_REPORT_PATH: &str = "resultado_loteria.pdf";
pub const REPORT_TITLE: &str = "Resultado da Loteria";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const LINE_GAP_MM: f32 = 10.0;
const FONT_SIZE: f32 = 16.0;

/// The report lines, top to bottom. The first line is the title.
pub fn report_lines(result: &DrawResult) -> Vec<String> {
    vec![
        REPORT_TITLE.to_string(),
        format!("Concurso: {}", result.draw_number),
        format!("Data de Apuração: {}", result.settlement_date),
        format!("Dezenas Sorteadas: {}", result.drawn_numbers_display()),
        format!("Tipo de Jogo: {}", result.game_type),
    ]
}

pub fn render_report(result: &DrawResult) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(REPORT_TITLE, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| Error::Report(e.to_string()))?;
    let layer = doc.get_page(page).get_layer(layer);

    let mut y = PAGE_HEIGHT_MM - MARGIN_MM - LINE_GAP_MM;
    for line in report_lines(result) {
        layer.use_text(line, FONT_SIZE, Mm(MARGIN_MM), Mm(y), &font);
        y -= LINE_GAP_MM;
    }

    doc.save_to_bytes().map_err(|e| Error::Report(e.to_string()))
}

/// Renders the report and writes it to `path`, replacing any previous report.
pub fn generate_report(result: &DrawResult, path: &Path) -> Result<PathBuf> {
    let bytes = render_report(result)?;
    fs::write(path, bytes).map_err(|e| Error::file(path, e))?;
    Ok(path.to_path_buf())
}

use rusqlite::Connection;

use crate::error::Result;
use crate::types::{DrawRecordRow, DrawResult};
use crate::utils::now_recorded_at;

pub fn create_database_with_connection(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS loteria (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            concurso INTEGER,
            data_apuracao TEXT,
            dezenas TEXT,
            horario TEXT,
            jogo TEXT
        )",
        [],
    )?;
    Ok(())
}

/// Appends one row per call. Repeated draw numbers are stored again.
pub fn save_draw_result(conn: &Connection, result: &DrawResult) -> Result<i64> {
    save_draw_result_at(conn, result, &now_recorded_at())
}

pub fn save_draw_result_at(conn: &Connection, result: &DrawResult, recorded_at: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO loteria (concurso, data_apuracao, dezenas, horario, jogo)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        (
            result.draw_number,
            &result.settlement_date,
            result.drawn_numbers_display(),
            recorded_at,
            &result.game_type,
        ),
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn count_draw_records(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM loteria", [], |row| row.get(0))?;
    Ok(count)
}

pub fn get_latest_draw_records(conn: &Connection, limit: i32) -> Result<Vec<DrawRecordRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, concurso, data_apuracao, dezenas, horario, jogo
         FROM loteria
         ORDER BY id DESC
         LIMIT ?1",
    )?;
    let record_iter = stmt.query_map([limit], |row| {
        Ok(DrawRecordRow {
            id: row.get(0)?,
            draw_number: row.get(1)?,
            settlement_date: row.get(2)?,
            drawn_numbers: row.get(3)?,
            recorded_at: row.get(4)?,
            game_type: row.get(5)?,
        })
    })?;

    let mut records = Vec::new();
    for record in record_iter {
        records.push(record?);
    }
    Ok(records)
}

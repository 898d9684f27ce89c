use chrono::{Local, NaiveDateTime};

pub const RECORDED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_recorded_at(at: NaiveDateTime) -> String {
    at.format(RECORDED_AT_FORMAT).to_string()
}

pub fn now_recorded_at() -> String {
    format_recorded_at(Local::now().naive_local())
}

pub fn join_url(base_url: &str, segment: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), segment.trim_start_matches('/'))
}

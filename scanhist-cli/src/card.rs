//! Text content of a scan card, shared by the TUI and plain output.

use scanhist_types::ScanRecord;
use serde_json::Value;

/// What one card shows: a title and a few labelled lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardText {
    pub title: String,
    pub lines: Vec<(&'static str, String)>,
}

pub fn card_text(record: &ScanRecord) -> CardText {
    let title = record
        .file_name()
        .map(str::to_string)
        .unwrap_or_else(|| record.id.clone());

    let mut lines = vec![("ID", truncate_id(&record.id))];
    if let Some(status) = record.status() {
        lines.push(("Status", status.to_string()));
    }
    if let Some(verdict) = record.verdict() {
        lines.push(("Verdict", verdict.to_string()));
    }
    if let Some(created) = record.created_at().and_then(format_created) {
        lines.push(("Created", created));
    }

    CardText { title, lines }
}

/// One-line form for plain output.
pub fn summary_line(record: &ScanRecord) -> String {
    let card = card_text(record);
    let mut out = card.title.clone();
    for (label, value) in card.lines.iter().filter(|(l, _)| *l != "ID") {
        out.push_str(&format!("  {}={value}", label.to_lowercase()));
    }
    if card.title != record.id {
        out.push_str(&format!("  [{}]", record.id));
    }
    out
}

pub fn truncate_id(id: &str) -> String {
    if id.chars().count() > 16 {
        let head: String = id.chars().take(13).collect();
        format!("{head}...")
    } else {
        id.to_string()
    }
}

fn format_created(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => n.as_u64().map(format_epoch),
        _ => None,
    }
}

/// Render an epoch timestamp; values past year 5138 in seconds are taken
/// as milliseconds.
fn format_epoch(raw: u64) -> String {
    let secs = if raw >= 100_000_000_000 { raw / 1000 } else { raw };
    let days_since_epoch = secs / 86400;
    let time_of_day = secs % 86400;
    let hours = time_of_day / 3600;
    let mins = (time_of_day % 3600) / 60;

    let (year, month, day) = epoch_to_date(days_since_epoch);
    format!("{year:04}-{month:02}-{day:02} {hours:02}:{mins:02}")
}

fn epoch_to_date(days: u64) -> (u64, u64, u64) {
    // Howard Hinnant's civil_from_days
    let z = days + 719468;
    let era = z / 146097;
    let doe = z - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_uses_file_name_as_title() {
        let record = ScanRecord::new("scan-1")
            .with_field("fileName", "setup.exe")
            .with_field("status", "completed")
            .with_field("verdict", "malicious");
        let card = card_text(&record);
        assert_eq!(card.title, "setup.exe");
        assert_eq!(
            card.lines,
            vec![
                ("ID", "scan-1".to_string()),
                ("Status", "completed".to_string()),
                ("Verdict", "malicious".to_string()),
            ]
        );
    }

    #[test]
    fn card_falls_back_to_id() {
        let card = card_text(&ScanRecord::new("bare"));
        assert_eq!(card.title, "bare");
        assert_eq!(card.lines.len(), 1);
    }

    #[test]
    fn null_file_name_uses_alternate_key() {
        let record = ScanRecord::new("scan-7")
            .with_field("fileName", serde_json::Value::Null)
            .with_field("file_name", "report.docx");
        assert_eq!(card_text(&record).title, "report.docx");
    }

    #[test]
    fn epoch_seconds_and_millis() {
        assert_eq!(format_epoch(0), "1970-01-01 00:00");
        // 2024-03-01 12:30:00 UTC
        assert_eq!(format_epoch(1_709_296_200), "2024-03-01 12:30");
        assert_eq!(format_epoch(1_709_296_200_000), "2024-03-01 12:30");
    }

    #[test]
    fn created_string_passes_through() {
        let record = ScanRecord::new("a").with_field("createdAt", "2024-05-01T10:00:00Z");
        let card = card_text(&record);
        assert_eq!(card.lines[1], ("Created", "2024-05-01T10:00:00Z".to_string()));
    }

    #[test]
    fn long_ids_are_truncated() {
        assert_eq!(truncate_id("short"), "short");
        assert_eq!(
            truncate_id("0123456789abcdefXYZ"),
            "0123456789abc..."
        );
    }

    #[test]
    fn summary_line_includes_id_when_titled_by_file() {
        let record = ScanRecord::new("s1")
            .with_field("fileName", "a.pdf")
            .with_field("status", "clean");
        assert_eq!(summary_line(&record), "a.pdf  status=clean  [s1]");
        assert_eq!(summary_line(&ScanRecord::new("s2")), "s2");
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::models::ExportRow;

/// Ad-type value kept by the rejected-ad filter
pub const RESPONSIVE_VIDEO_AD: &str = "반응형 동영상 광고";
/// Approval-status value excluded by the rejected-ad filter
pub const STATUS_APPROVED: &str = "승인됨";

const AD_NAME_COLUMN: &str = "광고 이름";
const AD_TYPE_COLUMN: &str = "광고 유형";
const CAMPAIGN_COLUMN: &str = "캠페인";
const POLICY_COLUMN: &str = "광고 정책";
const STATUS_COLUMN: &str = "승인 상태";

/// Non-tabular lines before the header row in every export
const PREAMBLE_LINES: usize = 2;

/// Failure while reading one export file; fatal for the whole batch
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-16", .path.display())]
    Encoding { path: PathBuf },

    #[error("{} ends before the report header", .path.display())]
    Preamble { path: PathBuf },

    #[error("{} is missing required column '{}'", .path.display(), .column)]
    MissingColumn {
        path: PathBuf,
        column: &'static str,
    },

    #[error("failed to parse {}: {}", .path.display(), .source)]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Parse one UTF-16 tab-separated export file into rows, preserving source
/// row order. The two preamble lines are skipped; the third line must be the
/// header carrying the required columns.
pub fn parse_export(path: &Path) -> Result<Vec<ExportRow>, ExportError> {
    let bytes = fs::read(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let text = decode_utf16(&bytes).ok_or_else(|| ExportError::Encoding {
        path: path.to_path_buf(),
    })?;

    let body = strip_preamble(&text).ok_or_else(|| ExportError::Preamble {
        path: path.to_path_buf(),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|source| ExportError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    let required = |column: &'static str| {
        headers
            .iter()
            .position(|header| header == column)
            .ok_or(ExportError::MissingColumn {
                path: path.to_path_buf(),
                column,
            })
    };

    let ad_name = required(AD_NAME_COLUMN)?;
    let ad_type = required(AD_TYPE_COLUMN)?;
    let campaign = required(CAMPAIGN_COLUMN)?;
    let policy = required(POLICY_COLUMN)?;
    // Older exports don't carry the status column
    let status = headers.iter().position(|header| header == STATUS_COLUMN);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| ExportError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let field = |index: usize| record.get(index).unwrap_or("").to_string();

        rows.push(ExportRow {
            ad_name: field(ad_name),
            ad_type: field(ad_type),
            campaign: field(campaign),
            status: status.map(field),
            policy: field(policy),
        });
    }

    debug!(path = %path.display(), rows = rows.len(), "Parsed export file");

    Ok(rows)
}

/// Keep only rows for the target ad type that were not approved
pub fn filter_rejected(rows: Vec<ExportRow>) -> Vec<ExportRow> {
    rows.into_iter()
        .filter(|row| row.ad_type == RESPONSIVE_VIDEO_AD)
        .filter(|row| row.status.as_deref() != Some(STATUS_APPROVED))
        .collect()
}

/// Decode BOM-aware UTF-16; little-endian is assumed when no BOM is present
fn decode_utf16(bytes: &[u8]) -> Option<String> {
    let (big_endian, data) = match bytes {
        [0xFE, 0xFF, rest @ ..] => (true, rest),
        [0xFF, 0xFE, rest @ ..] => (false, rest),
        _ => (false, bytes),
    };

    if data.len() % 2 != 0 {
        return None;
    }

    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|pair| {
            let pair = [pair[0], pair[1]];
            if big_endian {
                u16::from_be_bytes(pair)
            } else {
                u16::from_le_bytes(pair)
            }
        })
        .collect();

    String::from_utf16(&units).ok()
}

fn strip_preamble(text: &str) -> Option<&str> {
    let mut rest = text;
    for _ in 0..PREAMBLE_LINES {
        let newline = rest.find('\n')?;
        rest = &rest[newline + 1..];
    }
    Some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_utf16_le(path: &Path, content: &str) {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in content.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        fs::write(path, bytes).unwrap();
    }

    fn sample_export() -> String {
        [
            "광고 보고서",
            "2026-08-06 기준",
            "광고 이름\t광고 유형\t캠페인\t광고 정책",
            "ad_a\t반응형 동영상 광고\t여름 캠페인\tYouTube 광고 요건 - 과장 광고 (제한됨)",
            "ad_b\t이미지 광고\t여름 캠페인\t클릭베이트",
            "ad_c\t반응형 동영상 광고\t가을 캠페인\t기타 (제한 없음)",
        ]
        .join("\n")
    }

    #[test]
    fn test_parse_export_rows_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("export_brand.csv");
        write_utf16_le(&path, &sample_export());

        let rows = parse_export(&path).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].ad_name, "ad_a");
        assert_eq!(rows[0].campaign, "여름 캠페인");
        assert_eq!(rows[0].policy, "YouTube 광고 요건 - 과장 광고 (제한됨)");
        assert_eq!(rows[1].ad_type, "이미지 광고");
        assert!(rows[0].status.is_none());
    }

    #[test]
    fn test_parse_export_big_endian_bom() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("be.csv");

        let mut bytes = vec![0xFE, 0xFF];
        for unit in sample_export().encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        fs::write(&path, bytes).unwrap();

        let rows = parse_export(&path).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].campaign, "가을 캠페인");
    }

    #[test]
    fn test_parse_export_with_status_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("status.csv");
        let content = [
            "광고 보고서",
            "2026-08-06 기준",
            "광고 이름\t광고 유형\t캠페인\t승인 상태\t광고 정책",
            "ad_a\t반응형 동영상 광고\t캠페인1\t승인됨\t-",
            "ad_b\t반응형 동영상 광고\t캠페인1\t비승인\t클릭베이트",
        ]
        .join("\n");
        write_utf16_le(&path, &content);

        let rows = parse_export(&path).unwrap();
        assert_eq!(rows[0].status.as_deref(), Some("승인됨"));

        let rejected = filter_rejected(rows);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].ad_name, "ad_b");
    }

    #[test]
    fn test_filter_keeps_only_responsive_video_ads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("filter.csv");
        write_utf16_le(&path, &sample_export());

        let rejected = filter_rejected(parse_export(&path).unwrap());
        let names: Vec<&str> = rejected.iter().map(|r| r.ad_name.as_str()).collect();
        assert_eq!(names, vec!["ad_a", "ad_c"]);
    }

    #[test]
    fn test_missing_column_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.csv");
        let content = [
            "광고 보고서",
            "2026-08-06 기준",
            "광고 이름\t광고 유형\t캠페인",
            "ad_a\t반응형 동영상 광고\t캠페인1",
        ]
        .join("\n");
        write_utf16_le(&path, &content);

        let err = parse_export(&path).unwrap_err();
        match err {
            ExportError::MissingColumn { column, .. } => assert_eq!(column, POLICY_COLUMN),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_utf16_input_is_an_encoding_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("utf8.csv");
        // Odd byte count cannot be UTF-16
        fs::write(&path, b"abc").unwrap();

        let err = parse_export(&path).unwrap_err();
        assert!(matches!(err, ExportError::Encoding { .. }));
    }

    #[test]
    fn test_missing_preamble_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.csv");
        write_utf16_le(&path, "광고 이름\t광고 유형");

        let err = parse_export(&path).unwrap_err();
        assert!(matches!(err, ExportError::Preamble { .. }));
    }
}

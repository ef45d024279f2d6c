//! CSV serialization of the accumulated candidate records.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::types::{Candidate, Source};

pub const DEFAULT_OUTPUT: &str = "saninsen2025_candidates.csv";

/// UTF-8 byte-order mark, prepended for spreadsheet consumers.
const BOM: &[u8] = b"\xef\xbb\xbf";

const COLUMNS: [&str; 14] = [
    "id",
    "todoufuken",
    "senkyoku",
    "seitou",
    "title",
    "yomi",
    "detail",
    "age",
    "tubohantei",
    "tubonaiyou",
    "tuboURL",
    "uraganehantei",
    "uraganenaiyou",
    "uraganeURL",
];

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("no records to write")]
    NoData,
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn columns_for(source: Source) -> Vec<&'static str> {
    COLUMNS
        .iter()
        .copied()
        .filter(|c| *c != "yomi" || source.includes_yomi())
        .collect()
}

fn record_row(candidate: &Candidate, source: Source) -> Vec<&str> {
    let full: [&str; 14] = [
        &candidate.id,
        &candidate.prefecture,
        &candidate.district,
        &candidate.party,
        &candidate.name,
        &candidate.yomi,
        &candidate.detail,
        &candidate.age,
        &candidate.tubohantei,
        &candidate.tubonaiyou,
        &candidate.tubo_url,
        &candidate.uraganehantei,
        &candidate.uraganenaiyou,
        &candidate.uragane_url,
    ];
    full.iter()
        .zip(COLUMNS.iter())
        .filter(|(_, c)| **c != "yomi" || source.includes_yomi())
        .map(|(v, _)| *v)
        .collect()
}

/// Write every record to a single CSV at `path`. Refuses to create a file
/// when there is nothing to write.
pub fn write_csv(path: &Path, records: &[Candidate], source: Source) -> Result<(), OutputError> {
    if records.is_empty() {
        return Err(OutputError::NoData);
    }

    let mut file = File::create(path)?;
    if source.writes_bom() {
        file.write_all(BOM)?;
    }

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(columns_for(source))?;
    for record in records {
        writer.write_record(record_row(record, source))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample() -> Vec<Candidate> {
        vec![
            Candidate::new(
                "東京",
                "東京",
                "自民",
                "山田 太郎",
                "やまだ たろう".to_string(),
                "52",
            ),
            Candidate::new("", "比例", "立憲", "佐藤 花子", String::new(), "45"),
        ]
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("kouho-output-{}-{}", std::process::id(), name))
    }

    #[test]
    fn empty_record_set_writes_nothing() {
        let path = temp_path("empty.csv");
        let result = write_csv(&path, &[], Source::Senkyo);
        assert!(matches!(result, Err(OutputError::NoData)));
        assert!(!path.exists());
    }

    #[test]
    fn senkyo_schema_has_full_header_and_no_bom() {
        let path = temp_path("senkyo.csv");
        write_csv(&path, &sample(), Source::Senkyo).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "id,todoufuken,senkyoku,seitou,title,yomi,detail,age,\
             tubohantei,tubonaiyou,tuboURL,uraganehantei,uraganenaiyou,uraganeURL"
        );
        assert_eq!(text.lines().count(), 3);
        assert!(!text.starts_with('\u{feff}'));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn asahi_schema_drops_yomi_and_carries_bom() {
        let path = temp_path("asahi.csv");
        write_csv(&path, &sample(), Source::Asahi).unwrap();
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], BOM);
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        let header = text.lines().next().unwrap();
        assert!(!header.split(',').any(|c| c == "yomi"));
        assert_eq!(header.split(',').count(), 13);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn rows_preserve_record_order() {
        let path = temp_path("order.csv");
        write_csv(&path, &sample(), Source::Senkyo).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let rows: Vec<&str> = text.lines().skip(1).collect();
        assert!(rows[0].contains("山田 太郎"));
        assert!(rows[1].contains("佐藤 花子"));
        fs::remove_file(&path).unwrap();
    }
}

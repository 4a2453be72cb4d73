use crate::error::OutputError;
use crate::record::Record;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Outcome of one serialization pass. `NoItems` means the tabular path was
/// given an empty batch and created no file; `Written(0)` still means a
/// file exists (an empty JSON array).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteReport {
    NoItems,
    Written(usize),
}

/// Writes the full batch to `destination`, choosing the format by file
/// extension: `.json` gets a pretty-printed JSON array, anything else a
/// headered CSV table with unified columns.
pub fn write_records(records: &[Record], destination: &Path) -> Result<WriteReport, OutputError> {
    if is_json(destination) {
        write_json(records, destination)
    } else {
        write_table(records, destination)
    }
}

fn is_json(destination: &Path) -> bool {
    destination.extension().and_then(|ext| ext.to_str()) == Some("json")
}

fn write_json(records: &[Record], destination: &Path) -> Result<WriteReport, OutputError> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }

    // Objects keep exactly the fields each record has; non-ASCII text is
    // written literally.
    let json = serde_json::to_string_pretty(records)?;
    let mut file = File::create(destination)?;
    file.write_all(json.as_bytes())?;

    Ok(WriteReport::Written(records.len()))
}

fn write_table(records: &[Record], destination: &Path) -> Result<WriteReport, OutputError> {
    if records.is_empty() {
        return Ok(WriteReport::NoItems);
    }

    let columns = unified_columns(records);

    let mut writer = csv::Writer::from_path(destination)?;
    writer.write_record(&columns)?;
    for record in records {
        let row: Vec<&str> = columns
            .iter()
            .map(|column| record.get(column).map(String::as_str).unwrap_or(""))
            .collect();
        writer.write_record(&row)?;
    }
    writer.flush()?;

    Ok(WriteReport::Written(records.len()))
}

/// Union of all field names across the batch, in first-seen order so the
/// header is deterministic within a run.
fn unified_columns(records: &[Record]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn tmp_file(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("sitegrab_output_{}_{}", std::process::id(), name));
        let _ = fs::remove_file(&p);
        p
    }

    fn record(fields: &[(&str, &str)]) -> Record {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_batch_writes_empty_json_array() {
        let path = tmp_file("empty.json");
        let report = write_records(&[], &path).unwrap();
        assert_eq!(report, WriteReport::Written(0));
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn empty_batch_writes_no_tabular_file() {
        let path = tmp_file("empty.csv");
        let report = write_records(&[], &path).unwrap();
        assert_eq!(report, WriteReport::NoItems);
        assert!(!path.exists());
    }

    #[test]
    fn json_preserves_per_record_field_presence() {
        let path = tmp_file("presence.json");
        let records = vec![
            record(&[("text", "only text")]),
            record(&[("text", "résumé"), ("href", "https://x.com/a")]),
        ];
        let report = write_records(&records, &path).unwrap();
        assert_eq!(report, WriteReport::Written(2));

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let array = parsed.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(
            array[0].as_object().unwrap().keys().collect::<Vec<_>>(),
            vec!["text"]
        );
        assert_eq!(
            array[1].as_object().unwrap().keys().collect::<Vec<_>>(),
            vec!["text", "href"]
        );
        // Non-ASCII stays literal in the file, no \u escapes.
        assert!(fs::read_to_string(&path).unwrap().contains("résumé"));
    }

    #[test]
    fn table_header_is_union_in_first_seen_order() {
        let path = tmp_file("union.csv");
        let records = vec![
            record(&[("text", "a"), ("tag", "p"), ("html", "<p>a</p>")]),
            record(&[
                ("text", "b"),
                ("href", "https://x.com/b"),
                ("tag", "a"),
                ("html", "<a>b</a>"),
            ]),
        ];
        write_records(&records, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["text", "tag", "html", "href"]
        );

        let rows: Vec<csv::StringRecord> =
            reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        // Missing fields are padded with empty strings, not errors.
        assert_eq!(&rows[0][3], "");
        assert_eq!(&rows[1][3], "https://x.com/b");
    }

    #[test]
    fn rows_preserve_record_order() {
        let path = tmp_file("order.csv");
        let records = vec![
            record(&[("text", "first")]),
            record(&[("text", "second")]),
            record(&[("text", "third")]),
        ];
        write_records(&records, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let texts: Vec<String> = reader
            .records()
            .map(|r| r.unwrap()[0].to_string())
            .collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn extension_match_is_exact() {
        // Only a literal lowercase .json suffix selects JSON; anything
        // else falls through to the tabular writer.
        assert!(is_json(Path::new("out.json")));
        assert!(!is_json(Path::new("out.JSON")));
        assert!(!is_json(Path::new("out.csv")));
        assert!(!is_json(Path::new("results")));
    }
}

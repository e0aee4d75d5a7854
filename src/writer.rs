use crate::error::{Result, ScrapeError};
use crate::models::{ListingKind, ListingRecord};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// Where a batch landed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub file_name: String,
    pub count: usize,
}

/// Writes record batches as pretty JSON arrays under one directory
#[derive(Debug, Clone)]
pub struct BatchWriter {
    output_dir: PathBuf,
}

impl BatchWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Replaces `file_name` with `records`. An empty batch is refused and
    /// leaves any existing file alone.
    pub fn write(&self, kind: ListingKind, file_name: &str, records: &[ListingRecord]) -> Result<WriteSummary> {
        if records.is_empty() {
            return Err(ScrapeError::NoValidRecords { kind });
        }

        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(file_name);

        let mut out = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut out, records)?;
        out.write_all(b"\n")?;
        out.flush()?;

        info!("💾 Saved {} records to {}", records.len(), path.display());
        Ok(WriteSummary {
            path,
            file_name: file_name.to_string(),
            count: records.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CompoundRecord;
    use tempfile::TempDir;

    fn compound(url: &str) -> ListingRecord {
        ListingRecord::Compound(CompoundRecord {
            area: "الشيخ زايد".into(),
            project_name: "Sodic West".into(),
            developer_name: "sodic".into(),
            summary: "Discover Sodic's west project".into(),
            property_types: vec!["Villa".into(), "Townhouse".into()],
            developer_start_price: "9,000,000 EGP".into(),
            resale_start_price: "N/A".into(),
            land_area: String::new(),
            detail_url: url.into(),
        })
    }

    #[test]
    fn writes_pretty_unescaped_json() {
        let dir = TempDir::new().unwrap();
        let writer = BatchWriter::new(dir.path().join("out"));
        let records = vec![compound("https://www.nawy.com/compound/1"), compound("https://www.nawy.com/compound/2")];

        let summary = writer.write(ListingKind::Compound, "compounds_west.json", &records).unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.file_name, "compounds_west.json");

        let text = fs::read_to_string(&summary.path).unwrap();
        assert!(text.contains("الشيخ زايد"));
        assert!(text.starts_with("[\n  {\n    \"Area\""));

        let back: Vec<ListingRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn overwrites_previous_file() {
        let dir = TempDir::new().unwrap();
        let writer = BatchWriter::new(dir.path());
        writer
            .write(ListingKind::Compound, "c.json", &[compound("a"), compound("b"), compound("c")])
            .unwrap();
        writer.write(ListingKind::Compound, "c.json", &[compound("z")]).unwrap();

        let back: Vec<ListingRecord> =
            serde_json::from_str(&fs::read_to_string(dir.path().join("c.json")).unwrap()).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].detail_url(), "z");
    }

    #[test]
    fn refuses_empty_batch() {
        let dir = TempDir::new().unwrap();
        let writer = BatchWriter::new(dir.path());
        let err = writer.write(ListingKind::Property, "p.json", &[]).unwrap_err();
        assert!(matches!(err, ScrapeError::NoValidRecords { kind: ListingKind::Property }));
        assert!(!dir.path().join("p.json").exists());
    }
}

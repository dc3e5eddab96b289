use contracts::reports::common::export::CSV_DELIMITER;
use contracts::reports::common::CsvTable;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CSV bytes of a report table: UTF-8 BOM, `;` delimiter, header line first
pub fn write_csv(table: &CsvTable) -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(CSV_DELIMITER as u8)
        .from_writer(UTF8_BOM.to_vec());

    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_csv_with_bom_and_quotes() {
        let table = CsvTable {
            headers: vec!["Уровень".into(), "Статья".into()],
            rows: vec![vec!["0".into(), "ООО \"Альфа\"; филиал".into()]],
        };

        let bytes = write_csv(&table).unwrap();

        assert!(bytes.starts_with(UTF8_BOM));
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(text, "Уровень;Статья\n0;\"ООО \"\"Альфа\"\"; филиал\"\n");
    }
}

use crate::cmd::config::CmdError;

use salesreg_core::regression::{EvaluationRecord, SalesRecord};

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Read sales rows from every input file, preserving file and row order.
/// Expects headers: visitors, page_views, orders, units_sold.
pub fn read_records(paths: &[PathBuf]) -> Result<Vec<SalesRecord>, CmdError> {
    let mut out = Vec::new();
    for path in paths {
        let file = File::open(path)?;
        out.extend(records_from_reader(file)?);
    }
    Ok(out)
}

pub fn records_from_reader<R: Read>(reader: R) -> Result<Vec<SalesRecord>, CmdError> {
    let mut rdr =
        csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);
    let mut out = Vec::new();
    for result in rdr.deserialize() {
        let record: SalesRecord = result?;
        out.push(record);
    }
    Ok(out)
}

pub fn write_evaluation_records(
    path: &Path,
    records: &[EvaluationRecord],
) -> Result<(), CmdError> {
    let mut wtr = csv::Writer::from_path(path)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::records_from_reader;

    #[test]
    fn test_read_rows_from_csv() {
        let data = "\
visitors,page_views,orders,units_sold
100, 500, 10, 20
150,600,12,25
";
        let rows = records_from_reader(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].visitors, 100.0);
        assert_eq!(rows[0].units_sold, 20.0);
        assert_eq!(rows[1].orders, 12.0);
    }

    #[test]
    fn test_non_numeric_field_is_an_error() {
        let data = "visitors,page_views,orders,units_sold\n100,abc,10,20\n";
        assert!(records_from_reader(data.as_bytes()).is_err());
    }
}

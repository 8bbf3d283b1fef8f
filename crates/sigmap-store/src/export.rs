//! CSV export of measurement sequences.

use csv::Writer;
use time::format_description::well_known::Rfc3339;

use sigmap_types::Measurement;

use crate::error::Result;

/// Column order of the exported CSV.
pub const CSV_HEADER: [&str; 8] = [
    "id",
    "timestamp",
    "dbm",
    "lat",
    "lng",
    "floor",
    "location",
    "type",
];

/// Render measurements as CSV bytes, header row included.
///
/// Timestamps are RFC 3339; coordinates carry six decimal places. Row
/// order is the caller's record order.
pub fn export_csv(records: &[Measurement]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut writer = Writer::from_writer(&mut buf);
        writer.write_record(CSV_HEADER)?;

        for m in records {
            writer.write_record(&[
                m.id.clone(),
                m.timestamp.format(&Rfc3339)?,
                m.dbm.to_string(),
                format!("{:.6}", m.lat),
                format!("{:.6}", m.lng),
                m.floor.to_string(),
                m.location.clone(),
                m.kind.to_string(),
            ])?;
        }

        writer.flush()?;
    }
    Ok(buf)
}

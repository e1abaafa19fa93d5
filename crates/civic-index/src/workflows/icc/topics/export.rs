use std::io;

use super::domain::TopicSnapshot;

/// Writes the bank as CSV with `topic,keywords,activities` columns.
///
/// Keywords are joined with `", "` and activities with `"; "`.
pub fn write_csv<W: io::Write>(snapshot: &TopicSnapshot, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["topic", "keywords", "activities"])?;

    for (key, entry) in snapshot {
        let keywords = entry
            .keywords
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let activities = entry.activities.join("; ");
        csv_writer.write_record([key.as_str(), keywords.as_str(), activities.as_str()])?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn to_csv_string(snapshot: &TopicSnapshot) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_csv(snapshot, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|err| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, err)))
}

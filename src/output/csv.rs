use super::Record;

pub fn format<R: Record>(record: &R) -> String {
    record.csv_fields().join(",")
}

use super::Record;

pub fn format<R: Record>(record: &R, verbose: bool) -> String {
    record.text(verbose)
}

//! This integration test checks that a compressed dump on disk is read record by record.
use std::io::Write;

use inetstats::{Record, RecordReader};

#[test]
fn parse_gz_dump() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ripe.db.route6.gz");
    let mut encoder = flate2::write::GzEncoder::new(
        std::fs::File::create(&path).unwrap(),
        flate2::Compression::default(),
    );
    encoder
        .write_all(b"% comment\nroute6: 2001:db8::/32\ndescr: Caf\xe9\nmnt-by: EX-MNT\n")
        .unwrap();
    encoder.finish().unwrap();

    let records: Vec<Record> = RecordReader::from_path(path.to_str().unwrap())
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(
        records,
        vec![
            Record::new("route6", "2001:db8::/32"),
            Record::new("descr", "Café"),
            Record::new("mnt-by", "EX-MNT"),
        ]
    );
}

#[test]
fn missing_dump_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ripe.db.route.gz");
    assert!(RecordReader::from_path(path.to_str().unwrap()).is_err());
}

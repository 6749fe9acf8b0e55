use assert_cmd::cargo_bin;
use card_issuer::domain::generator::validate;
use card_issuer::domain::network::CardNetwork;
use std::collections::HashSet;
use std::process::Command;

mod common;

#[test]
fn test_generate_applications_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("applications.csv");
    common::generate_applications_csv(&path, 5).expect("Failed to generate CSV");

    let content = std::fs::read_to_string(&path).expect("Failed to read file");
    // Header + 5 rows = 6 lines
    assert_eq!(content.lines().count(), 6);
}

#[test]
fn test_bulk_issuance_is_unique_and_valid() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bulk.csv");
    common::generate_applications_csv(&path, 600).expect("Failed to generate CSV");

    let output = Command::new(cargo_bin!("card-issuer"))
        .arg("process")
        .arg(&path)
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let mut reader = csv::Reader::from_reader(output.stdout.as_slice());
    let mut numbers = HashSet::new();
    for result in reader.records() {
        let record = result.expect("Failed to read record");
        let network: CardNetwork = record[2].parse().unwrap();
        let number = record[3].to_string();
        assert!(number.starts_with(network.prefix()));
        assert!(validate(&number, Some(network)), "{number}");
        assert_eq!(&record[5], "PENDING");
        numbers.insert(number);
    }
    assert_eq!(numbers.len(), 600);
}

use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub const HEADER: &str = "type, id, actor, role, network, limit, reason";

/// Writes a command file with the standard header followed by `rows`.
pub fn command_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file
}

/// `applications` apply rows cycling through the three networks, each from
/// its own user.
pub fn generate_applications_csv(path: &Path, applications: u32) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(["type", "id", "actor", "role", "network", "limit", "reason"])?;

    let networks = ["VISA", "MASTERCARD", "AMEX"];
    for id in 1..=applications {
        wtr.write_record([
            "apply",
            &id.to_string(),
            &(1000 + id).to_string(),
            "USER",
            networks[id as usize % networks.len()],
            "2500",
            "",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

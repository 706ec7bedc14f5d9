//! CSV package loader.
//!
//! Parses package CSV files into `Package` structs.
//! Expected CSV columns:
//!   pkg_id, weight, value

use std::collections::HashSet;
use std::io::Read;

use crate::error::{CockpitError, CockpitResult};
use crate::types::Package;

/// Load packages from a CSV reader.
///
/// Package ids must be unique within a file.
pub fn load_packages<R: Read>(reader: R) -> CockpitResult<Vec<Package>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut packages = Vec::new();
    let mut seen = HashSet::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let package: Package = result.map_err(|e| CockpitError::Csv {
            line: line_num + 2,
            reason: e.to_string(),
        })?;
        if !seen.insert(package.pkg_id.clone()) {
            return Err(CockpitError::DuplicateItem(package.pkg_id));
        }
        packages.push(package);
    }

    log::debug!("loaded {} packages", packages.len());
    Ok(packages)
}

/// Load packages from a CSV file path.
pub fn load_packages_file(path: &str) -> CockpitResult<Vec<Package>> {
    let file = std::fs::File::open(path).map_err(|e| CockpitError::Io {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    load_packages(file)
}

/// The six demo packages `A`..`F`: package i weighs 5·i and is worth 10·i.
pub fn default_packages() -> Vec<Package> {
    (1..=6u8)
        .map(|i| {
            let id = char::from(b'A' + i - 1).to_string();
            Package::new(id, 5.0 * f64::from(i), 10.0 * f64::from(i))
        })
        .collect()
}

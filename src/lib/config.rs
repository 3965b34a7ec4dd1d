use std::{fs, io, path::Path};

use serde::Deserialize;

use crate::error::SettleError;
use crate::types::{Participant, Roster};

fn default_split_column_index() -> usize {
    3
}

/// Run settings, read once per invocation from a JSON file.
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Which ledger column holds the comma separated beneficiaries list.
    #[serde(default = "default_split_column_index")]
    pub split_column_index: usize,
    /// Comma separated identifiers accepted as payers.
    #[serde(default)]
    pub payers: String,
    /// Comma separated identifiers accepted as payees.
    #[serde(default)]
    pub payees: String,
}

impl Settings {
    /// The validated roster. An empty list on either side means every row
    /// would be skipped, so it is rejected here rather than warned about
    /// row by row.
    pub fn roster(&self) -> Result<Roster, SettleError> {
        let payers = parse_id_list(&self.payers);
        let payees = parse_id_list(&self.payees);

        if payers.is_empty() {
            return Err(SettleError::ConfigMalformed {
                reason: "no payers configured".to_string(),
            });
        }
        if payees.is_empty() {
            return Err(SettleError::ConfigMalformed {
                reason: "no payees configured".to_string(),
            });
        }

        Ok(Roster::new(payers, payees))
    }
}

pub fn load_settings(path: &Path) -> Result<Settings, SettleError> {
    let raw = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => SettleError::ConfigNotFound(path.to_path_buf()),
        _ => SettleError::Io(e),
    })?;
    parse_settings(&raw)
}

pub fn parse_settings(raw: &str) -> Result<Settings, SettleError> {
    serde_json::from_str(raw).map_err(|e| SettleError::ConfigMalformed {
        reason: e.to_string(),
    })
}

// Whitespace is stripped before splitting; duplicates keep their first
// position so roster order stays stable.
fn parse_id_list(raw: &str) -> Vec<Participant> {
    let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    let mut identifiers: Vec<Participant> = Vec::new();
    for id in stripped.split(',') {
        if id.is_empty() {
            continue;
        }
        let participant = Participant::new(id);
        if !identifiers.contains(&participant) {
            identifiers.push(participant);
        }
    }
    identifiers
}

use crate::error::DraftError;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};

use super::model::Chain;

/// A persistable snapshot of an in-progress chain.
///
/// Drafts are an editor-side convenience: the committed chain (with its id
/// counter) is written out verbatim so a session can be resumed later with
/// identities intact. This is not the submission format.
#[derive(Serialize, Deserialize, Debug)]
pub struct ChainDraft {
    pub chain: Chain,
}

impl ChainDraft {
    pub fn new(chain: Chain) -> Self {
        Self { chain }
    }

    /// Saves the draft to a file using the bincode format.
    pub fn save(&self, path: &str) -> Result<(), DraftError> {
        let bytes = encode_to_vec(self, standard())
            .map_err(|e| DraftError::Encode(e.to_string()))?;
        let mut file = fs::File::create(path)
            .map_err(|e| DraftError::Io(format!("Could not create file '{}': {}", path, e)))?;
        file.write_all(&bytes)
            .map_err(|e| DraftError::Io(format!("Could not write to file '{}': {}", path, e)))?;
        Ok(())
    }

    /// Loads a draft from a file.
    pub fn from_file(path: &str) -> Result<Self, DraftError> {
        let mut file = fs::File::open(path)
            .map_err(|e| DraftError::Io(format!("Could not open file '{}': {}", path, e)))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| DraftError::Io(format!("Could not read from file '{}': {}", path, e)))?;
        Self::from_bytes(&bytes)
    }

    /// Deserializes a draft from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DraftError> {
        decode_from_slice(bytes, standard())
            .map(|(draft, _)| draft) // bincode 2 returns a tuple (data, bytes_read)
            .map_err(|e| DraftError::Decode(e.to_string()))
    }
}

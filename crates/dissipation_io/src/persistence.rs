//! Checkpoints of master states and archives of sweep results.

use crate::error::{IoError, Result};
use dissipation_data::{MasterState, SweepResult};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use rkyv::de::deserializers::SharedDeserializeMap;
use rkyv::Deserialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Writes `state` as a validated rkyv archive.
pub fn save_master_state<P: AsRef<Path>>(state: &MasterState, path: P) -> Result<()> {
    let bytes = rkyv::to_bytes::<_, 4096>(state)
        .map_err(|e| IoError::rkyv(format!("Rkyv serialization error: {:?}", e)))?;
    let mut file = File::create(path.as_ref())?;
    file.write_all(&bytes)?;
    tracing::debug!(
        path = %path.as_ref().display(),
        bytes = bytes.len(),
        "Saved master state"
    );
    Ok(())
}

/// Loads and validates a master state written by [`save_master_state`].
pub fn load_master_state<P: AsRef<Path>>(path: P) -> Result<MasterState> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::not_found(path.display().to_string()));
    }
    let raw = std::fs::read(path)?;
    let mut bytes = rkyv::AlignedVec::with_capacity(raw.len());
    bytes.extend_from_slice(&raw);

    let archived = rkyv::check_archived_root::<MasterState>(&bytes)
        .map_err(|e| IoError::rkyv(format!("Rkyv validation error: {:?}", e)))?;
    let mut deserializer = SharedDeserializeMap::default();
    let state: MasterState = archived
        .deserialize(&mut deserializer)
        .map_err(|e| IoError::rkyv(format!("Rkyv deserialization error: {:?}", e)))?;

    if state.cells.len() != state.grid_size * state.grid_size {
        return Err(IoError::validation(format!(
            "Grid of size {} has {} cells",
            state.grid_size,
            state.cells.len()
        )));
    }
    Ok(state)
}

/// Writes sweep results as gzip-compressed JSON.
pub fn save_results<P: AsRef<Path>>(results: &[SweepResult], path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut encoder = GzEncoder::new(file, Compression::default());
    let json = serde_json::to_string(results)?;
    encoder.write_all(json.as_bytes())?;
    encoder.finish()?;
    Ok(())
}

pub fn load_results<P: AsRef<Path>>(path: P) -> Result<Vec<SweepResult>> {
    let file = File::open(path.as_ref())?;
    let mut decoder = GzDecoder::new(file);
    let mut json = String::new();
    decoder.read_to_string(&mut json)?;
    Ok(serde_json::from_str(&json)?)
}

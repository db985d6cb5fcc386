//! JSON mesh documents

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use vertexanim_core::{AnimatedMesh, Error, Result};

/// Read a mesh from a JSON document
pub fn read_mesh<P: AsRef<Path>>(path: P) -> Result<AnimatedMesh> {
    let file = File::open(path.as_ref())?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| Error::Serialization(e.to_string()))
}

/// Write a mesh as a JSON document, replacing any existing file
pub fn write_mesh<P: AsRef<Path>>(mesh: &AnimatedMesh, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, mesh).map_err(|e| Error::Serialization(e.to_string()))?;
    writer.flush()?;
    Ok(())
}

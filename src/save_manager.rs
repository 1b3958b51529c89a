//! Checksummed binary persistence for [`GameState`].
//!
//! File layout: version magic (8 bytes), file version (4 bytes), payload
//! length (4 bytes), bincode payload, SHA-256 checksum over everything
//! before it (32 bytes). A bad magic, version, or checksum rejects the
//! file rather than loading a corrupt session.

use crate::constants::{SAVE_FILE_VERSION, SAVE_VERSION_MAGIC};
use crate::tick::GameState;
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Sets up the save file under the platform config directory.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "ascend").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "could not determine config directory")
        })?;
        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Ok(Self {
            save_path: config_dir.join("session.sav"),
        })
    }

    /// Uses an explicit save path. Tests point this at a temp file.
    pub fn at_path(save_path: PathBuf) -> Self {
        Self { save_path }
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    pub fn save(&self, state: &GameState) -> io::Result<()> {
        let payload = bincode::serialize(state)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut body = Vec::with_capacity(16 + payload.len());
        body.extend_from_slice(&SAVE_VERSION_MAGIC.to_le_bytes());
        body.extend_from_slice(&SAVE_FILE_VERSION.to_le_bytes());
        body.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        body.extend_from_slice(&payload);

        let checksum = Sha256::digest(&body);

        let mut file = fs::File::create(&self.save_path)?;
        file.write_all(&body)?;
        file.write_all(&checksum)?;
        Ok(())
    }

    pub fn load(&self) -> io::Result<GameState> {
        let mut file = fs::File::open(&self.save_path)?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;

        if contents.len() < 16 + 32 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "save file too short",
            ));
        }

        let (body, stored_checksum) = contents.split_at(contents.len() - 32);
        let computed_checksum = Sha256::digest(body);
        if stored_checksum != computed_checksum.as_slice() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "checksum verification failed",
            ));
        }

        let magic = u64::from_le_bytes(body[0..8].try_into().unwrap());
        if magic != SAVE_VERSION_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "invalid save magic: expected 0x{:016X}, got 0x{:016X}",
                    SAVE_VERSION_MAGIC, magic
                ),
            ));
        }

        let file_version = u32::from_le_bytes(body[8..12].try_into().unwrap());
        if file_version != SAVE_FILE_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unsupported save version {}", file_version),
            ));
        }

        let payload_len = u32::from_le_bytes(body[12..16].try_into().unwrap()) as usize;
        let payload = &body[16..];
        if payload.len() != payload_len {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "payload length mismatch",
            ));
        }

        bincode::deserialize(payload).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

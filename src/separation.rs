//! Source-separation tool integration.
//!
//! Separation runs out-of-process: the external tool (Spleeter's five-stem
//! model by default) splits one mixed audio file into the five fixed stem
//! files. An existing output directory is reused as a cache, keyed by the
//! presence of the last-written stem.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{anyhow, bail, Context, Result};

use crate::scene::StemId;

/// The five stem keys the separation tool produces, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StemKey {
    Vocals,
    Drums,
    Bass,
    Piano,
    Other,
}

impl StemKey {
    pub const ALL: [StemKey; 5] = [
        StemKey::Vocals,
        StemKey::Drums,
        StemKey::Bass,
        StemKey::Piano,
        StemKey::Other,
    ];

    /// Key as it appears in the tool's output file names (`vocals.wav`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            StemKey::Vocals => "vocals",
            StemKey::Drums => "drums",
            StemKey::Bass => "bass",
            StemKey::Piano => "piano",
            StemKey::Other => "other",
        }
    }

    /// Which scene object this stem feeds. The residual "other" stem carries
    /// the melodic remainder and lands on Melody.
    pub fn target(&self) -> StemId {
        match self {
            StemKey::Vocals => StemId::Vocals,
            StemKey::Drums => StemId::Drums,
            StemKey::Bass => StemId::Bass,
            StemKey::Piano => StemId::Piano,
            StemKey::Other => StemId::Melody,
        }
    }
}

/// Result of probing for the separation tool.
#[derive(Debug)]
pub enum SeparatorStatus {
    /// Tool is available with the given version string.
    Available(String),
    /// Tool is not found on the PATH.
    NotFound,
    /// Tool was found but the version could not be determined.
    Unknown,
}

/// Check whether the separation tool is available on the system.
pub fn check_separator(tool: &str) -> SeparatorStatus {
    match Command::new(tool).arg("--version").output() {
        Ok(output) => {
            if output.status.success() {
                let stdout = String::from_utf8_lossy(&output.stdout);
                if let Some(first_line) = stdout.lines().next() {
                    SeparatorStatus::Available(first_line.to_string())
                } else {
                    SeparatorStatus::Unknown
                }
            } else {
                SeparatorStatus::NotFound
            }
        }
        Err(_) => SeparatorStatus::NotFound,
    }
}

/// Expected stem files for a song's output directory, in [`StemKey::ALL`]
/// order.
fn stem_files(song_dir: &Path) -> Vec<(StemKey, PathBuf)> {
    StemKey::ALL
        .iter()
        .map(|key| (*key, song_dir.join(format!("{}.wav", key.name()))))
        .collect()
}

/// Separate `input` into five stems under `out_dir/<song>/`.
///
/// Reuses a previous run's output when present (the piano stem is written
/// last, so its existence marks a complete run). Returns the per-stem file
/// paths; the caller feeds them to the audio loader and tracks settlement
/// with [`crate::loader::StemLoadSet`].
pub fn separate_stems(tool: &str, input: &Path, out_dir: &Path) -> Result<Vec<(StemKey, PathBuf)>> {
    let song = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("input file {:?} has no usable name", input))?;
    let song_dir = out_dir.join(song);

    if song_dir.join("piano.wav").exists() {
        log::info!("reusing cached separation in {:?}", song_dir);
        return Ok(stem_files(&song_dir));
    }

    match check_separator(tool) {
        SeparatorStatus::Available(version) => {
            log::info!("Using {}", version);
        }
        SeparatorStatus::NotFound => {
            bail!(
                "separation tool `{}` not found. Install it and ensure it's in your PATH.",
                tool
            );
        }
        SeparatorStatus::Unknown => {
            log::warn!("separation tool found but version unknown, proceeding anyway");
        }
    }

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {:?}", out_dir))?;

    log::info!("separating {:?} into five stems", input);
    let output = Command::new(tool)
        .arg("separate")
        .arg("-p")
        .arg("spleeter:5stems")
        .arg("-o")
        .arg(out_dir)
        .arg(input)
        .output()
        .with_context(|| format!("failed to run `{}`", tool))?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    // The tool logs progress to stderr; only treat it as fatal on a bad exit
    // or an explicit ERROR line.
    if !output.status.success() || stderr.contains("ERROR") {
        bail!("separation failed:\n{}", stderr);
    }
    if !stderr.is_empty() {
        log::debug!("separator stderr: {}", stderr);
    }

    log::info!("separation complete, stems in {:?}", song_dir);
    Ok(stem_files(&song_dir))
}

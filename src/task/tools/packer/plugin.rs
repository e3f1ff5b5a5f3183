// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Plugin archive assembly.
//!
//! ```text
//! linked package (optional)    every entry except AndroidManifest.xml,
//!                              raw-copied, compression kept
//! classes.dex                  dexer output
//! ac-plugin                    UTF-8 plugin name
//! ```

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use bon::Builder;
use tracing::debug;
use zip::{ZipArchive, ZipWriter};

use super::{deflated, zip_error};
use crate::error::{FsError, Result};

/// Entry holding the dex bytecode.
pub const DEX_ENTRY: &str = "classes.dex";
/// Entry the runtime loader reads the plugin name from.
pub const MARKER_ENTRY: &str = "ac-plugin";
/// Manifest entry dropped from linked packages.
pub const MANIFEST_ENTRY: &str = "AndroidManifest.xml";

/// A plugin archive to be written.
#[derive(Debug, Clone, Builder)]
pub struct PluginArchive {
    /// Final archive path.
    #[builder(into)]
    destination: PathBuf,
    /// Written verbatim into the marker entry.
    #[builder(into)]
    plugin_name: String,
    /// `classes.dex` produced by d8.
    #[builder(into)]
    dex: PathBuf,
    /// APK from `aapt2 link`, when the plugin has resources.
    #[builder(into)]
    linked_package: Option<PathBuf>,
}

impl PluginArchive {
    /// Writes the archive, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the dex or linked package cannot be read or the
    /// destination cannot be written.
    pub fn write(&self) -> Result<()> {
        let dest = &self.destination;
        let file = File::create(dest).map_err(|e| FsError::io(dest, e))?;
        let mut writer = ZipWriter::new(file);

        if let Some(package) = &self.linked_package {
            self.copy_resources(package, &mut writer)?;
        }

        let dex = std::fs::read(&self.dex).map_err(|e| FsError::io(&self.dex, e))?;
        writer
            .start_file(DEX_ENTRY, deflated())
            .map_err(|e| zip_error(dest, e))?;
        writer.write_all(&dex).map_err(|e| FsError::io(dest, e))?;

        writer
            .start_file(MARKER_ENTRY, deflated())
            .map_err(|e| zip_error(dest, e))?;
        writer
            .write_all(self.plugin_name.as_bytes())
            .map_err(|e| FsError::io(dest, e))?;

        writer.finish().map_err(|e| zip_error(dest, e))?;
        debug!(archive = %dest.display(), plugin = %self.plugin_name, "plugin archive written");
        Ok(())
    }

    fn copy_resources(&self, package: &Path, writer: &mut ZipWriter<File>) -> Result<()> {
        let file = File::open(package).map_err(|e| FsError::io(package, e))?;
        let mut reader = ZipArchive::new(file).map_err(|e| zip_error(package, e))?;

        for index in 0..reader.len() {
            let entry = reader
                .by_index_raw(index)
                .map_err(|e| zip_error(package, e))?;
            // classes.dex and ac-plugin are written afterwards
            if matches!(entry.name(), MANIFEST_ENTRY | DEX_ENTRY | MARKER_ENTRY) {
                continue;
            }
            writer
                .raw_copy_file(entry)
                .map_err(|e| zip_error(&self.destination, e))?;
        }
        Ok(())
    }
}

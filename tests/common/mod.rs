// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Project fixture with stub gradlew, d8 and aapt2 scripts.
//!
//! ```text
//! <tmp>/
//!   aliucord/gradlew      creates Aliucord/build/intermediates/javac/debug/classes
//!   plugins/gradlew       same, for the plugin named in the task
//!   plugins/settings.gradle
//!   sdk/
//!   bin/d8                copies its input to classes.dex
//!   bin/aapt2             compile writes -o, link copies linked.apk to -o
//!   linked.apk            what "aapt2 link" produces
//!   calls.log             one line per stub invocation
//! ```

#![cfg(unix)]
#![allow(dead_code)]

use std::fs::File;
use std::io::{Read, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use acbuild::config::{Config, ToolsConfig};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const GRADLEW: &str = r#"echo "gradle $1" >> "$ACB_LOG"
task="${1#:}"
module="${task%%:*}"
dir="$module/build/intermediates/javac/debug/classes/com/aliucord"
mkdir -p "$dir"
printf 'class-%s' "$module" > "$dir/Main.class""#;

const D8: &str = r#"[ "$1" = "--version" ] && exit 0
echo "d8 $1" >> "$ACB_LOG"
cp "$1" classes.dex"#;

const AAPT2: &str = r#"case "$1" in
  version) exit 0 ;;
  compile) echo "aapt2 $*" >> "$ACB_LOG"; printf compiled > "$5" ;;
  link) echo "aapt2 $*" >> "$ACB_LOG"; cp "$ACB_LINKED" "$9" ;;
esac"#;

pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for sub in ["aliucord", "plugins", "sdk", "bin"] {
            std::fs::create_dir_all(root.join(sub)).unwrap();
        }

        let log = root.join("calls.log");
        let linked = root.join("linked.apk");
        let env = format!(
            "ACB_LOG='{}'\nACB_LINKED='{}'\n",
            log.display(),
            linked.display()
        );

        write_script(&root.join("aliucord/gradlew"), &format!("{env}{GRADLEW}"));
        write_script(&root.join("plugins/gradlew"), &format!("{env}{GRADLEW}"));
        write_script(&root.join("bin/d8"), &format!("{env}{D8}"));
        write_script(&root.join("bin/aapt2"), &format!("{env}{AAPT2}"));
        write_linked_package(&linked);

        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> Config {
        let root = self.root();
        Config {
            aliucord: root.join("aliucord"),
            plugins: root.join("plugins"),
            android_sdk: root.join("sdk"),
            android_sdk_version: "29".to_string(),
            outputs: root.join("out"),
            outputs_plugins: root.join("out/plugins"),
            tools: ToolsConfig {
                d8: root.join("bin/d8"),
                aapt2: root.join("bin/aapt2"),
            },
        }
    }

    /// Creates a plugin project, optionally with a non-empty `res` directory.
    pub fn add_plugin(&self, name: &str, with_resources: bool) {
        let main = self.root().join("plugins").join(name).join("src/main");
        std::fs::create_dir_all(&main).unwrap();
        std::fs::write(main.join("AndroidManifest.xml"), "<manifest/>").unwrap();
        if with_resources {
            std::fs::create_dir_all(main.join("res/values")).unwrap();
            std::fs::write(main.join("res/values/strings.xml"), "<resources/>").unwrap();
        }
    }

    /// Gives an existing plugin a `res` directory with nothing in it.
    pub fn add_empty_resources(&self, name: &str) {
        let res = self.root().join("plugins").join(name).join("src/main/res");
        std::fs::create_dir_all(res).unwrap();
    }

    pub fn write_settings(&self, content: &str) {
        std::fs::write(self.root().join("plugins/settings.gradle"), content).unwrap();
    }

    /// Stub invocations, in order.
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.root().join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

pub fn write_script(path: &Path, body: &str) -> PathBuf {
    std::fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path.to_path_buf()
}

fn write_linked_package(path: &Path) {
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    zip.start_file("AndroidManifest.xml", deflated).unwrap();
    zip.write_all(b"binary manifest").unwrap();
    zip.start_file("resources.arsc", stored).unwrap();
    zip.write_all(b"arsc table").unwrap();
    zip.start_file("res/layout/settings.xml", deflated).unwrap();
    zip.write_all(b"layout").unwrap();
    zip.finish().unwrap();
}

pub fn entry_names(archive: &Path) -> Vec<String> {
    let mut zip = ZipArchive::new(File::open(archive).unwrap()).unwrap();
    (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect()
}

pub fn entry_bytes(archive: &Path, name: &str) -> Vec<u8> {
    let mut zip = ZipArchive::new(File::open(archive).unwrap()).unwrap();
    let mut entry = zip.by_name(name).unwrap();
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes).unwrap();
    bytes
}

/// Entry names of a zip held in memory (the stub d8 output is a copy of
/// the class archive).
pub fn nested_entry_names(bytes: Vec<u8>) -> Vec<String> {
    let mut zip = ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect()
}

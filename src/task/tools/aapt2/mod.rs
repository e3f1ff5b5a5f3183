// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `aapt2` resource compiler and linker.
//!
//! ```text
//! Aapt2Tool
//! Operations: Compile | Link
//! compile: aapt2 compile --dir <res> -o <compiled.zip>
//! link:    aapt2 link -I <android.jar> -R <compiled.zip>
//!                     --manifest <AndroidManifest.xml> -o <package.apk>
//! Builder: working_dir/res_dir/compiled/android_jar/manifest/output
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use super::{BoxFuture, Tool, ToolContext};
use crate::core::process::builder::ProcessBuilder;
use crate::error::Result;

/// `aapt2` operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aapt2Operation {
    /// Compile a resource directory into an archive of flat files.
    #[default]
    Compile,
    /// Link compiled resources and a manifest into an APK.
    Link,
}

impl Aapt2Operation {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Link => "link",
        }
    }
}

/// Resource compiler/linker tool.
#[derive(Debug, Clone, Default)]
pub struct Aapt2Tool {
    working_dir: Option<PathBuf>,
    res_dir: Option<PathBuf>,
    compiled: Option<PathBuf>,
    android_jar: Option<PathBuf>,
    manifest: Option<PathBuf>,
    output: Option<PathBuf>,
    operation: Aapt2Operation,
}

impl Aapt2Tool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            working_dir: None,
            res_dir: None,
            compiled: None,
            android_jar: None,
            manifest: None,
            output: None,
            operation: Aapt2Operation::Compile,
        }
    }

    #[must_use]
    pub fn working_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.working_dir = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn res_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.res_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Compiled resources archive: output of compile, input of link.
    #[must_use]
    pub fn compiled(mut self, path: impl AsRef<Path>) -> Self {
        self.compiled = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn android_jar(mut self, path: impl AsRef<Path>) -> Self {
        self.android_jar = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn manifest(mut self, path: impl AsRef<Path>) -> Self {
        self.manifest = Some(path.as_ref().to_path_buf());
        self
    }

    /// Linked package path.
    #[must_use]
    pub fn output(mut self, path: impl AsRef<Path>) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub const fn compile_op(mut self) -> Self {
        self.operation = Aapt2Operation::Compile;
        self
    }

    #[must_use]
    pub const fn link_op(mut self) -> Self {
        self.operation = Aapt2Operation::Link;
        self
    }

    fn required<'a>(value: Option<&'a PathBuf>, what: &str) -> Result<&'a Path> {
        value
            .map(PathBuf::as_path)
            .with_context(|| format!("Aapt2Tool: {what} is required"))
    }

    /// Argument vector for the configured operation.
    ///
    /// # Errors
    ///
    /// Returns an error if a path the operation needs was not set.
    pub fn args(&self) -> Result<Vec<OsString>> {
        let mut args: Vec<OsString> = vec![self.operation.as_str().into()];
        match self.operation {
            Aapt2Operation::Compile => {
                args.push("--dir".into());
                args.push(Self::required(self.res_dir.as_ref(), "res_dir")?.into());
                args.push("-o".into());
                args.push(Self::required(self.compiled.as_ref(), "compiled")?.into());
            }
            Aapt2Operation::Link => {
                args.push("-I".into());
                args.push(Self::required(self.android_jar.as_ref(), "android_jar")?.into());
                args.push("-R".into());
                args.push(Self::required(self.compiled.as_ref(), "compiled")?.into());
                args.push("--manifest".into());
                args.push(Self::required(self.manifest.as_ref(), "manifest")?.into());
                args.push("-o".into());
                args.push(Self::required(self.output.as_ref(), "output")?.into());
            }
        }
        Ok(args)
    }
}

impl Tool for Aapt2Tool {
    fn name(&self) -> &'static str {
        "aapt2"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let operation = self.operation.as_str();
            let mut builder = ProcessBuilder::new(ctx.aapt2())
                .args(self.args()?)
                .name("aapt2");
            if let Some(dir) = &self.working_dir {
                builder = builder.cwd(dir);
            }

            info!(operation, "running aapt2");
            builder
                .run()
                .await
                .with_context(|| format!("aapt2 {operation} failed"))?;
            Ok(())
        })
    }
}

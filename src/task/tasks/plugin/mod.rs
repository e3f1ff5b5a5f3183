// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Plugin build.
//!
//! ```text
//! PluginTask
//! gradlew <Name>:compileDebugJavaWithJavac        (cwd plugins)
//! pack <Name>/build/intermediates/javac/debug/classes → classes.zip
//! d8 classes.zip                                  (cwd outputs_plugins)
//! src/main/res non-empty?
//!   yes: aapt2 compile --dir res -o tmpres.zip
//!        aapt2 link -I android.jar -R tmpres.zip --manifest ... -o <Name>-tmp.apk
//!        rm tmpres.zip
//!        <Name>.zip = apk entries - AndroidManifest.xml + classes.dex + ac-plugin
//!        rm <Name>-tmp.apk
//!   no:  <Name>.zip = classes.dex + ac-plugin
//! rm classes.dex
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use futures_util::future::BoxFuture;
use tracing::{debug, info};

use super::javac_debug_dir;
use crate::config::Config;
use crate::error::{BuildError, Result};
use crate::task::helpers::{ensure_dir, has_entries, output_file_name, remove_file_if_exists};
use crate::task::tools::Tool;
use crate::task::tools::aapt2::Aapt2Tool;
use crate::task::tools::d8::D8Tool;
use crate::task::tools::gradle::{COMPILE_TASK, GradleTool};
use crate::task::tools::packer::PackerTool;
use crate::task::tools::packer::plugin::PluginArchive;
use crate::task::{TaskContext, Taskable};

const CLASS_ARCHIVE: &str = "classes.zip";
const COMPILED_RESOURCES: &str = "tmpres.zip";

/// Builds one plugin archive.
#[derive(Debug, Clone)]
pub struct PluginTask {
    name: String,
}

impl PluginTask {
    /// The name is trimmed; it must match a directory under `plugins`.
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
        }
    }

    /// `<Name>:compileDebugJavaWithJavac`
    #[must_use]
    pub fn gradle_task(&self) -> String {
        format!("{}:{COMPILE_TASK}", self.name)
    }

    #[must_use]
    pub fn javac_dir(&self, config: &Config) -> PathBuf {
        javac_debug_dir(&config.plugin_dir(&self.name))
    }

    /// `<plugin>/src/main`
    #[must_use]
    pub fn source_dir(&self, config: &Config) -> PathBuf {
        config.plugin_dir(&self.name).join("src").join("main")
    }

    /// Temporary package written by `aapt2 link`.
    #[must_use]
    pub fn linked_package_path(&self, config: &Config) -> PathBuf {
        config
            .outputs_plugins
            .join(format!("{}-tmp.apk", self.name))
    }

    fn check_exists(&self, config: &Config) -> Result<()> {
        let dir = config.plugin_dir(&self.name);
        if !dir.is_dir() {
            return Err(BuildError::PluginNotFound {
                name: self.name.clone(),
                path: dir.display().to_string(),
            }
            .into());
        }
        Ok(())
    }

    async fn link_resources(&self, ctx: &TaskContext, res: &Path) -> Result<PathBuf> {
        let config = ctx.config();
        let tools = ctx.tool_context();
        let out_dir = &config.outputs_plugins;
        let compiled = out_dir.join(COMPILED_RESOURCES);
        let package = self.linked_package_path(config);

        debug!(plugin = %self.name, res = %res.display(), "linking resources");
        Aapt2Tool::new()
            .working_dir(out_dir)
            .res_dir(res)
            .compiled(&compiled)
            .compile_op()
            .run(tools)
            .await?;

        Aapt2Tool::new()
            .working_dir(out_dir)
            .android_jar(config.android_jar())
            .compiled(&compiled)
            .manifest(self.source_dir(config).join("AndroidManifest.xml"))
            .output(&package)
            .link_op()
            .run(tools)
            .await?;

        remove_file_if_exists(&compiled).await?;
        Ok(package)
    }

    async fn run(&self, ctx: &TaskContext) -> Result<PathBuf> {
        let config = ctx.config();
        let tools = ctx.tool_context();
        self.check_exists(config)?;

        GradleTool::new()
            .project_dir(&config.plugins)
            .task(self.gradle_task())
            .run(tools)
            .await?;

        let javac = self.javac_dir(config);
        let archive = javac.join(CLASS_ARCHIVE);
        PackerTool::new()
            .classes_dir(javac.join("classes"))
            .archive(&archive)
            .run(tools)
            .await?;

        ensure_dir(&config.outputs_plugins).await?;
        let d8 = D8Tool::new()
            .input(&archive)
            .output_dir(&config.outputs_plugins);
        d8.run(tools).await?;
        let dex = d8.dex_path()?;

        let res = self.source_dir(config).join("res");
        let linked = if has_entries(&res).await {
            Some(self.link_resources(ctx, &res).await?)
        } else {
            debug!(plugin = %self.name, "no resources");
            None
        };

        let out = config
            .outputs_plugins
            .join(output_file_name(ctx.output_name(), &self.name, "zip"));
        let writer = PluginArchive::builder()
            .destination(&out)
            .plugin_name(self.name.as_str())
            .dex(&dex)
            .maybe_linked_package(linked.as_deref())
            .build();
        tokio::task::spawn_blocking(move || writer.write())
            .await
            .context("archive task panicked")?
            .with_context(|| format!("failed to write {}", out.display()))?;

        if let Some(package) = &linked {
            remove_file_if_exists(package).await?;
        }
        remove_file_if_exists(&dex).await?;

        info!(plugin = %self.name, path = %out.display(), "plugin archive written");
        Ok(out)
    }
}

impl Taskable for PluginTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn build<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<PathBuf>> {
        Box::pin(self.run(ctx))
    }
}

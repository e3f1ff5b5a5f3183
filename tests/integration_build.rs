// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! End-to-end builds against stub gradlew, d8 and aapt2 scripts.

#![cfg(unix)]

mod common;

use std::sync::Arc;

use acbuild::cli::build::BuildArgs;
use acbuild::cmd::build::run_build_command;
use acbuild::error::{BuildError, FsError};
use acbuild::utility::fs::lock::OutputLock;
use common::{Fixture, entry_bytes, entry_names, nested_entry_names};

fn args(plugin: Option<&str>, output: Option<&str>) -> BuildArgs {
    BuildArgs {
        plugin: plugin.map(str::to_string),
        output: output.map(str::to_string),
        gradle_projects: false,
    }
}

// =============================================================================
// Core
// =============================================================================

#[tokio::test]
async fn build_core_writes_aliucord_dex() {
    let fixture = Fixture::new();
    let config = fixture.config();

    run_build_command(&args(None, None), Arc::new(config.clone()))
        .await
        .unwrap();

    let dex = config.outputs.join("Aliucord.dex");
    assert!(dex.is_file());
    assert!(!config.outputs.join("classes.dex").exists());
    assert_eq!(
        nested_entry_names(std::fs::read(&dex).unwrap()),
        vec!["com/aliucord/Main.class"]
    );

    let calls = fixture.calls();
    assert_eq!(calls[0], "gradle :Aliucord:compileDebugJavaWithJavac");
    assert!(calls[1].starts_with("d8 ") && calls[1].ends_with("/javac/debug/aliucord.zip"));
}

#[tokio::test]
async fn build_core_output_override() {
    let fixture = Fixture::new();
    let config = fixture.config();

    run_build_command(&args(None, Some("Custom")), Arc::new(config.clone()))
        .await
        .unwrap();
    assert!(config.outputs.join("Custom.dex").is_file());
    assert!(!config.outputs.join("Aliucord.dex").exists());

    run_build_command(&args(None, Some("Again.dex")), Arc::new(config.clone()))
        .await
        .unwrap();
    assert!(config.outputs.join("Again.dex").is_file());
    assert!(!config.outputs.join("Again.dex.dex").exists());
}

// =============================================================================
// Plugins
// =============================================================================

#[tokio::test]
async fn build_plugin_without_resources() {
    let fixture = Fixture::new();
    fixture.add_plugin("PluginA", false);
    let config = fixture.config();

    run_build_command(&args(Some(" PluginA "), None), Arc::new(config.clone()))
        .await
        .unwrap();

    let archive = config.outputs_plugins.join("PluginA.zip");
    assert_eq!(entry_names(&archive), vec!["classes.dex", "ac-plugin"]);
    assert_eq!(entry_bytes(&archive, "ac-plugin"), b"PluginA");
    assert_eq!(
        nested_entry_names(entry_bytes(&archive, "classes.dex")),
        vec!["com/aliucord/Main.class"]
    );
    assert!(fixture.calls().iter().all(|c| !c.starts_with("aapt2")));

    // only the shipped archive; the lock file lives beside the directory
    let listing: Vec<String> = std::fs::read_dir(&config.outputs_plugins)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(listing, vec!["PluginA.zip"]);
}

#[tokio::test]
async fn build_plugin_with_resources() {
    let fixture = Fixture::new();
    fixture.add_plugin("PluginB", true);
    let config = fixture.config();

    run_build_command(&args(Some("PluginB"), None), Arc::new(config.clone()))
        .await
        .unwrap();

    let archive = config.outputs_plugins.join("PluginB.zip");
    assert_eq!(
        entry_names(&archive),
        vec!["resources.arsc", "res/layout/settings.xml", "classes.dex", "ac-plugin"]
    );
    assert_eq!(entry_bytes(&archive, "resources.arsc"), b"arsc table");
    assert_eq!(entry_bytes(&archive, "ac-plugin"), b"PluginB");

    for leftover in ["classes.dex", "tmpres.zip", "PluginB-tmp.apk"] {
        assert!(!config.outputs_plugins.join(leftover).exists(), "{leftover} left behind");
    }

    let calls = fixture.calls();
    let compile = calls.iter().find(|c| c.starts_with("aapt2 compile")).unwrap();
    assert!(compile.contains("PluginB/src/main/res -o "));
    assert!(compile.ends_with("out/plugins/tmpres.zip"));
    let link = calls.iter().find(|c| c.starts_with("aapt2 link")).unwrap();
    assert!(link.contains("sdk/platforms/android-29/android.jar"));
    assert!(link.contains("--manifest "));
    assert!(link.ends_with("out/plugins/PluginB-tmp.apk"));
}

#[tokio::test]
async fn build_plugin_with_empty_resources_skips_aapt2() {
    let fixture = Fixture::new();
    fixture.add_plugin("PluginC", false);
    fixture.add_empty_resources("PluginC");
    let config = fixture.config();

    run_build_command(&args(Some("PluginC"), None), Arc::new(config.clone()))
        .await
        .unwrap();

    let archive = config.outputs_plugins.join("PluginC.zip");
    assert_eq!(entry_names(&archive), vec!["classes.dex", "ac-plugin"]);
    assert_eq!(entry_bytes(&archive, "ac-plugin"), b"PluginC");
    assert!(!config.outputs_plugins.join("tmpres.zip").exists());
    assert!(fixture.calls().iter().all(|c| !c.starts_with("aapt2")));
}

#[tokio::test]
async fn build_plugin_output_override() {
    let fixture = Fixture::new();
    fixture.add_plugin("PluginA", false);
    let config = fixture.config();

    run_build_command(&args(Some("PluginA"), Some("Foo")), Arc::new(config.clone()))
        .await
        .unwrap();
    assert!(config.outputs_plugins.join("Foo.zip").is_file());
    assert!(!config.outputs_plugins.join("PluginA.zip").exists());
}

#[tokio::test]
async fn build_missing_plugin_fails() {
    let fixture = Fixture::new();
    let config = fixture.config();

    let err = run_build_command(&args(Some("Nope"), None), Arc::new(config))
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::PluginNotFound { .. })
    ));
    assert!(fixture.calls().is_empty());
}

// =============================================================================
// Batch
// =============================================================================

#[tokio::test]
async fn build_all_plugins_skips_reserved() {
    let fixture = Fixture::new();
    fixture.add_plugin("PluginA", false);
    fixture.add_plugin("PluginB", false);
    fixture.write_settings(
        "include ':PluginA'\ninclude ':PluginB'\ninclude ':Aliucord'\ninclude ':DiscordStubs'\n\
         rootProject.name = 'plugins'\n",
    );
    let config = fixture.config();

    run_build_command(&args(Some("*"), None), Arc::new(config.clone()))
        .await
        .unwrap();

    assert!(config.outputs_plugins.join("PluginA.zip").is_file());
    assert!(config.outputs_plugins.join("PluginB.zip").is_file());
    let gradle: Vec<_> = fixture
        .calls()
        .into_iter()
        .filter(|c| c.starts_with("gradle"))
        .collect();
    assert_eq!(
        gradle,
        vec![
            "gradle PluginA:compileDebugJavaWithJavac",
            "gradle PluginB:compileDebugJavaWithJavac",
        ]
    );
}

#[tokio::test]
async fn build_all_plugins_stops_at_first_failure() {
    let fixture = Fixture::new();
    fixture.add_plugin("PluginB", false);
    fixture.write_settings("include ':Missing', ':PluginB'\n");
    let config = fixture.config();

    let err = run_build_command(&args(Some("*"), None), Arc::new(config.clone()))
        .await
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"failed to build Missing");
    assert!(!config.outputs_plugins.join("PluginB.zip").exists());
}

#[tokio::test]
async fn build_all_plugins_rejects_output() {
    let fixture = Fixture::new();
    let err = run_build_command(&args(Some("*"), Some("Foo")), Arc::new(fixture.config()))
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::InvalidArguments(_))
    ));
}

// =============================================================================
// Preconditions
// =============================================================================

#[tokio::test]
async fn build_without_d8_fails_before_gradle() {
    let fixture = Fixture::new();
    let mut config = fixture.config();
    config.tools.d8 = fixture.root().join("bin/missing-d8");

    let err = run_build_command(&args(None, None), Arc::new(config))
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::ToolMissing { tool, .. }) if tool == "d8"
    ));
    assert!(fixture.calls().is_empty());
}

#[tokio::test]
async fn build_refuses_locked_output() {
    let fixture = Fixture::new();
    let config = fixture.config();
    let _held = OutputLock::acquire(&config.outputs).unwrap();

    let err = run_build_command(&args(None, None), Arc::new(config))
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FsError>(),
        Some(FsError::Locked(_))
    ));
    assert!(fixture.calls().is_empty());
}

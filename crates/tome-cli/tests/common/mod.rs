//! Shared monorepo fixture for integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tome_cli::config::{ProjectPaths, TomeConfig};

pub const CONTENT_DIR: &str = "packages/docs/content";

pub const BUTTON_DOC: &str = r#"---
id: button
title: Button
description: Triggers an action or event.
menu:
  - Components
  - Inputs
  - Button
tags: [form, action]
documentState: stable
---
# Button

## Usage

### With icon

## Accessibility
"#;

pub const INTRO_DOC: &str = r#"---
id: introduction
title: Introduction
description: Start here.
menu: [Getting Started, Introduction]
order: 1
tags: [guide]
---
Welcome to the design system.
"#;

pub const BUTTON_SOURCE: &str = r#"import * as React from "react";

export interface ButtonProps extends React.ButtonHTMLAttributes<HTMLButtonElement> {
  /**
   * Visual style of the button.
   * @default "solid"
   */
  variant?: "solid" | "ghost";
  /** Render as the child element. */
  asChild?: boolean;
}

export function Button(props: ButtonProps) {
  return null;
}
"#;

pub struct Monorepo {
    dir: TempDir,
}

impl Monorepo {
    /// Workspace root with a docs package and a component package.
    pub fn new() -> Self {
        let repo = Self {
            dir: TempDir::new().unwrap(),
        };
        repo.write(
            "package.json",
            r#"{ "name": "acme", "private": true, "workspaces": ["packages/*"] }"#,
        );
        repo.write("packages/docs/package.json", r#"{ "name": "@acme/docs" }"#);
        repo.write("packages/ui/package.json", r#"{ "name": "@acme/ui" }"#);
        repo.write("packages/ui/src/index.ts", "export * from \"./button\";\n");
        repo.write("packages/ui/src/button.tsx", BUTTON_SOURCE);
        repo.write(&format!("{}/button.mdx", CONTENT_DIR), BUTTON_DOC);
        repo.write(&format!("{}/introduction.mdx", CONTENT_DIR), INTRO_DOC);
        repo
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn doc(&self, name: &str) -> PathBuf {
        self.path(&format!("{}/{}", CONTENT_DIR, name))
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    pub fn config(&self) -> TomeConfig {
        TomeConfig {
            root: self.root().to_path_buf(),
            content_dir: PathBuf::from(CONTENT_DIR),
            types_entry: Some(PathBuf::from("packages/ui/src/index.ts")),
            debounce_ms: 20,
            ..TomeConfig::default()
        }
    }

    pub fn paths(&self) -> ProjectPaths {
        self.config().resolve().unwrap()
    }

    /// Write the fixture config as tome.config.json for binary tests.
    pub fn write_config_file(&self) {
        self.write(
            "tome.config.json",
            r#"{
                "contentDir": "packages/docs/content",
                "typesEntry": "packages/ui/src/index.ts"
            }"#,
        );
    }

    pub fn out(&self, relative: &str) -> PathBuf {
        self.path(&format!("dist/docs/{}", relative))
    }

    pub fn read_json(&self, path: &Path) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }
}

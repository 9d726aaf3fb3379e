//! Shared fixtures for schemapack behaviour tests.
//!
//! Builds throwaway module trees on disk, each with a
//! `src/main/resources` root and an optional `META-INF/spring.schemas`.

use camino::Utf8PathBuf;
use schemapack_packager::ModuleName;
use schemapack_packager::manifest::DEFAULT_MANIFEST_PATH;
use schemapack_packager::resources::FileSystemResources;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

/// A temporary multi-module source tree.
pub struct SchemaWorkspace {
    temp: TempDir,
    modules: Vec<ModuleName>,
}

impl Default for SchemaWorkspace {
    fn default() -> Self {
        Self {
            temp: TempDir::new().expect("temp dir"),
            modules: Vec::new(),
        }
    }
}

impl SchemaWorkspace {
    /// Root of the temporary tree.
    pub fn root(&self) -> Utf8PathBuf {
        Utf8PathBuf::try_from(self.temp.path().to_path_buf()).expect("UTF-8 temp path")
    }

    /// Resource root of `module`.
    pub fn resource_root(&self, module: &str) -> Utf8PathBuf {
        self.root().join(module).join("src/main/resources")
    }

    /// Register `module`, creating its empty resource root.
    pub fn add_module(&mut self, module: &str) {
        let name = ModuleName::from(module);
        if !self.modules.contains(&name) {
            fs::create_dir_all(self.resource_root(module)).expect("create resource root");
            self.modules.push(name);
        }
    }

    /// Write a resource file into `module`.
    pub fn add_resource(&mut self, module: &str, relative: &str, contents: &str) {
        self.add_module(module);
        let path = self.resource_root(module).join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, contents).expect("write resource");
    }

    /// Append a manifest line, escaping `:` in the key as property files do.
    pub fn declare(&mut self, module: &str, key: &str, value: &str) {
        self.add_module(module);
        let path = self.resource_root(module).join(DEFAULT_MANIFEST_PATH);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        let mut manifest = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .expect("open manifest");
        writeln!(manifest, "{}={value}", key.replace(':', "\\:")).expect("append manifest");
    }

    /// Registered modules in registration order.
    pub fn modules(&self) -> Vec<ModuleName> {
        self.modules.clone()
    }

    /// Index every registered module.
    pub fn resources(&self) -> FileSystemResources {
        FileSystemResources::scan(
            DEFAULT_MANIFEST_PATH,
            self.modules
                .iter()
                .map(|module| (module.clone(), vec![self.resource_root(module.as_str())])),
        )
        .expect("scan resources")
    }
}

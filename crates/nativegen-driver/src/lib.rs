//! Generator driver: loads inputs, runs the pipeline and writes artifacts.
//!
//! Everything between reading and writing files is a pure function of the
//! header texts, the override set and the configuration.

use miette::{IntoDiagnostic, Result};
use nativegen_codegen::{Classification, Classifier, Emitter, NativesOutput};
use nativegen_common::SourceFile;
use nativegen_config::{GeneratorConfig, OverrideSet, TypeRegistry};
use nativegen_frontend::{parse_enum_header, parse_natives_header, Parsed};
use nativegen_ir::{Declaration, EnumDescriptor, SkipReason};
use std::path::{Path, PathBuf};

pub const ENUMS_FILE: &str = "enums.cpp";
pub const TYPES_FILE: &str = "natives_type.h";
pub const NATIVES_FILE: &str = "natives.cpp";
pub const FAILED_FILE: &str = "failed_natives.txt";

/// Input texts for one run.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    pub enums: Option<SourceFile>,
    pub natives: Option<SourceFile>,
    pub overrides: OverrideSet,
}

impl Sources {
    /// Read headers from disk and scan every override source.
    pub fn load(enums: Option<&Path>, natives: Option<&Path>, overrides: &[PathBuf]) -> Result<Self> {
        let mut set = OverrideSet::new();
        for path in overrides {
            set.extend_from_source(&SourceFile::read(path)?.content);
        }
        tracing::debug!(count = set.len(), "collected overrides");
        for name in set.iter() {
            tracing::trace!(name, "override");
        }

        Ok(Self {
            enums: enums.map(SourceFile::read).transpose()?,
            natives: natives.map(SourceFile::read).transpose()?,
            overrides: set,
        })
    }
}

/// Everything a run produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifacts {
    /// Enum registration code, if enums were requested.
    pub enums: Option<String>,
    /// Wrapper types, registrations and failures, if natives were requested.
    pub natives: Option<NativesOutput>,
    /// Declarations dropped before emission.
    pub skipped: Vec<(String, SkipReason)>,
    /// Structural problems found in the headers, rendered with locations.
    pub warnings: Vec<String>,
}

impl Artifacts {
    /// Qualified names that need manual wrapping.
    pub fn failed(&self) -> &[String] {
        self.natives.as_ref().map_or(&[], |n| n.failed.as_slice())
    }
}

/// Pipeline orchestrator.
pub struct Driver {
    config: GeneratorConfig,
    registry: TypeRegistry,
}

impl Driver {
    /// Validate the configuration. A broken type registry is fatal here,
    /// before any header is read.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let registry = config.registry()?;
        tracing::debug!(types = registry.len(), "loaded type registry");
        Ok(Self { config, registry })
    }

    /// Load configuration from `path`, or the built-in default.
    pub fn from_config_file(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => GeneratorConfig::from_file(path)?,
            None => GeneratorConfig::default(),
        };
        Self::new(config)
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut GeneratorConfig {
        &mut self.config
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Strip comments and harvest enums from a header.
    pub fn parse_enums(&self, source: &SourceFile, warnings: &mut Vec<String>) -> Vec<EnumDescriptor> {
        let parsed = parse_enum_header(&source.content);
        report(source, &parsed, warnings);
        parsed.items
    }

    /// Strip comments and extract declarations from a header.
    pub fn parse_natives(&self, source: &SourceFile, warnings: &mut Vec<String>) -> Vec<Declaration> {
        let parsed = parse_natives_header(&source.content);
        report(source, &parsed, warnings);
        parsed.items
    }

    pub fn classify(&self, decls: &[Declaration], overrides: &OverrideSet) -> Classification {
        Classifier::new(&self.registry, overrides, &self.config.classify).classify(decls)
    }

    /// Run the pipeline for the artifact groups enabled in the configuration.
    pub fn generate(&self, sources: &Sources) -> Result<Artifacts> {
        let toggles = self.config.output;
        let emitter = Emitter::new(&self.registry, &self.config.mapping);
        let mut artifacts = Artifacts::default();

        if toggles.enums {
            let source = sources
                .enums
                .as_ref()
                .ok_or_else(|| miette::miette!("enum generation is enabled but no enum header was given"))?;
            tracing::info!(path = %source.path.display(), "parsing enums");
            let enums = self.parse_enums(source, &mut artifacts.warnings);
            artifacts.enums = Some(emitter.enums(&enums));
        }

        if toggles.natives || toggles.diagnostics {
            let source = sources
                .natives
                .as_ref()
                .ok_or_else(|| miette::miette!("native generation is enabled but no natives header was given"))?;
            tracing::info!(path = %source.path.display(), "parsing natives");
            let decls = self.parse_natives(source, &mut artifacts.warnings);
            let classification = self.classify(&decls, &sources.overrides);
            artifacts.skipped = classification.skipped.clone();
            artifacts.natives = Some(emitter.natives(classification));
        }

        Ok(artifacts)
    }

    /// Write the produced artifacts into `out_dir`, returning the paths
    /// written.
    pub fn write(&self, artifacts: &Artifacts, out_dir: &Path) -> Result<Vec<PathBuf>> {
        let toggles = self.config.output;
        let mut files: Vec<(&str, String)> = Vec::new();

        if let Some(enums) = &artifacts.enums {
            files.push((ENUMS_FILE, enums.clone()));
        }
        if let Some(natives) = &artifacts.natives {
            if toggles.natives {
                files.push((TYPES_FILE, natives.types_header.clone()));
                files.push((NATIVES_FILE, natives.registrations.clone()));
            }
            if toggles.diagnostics {
                files.push((FAILED_FILE, natives.failed.join("\n")));
            }
        }

        std::fs::create_dir_all(out_dir)
            .into_diagnostic()
            .map_err(|e| e.wrap_err(format!("Failed to create {}", out_dir.display())))?;

        let mut written = Vec::with_capacity(files.len());
        for (name, content) in files {
            let path = out_dir.join(name);
            std::fs::write(&path, content)
                .map_err(|e| miette::miette!("Failed to write {}: {}", path.display(), e))?;
            tracing::info!(path = %path.display(), "wrote artifact");
            written.push(path);
        }
        Ok(written)
    }
}

fn report<T>(source: &SourceFile, parsed: &Parsed<T>, warnings: &mut Vec<String>) {
    for diagnostic in &parsed.diagnostics {
        let line = diagnostic.describe(source);
        tracing::warn!("{}", line);
        warnings.push(line);
    }
}

//! The three operations over a source project: `check`, `search` and `rewrite`.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use colored::Colorize;

use crate::config::Config;
use crate::core::catalog::{catalog_file_name, load_catalog};
use crate::core::data::{Catalog, Module, ModuleReport};
use crate::core::extract::{MarkupExtractor, ScriptExtractor, UsageExtractor, Vocabulary};
use crate::core::file_scanner::{has_extension, scan_files};
use crate::core::finder::{FinderOptions, find_modules};
use crate::core::merge::{MergeOptions, merge};
use crate::core::reconcile::reconcile;
use crate::core::rewrite::{CatalogWriter, ModuleSources, normalize_prefix, rename_module};

/// A source project and the settings every operation on it shares.
///
/// Modules are processed one at a time, in path order. A source file that cannot be read or
/// parsed ends up in its module's `skipped` list; write and catalog errors abort the operation.
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
    pub vocabulary: Vocabulary,
    pub verbose: bool,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>, config: Config, verbose: bool) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            bail!("Source path is not a directory: {}", root.display());
        }
        let vocabulary = config.vocabulary();
        Ok(Self {
            root,
            config,
            vocabulary,
            verbose,
        })
    }

    /// Modules declared under the root, or the root as a single module.
    pub fn modules(&self, by_module: bool) -> Vec<Module> {
        if !by_module {
            return vec![Module::whole(&self.root)];
        }
        let modules = find_modules(
            &self.root,
            &FinderOptions {
                script_extensions: self.config.script_extensions.clone(),
                ignores: self.config.ignores.clone(),
                verbose: self.verbose,
            },
        );
        if self.verbose && modules.is_empty() {
            eprintln!(
                "{} No module declaration found under {}",
                "note:".bold().cyan(),
                self.root.display()
            );
        }
        modules
    }

    fn ignores_for(&self, module: &Module) -> Vec<String> {
        module
            .exclude
            .iter()
            .chain(self.config.ignores.iter())
            .cloned()
            .collect()
    }

    /// Script and markup files of `module`, sorted by path.
    pub fn sources(&self, module: &Module) -> ModuleSources {
        let ignores = self.ignores_for(module);
        let scan = scan_files(&module.path, &ignores, self.verbose, |path| {
            has_extension(path, &self.config.script_extensions)
                || has_extension(path, &self.config.markup_extensions)
        });

        if scan.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                scan.skipped_count,
                if self.verbose { "" } else { " (use -v for details)" }
            );
        }

        let (scripts, markup) = scan
            .files
            .into_iter()
            .partition(|path| has_extension(path, &self.config.script_extensions));
        ModuleSources { scripts, markup }
    }

    /// Used, declared, missing and compatible keys of one module.
    pub fn analyze(&self, module: Module, locale: &str) -> Result<ModuleReport> {
        let sources = self.sources(&module);
        let scripts = ScriptExtractor::new(&self.vocabulary).extract_paths(&sources.scripts);
        let markup = MarkupExtractor::new(&self.vocabulary).extract_paths(&sources.markup);

        let mut used: Vec<_> = scripts.keys.into_iter().chain(markup.keys).collect();
        used.sort();
        used.dedup();

        let declared = load_catalog(&module.path, &self.ignores_for(&module), locale)?;
        let result = reconcile(&used, &declared);

        let mut report = ModuleReport::new(module);
        report.used = used;
        report.declared = declared;
        report.missing = result.missing;
        report.compatible = result.compatible;
        report.skipped = scripts.skipped.into_iter().chain(markup.skipped).collect();
        Ok(report)
    }

    pub fn check(&self, by_module: bool, locale: &str) -> Result<Vec<ModuleReport>> {
        self.modules(by_module)
            .into_iter()
            .map(|module| self.analyze(module, locale))
            .collect()
    }

    /// The whole catalog of another project, used to complete this one.
    pub fn external_catalog(&self, project_root: &Path, locale: &str) -> Result<Catalog> {
        if !project_root.is_dir() {
            bail!("Project path is not a directory: {}", project_root.display());
        }
        load_catalog(project_root, &self.config.ignores, locale)
    }

    pub fn search(
        &self,
        project_root: &Path,
        by_module: bool,
        locale: &str,
        options: MergeOptions,
    ) -> Result<Vec<ModuleReport>> {
        let external = self.external_catalog(project_root, locale)?;
        Ok(self
            .check(by_module, locale)?
            .into_iter()
            .map(|report| merge(report, &external, options))
            .collect())
    }

    /// `search`, then write each module's catalog and, with a prefix, rename its keys.
    ///
    /// Modules without any compatible entry are left out.
    pub fn rewrite(
        &self,
        project_root: &Path,
        by_module: bool,
        locale: &str,
        options: MergeOptions,
        prefix: &str,
    ) -> Result<Vec<ModuleReport>> {
        let prefix = normalize_prefix(prefix);
        let mut reports = Vec::new();

        for report in self.search(project_root, by_module, locale, options)? {
            if report.compatible.is_empty() {
                continue;
            }

            let mut report = if prefix.is_empty() {
                report
            } else {
                let sources = self.sources(&report.module());
                rename_module(report, &prefix, &sources, &self.vocabulary)?
            };

            let writer = CatalogWriter::new(
                report
                    .path
                    .join(&self.config.catalog_dir)
                    .join(catalog_file_name(locale)),
            );
            writer.save(&report.compatible)?;
            if self.verbose {
                eprintln!(
                    "{} Wrote {} key(s) to {}",
                    "note:".bold().cyan(),
                    report.compatible.len(),
                    writer.path().display()
                );
            }
            report.translation_file = Some(writer.path().to_path_buf());
            reports.push(report);
        }

        Ok(reports)
    }
}

//! Completing a module's catalog from another project's catalog.

use crate::core::data::{Catalog, ModuleReport};
use crate::core::reconcile::reconcile;

/// Which catalog supplies the value when both declare a key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergePrecedence {
    #[default]
    ModuleWins,
    ExternalWins,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    pub precedence: MergePrecedence,
    /// Keep every declared entry of the module, used or not.
    pub include_all: bool,
}

/// Reconcile the module's missing keys against `external`.
///
/// With [`MergePrecedence::ExternalWins`] the module's compatible keys are looked up again
/// so that the external catalog can replace their values.
pub fn merge(report: ModuleReport, external: &Catalog, options: MergeOptions) -> ModuleReport {
    let mut missing = report.missing.clone();
    if options.precedence == MergePrecedence::ExternalWins {
        missing.extend(report.compatible.keys().map(|k| k.as_str().into()));
        missing.sort();
    }

    let mut known = external.clone();
    known.extend(report.compatible.clone());
    let still_missing = reconcile(&missing, &known).missing;

    let mut compatible = report.compatible.clone();
    compatible.extend(reconcile(&missing, external).compatible);

    if options.include_all {
        compatible = match options.precedence {
            MergePrecedence::ExternalWins => {
                let mut all = report.declared.clone();
                all.extend(compatible);
                all
            }
            MergePrecedence::ModuleWins => {
                compatible.extend(report.declared.clone());
                compatible
            }
        };
    }

    ModuleReport {
        missing: still_missing,
        compatible,
        ..report
    }
}

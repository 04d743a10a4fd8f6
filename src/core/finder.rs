//! Discovering module roots from `angular.module(name, [deps])` declarations.

use std::path::{Path, PathBuf};

use glob::Pattern;
use swc_ecma_ast::{CallExpr, Callee, Expr, MemberProp};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::data::{Module, SourceFile};
use crate::core::file_scanner::{has_extension, scan_files};
use crate::core::parsers::script::parse_script_source;

const ANGULAR: &str = "angular";
const MODULE_METHOD: &str = "module";

#[derive(Debug, Clone, Default)]
pub struct FinderOptions {
    pub script_extensions: Vec<String>,
    pub ignores: Vec<String>,
    pub verbose: bool,
}

/// Detects a module declaration: two arguments, the second an array literal.
/// `angular.module('app')` only retrieves an existing module and does not count.
#[derive(Default)]
struct DeclarationFinder {
    found: bool,
}

impl Visit for DeclarationFinder {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if is_module_declaration(node) {
            self.found = true;
            return;
        }
        node.visit_children_with(self);
    }
}

fn is_module_declaration(call: &CallExpr) -> bool {
    let Callee::Expr(callee) = &call.callee else {
        return false;
    };
    let Expr::Member(member) = &**callee else {
        return false;
    };
    let is_angular = matches!(&*member.obj, Expr::Ident(obj) if obj.sym.as_str() == ANGULAR);
    let is_module =
        matches!(&member.prop, MemberProp::Ident(prop) if prop.sym.as_str() == MODULE_METHOD);

    is_angular
        && is_module
        && call.args.len() == 2
        && call.args[1].spread.is_none()
        && matches!(&*call.args[1].expr, Expr::Array(_))
}

/// Whether `file` declares an AngularJS module. Files that fail to parse declare nothing.
pub fn declares_module(file: &SourceFile) -> bool {
    let Ok(parsed) = parse_script_source(file.content.clone(), &file.path) else {
        return false;
    };
    let mut finder = DeclarationFinder::default();
    parsed.module.visit_with(&mut finder);
    finder.found
}

/// Attach to each root the exclusions of the other roots nested inside it.
///
/// Exclusions are absolute globs, with glob metacharacters of the root escaped.
pub fn modules_from_roots(mut roots: Vec<PathBuf>) -> Vec<Module> {
    roots.sort();
    roots.dedup();

    roots
        .iter()
        .map(|root| {
            let exclude = roots
                .iter()
                .filter(|other| *other != root && other.starts_with(root))
                .map(|other| format!("{}/**/*", Pattern::escape(&other.to_string_lossy())))
                .collect();
            Module::new(root.clone(), exclude)
        })
        .collect()
}

/// Every module declared under `root`, sorted by path.
pub fn find_modules(root: &Path, options: &FinderOptions) -> Vec<Module> {
    let scan = scan_files(root, &options.ignores, options.verbose, |path| {
        has_extension(path, &options.script_extensions)
    });

    let roots = scan
        .files
        .iter()
        .filter_map(|path| SourceFile::read(path).ok())
        .filter(declares_module)
        .filter_map(|file| file.path.parent().map(Path::to_path_buf))
        .collect();

    modules_from_roots(roots)
}

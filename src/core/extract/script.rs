//! Usage extraction from AngularJS script files.
//!
//! The translation service is only recognised where it is injected:
//!
//! - in a class whose constructor receives the service and stores it on `this.<field>`:
//!   `this.<field>(...)` and `this.<field>.instant(...)` anywhere in the class, and direct
//!   calls on the parameter inside the constructor;
//! - in an exported function or arrow receiving the service as a parameter.

use std::path::Path;

use anyhow::Result;
use swc_ecma_ast::{
    AssignExpr, AssignOp, AssignTarget, CallExpr, Callee, Class, ClassMember, Constructor, Decl,
    DefaultDecl, ExportDecl, ExportDefaultDecl, ExportDefaultExpr, Expr, Lit, MemberExpr,
    MemberProp, ParamOrTsParamProp, Pat, SimpleAssignTarget, Tpl, TsParamPropParam,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::data::{SourceKind, UsageKey, WILDCARD};
use crate::core::extract::{DEFAULT_QUOTE, KeySite, KeyUsage, UsageExtractor, Vocabulary};
use crate::core::parsers::script::{ParsedScript, parse_script_source};

pub struct ScriptExtractor<'a> {
    vocabulary: &'a Vocabulary,
}

impl<'a> ScriptExtractor<'a> {
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self { vocabulary }
    }
}

impl UsageExtractor for ScriptExtractor<'_> {
    fn kind(&self) -> SourceKind {
        SourceKind::Script
    }

    fn usages(&self, path: &Path, source: &str) -> Result<Vec<KeyUsage>> {
        let parsed = parse_script_source(source.to_string(), path)?;
        let mut visitor = UsageVisitor::new(self.vocabulary, &parsed);
        parsed.module.visit_with(&mut visitor);
        Ok(visitor.usages)
    }
}

/// Lexical context threaded through the walk.
struct UsageVisitor<'a> {
    vocabulary: &'a Vocabulary,
    parsed: &'a ParsedScript,
    /// `this.<field>` holding the service in the enclosing class.
    field: Option<String>,
    /// Inside an injected constructor or exported function, where the service parameter is
    /// in scope.
    in_injected_scope: bool,
    usages: Vec<KeyUsage>,
}

impl<'a> UsageVisitor<'a> {
    fn new(vocabulary: &'a Vocabulary, parsed: &'a ParsedScript) -> Self {
        Self {
            vocabulary,
            parsed,
            field: None,
            in_injected_scope: false,
            usages: Vec::new(),
        }
    }

    fn service(&self) -> &str {
        &self.vocabulary.service
    }

    fn with_injected_scope(&mut self, f: impl FnOnce(&mut Self)) {
        let prev = self.in_injected_scope;
        self.in_injected_scope = true;
        f(self);
        self.in_injected_scope = prev;
    }

    fn has_service_param<'p>(&self, mut params: impl Iterator<Item = &'p Pat>) -> bool {
        params.any(|pat| pat_is_ident(pat, self.service()))
    }

    fn is_injected_fn_expr(&self, expr: &Expr) -> bool {
        match expr {
            Expr::Arrow(arrow) => self.has_service_param(arrow.params.iter()),
            Expr::Fn(fn_expr) => {
                self.has_service_param(fn_expr.function.params.iter().map(|p| &p.pat))
            }
            Expr::Paren(paren) => self.is_injected_fn_expr(&paren.expr),
            _ => false,
        }
    }

    /// `$translate` itself (when in scope) or `this.<field>`.
    fn is_service(&self, expr: &Expr) -> bool {
        match expr {
            Expr::Ident(ident) => self.in_injected_scope && ident.sym.as_str() == self.service(),
            Expr::Member(MemberExpr { obj, prop, .. }) => {
                matches!(&**obj, Expr::This(_))
                    && matches!(prop, MemberProp::Ident(name)
                        if self.field.as_deref() == Some(name.sym.as_str()))
            }
            _ => false,
        }
    }

    fn is_translate_callee(&self, callee: &Callee) -> bool {
        let Callee::Expr(expr) = callee else {
            return false;
        };
        if self.is_service(expr) {
            return true;
        }
        match &**expr {
            Expr::Member(MemberExpr {
                obj,
                prop: MemberProp::Ident(method),
                ..
            }) => method.sym.as_str() == self.vocabulary.method && self.is_service(obj),
            _ => false,
        }
    }

    fn key_from_argument(&self, arg: &Expr) -> Option<KeyUsage> {
        match arg {
            Expr::Lit(Lit::Str(s)) => {
                let value = s.value.as_str()?;
                if value.is_empty() {
                    return None;
                }
                Some(KeyUsage::new(
                    UsageKey::new(value),
                    KeySite::Literal {
                        range: self.parsed.range(s.span),
                        quote: DEFAULT_QUOTE,
                    },
                ))
            }
            Expr::Tpl(tpl) => self.key_from_template(tpl),
            _ => None,
        }
    }

    /// Template chunks joined by wildcards: `` `step_${n}` `` gives `step_*`.
    ///
    /// Every substitution stays a wildcard, so `` `${a}${b}` `` gives `**`.
    fn key_from_template(&self, tpl: &Tpl) -> Option<KeyUsage> {
        let chunks: Vec<&str> = tpl.quasis.iter().map(|quasi| quasi.raw.as_str()).collect();
        let key = UsageKey::new(chunks.join(&WILDCARD.to_string()));
        if key.is_empty() {
            return None;
        }
        Some(KeyUsage::new(
            key,
            KeySite::PrefixInside {
                offset: self.parsed.offset(tpl.span.lo) + 1,
                quote: '`',
            },
        ))
    }
}

impl Visit for UsageVisitor<'_> {
    fn visit_class(&mut self, node: &Class) {
        let field = injected_field(node, self.service());
        let prev = std::mem::replace(&mut self.field, field);
        node.visit_children_with(self);
        self.field = prev;
    }

    fn visit_constructor(&mut self, node: &Constructor) {
        let injected = self.field.is_some()
            && node.params.iter().any(|param| match param {
                ParamOrTsParamProp::Param(param) => pat_is_ident(&param.pat, self.service()),
                ParamOrTsParamProp::TsParamProp(prop) => {
                    ts_param_prop_is(&prop.param, self.service())
                }
            });
        if injected {
            self.with_injected_scope(|this| node.visit_children_with(this));
        } else {
            node.visit_children_with(self);
        }
    }

    fn visit_export_decl(&mut self, node: &ExportDecl) {
        match &node.decl {
            Decl::Fn(fn_decl)
                if self.has_service_param(fn_decl.function.params.iter().map(|p| &p.pat)) =>
            {
                self.with_injected_scope(|this| fn_decl.visit_children_with(this));
            }
            Decl::Var(var_decl) => {
                for decl in &var_decl.decls {
                    let injected = decl
                        .init
                        .as_deref()
                        .is_some_and(|init| self.is_injected_fn_expr(init));
                    if injected {
                        self.with_injected_scope(|this| decl.visit_with(this));
                    } else {
                        decl.visit_with(self);
                    }
                }
            }
            _ => node.visit_children_with(self),
        }
    }

    fn visit_export_default_decl(&mut self, node: &ExportDefaultDecl) {
        if let DefaultDecl::Fn(fn_expr) = &node.decl
            && self.has_service_param(fn_expr.function.params.iter().map(|p| &p.pat))
        {
            self.with_injected_scope(|this| fn_expr.visit_children_with(this));
            return;
        }
        node.visit_children_with(self);
    }

    fn visit_export_default_expr(&mut self, node: &ExportDefaultExpr) {
        if self.is_injected_fn_expr(&node.expr) {
            self.with_injected_scope(|this| node.visit_children_with(this));
            return;
        }
        node.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if self.is_translate_callee(&node.callee)
            && let Some(first) = node.args.first()
            && first.spread.is_none()
            && let Some(usage) = self.key_from_argument(&first.expr)
        {
            self.usages.push(usage);
        }
        node.visit_children_with(self);
    }
}

fn pat_is_ident(pat: &Pat, name: &str) -> bool {
    matches!(pat, Pat::Ident(binding) if binding.id.sym.as_str() == name)
}

fn ts_param_prop_is(param: &TsParamPropParam, name: &str) -> bool {
    matches!(param, TsParamPropParam::Ident(binding) if binding.id.sym.as_str() == name)
}

/// Field of `this` holding the injected service, if the class constructor receives it.
///
/// A TypeScript parameter property (`constructor(private $translate)`) stores it under its
/// own name; otherwise the last `this.<field> = $translate` assignment in the constructor
/// wins.
fn injected_field(class: &Class, service: &str) -> Option<String> {
    let constructor = class.body.iter().find_map(|member| match member {
        ClassMember::Constructor(constructor) => Some(constructor),
        _ => None,
    })?;

    let mut injected = false;
    let mut field = None;
    for param in &constructor.params {
        match param {
            ParamOrTsParamProp::Param(param) if pat_is_ident(&param.pat, service) => {
                injected = true;
            }
            ParamOrTsParamProp::TsParamProp(prop) if ts_param_prop_is(&prop.param, service) => {
                injected = true;
                field = Some(service.to_string());
            }
            _ => {}
        }
    }
    if !injected {
        return None;
    }

    let mut finder = FieldAssignmentFinder { service, field };
    if let Some(body) = &constructor.body {
        body.visit_with(&mut finder);
    }
    finder.field
}

struct FieldAssignmentFinder<'a> {
    service: &'a str,
    field: Option<String>,
}

impl Visit for FieldAssignmentFinder<'_> {
    fn visit_assign_expr(&mut self, node: &AssignExpr) {
        if node.op == AssignOp::Assign
            && let AssignTarget::Simple(SimpleAssignTarget::Member(member)) = &node.left
            && matches!(&*member.obj, Expr::This(_))
            && let MemberProp::Ident(prop) = &member.prop
            && let Expr::Ident(value) = &*node.right
            && value.sym.as_str() == self.service
        {
            self.field = Some(prop.sym.to_string());
        }
        node.visit_children_with(self);
    }
}

use std::ops::Range;

/// A node of a template expression, with its byte range in the expression text.
///
/// Parenthesized expressions keep the range of the parentheses so that text inserted before
/// a node never changes operator precedence.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    /// Numbers keep their source text.
    Number(String),
    Bool(bool),
    Null,
    Undefined,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Identifier(String),
    This,
    Member {
        object: Box<Expr>,
        property: Box<Expr>,
        computed: bool,
    },
    /// Function call. Filters (`value | name:arg`) are calls with `filter` set, the piped value
    /// being the first argument.
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        filter: bool,
    },
    Unary {
        op: &'static str,
        argument: Box<Expr>,
    },
    Binary {
        op: &'static str,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Array(Vec<Expr>),
    Object(Vec<(Expr, Expr)>),
}

impl Expr {
    pub fn new(kind: ExprKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }

    /// Name of a plain identifier node.
    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_concatenation(&self) -> bool {
        matches!(self.kind, ExprKind::Binary { op: "+", .. })
    }

    /// Direct sub-expressions, in source order.
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::Literal(_) | ExprKind::Identifier(_) | ExprKind::This => Vec::new(),
            ExprKind::Member {
                object, property, ..
            } => vec![&**object, &**property],
            ExprKind::Call { callee, args, .. } => {
                let mut children: Vec<&Expr> = vec![&**callee];
                children.extend(args.iter());
                children
            }
            ExprKind::Unary { argument, .. } => vec![&**argument],
            ExprKind::Binary { left, right, .. } => vec![&**left, &**right],
            ExprKind::Conditional {
                test,
                consequent,
                alternate,
            } => vec![&**test, &**consequent, &**alternate],
            ExprKind::Assign { target, value } => vec![&**target, &**value],
            ExprKind::Array(items) => items.iter().collect(),
            ExprKind::Object(props) => props.iter().flat_map(|(k, v)| [k, v]).collect(),
        }
    }
}

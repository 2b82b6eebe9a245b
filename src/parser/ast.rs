//! Abstract syntax tree for pin scripts

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Root AST node - a complete script
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub statements: Vec<Spanned<Statement>>,
}

/// Top-level statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Reading direction for the pins that follow: `direction rtl`
    Direction(Spanned<String>),
    /// Node declaration: `view name [width: 10] { ... }`
    View(ViewDecl),
    /// Directive chain: `pin name: top(0).width(50%)`
    Pin(PinDecl),
}

/// A node and its children
#[derive(Debug, Clone, PartialEq)]
pub struct ViewDecl {
    pub name: Spanned<String>,
    pub modifiers: Vec<Spanned<Modifier>>,
    pub children: Vec<Spanned<ViewDecl>>,
}

/// `key: number` inside a view's modifier block
#[derive(Debug, Clone, PartialEq)]
pub struct Modifier {
    pub key: Spanned<String>,
    pub value: Spanned<f64>,
}

/// One session: a target and its directive calls, in order
#[derive(Debug, Clone, PartialEq)]
pub struct PinDecl {
    pub target: Spanned<String>,
    pub calls: Vec<Spanned<Call>>,
}

/// `name(args...)`
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: Spanned<String>,
    pub args: Vec<Spanned<Arg>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// `12`, `-4.5`
    Number(f64),
    /// `50%`
    Percent(f64),
    /// A bare name: a node, or an alignment keyword such as `left`
    Name(String),
    /// `node.member`, an edge or an anchor
    Member { node: String, member: String },
    /// `[a, b]`
    List(Vec<Spanned<Arg>>),
    /// `key: value`
    Named {
        key: Spanned<String>,
        value: Box<Spanned<Arg>>,
    },
}

impl Arg {
    /// Short description for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Arg::Number(_) => "number",
            Arg::Percent(_) => "percentage",
            Arg::Name(_) => "name",
            Arg::Member { .. } => "edge or anchor",
            Arg::List(_) => "list",
            Arg::Named { .. } => "named argument",
        }
    }
}

//! Structural IR node types
//!
//! `Node` is the language-agnostic unit of the layered IR: one node per
//! declaration, statement, or structural construct extracted by a
//! `LanguagePlugin`. Optional fields are populated incrementally by later
//! pipeline stages (type resolution, chunking, symbol building) so a node
//! constructed at L1 time carries only `id`/`kind`/`fqn`/`file_path`/`span`.

#[cfg(feature = "python")]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

use super::Span;

/// Structural kind of a [`Node`].
///
/// Spans the union of constructs observed across the supported tree-sitter
/// grammars (Python, TypeScript, Java, Kotlin, Go, Rust); most kinds only
/// ever appear for a subset of languages.
#[cfg_attr(feature = "python", pyclass(eq, eq_int))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    AnnotationDecl,
    Assert,
    AssociatedType,
    Block,
    Break,
    Call,
    Catch,
    CfgBlock,
    Channel,
    Class,
    CompanionObject,
    Config,
    Constant,
    Continue,
    DataClass,
    Directory,
    Enum,
    EnumMember,
    Expression,
    ExtensionFunction,
    ExternalFunction,
    ExternalModule,
    ExternalType,
    Field,
    File,
    Finally,
    Function,
    Import,
    Index,
    Interface,
    Job,
    Lambda,
    Lifetime,
    Macro,
    Method,
    Middleware,
    Module,
    Parameter,
    Raise,
    Record,
    Repository,
    Return,
    Route,
    SealedClass,
    Service,
    Signature,
    Struct,
    SuspendFunction,
    Throw,
    Trait,
    TraitImpl,
    Try,
    Type,
    TypeAlias,
    TypeParameter,
    Variable,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AnnotationDecl => "annotation_decl",
            Self::Assert => "assert",
            Self::AssociatedType => "associated_type",
            Self::Block => "block",
            Self::Break => "break",
            Self::Call => "call",
            Self::Catch => "catch",
            Self::CfgBlock => "cfg_block",
            Self::Channel => "channel",
            Self::Class => "class",
            Self::CompanionObject => "companion_object",
            Self::Config => "config",
            Self::Constant => "constant",
            Self::Continue => "continue",
            Self::DataClass => "data_class",
            Self::Directory => "directory",
            Self::Enum => "enum",
            Self::EnumMember => "enum_member",
            Self::Expression => "expression",
            Self::ExtensionFunction => "extension_function",
            Self::ExternalFunction => "external_function",
            Self::ExternalModule => "external_module",
            Self::ExternalType => "external_type",
            Self::Field => "field",
            Self::File => "file",
            Self::Finally => "finally",
            Self::Function => "function",
            Self::Import => "import",
            Self::Index => "index",
            Self::Interface => "interface",
            Self::Job => "job",
            Self::Lambda => "lambda",
            Self::Lifetime => "lifetime",
            Self::Macro => "macro",
            Self::Method => "method",
            Self::Middleware => "middleware",
            Self::Module => "module",
            Self::Parameter => "parameter",
            Self::Raise => "raise",
            Self::Record => "record",
            Self::Repository => "repository",
            Self::Return => "return",
            Self::Route => "route",
            Self::SealedClass => "sealed_class",
            Self::Service => "service",
            Self::Signature => "signature",
            Self::Struct => "struct",
            Self::SuspendFunction => "suspend_function",
            Self::Throw => "throw",
            Self::Trait => "trait",
            Self::TraitImpl => "trait_impl",
            Self::Try => "try",
            Self::Type => "type",
            Self::TypeAlias => "type_alias",
            Self::TypeParameter => "type_parameter",
            Self::Variable => "variable",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single structural unit of the IR (declaration, statement, or block).
///
/// Core fields (`id`, `kind`, `fqn`, `file_path`, `span`, `language`) are
/// set at construction time; everything else is `Option` and filled in by
/// later stages as they run, matching the Python reference's gradual
/// node-enrichment idiom.
#[cfg_attr(feature = "python", pyclass(get_all, set_all))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub fqn: String,
    pub file_path: String,
    pub span: Span,
    pub language: String,

    /// Cross-snapshot stable identity (content + structural position based).
    pub stable_id: Option<String>,
    /// Hash of the node's source slice, used for incremental change detection.
    pub content_hash: Option<String>,
    pub name: Option<String>,
    pub module_path: Option<String>,
    pub parent_id: Option<String>,
    /// Span of the node's body (e.g. function body, excluding signature).
    pub body_span: Option<Span>,
    pub docstring: Option<String>,
    pub decorators: Option<Vec<String>>,
    pub annotations: Option<Vec<String>>,
    pub modifiers: Option<Vec<String>>,
    pub is_async: Option<bool>,
    pub is_generator: Option<bool>,
    pub is_static: Option<bool>,
    pub is_abstract: Option<bool>,
    /// Parameter names, in declaration order (function/method nodes).
    pub parameters: Option<Vec<String>>,
    pub return_type: Option<String>,
    /// Base class / interface names (class nodes), in declaration order.
    pub base_classes: Option<Vec<String>>,
    pub metaclass: Option<String>,
    pub type_annotation: Option<String>,
    pub initial_value: Option<String>,
    /// Opaque JSON blob for language- or stage-specific metadata.
    pub metadata: Option<String>,
    pub role: Option<String>,
    pub is_test_file: Option<bool>,
    pub signature_id: Option<String>,
    pub declared_type_id: Option<String>,
    /// Opaque JSON blob for extension attributes outside the typed fields above.
    pub attrs: Option<String>,
    pub raw: Option<String>,
    pub flavor: Option<String>,
    pub is_nullable: Option<bool>,
    pub owner_node_id: Option<String>,
    pub condition_expr_id: Option<String>,
    pub condition_text: Option<String>,
}

impl Node {
    /// Create a node with only the required fields set; everything else defaults to `None`.
    pub fn new(id: String, kind: NodeKind, fqn: String, file_path: String, span: Span) -> Self {
        Self {
            id,
            kind,
            fqn,
            file_path,
            span,
            language: String::new(),
            stable_id: None,
            content_hash: None,
            name: None,
            module_path: None,
            parent_id: None,
            body_span: None,
            docstring: None,
            decorators: None,
            annotations: None,
            modifiers: None,
            is_async: None,
            is_generator: None,
            is_static: None,
            is_abstract: None,
            parameters: None,
            return_type: None,
            base_classes: None,
            metaclass: None,
            type_annotation: None,
            initial_value: None,
            metadata: None,
            role: None,
            is_test_file: None,
            signature_id: None,
            declared_type_id: None,
            attrs: None,
            raw: None,
            flavor: None,
            is_nullable: None,
            owner_node_id: None,
            condition_expr_id: None,
            condition_text: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_module_path(mut self, module_path: impl Into<String>) -> Self {
        self.module_path = Some(module_path.into());
        self
    }
}

/// Step-wise builder for [`Node`], for call sites that don't have every
/// field available up front (e.g. test fixtures, cross-language adapters).
#[derive(Debug, Default)]
pub struct NodeBuilder {
    id: Option<String>,
    kind: Option<NodeKind>,
    fqn: Option<String>,
    file_path: Option<String>,
    span: Option<Span>,
    language: Option<String>,
    name: Option<String>,
}

impl NodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn kind(mut self, kind: NodeKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn fqn(mut self, fqn: impl Into<String>) -> Self {
        self.fqn = Some(fqn.into());
        self
    }

    pub fn file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn build(self) -> Result<Node, String> {
        let id = self.id.ok_or("NodeBuilder: missing `id`")?;
        let kind = self.kind.ok_or("NodeBuilder: missing `kind`")?;
        let fqn = self.fqn.ok_or("NodeBuilder: missing `fqn`")?;
        let file_path = self.file_path.ok_or("NodeBuilder: missing `file_path`")?;
        let span = self.span.ok_or("NodeBuilder: missing `span`")?;

        let mut node = Node::new(id, kind, fqn, file_path, span);
        if let Some(language) = self.language {
            node.language = language;
        }
        node.name = self.name;
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_new_defaults() {
        let node = Node::new(
            "n1".to_string(),
            NodeKind::Function,
            "mod.f".to_string(),
            "mod.py".to_string(),
            Span::new(1, 0, 2, 0),
        );
        assert_eq!(node.id, "n1");
        assert!(node.name.is_none());
        assert!(node.parameters.is_none());
    }

    #[test]
    fn test_node_builder_chain() {
        let node = Node::new(
            "n1".to_string(),
            NodeKind::Class,
            "mod.C".to_string(),
            "mod.py".to_string(),
            Span::new(1, 0, 5, 0),
        )
        .with_language("python")
        .with_name("C")
        .with_module_path("mod");

        assert_eq!(node.language, "python");
        assert_eq!(node.name.as_deref(), Some("C"));
        assert_eq!(node.module_path.as_deref(), Some("mod"));
    }

    #[test]
    fn test_node_builder_struct_requires_fields() {
        let result = NodeBuilder::new().id("n1").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_node_builder_struct_success() {
        let node = NodeBuilder::new()
            .id("n1")
            .with_name("foo")
            .kind(NodeKind::Function)
            .file_path("test.py")
            .span(Span::new(1, 0, 10, 0))
            .fqn("test::foo")
            .language("python")
            .build()
            .expect("should build");

        assert_eq!(node.id, "n1");
        assert_eq!(node.name.as_deref(), Some("foo"));
        assert_eq!(node.kind, NodeKind::Function);
    }

    #[test]
    fn test_node_kind_as_str() {
        assert_eq!(NodeKind::Function.as_str(), "function");
        assert_eq!(NodeKind::Class.as_str(), "class");
    }
}

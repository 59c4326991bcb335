//! Structural IR edge types
//!
//! `Edge` connects two [`super::Node`]s by id. Unlike `Node`, edges carry no
//! independent identity — they are addressed by `(source_id, target_id, kind)`.

#[cfg(feature = "python")]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

use super::{ControlFlowContext, ReadWriteContext, Span};

/// Relationship expressed by an [`Edge`].
///
/// Grown organically across parser plugins and analysis stages, so near-
/// synonyms coexist (`Call`/`Calls`, `Read`/`Reads`, `Throw`/`Throws`,
/// `DataFlow`/`Dataflow`) where different stages settled on different names
/// before a shared vocabulary existed; query sites normalize as needed.
#[cfg_attr(feature = "python", pyclass(eq, eq_int))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    Alias,
    All,
    AnnotatedWith,
    Assign,
    BorrowsFrom,
    BoundedBy,
    Call,
    CallToReturn,
    Calls,
    Captures,
    Catch,
    Catches,
    CfgBranch,
    CfgHandler,
    CfgLoop,
    CfgNext,
    ChannelReceive,
    ChannelSend,
    Contains,
    ControlFlow,
    DataFlow,
    Dataflow,
    DecoratedWith,
    Decorates,
    DefUse,
    Defines,
    DelegatesTo,
    Exception,
    Extends,
    FalseBranch,
    Finally,
    HandlesRequest,
    Implements,
    ImplementsTrait,
    Imports,
    Inherits,
    Instantiates,
    Invokes,
    LifetimeOf,
    LoopBack,
    LoopExit,
    MacroExpands,
    Normal,
    Overrides,
    Read,
    Reads,
    References,
    ReferencesSymbol,
    ReferencesType,
    Return,
    RouteHandler,
    Sequential,
    Shadows,
    SpawnsGoroutine,
    Summary,
    SuspendsTo,
    Throw,
    Throws,
    TrueBranch,
    TypeAnnotation,
    TypeArgumentOf,
    UsesRepository,
    Writes,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alias => "alias",
            Self::All => "all",
            Self::AnnotatedWith => "annotated_with",
            Self::Assign => "assign",
            Self::BorrowsFrom => "borrows_from",
            Self::BoundedBy => "bounded_by",
            Self::Call => "call",
            Self::CallToReturn => "call_to_return",
            Self::Calls => "calls",
            Self::Captures => "captures",
            Self::Catch => "catch",
            Self::Catches => "catches",
            Self::CfgBranch => "cfg_branch",
            Self::CfgHandler => "cfg_handler",
            Self::CfgLoop => "cfg_loop",
            Self::CfgNext => "cfg_next",
            Self::ChannelReceive => "channel_receive",
            Self::ChannelSend => "channel_send",
            Self::Contains => "contains",
            Self::ControlFlow => "control_flow",
            Self::DataFlow => "data_flow",
            Self::Dataflow => "dataflow",
            Self::DecoratedWith => "decorated_with",
            Self::Decorates => "decorates",
            Self::DefUse => "def_use",
            Self::Defines => "defines",
            Self::DelegatesTo => "delegates_to",
            Self::Exception => "exception",
            Self::Extends => "extends",
            Self::FalseBranch => "false_branch",
            Self::Finally => "finally",
            Self::HandlesRequest => "handles_request",
            Self::Implements => "implements",
            Self::ImplementsTrait => "implements_trait",
            Self::Imports => "imports",
            Self::Inherits => "inherits",
            Self::Instantiates => "instantiates",
            Self::Invokes => "invokes",
            Self::LifetimeOf => "lifetime_of",
            Self::LoopBack => "loop_back",
            Self::LoopExit => "loop_exit",
            Self::MacroExpands => "macro_expands",
            Self::Normal => "normal",
            Self::Overrides => "overrides",
            Self::Read => "read",
            Self::Reads => "reads",
            Self::References => "references",
            Self::ReferencesSymbol => "references_symbol",
            Self::ReferencesType => "references_type",
            Self::Return => "return",
            Self::RouteHandler => "route_handler",
            Self::Sequential => "sequential",
            Self::Shadows => "shadows",
            Self::SpawnsGoroutine => "spawns_goroutine",
            Self::Summary => "summary",
            Self::SuspendsTo => "suspends_to",
            Self::Throw => "throw",
            Self::Throws => "throws",
            Self::TrueBranch => "true_branch",
            Self::TypeAnnotation => "type_annotation",
            Self::TypeArgumentOf => "type_argument_of",
            Self::UsesRepository => "uses_repository",
            Self::Writes => "writes",
        }
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Typed side-channel metadata for an [`Edge`].
///
/// Kept as a dedicated struct (rather than a stringly-typed map) so the
/// common cases — import aliasing, read/write and control-flow context —
/// stay type-checked; anything else goes on [`Edge::attrs`].
#[cfg_attr(feature = "python", pyclass(get_all, set_all))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeMetadata {
    /// Alias bound by an `import x as y` style statement.
    pub alias: Option<String>,
    pub read_write_context: Option<ReadWriteContext>,
    pub control_flow_context: Option<ControlFlowContext>,
}

/// A directed relationship between two [`super::Node`]s.
#[cfg_attr(feature = "python", pyclass(get_all, set_all))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source_id: String,
    pub target_id: String,
    pub kind: EdgeKind,
    pub span: Option<Span>,
    pub metadata: Option<EdgeMetadata>,
    /// Opaque JSON blob for extension attributes outside `metadata`.
    pub attrs: Option<String>,
}

impl Edge {
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>, kind: EdgeKind) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            kind,
            span: None,
            metadata: None,
            attrs: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_metadata(mut self, metadata: EdgeMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_attrs(mut self, attrs: impl Into<String>) -> Self {
        self.attrs = Some(attrs.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_new_defaults() {
        let edge = Edge::new("a", "b", EdgeKind::Calls);
        assert_eq!(edge.source_id, "a");
        assert_eq!(edge.target_id, "b");
        assert!(edge.span.is_none());
        assert!(edge.metadata.is_none());
    }

    #[test]
    fn test_edge_builder_chain() {
        let edge = Edge::new("a", "b", EdgeKind::Imports)
            .with_span(Span::new(1, 0, 1, 5))
            .with_metadata(EdgeMetadata {
                alias: Some("np".to_string()),
                ..Default::default()
            });

        assert_eq!(edge.span, Some(Span::new(1, 0, 1, 5)));
        assert_eq!(edge.metadata.unwrap().alias.as_deref(), Some("np"));
    }

    #[test]
    fn test_edge_kind_as_str() {
        assert_eq!(EdgeKind::Calls.as_str(), "calls");
        assert_eq!(EdgeKind::DataFlow.as_str(), "data_flow");
    }
}

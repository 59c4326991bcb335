//! Return-type summaries: per-function return type derived with a fixed
//! priority order, joined bottom-up over the call graph's strongly
//! connected components.

use super::type_system::Type;

/// Which rule produced a [`ReturnSummary`], in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarySource {
    ExplicitAnnotation,
    DunderRule,
    TestHeuristic,
    AllReturnsJoin,
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSummary {
    pub function_id: String,
    pub return_type: Type,
    pub source: SummarySource,
}

/// Knobs pulled out of the resolver's widening rule so they're tunable per
/// project instead of a hardcoded constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeResolutionConfig {
    /// Once a function's joined return types exceed this count, the summary
    /// widens to `Any` instead of growing an unbounded union.
    pub max_union_size: usize,
}

impl Default for TypeResolutionConfig {
    fn default() -> Self {
        Self { max_union_size: 8 }
    }
}

/// Dunder methods whose return type is fixed by convention regardless of
/// what the body does.
const UNIT_DUNDERS: &[&str] = &[
    "__init__",
    "__setattr__",
    "__delattr__",
    "__init_subclass__",
    "__post_init__",
];

/// Rule (2): known dunder methods with a conventional return type.
pub fn dunder_return_rule(function_name: &str) -> Option<Type> {
    if UNIT_DUNDERS.contains(&function_name) {
        Some(Type::none())
    } else {
        None
    }
}

/// Rule (3): test functions are run for side effects, never their return value.
pub fn is_test_function(function_name: &str) -> bool {
    function_name.starts_with("test_")
}

/// Parses a raw annotation string into a [`Type`], understanding the same
/// `T | U` union syntax `infrastructure::type_resolver` resolves for
/// constraint generation, but producing a plain [`Type`] rather than an
/// `InferType` since joins operate on resolved types, not inference
/// variables.
pub fn parse_annotation(raw: &str) -> Type {
    let raw = raw.trim();
    if raw.contains('|') {
        let members: Vec<Type> = raw.split('|').map(|part| parse_annotation(part.trim())).collect();
        return Type::union(members);
    }
    match raw {
        "None" | "" => Type::none(),
        "Any" => Type::any(),
        _ => Type::simple(raw),
    }
}

/// Rule (4): joins every observed return type, widening to `Any` per
/// §9's "correlation constants as config" style Open Question resolution —
/// `max_union_size` is a `TypeResolutionConfig` field rather than a
/// hardcoded cutoff.
///
/// An empty set of returns means the function falls off the end of its body
/// with no `return` statement, which is `None` in Python-style semantics.
pub fn join_return_types(types: Vec<Type>, config: &TypeResolutionConfig) -> Type {
    if types.is_empty() {
        return Type::none();
    }
    let joined = Type::union(types);
    match joined.union_members() {
        Some(members) if members.len() > config.max_union_size => Type::any(),
        _ => joined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dunder_return_rule_matches_known_dunders() {
        assert_eq!(dunder_return_rule("__init__"), Some(Type::none()));
        assert_eq!(dunder_return_rule("__repr__"), None);
    }

    #[test]
    fn test_is_test_function_prefix() {
        assert!(is_test_function("test_foo"));
        assert!(!is_test_function("foo_test"));
    }

    #[test]
    fn test_parse_annotation_union_syntax() {
        let ty = parse_annotation("int | str | None");
        assert!(ty.is_union());
        assert!(ty.is_nullable());
    }

    #[test]
    fn test_parse_annotation_simple() {
        assert_eq!(parse_annotation("int"), Type::simple("int"));
        assert_eq!(parse_annotation("None"), Type::none());
    }

    #[test]
    fn test_join_return_types_under_limit_stays_union() {
        let config = TypeResolutionConfig::default();
        let joined = join_return_types(vec![Type::simple("int"), Type::simple("str")], &config);
        assert!(joined.is_union());
    }

    #[test]
    fn test_join_return_types_widens_past_max_union_size() {
        let config = TypeResolutionConfig { max_union_size: 2 };
        let joined = join_return_types(
            vec![Type::simple("int"), Type::simple("str"), Type::simple("bool")],
            &config,
        );
        assert_eq!(joined, Type::any());
    }

    #[test]
    fn test_join_return_types_empty_is_none() {
        let config = TypeResolutionConfig::default();
        assert_eq!(join_return_types(vec![], &config), Type::none());
    }
}

//! Typed relations between graph nodes.
//!
//! Every arc in a [`ParseGraph`](super::ParseGraph) carries a type-erased
//! [`Relation`] describing what the link means. Stages and agents define
//! their own relation types; readers tell them apart by type.

use std::any::TypeId;
use std::fmt::Debug;
use std::sync::Arc;

use super::NodeId;

/// Identifier of an arc within one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArcId(pub usize);

/// A typed semantic label for an arc between two nodes.
///
/// # Example
///
/// ```
/// use layered_parse::Relation;
///
/// #[derive(Debug, Clone)]
/// pub struct Dependency;
///
/// impl Relation for Dependency {
///     fn label(&self) -> &'static str { "dep" }
///     fn glyph(&self) -> Option<&'static str> { Some("^") }
/// }
/// ```
pub trait Relation: Debug + Send + Sync + 'static {
    /// Returns the semantic label for this relation type.
    ///
    /// This label is used in display output and for programmatic identification.
    fn label(&self) -> &'static str;

    /// Returns an optional single-character glyph rendered before the label.
    fn glyph(&self) -> Option<&'static str> {
        None
    }
}

/// Object-safe wrapper trait for type-erased relation storage.
///
/// Automatically implemented for all types implementing [`Relation`].
pub trait RelationAny: Debug + Send + Sync {
    fn label(&self) -> &'static str;

    fn glyph(&self) -> Option<&'static str>;

    /// Returns the concrete TypeId of the relation.
    fn relation_type_id(&self) -> TypeId;
}

impl<R: Relation> RelationAny for R {
    fn label(&self) -> &'static str {
        Relation::label(self)
    }

    fn glyph(&self) -> Option<&'static str> {
        Relation::glyph(self)
    }

    fn relation_type_id(&self) -> TypeId {
        TypeId::of::<R>()
    }
}

/// Links consecutive tokens in reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Next;

impl Relation for Next {
    fn label(&self) -> &'static str {
        "next"
    }
}

/// Links a phrase node to one of its member tokens.
///
/// Member arcs of one phrase are stored in word order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseMember;

impl Relation for PhraseMember {
    fn label(&self) -> &'static str {
        "member"
    }

    fn glyph(&self) -> Option<&'static str> {
        Some("+")
    }
}

/// Links a mention to an earlier mention of the same entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coreference;

impl Relation for Coreference {
    fn label(&self) -> &'static str {
        "coref"
    }

    fn glyph(&self) -> Option<&'static str> {
        Some("@")
    }
}

/// A directed arc from `source` to `target` with a typed relation.
#[derive(Clone)]
pub struct RelationArc {
    pub id: ArcId,
    pub source: NodeId,
    pub target: NodeId,
    relation: Arc<dyn RelationAny>,
}

impl Debug for RelationArc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelationArc")
            .field("id", &self.id)
            .field("source", &self.source)
            .field("target", &self.target)
            .field("label", &self.label())
            .finish()
    }
}

impl RelationArc {
    pub fn new<R: Relation>(id: ArcId, source: NodeId, target: NodeId, relation: R) -> Self {
        Self {
            id,
            source,
            target,
            relation: Arc::new(relation),
        }
    }

    pub fn label(&self) -> &'static str {
        self.relation.label()
    }

    pub fn glyph(&self) -> Option<&'static str> {
        self.relation.glyph()
    }

    pub fn relation_type_id(&self) -> TypeId {
        self.relation.relation_type_id()
    }

    /// True when this arc carries a relation of type `R`.
    pub fn is<R: Relation>(&self) -> bool {
        self.relation_type_id() == TypeId::of::<R>()
    }
}

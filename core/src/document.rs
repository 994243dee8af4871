//! The result of parsing one SURF document.

use std::ops::Index;

use crate::{
    Resource, ResourceId, Value,
    parser::{LabelBindings, LabelKey},
};


/// A parsed document: its root value, the arena of every resource that the
/// root refers to directly or indirectly, and the label bindings that were
/// established while parsing.
///
/// The label bindings stay available for the lookups by tag, by type and ID,
/// and by alias.
#[derive(Debug)]
pub struct Document<LB> {
    pub(crate) root: Option<Value>,
    pub(crate) resources: Vec<Resource>,
    pub(crate) bindings: LB,
}

impl<LB> Document<LB>
    where LB: LabelBindings,
{
    /// The root value, or `None` if the input was empty or only filler.
    #[inline]
    pub fn root(&self) -> Option<&Value> {
        self.root.as_ref()
    }

    /// Take the root value, the resources, and the label bindings apart.
    #[inline]
    pub fn into_parts(self) -> (Option<Value>, Vec<Resource>, LB) {
        (self.root, self.resources, self.bindings)
    }

    /// The resource with the given identity.  `None` if the identity is from
    /// a different document.
    #[inline]
    pub fn resource(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(id.0)
    }

    /// The resource that `value` is, if it is an object.
    #[inline]
    pub fn object(&self, value: &Value) -> Option<&Resource> {
        value.as_object().and_then(|id| self.resource(id))
    }

    /// All the resources, indexed by `ResourceId::index`.
    #[inline]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// The label bindings that were established while parsing.
    #[inline]
    pub fn bindings(&self) -> &LB {
        &self.bindings
    }

    /// The resource that was tagged with the given IRI.
    pub fn find_by_tag(&self, tag: &str) -> Option<ResourceId> {
        self.bindings.resolve(&LabelKey::Tag(tag.into()))
                     .and_then(Value::as_object)
    }

    /// The resource that was labeled with the given ID and declared with the
    /// given type.
    pub fn find_by_type_and_id(&self, type_name: &str, id: &str) -> Option<ResourceId> {
        self.bindings.resolve(&LabelKey::TypeId(type_name.into(), id.into()))
                     .and_then(Value::as_object)
    }

    /// The value that was labeled with the given alias.
    pub fn find_by_alias(&self, alias: &str) -> Option<&Value> {
        self.bindings.resolve(&LabelKey::Alias(alias.into()))
    }
}

impl<LB> Index<ResourceId> for Document<LB> {
    type Output = Resource;

    /// Panics if the identity is from a different, larger, document.
    #[inline]
    fn index(&self, id: ResourceId) -> &Resource {
        &self.resources[id.0]
    }
}

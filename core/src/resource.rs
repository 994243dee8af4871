//! Resources: the "object" terms of a document.

use indexmap::IndexMap;

use crate::{Iri, Value};


/// Identity of a [`Resource`](struct.Resource.html) within its
/// [`Document`](struct.Document.html).
///
/// It indexes the document's arena of resources, which is what lets labeled
/// resources be referenced before they are described and lets them refer to
/// themselves.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ResourceId(pub(crate) usize);

impl ResourceId {
    /// The index into the document's resources.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}


/// An object: an optional identity, an optional type, and named properties.
///
/// At most one of `tag` and `id` is present.  A resource with an `id` always
/// has a `type_name`, because the (type, ID) pair is its identity.
#[derive(Clone, Default, Debug)]
pub struct Resource {
    pub(crate) tag: Option<Iri>,
    pub(crate) type_name: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) properties: IndexMap<String, Value>,
}

impl Resource {
    /// The absolute IRI that is this resource's global identity, if tagged.
    #[inline]
    pub fn tag(&self) -> Option<&Iri> {
        self.tag.as_ref()
    }

    /// The type handle, if declared.
    #[inline]
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// The ID that, with the type, identifies this resource locally.
    #[inline]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The properties, in the order they were written.
    #[inline]
    pub fn properties(&self) -> &IndexMap<String, Value> {
        &self.properties
    }

    /// The value of one property.
    #[inline]
    pub fn property(&self, handle: &str) -> Option<&Value> {
        self.properties.get(handle)
    }

    /// Whether this is the degenerate empty object `*`.
    pub fn is_empty(&self) -> bool {
        self.tag.is_none() && self.type_name.is_none() && self.id.is_none()
            && self.properties.is_empty()
    }
}

//! Dispatch on the next character to the parser of each kind of term, and the
//! resolution of labels to the values they identify.

use std::sync::Arc;

use tracing::trace;

use crate::{
    Iri, Resource, ResourceId, Value, ValueMap, ValueSet, SourceStream, SourcePos,
    error::{ErrorKind, ParseResult, SyntaxError},
    syntax::*,
};
use super::{CharClassifier, LabelBindings, LabelKey, ParseContext};


/// A label as written, before it is resolved.
#[derive(Debug)]
enum Label {
    Tag(Iri),
    Id(String),
    Alias(String),
}

impl<CC, S, LB> ParseContext<'_, CC, S, LB>
    where CC: CharClassifier,
          S: SourceStream,
          LB: LabelBindings,
{
    pub(super) fn parse_document(&mut self) -> ParseResult<Option<Value>> {
        let _ = self.skip_filler_and_line_breaks();
        if self.peek_char().is_none() {
            return Ok(None);
        }
        let root = self.parse_resource()?;
        let _ = self.skip_filler_and_line_breaks();
        if self.peek_char().is_some() {
            return Err(self.error(ErrorKind::ContentAfterRoot));
        }
        Ok(Some(root))
    }

    /// Parse one resource term: an optional label followed by an object, a
    /// collection, or a literal.  A label that is not immediately followed by
    /// a term is a reference to what it was bound to.
    pub(super) fn parse_resource(&mut self) -> ParseResult<Value> {
        self.nested(|cx| {
            let label = if cx.peek_is(LABEL_DELIMITER) {
                let pos = cx.position();
                Some((cx.parse_label()?, pos))
            } else {
                None
            };
            let next = cx.peek_char();
            let begins_term = next.map_or(false, is_term_begin);

            match label {
                None if begins_term => cx.parse_term(),
                None => Err(cx.unexpected("a resource")),
                Some((label, pos)) if !begins_term => cx.resolve_reference(label, pos),
                Some((label, pos)) if next == Some(OBJECT_BEGIN) => {
                    cx.parse_object(Some((label, pos))).map(Value::Object)
                }
                Some((Label::Alias(alias), pos)) => {
                    let key = LabelKey::Alias(alias);
                    if cx.bindings.resolve(&key).is_some() {
                        return Err(cx.redeclared(&key, pos));
                    }
                    let value = cx.parse_term()?;
                    // The term itself may have bound the same alias.
                    if cx.bindings.resolve(&key).is_some() {
                        return Err(cx.redeclared(&key, pos));
                    }
                    cx.bind(key, value.clone());
                    Ok(value)
                }
                Some((_, pos)) => Err(SyntaxError::new(ErrorKind::InvalidLabel, pos)),
            }
        })
    }

    fn parse_label(&mut self) -> ParseResult<Label> {
        self.expect(LABEL_DELIMITER)?;
        let label = match self.peek_char() {
            Some(IRI_BEGIN) => Label::Tag(self.parse_iri()?),
            Some(STRING_DELIMITER) => Label::Id(self.parse_string()?),
            Some(ch) if self.classifier.is_handle_begin(ch) => {
                Label::Alias(self.parse_handle()?)
            }
            _ => return Err(self.unexpected("a tag, ID, or alias")),
        };
        self.expect(LABEL_DELIMITER)?;
        Ok(label)
    }

    fn resolve_reference(&mut self, label: Label, pos: SourcePos) -> ParseResult<Value> {
        match label {
            Label::Tag(iri) => {
                let key = LabelKey::Tag(iri.as_str().into());
                if let Some(value) = self.bindings.resolve(&key) {
                    return Ok(value.clone());
                }
                // Forward reference: the tag is the resource's identity even
                // before it is described.
                let id = self.new_resource(Resource { tag: Some(iri),
                                                      ..Resource::default() });
                self.bind(key, Value::Object(id));
                Ok(Value::Object(id))
            }
            Label::Id(id) => Err(SyntaxError::new(ErrorKind::IdWithoutType { id }, pos)),
            Label::Alias(alias) => {
                match self.bindings.resolve(&LabelKey::Alias(alias.clone())) {
                    Some(value) => Ok(value.clone()),
                    None => Err(SyntaxError::new(ErrorKind::UnresolvedAlias { alias }, pos)),
                }
            }
        }
    }

    fn parse_term(&mut self) -> ParseResult<Value> {
        match self.peek_char() {
            Some(OBJECT_BEGIN) => self.parse_object(None).map(Value::Object),
            Some(LIST_BEGIN) => self.parse_list(),
            Some(SET_MARKER) => self.parse_set(),
            Some(MAP_BEGIN) => self.parse_map(),
            Some(STRING_DELIMITER) => self.parse_string().map(Value::String),
            Some(CHARACTER_DELIMITER) => self.parse_character().map(Value::Character),
            Some(IRI_BEGIN) => self.parse_iri().map(Value::Iri),
            Some(BINARY_BEGIN) => self.parse_binary().map(Value::Binary),
            Some(UUID_BEGIN) => self.parse_uuid().map(Value::Uuid),
            Some(TELEPHONE_NUMBER_BEGIN) => {
                self.parse_telephone_number().map(Value::TelephoneNumber)
            }
            Some(EMAIL_ADDRESS_BEGIN) => self.parse_email_address().map(Value::EmailAddress),
            Some(REGEX_DELIMITER) => self.parse_regex().map(Value::Regex),
            Some(TEMPORAL_BEGIN) => self.parse_temporal().map(Value::Temporal),
            Some(ch) if is_number_begin(ch) => self.parse_number(),
            Some(ch) if is_boolean_begin(ch) => self.parse_boolean().map(Value::Boolean),
            _ => Err(self.unexpected("a resource")),
        }
    }

    /// Parse an object: `*`, an optional type handle, and an optional property
    /// block that must immediately follow.
    ///
    /// A tag or ID label that is already bound yields the resource it is bound
    /// to, so every mention of it is the same resource.  Otherwise a new
    /// resource is made and bound before its property block is parsed, so the
    /// properties can refer back to it.
    fn parse_object(&mut self, label: Option<(Label, SourcePos)>) -> ParseResult<ResourceId> {
        self.expect(OBJECT_BEGIN)?;
        let type_name = match self.peek_char() {
            Some(ch) if self.classifier.is_handle_begin(ch) => Some(self.parse_handle()?),
            _ => None,
        };

        let id = match label {
            None => self.new_resource(Resource { type_name, ..Resource::default() }),
            Some((Label::Tag(iri), pos)) => {
                let key = LabelKey::Tag(iri.as_str().into());
                match self.bindings.resolve(&key) {
                    Some(&Value::Object(id)) => {
                        self.reconcile_type(id, type_name, pos)?;
                        id
                    }
                    Some(_) => return Err(self.redeclared(&key, pos)),
                    None => {
                        let id = self.new_resource(Resource { tag: Some(iri),
                                                              type_name,
                                                              ..Resource::default() });
                        self.bind(key, Value::Object(id));
                        id
                    }
                }
            }
            Some((Label::Id(local_id), pos)) => {
                let type_name = match type_name {
                    Some(type_name) => type_name,
                    None => return Err(SyntaxError::new(
                        ErrorKind::IdWithoutType { id: local_id }, pos)),
                };
                let key = LabelKey::TypeId(type_name.clone(), local_id.clone());
                match self.bindings.resolve(&key) {
                    Some(&Value::Object(id)) => id,
                    Some(_) => return Err(self.redeclared(&key, pos)),
                    None => {
                        let id = self.new_resource(Resource { type_name: Some(type_name),
                                                              id: Some(local_id),
                                                              ..Resource::default() });
                        self.bind(key, Value::Object(id));
                        id
                    }
                }
            }
            Some((Label::Alias(alias), pos)) => {
                let key = LabelKey::Alias(alias);
                if self.bindings.resolve(&key).is_some() {
                    return Err(self.redeclared(&key, pos));
                }
                let id = self.new_resource(Resource { type_name, ..Resource::default() });
                self.bind(key, Value::Object(id));
                id
            }
        };

        if self.peek_is(PROPERTIES_BEGIN) {
            if !self.described.insert(id) {
                let label = self.describe_resource(id);
                return Err(self.error(ErrorKind::LabelRedeclared { label }));
            }
            self.parse_properties(id)?;
        }
        Ok(id)
    }

    fn reconcile_type(&mut self, id: ResourceId, type_name: Option<String>, pos: SourcePos)
                      -> ParseResult<()>
    {
        let resource = &mut self.resources[id.0];
        match (&resource.type_name, type_name) {
            (_, None) => Ok(()),
            (None, declared) => {
                resource.type_name = declared;
                Ok(())
            }
            (Some(existing), Some(declared)) if *existing == declared => Ok(()),
            (Some(existing), Some(declared)) => Err(SyntaxError::new(
                ErrorKind::ConflictingType { existing: existing.clone(), declared },
                pos)),
        }
    }

    fn parse_properties(&mut self, id: ResourceId) -> ParseResult<()> {
        self.expect(PROPERTIES_BEGIN)?;
        self.parse_sequence(PROPERTIES_END, |cx| {
            let pos = cx.position();
            let handle = cx.parse_handle()?;
            if cx.resources[id.0].properties.contains_key(&handle) {
                return Err(SyntaxError::new(ErrorKind::DuplicateProperty { handle }, pos));
            }
            cx.skip_filler();
            cx.expect(PROPERTY_VALUE_DELIMITER)?;
            let _ = cx.skip_filler_and_line_breaks();
            let value = cx.parse_resource()?;
            let _ = cx.resources[id.0].properties.insert(handle, value);
            Ok(())
        })
    }

    fn parse_list(&mut self) -> ParseResult<Value> {
        self.parse_list_elements().map(Value::list)
    }

    fn parse_list_elements(&mut self) -> ParseResult<Vec<Value>> {
        self.expect(LIST_BEGIN)?;
        let mut elems = Vec::new();
        self.parse_sequence(LIST_END, |cx| {
            elems.push(cx.parse_resource()?);
            Ok(())
        })?;
        Ok(elems)
    }

    fn parse_set(&mut self) -> ParseResult<Value> {
        self.expect(SET_MARKER)?;
        let elems = self.parse_list_elements()?;
        Ok(Value::Set(Arc::new(elems.into_iter().collect::<ValueSet>())))
    }

    fn parse_map(&mut self) -> ParseResult<Value> {
        self.expect(MAP_BEGIN)?;
        let mut map = ValueMap::new();
        self.parse_sequence(MAP_END, |cx| {
            let key = cx.parse_resource()?;
            cx.skip_filler();
            cx.expect(ENTRY_KEY_VALUE_DELIMITER)?;
            let _ = cx.skip_filler_and_line_breaks();
            let value = cx.parse_resource()?;
            let _ = map.insert(key, value);
            Ok(())
        })?;
        Ok(Value::Map(Arc::new(map)))
    }

    fn bind(&mut self, key: LabelKey, value: Value) {
        trace!(?key, "bound label");
        let _ = self.bindings.bind(key, value);
    }

    fn redeclared(&self, key: &LabelKey, pos: SourcePos) -> SyntaxError {
        let label = match key {
            LabelKey::Tag(iri) => label_text(Some(iri), None, None),
            LabelKey::TypeId(_, id) => label_text(None, Some(id), None),
            LabelKey::Alias(alias) => label_text(None, None, Some(alias)),
        };
        SyntaxError::new(ErrorKind::LabelRedeclared { label }, pos)
    }

    /// How a resource's label is written, for error messages.
    fn describe_resource(&self, id: ResourceId) -> String {
        let resource = &self.resources[id.0];
        match (&resource.tag, &resource.id) {
            (None, None) => format!("of resource #{}", id.0),
            (tag, rid) => label_text(tag.as_deref(), rid.as_deref(), None),
        }
    }
}


fn label_text(tag: Option<&str>, id: Option<&str>, alias: Option<&str>) -> String {
    match (tag, id, alias) {
        (Some(tag), _, _) => format!("|<{}>|", tag),
        (None, Some(id), _) => format!("|\"{}\"|", id),
        (None, None, Some(alias)) => format!("|{}|", alias),
        (None, None, None) => String::new(),
    }
}


/// Whether `ch` begins a term, as opposed to ending a labeled reference.
fn is_term_begin(ch: char) -> bool {
    matches!(ch, OBJECT_BEGIN | LIST_BEGIN | SET_MARKER | MAP_BEGIN
                 | STRING_DELIMITER | CHARACTER_DELIMITER | IRI_BEGIN
                 | BINARY_BEGIN | UUID_BEGIN | TELEPHONE_NUMBER_BEGIN
                 | EMAIL_ADDRESS_BEGIN | REGEX_DELIMITER | TEMPORAL_BEGIN)
        || is_number_begin(ch)
        || is_boolean_begin(ch)
}

fn is_number_begin(ch: char) -> bool {
    ch == DECIMAL_BEGIN || ch == '-' || ch.is_ascii_digit()
}

fn is_boolean_begin(ch: char) -> bool {
    TRUE.starts_with(ch) || FALSE.starts_with(ch)
}

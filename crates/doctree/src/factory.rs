//! Type model construction.
//!
//! [`build_type_model`] classifies a descriptor and fills the matching
//! [`TypeModel`] variant. [`build_type_model_with`] forces the variant and lets
//! the caller take over how each member category is stored.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use doctree_model::{
    ConstructorModel, EnumAlias, FieldModel, MethodModel, PropertyModel, TypeHeader, TypeKind,
    TypeModel,
};
use tracing::debug;

use crate::error::BuildError;
use crate::extract::{BaseMembers, extract_members};
use crate::metadata::TypeDescriptor;

/// Classify a descriptor. First match wins: enum, interface, class, struct.
pub fn classify(descriptor: &dyn TypeDescriptor) -> TypeKind {
    if descriptor.is_enum() {
        TypeKind::Enum
    } else if descriptor.is_interface() {
        TypeKind::Interface
    } else if descriptor.is_class() {
        TypeKind::Class
    } else {
        TypeKind::Struct
    }
}

/// Enumerants of one enum, keyed by backing code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumValues {
    pub values: BTreeMap<i64, String>,
    /// Names whose code was already taken by an earlier enumerant.
    pub aliases: Vec<EnumAlias>,
}

impl EnumValues {
    pub fn collect(descriptor: &dyn TypeDescriptor) -> Result<Self, BuildError> {
        let enumerants = descriptor
            .enum_values()
            .map_err(|e| BuildError::unavailable(descriptor.full_name(), e))?;

        let mut out = Self::default();
        let mut seen = HashSet::new();
        for enumerant in enumerants {
            if !seen.insert(enumerant.name.clone()) {
                return Err(BuildError::DuplicateEnumName {
                    type_name: descriptor.full_name().to_string(),
                    name: enumerant.name,
                });
            }
            if out.values.contains_key(&enumerant.value) {
                out.aliases.push(EnumAlias {
                    name: enumerant.name,
                    value: enumerant.value,
                });
            } else {
                out.values.insert(enumerant.value, enumerant.name);
            }
        }
        Ok(out)
    }
}

type Handler<T> = Box<dyn Fn(&mut TypeModel, T) + Send + Sync>;

/// Optional per-category population hooks.
///
/// Each handler receives the model under construction and the default
/// extracted list. Categories without a handler are assigned to the model's
/// collection when the variant has one and dropped otherwise.
#[derive(Default)]
pub struct MemberHandlers {
    constructors: Option<Handler<Vec<ConstructorModel>>>,
    fields: Option<Handler<Vec<FieldModel>>>,
    properties: Option<Handler<Vec<PropertyModel>>>,
    methods: Option<Handler<Vec<MethodModel>>>,
    enum_values: Option<Handler<EnumValues>>,
}

impl MemberHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_constructors(
        mut self,
        f: impl Fn(&mut TypeModel, Vec<ConstructorModel>) + Send + Sync + 'static,
    ) -> Self {
        self.constructors = Some(Box::new(f));
        self
    }

    pub fn on_fields(
        mut self,
        f: impl Fn(&mut TypeModel, Vec<FieldModel>) + Send + Sync + 'static,
    ) -> Self {
        self.fields = Some(Box::new(f));
        self
    }

    pub fn on_properties(
        mut self,
        f: impl Fn(&mut TypeModel, Vec<PropertyModel>) + Send + Sync + 'static,
    ) -> Self {
        self.properties = Some(Box::new(f));
        self
    }

    pub fn on_methods(
        mut self,
        f: impl Fn(&mut TypeModel, Vec<MethodModel>) + Send + Sync + 'static,
    ) -> Self {
        self.methods = Some(Box::new(f));
        self
    }

    pub fn on_enum_values(
        mut self,
        f: impl Fn(&mut TypeModel, EnumValues) + Send + Sync + 'static,
    ) -> Self {
        self.enum_values = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for MemberHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberHandlers")
            .field("constructors", &self.constructors.is_some())
            .field("fields", &self.fields.is_some())
            .field("properties", &self.properties.is_some())
            .field("methods", &self.methods.is_some())
            .field("enum_values", &self.enum_values.is_some())
            .finish()
    }
}

fn populate<T>(
    model: &mut TypeModel,
    items: Vec<T>,
    handler: Option<&Handler<Vec<T>>>,
    slot: fn(&mut TypeModel) -> Option<&mut Vec<T>>,
) {
    match handler {
        Some(handler) => handler(model, items),
        None => {
            if let Some(slot) = slot(model) {
                *slot = items;
            }
        }
    }
}

/// Build the model for a descriptor, classifying it first.
pub fn build_type_model(
    descriptor: &dyn TypeDescriptor,
    base: &BaseMembers,
    filter_base_members: bool,
) -> Result<TypeModel, BuildError> {
    build_type_model_with(
        classify(descriptor),
        descriptor,
        base,
        filter_base_members,
        &MemberHandlers::default(),
    )
}

/// Build a model of a fixed kind with caller-supplied population hooks.
pub fn build_type_model_with(
    kind: TypeKind,
    descriptor: &dyn TypeDescriptor,
    base: &BaseMembers,
    filter_base_members: bool,
    handlers: &MemberHandlers,
) -> Result<TypeModel, BuildError> {
    let header = TypeHeader::new(
        descriptor.name(),
        descriptor.full_name(),
        descriptor.namespace().unwrap_or_default(),
    );
    let mut model = TypeModel::empty(kind, header);

    if kind == TypeKind::Enum {
        let values = EnumValues::collect(descriptor)?;
        match &handlers.enum_values {
            Some(handler) => handler(&mut model, values),
            None => {
                if let Some(model) = model.as_enum_mut() {
                    model.values = values.values;
                    model.aliases = values.aliases;
                }
            }
        }
    } else {
        let extracted = extract_members(descriptor, base, filter_base_members)?;
        populate(
            &mut model,
            extracted.constructors,
            handlers.constructors.as_ref(),
            TypeModel::constructors_mut,
        );
        populate(
            &mut model,
            extracted.fields,
            handlers.fields.as_ref(),
            TypeModel::fields_mut,
        );
        populate(
            &mut model,
            extracted.properties,
            handlers.properties.as_ref(),
            TypeModel::properties_mut,
        );
        populate(
            &mut model,
            extracted.methods,
            handlers.methods.as_ref(),
            TypeModel::methods_mut,
        );
    }

    debug!(
        type_name = model.full_name(),
        kind = %kind,
        members = model.member_count(),
        "built type model"
    );
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{MemberKind, TypeCategory, TypeRecord};

    fn color() -> TypeRecord {
        TypeRecord::new("Color", Some("Paint"), TypeCategory::Enum)
            .value("Red", 0)
            .value("Green", 1)
            .value("Blue", 2)
    }

    #[test]
    fn test_classification_order() {
        let cases = [
            (TypeCategory::Enum, TypeKind::Enum),
            (TypeCategory::Interface, TypeKind::Interface),
            (TypeCategory::Class, TypeKind::Class),
            (TypeCategory::Struct, TypeKind::Struct),
            (TypeCategory::Primitive, TypeKind::Struct),
        ];
        for (category, kind) in cases {
            assert_eq!(classify(&TypeRecord::new("T", None, category)), kind);
        }
    }

    #[test]
    fn test_enum_values_map_exactly() {
        let model = build_type_model(&color(), &BaseMembers::system_object(), true).unwrap();
        let TypeModel::Enum(model) = model else {
            panic!("expected enum model");
        };
        let expected: BTreeMap<i64, String> = [(0, "Red"), (1, "Green"), (2, "Blue")]
            .into_iter()
            .map(|(code, name)| (code, name.to_string()))
            .collect();
        assert_eq!(model.values, expected);
        assert!(model.aliases.is_empty());
        assert_eq!(model.header.full_name, "Paint.Color");
    }

    #[test]
    fn test_enum_shared_code_becomes_alias() {
        let flags = TypeRecord::new("Mode", None, TypeCategory::Enum)
            .value("Off", 0)
            .value("None", 0)
            .value("On", 1);
        let model = build_type_model(&flags, &BaseMembers::default(), true).unwrap();
        let TypeModel::Enum(model) = model else {
            panic!("expected enum model");
        };
        assert_eq!(model.values[&0], "Off");
        assert_eq!(
            model.aliases,
            vec![EnumAlias {
                name: "None".to_string(),
                value: 0
            }]
        );
    }

    #[test]
    fn test_enum_duplicate_name_is_error() {
        let broken = TypeRecord::new("Color", None, TypeCategory::Enum)
            .value("Red", 0)
            .value("Red", 1);
        let err = build_type_model(&broken, &BaseMembers::default(), true).unwrap_err();
        assert!(matches!(
            err,
            BuildError::DuplicateEnumName { ref name, .. } if name == "Red"
        ));
    }

    #[test]
    fn test_interface_model_has_no_constructors() {
        let iface = TypeRecord::new("IShape", Some("Shapes"), TypeCategory::Interface)
            .member(MemberKind::Property, "Area")
            .member(MemberKind::Method, "Scale");
        let model = build_type_model(&iface, &BaseMembers::default(), true).unwrap();
        let TypeModel::Interface(model) = model else {
            panic!("expected interface model");
        };
        assert_eq!(model.properties.len(), 1);
        assert_eq!(model.methods.len(), 1);
    }

    #[test]
    fn test_handler_overrides_default_population() {
        let widget = TypeRecord::new("Widget", Some("A"), TypeCategory::Class)
            .member(MemberKind::Method, "Spin")
            .member(MemberKind::Method, "Stop");
        let handlers = MemberHandlers::new().on_methods(|model, methods| {
            if let Some(slot) = model.methods_mut() {
                slot.extend(methods.into_iter().filter(|m| m.name != "Stop"));
            }
        });

        let model = build_type_model_with(
            TypeKind::Class,
            &widget,
            &BaseMembers::default(),
            true,
            &handlers,
        )
        .unwrap();
        let TypeModel::Class(model) = model else {
            panic!("expected class model");
        };
        let names: Vec<_> = model.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Spin"]);
    }

    #[test]
    fn test_forced_kind_drops_categories_without_slot() {
        let widget = TypeRecord::new("Widget", Some("A"), TypeCategory::Class)
            .member(MemberKind::Constructor, ".ctor")
            .member(MemberKind::Field, "count")
            .member(MemberKind::Method, "Spin");
        let model = build_type_model_with(
            TypeKind::Interface,
            &widget,
            &BaseMembers::default(),
            true,
            &MemberHandlers::default(),
        )
        .unwrap();
        assert_eq!(model.kind(), TypeKind::Interface);
        assert_eq!(model.member_count(), 1);
    }
}

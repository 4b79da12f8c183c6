//! Lower a [`ClassSchema`] into a [`GeneratedUnit`].
//!
//! Lowering is a pure function of the schema. It decides the shape of the generated class: the store handle, one
//! key constant per property plus the store-file key, a reader per property, a setter per writable property (in the
//! trait impl if the trait declares a writer, inherent otherwise), the `put_value` dispatch and the reset hooks.
//!
//! Double properties are read-only: the store can read them but `put_value` has no arm to write them, so they get no
//! inherent setter, and a trait that declares a writer for one cannot be implemented.

use prefsgen_core::ScalarType;
use prefsgen_core::naming;

use super::{
    DispatchArm, EmitError, GeneratedClass, GeneratedUnit, IrStmt, KeyConstant, Method, Param, ParamType, ReturnType,
    SelfParam, StoreHandle,
};
use crate::schema::{ClassSchema, PropertyDescriptor, ScalarLiteral};

/// Name of the generic dispatch routine on every generated class.
pub const PUT_VALUE: &str = "put_value";

/// Writer arms of the dispatch routine, in match order.
const WRITABLE: [ScalarType; 5] = [
    ScalarType::Int,
    ScalarType::Bool,
    ScalarType::String,
    ScalarType::Long,
    ScalarType::Float,
];

/// Build the generated class for one schema.
///
/// ## Errors
/// - [`EmitError::UnsupportedType`] if the trait declares a writer for a type the store cannot write (Double).
/// - [`EmitError::InvalidLiteral`] if a default cannot be turned into a literal of its type.
#[tracing::instrument(skip_all, fields(class = %schema.class_name))]
pub fn emit_schema(schema: &ClassSchema) -> Result<GeneratedUnit, EmitError> {
    let store_key_const = schema.store_key_const();
    let store = if schema.options.use_injected_store {
        StoreHandle::Injected {
            key_const: store_key_const.clone(),
        }
    } else {
        StoreHandle::Context {
            key_const: store_key_const.clone(),
        }
    };

    let mut constants = vec![KeyConstant {
        name: store_key_const,
        value: schema.qualified_store_key(),
        public: !schema.options.private_store_key,
    }];
    constants.extend(schema.properties.iter().map(|property| KeyConstant {
        name: property.key_const(),
        value: schema.qualified_key(property),
        public: !schema.options.private_property_keys,
    }));

    let mut inherent = vec![constructor(&store), dispatch()];
    let mut trait_methods = Vec::new();
    for property in &schema.properties {
        trait_methods.push(reader(schema, property)?);
        match &property.writer {
            Some(_) if !property.ty.has_writer() => {
                return Err(EmitError::UnsupportedType {
                    class: schema.class_name.clone(),
                    property: property.name.clone(),
                    ty: property.ty,
                });
            }
            Some(writer) => trait_methods.push(setter(property, writer, false)),
            None if property.ty.has_writer() => {
                inherent.push(setter(property, &format!("set_{}", snake_name(&property.name)), true));
            }
            None => tracing::debug!(property = %property.name, ty = %property.ty, "read-only property"),
        }
    }
    for reset in &schema.reset_methods {
        trait_methods.push(reset_method(schema, &reset.name));
    }

    tracing::debug!(
        constants = constants.len(),
        inherent = inherent.len(),
        trait_methods = trait_methods.len(),
        "class lowered"
    );
    Ok(GeneratedUnit {
        file_name: naming::output_file_name(&schema.class_name),
        class: GeneratedClass {
            name: schema.implementation_name(),
            trait_name: schema.class_name.clone(),
            store,
            constants,
            inherent,
            trait_methods,
        },
    })
}

fn constructor(store: &StoreHandle) -> Method {
    let (params, returns) = match store {
        StoreHandle::Context { .. } => (
            vec![Param {
                name: "context".to_string(),
                ty: ParamType::StoreContext,
            }],
            ReturnType::SelfValue,
        ),
        StoreHandle::Injected { .. } => (Vec::new(), ReturnType::SelfOrInjectError),
    };
    Method {
        name: "new".to_string(),
        public: true,
        receiver: SelfParam::None,
        params,
        returns,
        body: vec![IrStmt::Construct(store.clone())],
    }
}

fn dispatch() -> Method {
    let mut arms = vec![DispatchArm::Absent];
    arms.extend(WRITABLE.into_iter().map(DispatchArm::Write));
    Method {
        name: PUT_VALUE.to_string(),
        public: true,
        receiver: SelfParam::RefMut,
        params: vec![
            Param {
                name: "key".to_string(),
                ty: ParamType::Key,
            },
            Param {
                name: "value".to_string(),
                ty: ParamType::Value,
            },
        ],
        returns: ReturnType::Unit,
        body: vec![IrStmt::Dispatch { arms }, IrStmt::Commit],
    }
}

fn reader(schema: &ClassSchema, property: &PropertyDescriptor) -> Result<Method, EmitError> {
    let fallback = match &property.default_value {
        Some(value) => ScalarLiteral::parse(property.ty, value).ok_or_else(|| EmitError::InvalidLiteral {
            class: schema.class_name.clone(),
            property: property.name.clone(),
            ty: property.ty,
            value: value.clone(),
        })?,
        None => ScalarLiteral::fallback(property.ty),
    };
    Ok(Method {
        name: property.reader.clone(),
        public: false,
        receiver: SelfParam::Ref,
        params: Vec::new(),
        returns: ReturnType::Scalar(property.ty),
        body: vec![IrStmt::Read {
            key_const: property.key_const(),
            ty: property.ty,
            fallback,
        }],
    })
}

fn setter(property: &PropertyDescriptor, name: &str, public: bool) -> Method {
    Method {
        name: name.to_string(),
        public,
        receiver: SelfParam::RefMut,
        params: vec![Param {
            name: "value".to_string(),
            ty: ParamType::Scalar(property.ty),
        }],
        returns: ReturnType::Unit,
        body: vec![IrStmt::Write {
            key_const: property.key_const(),
            ty: property.ty,
            param: "value".to_string(),
        }],
    }
}

fn reset_method(schema: &ClassSchema, name: &str) -> Method {
    let mut body: Vec<IrStmt> = schema
        .reset_targets()
        .map(|property| IrStmt::Remove {
            key_const: property.key_const(),
        })
        .collect();
    body.push(IrStmt::Commit);
    Method {
        name: name.to_string(),
        public: false,
        receiver: SelfParam::RefMut,
        params: Vec::new(),
        returns: ReturnType::Unit,
        body,
    }
}

/// `unitId` → `unit_id`; snake_case names are kept.
fn snake_name(name: &str) -> String {
    naming::to_storage_token(name).to_lowercase()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::schema::{GeneratorOptions, ResetMethodDescriptor};

    fn schema(properties: Vec<PropertyDescriptor>, resets: &[&str]) -> ClassSchema {
        ClassSchema {
            class_name: "AppSettings".to_string(),
            package_name: "com.example".to_string(),
            properties,
            reset_methods: resets
                .iter()
                .map(|name| ResetMethodDescriptor { name: name.to_string() })
                .collect(),
            options: GeneratorOptions::default(),
        }
    }

    fn with_default(mut property: PropertyDescriptor, value: &str) -> PropertyDescriptor {
        property.default_value = Some(value.to_string());
        property
    }

    #[test]
    fn readers_use_defaults_or_zero_values() {
        let schema = schema(
            vec![
                with_default(PropertyDescriptor::new("unit_id", ScalarType::String), "unit102"),
                PropertyDescriptor::new("key", ScalarType::String),
                with_default(PropertyDescriptor::new("extra_in", ScalarType::Int), "20"),
                PropertyDescriptor::new("enabled", ScalarType::Bool),
            ],
            &[],
        );
        let unit = emit_schema(&schema).unwrap();
        let fallback = |name: &str| match &unit.class.trait_method(name).unwrap().body[0] {
            IrStmt::Read { fallback, .. } => fallback.clone(),
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(fallback("unit_id"), ScalarLiteral::String("unit102".to_string()));
        assert_eq!(fallback("key"), ScalarLiteral::String(String::new()));
        assert_eq!(fallback("extra_in"), ScalarLiteral::Int(20));
        assert_eq!(fallback("enabled"), ScalarLiteral::Bool(false));
    }

    #[test]
    fn setters_are_inherent_unless_the_trait_declares_a_writer() {
        let mut declared = PropertyDescriptor::new("count", ScalarType::Int);
        declared.writer = Some("set_count".to_string());
        let schema = schema(vec![declared, PropertyDescriptor::new("wifiPassword", ScalarType::String)], &[]);
        let unit = emit_schema(&schema).unwrap();

        let trait_setter = unit.class.trait_method("set_count").unwrap();
        assert!(!trait_setter.public);
        let inherent_setter = unit.class.inherent_method("set_wifi_password").unwrap();
        assert!(inherent_setter.public);
        assert_eq!(
            inherent_setter.body,
            vec![IrStmt::Write {
                key_const: "KEY_WIFI_PASSWORD".to_string(),
                ty: ScalarType::String,
                param: "value".to_string(),
            }]
        );
    }

    #[test]
    fn dispatch_covers_absent_and_five_writers_then_commits_once() {
        let unit = emit_schema(&schema(vec![PropertyDescriptor::new("count", ScalarType::Int)], &[])).unwrap();
        let put_value = unit.class.inherent_method(PUT_VALUE).unwrap();
        assert_eq!(
            put_value.body,
            vec![
                IrStmt::Dispatch {
                    arms: vec![
                        DispatchArm::Absent,
                        DispatchArm::Write(ScalarType::Int),
                        DispatchArm::Write(ScalarType::Bool),
                        DispatchArm::Write(ScalarType::String),
                        DispatchArm::Write(ScalarType::Long),
                        DispatchArm::Write(ScalarType::Float),
                    ]
                },
                IrStmt::Commit,
            ]
        );
    }

    #[test]
    fn reset_removes_non_retained_keys_in_order() {
        let mut retained = PropertyDescriptor::new("wifiPassword", ScalarType::String);
        retained.retained = true;
        let schema = schema(
            vec![
                PropertyDescriptor::new("unitId", ScalarType::String),
                retained,
                PropertyDescriptor::new("someInt", ScalarType::Int),
            ],
            &["reset"],
        );
        let unit = emit_schema(&schema).unwrap();
        assert_eq!(
            unit.class.trait_method("reset").unwrap().body,
            vec![
                IrStmt::Remove {
                    key_const: "KEY_UNIT_ID".to_string()
                },
                IrStmt::Remove {
                    key_const: "KEY_SOME_INT".to_string()
                },
                IrStmt::Commit,
            ]
        );
    }

    #[test]
    fn reset_with_everything_retained_still_commits() {
        let mut retained = PropertyDescriptor::new("count", ScalarType::Int);
        retained.retained = true;
        let unit = emit_schema(&schema(vec![retained], &["reset"])).unwrap();
        assert_eq!(unit.class.trait_method("reset").unwrap().body, vec![IrStmt::Commit]);
    }

    #[test]
    fn no_reset_hooks_means_no_reset_methods() {
        let mut retained = PropertyDescriptor::new("wifiPassword", ScalarType::String);
        retained.retained = true;
        let unit = emit_schema(&schema(vec![retained], &[])).unwrap();
        assert_eq!(unit.class.trait_methods.len(), 1);
    }

    #[test]
    fn double_properties_are_read_only() {
        let unit = emit_schema(&schema(
            vec![
                PropertyDescriptor::new("ratio", ScalarType::Double),
                PropertyDescriptor::new("count", ScalarType::Int),
            ],
            &["reset"],
        ))
        .unwrap();

        assert_eq!(
            unit.class.trait_method("ratio").unwrap().body,
            vec![IrStmt::Read {
                key_const: "KEY_RATIO".to_string(),
                ty: ScalarType::Double,
                fallback: ScalarLiteral::Double(-1.0),
            }]
        );
        assert!(unit.class.inherent_method("set_ratio").is_none());
        assert!(unit.class.inherent_method("set_count").is_some());
        assert_eq!(
            unit.class.trait_method("reset").unwrap().body[0],
            IrStmt::Remove {
                key_const: "KEY_RATIO".to_string()
            }
        );
    }

    #[test]
    fn declared_double_writer_is_unsupported() {
        let mut ratio = PropertyDescriptor::new("ratio", ScalarType::Double);
        ratio.writer = Some("set_ratio".to_string());
        let err = emit_schema(&schema(vec![ratio], &[])).unwrap_err();
        assert_eq!(
            err,
            EmitError::UnsupportedType {
                class: "AppSettings".to_string(),
                property: "ratio".to_string(),
                ty: ScalarType::Double,
            }
        );
    }

    #[test]
    fn constant_visibility_follows_options() {
        let mut schema = schema(vec![PropertyDescriptor::new("count", ScalarType::Int)], &[]);
        let unit = emit_schema(&schema).unwrap();
        assert!(unit.class.constant("KEY_APP_SETTINGS_PREFS").unwrap().public);
        assert!(!unit.class.constant("KEY_COUNT").unwrap().public);

        schema.options.private_property_keys = false;
        schema.options.private_store_key = true;
        let unit = emit_schema(&schema).unwrap();
        assert!(!unit.class.constant("KEY_APP_SETTINGS_PREFS").unwrap().public);
        let count = unit.class.constant("KEY_COUNT").unwrap();
        assert!(count.public);
        assert_eq!(count.value, "com.example.AppSettings.COUNT");
    }

    #[test]
    fn store_handle_follows_injection_option() {
        let mut schema = schema(Vec::new(), &[]);
        let unit = emit_schema(&schema).unwrap();
        let new = unit.class.inherent_method("new").unwrap();
        assert_eq!(new.params.len(), 1);
        assert_eq!(new.returns, ReturnType::SelfValue);

        schema.options.use_injected_store = true;
        let unit = emit_schema(&schema).unwrap();
        let new = unit.class.inherent_method("new").unwrap();
        assert!(new.params.is_empty());
        assert_eq!(new.returns, ReturnType::SelfOrInjectError);
        assert_eq!(unit.class.store.key_const(), "KEY_APP_SETTINGS_PREFS");
    }

    #[test]
    fn names_come_from_the_declaration() {
        let unit = emit_schema(&schema(Vec::new(), &[])).unwrap();
        assert_eq!(unit.file_name, "app_settings_prefs.rs");
        assert_eq!(unit.class.name, "AppSettingsPrefs");
        assert_eq!(unit.class.trait_name, "AppSettings");
    }
}

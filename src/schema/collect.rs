//! Schema collector: turn one [`Declaration`] into an immutable [`ClassSchema`].
//!
//! ## Member roles
//!
//! | Role | Shape |
//! |---|---|
//! | reader | required, takes `&self`, no parameters, returns a scalar |
//! | writer | required, takes `&mut self` and one parameter of the property type, returns nothing, named `set_x`/`setX` |
//! | reset hook | carries `#[on_reset]`, takes `&mut self`, no parameters, returns nothing |
//!
//! Anything else is left alone. A required member with no role is reported, since the generated impl cannot provide
//! it.
//!
//! ## Notes
//! - Markers are matched to properties by storage token, so a marker on `get_unit_id`, `unit_id` or `set_unit_id`
//!   all land on the `unit_id` property.
//! - A default, test value or retention marker whose target is not a property is dropped with a warning.

use std::collections::HashMap;

use prefsgen_core::markers::Marker;
use prefsgen_core::naming::to_storage_token;

use super::decl::{Declaration, MemberDecl, Receiver};
use super::resolve::{self, ResolveError};
use super::{ClassSchema, GeneratorOptions, PropertyDescriptor, ResetMethodDescriptor, ScalarLiteral, SchemaError};
use crate::diagnostics::{Diagnostics, WarningKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Reader,
    Writer,
    Reset,
    Other,
}

/// Collect the schema of one declaration.
///
/// ## Parameters
/// - `declaration`: the declaration tuple produced by a frontend.
/// - `diagnostics`: sink for non-fatal warnings.
///
/// ## Errors
/// - [`SchemaError::UnsupportedType`] when a reader returns something other than a supported scalar.
/// - [`SchemaError::DuplicateProperty`] when two readers name the same property.
/// - [`SchemaError::InvalidMember`] when a reader, writer or reset hook has the wrong shape.
/// - [`SchemaError::InvalidDefault`] when a default literal does not parse as its property's type.
#[tracing::instrument(skip_all, fields(class = %declaration.name))]
pub fn collect(declaration: &Declaration, diagnostics: &mut Diagnostics) -> Result<ClassSchema, SchemaError> {
    let class = declaration.name.as_str();
    let options = GeneratorOptions::resolve(&declaration.marker);
    let members = &declaration.members;

    let mut collector = Collector {
        class,
        properties: Vec::new(),
        by_token: HashMap::new(),
    };
    let mut roles = vec![Role::Other; members.len()];

    for (role, member) in roles.iter_mut().zip(members) {
        if !is_reset_hook(member) && is_accessor_shaped(member) {
            collector.add_reader(member)?;
            *role = Role::Reader;
        }
    }

    let mut reset_methods = Vec::new();
    for (role, member) in roles.iter_mut().zip(members) {
        if is_reset_hook(member) {
            validate_reset(class, member)?;
            reset_methods.push(ResetMethodDescriptor {
                name: member.name.clone(),
            });
            *role = Role::Reset;
        }
    }
    if reset_methods.len() > 1 {
        let names: Vec<&str> = reset_methods.iter().map(|r| r.name.as_str()).collect();
        diagnostics.warn(
            WarningKind::DuplicateReset,
            class,
            format!("{} reset hooks declared ({}); all of them are generated", names.len(), names.join(", ")),
        );
    }

    for (role, member) in roles.iter_mut().zip(members) {
        if *role == Role::Other && collector.attach_writer(member)? {
            *role = Role::Writer;
        }
    }

    for (role, member) in roles.iter().zip(members) {
        if *role == Role::Other && !member.provided {
            diagnostics.warn(
                WarningKind::UnimplementedMember,
                class,
                format!(
                    "`{}` is not a property reader, writer or reset hook; the generated implementation does not provide it",
                    member.name
                ),
            );
        }
    }

    for (role, member) in roles.iter().zip(members) {
        collector.apply_markers(member, *role, diagnostics);
    }

    for property in &collector.properties {
        let Some(value) = &property.default_value else {
            continue;
        };
        if ScalarLiteral::parse(property.ty, value).is_none() {
            return Err(SchemaError::InvalidDefault {
                class: class.to_string(),
                property: property.name.clone(),
                ty: property.ty.to_string(),
                value: value.clone(),
            });
        }
    }

    let schema = ClassSchema {
        class_name: declaration.name.clone(),
        package_name: declaration.package.clone(),
        properties: collector.properties,
        reset_methods,
        options,
    };
    if options.show_traces {
        trace_schema(&schema, diagnostics);
    }
    tracing::debug!(
        properties = schema.properties.len(),
        resets = schema.reset_methods.len(),
        "schema collected"
    );
    Ok(schema)
}

struct Collector<'a> {
    class: &'a str,
    properties: Vec<PropertyDescriptor>,
    by_token: HashMap<String, usize>,
}

impl Collector<'_> {
    fn add_reader(&mut self, member: &MemberDecl) -> Result<(), SchemaError> {
        let name = resolve::property_name(&member.name);
        if member.signature.receiver != Receiver::Ref {
            return Err(self.invalid(
                member,
                format!(
                    "property readers must take `&self`, found {}",
                    member.signature.receiver.describe()
                ),
            ));
        }
        let ty = resolve::resolve_type(member.signature.return_type.as_deref()).map_err(|err| {
            let ty = match err {
                ResolveError::Unsupported(ty) => ty,
                ResolveError::Void => "()".to_string(),
            };
            SchemaError::UnsupportedType {
                class: self.class.to_string(),
                property: name.clone(),
                ty,
            }
        })?;

        let token = to_storage_token(&name);
        if self.by_token.contains_key(&token) {
            return Err(SchemaError::DuplicateProperty {
                class: self.class.to_string(),
                property: name,
            });
        }
        self.by_token.insert(token, self.properties.len());
        let mut property = PropertyDescriptor::new(name, ty);
        property.reader = member.name.clone();
        self.properties.push(property);
        Ok(())
    }

    /// Attach `member` as a writer if it is spelled like one for an existing property.
    ///
    /// ## Returns
    /// - `Ok(false)` if the member is not a writer candidate.
    fn attach_writer(&mut self, member: &MemberDecl) -> Result<bool, SchemaError> {
        let signature = &member.signature;
        if member.provided || !resolve::is_void(signature.return_type.as_deref()) || signature.params.len() != 1 {
            return Ok(false);
        }
        let Some(target) = resolve::writer_property_name(&member.name) else {
            return Ok(false);
        };
        let Some(&index) = self.by_token.get(&to_storage_token(&target)) else {
            return Ok(false);
        };

        if signature.receiver != Receiver::RefMut {
            return Err(self.invalid(
                member,
                format!("property writers must take `&mut self`, found {}", signature.receiver.describe()),
            ));
        }
        let property = &self.properties[index];
        let param = &signature.params[0];
        if resolve::resolve_type(Some(&param.ty)) != Ok(property.ty) {
            let reason = format!(
                "writer parameter `{}: {}` does not match property `{}` of type {}",
                param.name, param.ty, property.name, property.ty
            );
            return Err(self.invalid(member, reason));
        }
        if let Some(existing) = &property.writer {
            let reason = format!("property `{}` already has writer `{existing}`", property.name);
            return Err(self.invalid(member, reason));
        }
        self.properties[index].writer = Some(member.name.clone());
        Ok(true)
    }

    fn apply_markers(&mut self, member: &MemberDecl, role: Role, diagnostics: &mut Diagnostics) {
        let target = match role {
            Role::Writer => resolve::writer_property_name(&member.name).unwrap_or_else(|| member.name.clone()),
            _ => resolve::property_name(&member.name),
        };
        let index = self.by_token.get(&to_storage_token(&target)).copied();

        for marker in &member.markers {
            if let Some(value) = marker.default_value() {
                match index {
                    Some(i) => self.properties[i].default_value = Some(value.to_string()),
                    None => diagnostics.warn(
                        WarningKind::AmbiguousDefault,
                        self.class,
                        format!("default {value:?} on `{}` targets `{target}`, which is not a property; dropped", member.name),
                    ),
                }
            }
            if let Some(value) = marker.test_value() {
                match index {
                    Some(i) => self.properties[i].test_value = Some(value.to_string()),
                    None => diagnostics.warn(
                        WarningKind::AmbiguousTestValue,
                        self.class,
                        format!("test value {value:?} on `{}` targets `{target}`, which is not a property; dropped", member.name),
                    ),
                }
            }
            if *marker == Marker::Retain {
                match index {
                    Some(i) => self.properties[i].retained = true,
                    None => diagnostics.warn(
                        WarningKind::AmbiguousRetain,
                        self.class,
                        format!("`retain` on `{}` targets `{target}`, which is not a property; dropped", member.name),
                    ),
                }
            }
        }
    }

    fn invalid(&self, member: &MemberDecl, reason: String) -> SchemaError {
        SchemaError::InvalidMember {
            class: self.class.to_string(),
            member: member.name.clone(),
            reason,
        }
    }
}

fn is_reset_hook(member: &MemberDecl) -> bool {
    member.has_marker(|m| *m == Marker::OnReset)
}

fn is_accessor_shaped(member: &MemberDecl) -> bool {
    let signature = &member.signature;
    !member.provided
        && signature.receiver != Receiver::None
        && signature.params.is_empty()
        && !resolve::is_void(signature.return_type.as_deref())
}

fn validate_reset(class: &str, member: &MemberDecl) -> Result<(), SchemaError> {
    let signature = &member.signature;
    let reason = if !signature.params.is_empty() {
        "reset hooks take no parameters".to_string()
    } else if !resolve::is_void(signature.return_type.as_deref()) {
        "reset hooks return nothing".to_string()
    } else if signature.receiver != Receiver::RefMut {
        format!("reset hooks must take `&mut self`, found {}", signature.receiver.describe())
    } else {
        return Ok(());
    };
    Err(SchemaError::InvalidMember {
        class: class.to_string(),
        member: member.name.clone(),
        reason,
    })
}

fn trace_schema(schema: &ClassSchema, diagnostics: &mut Diagnostics) {
    let class = schema.class_name.as_str();
    for property in &schema.properties {
        diagnostics.warn(
            WarningKind::Trace,
            class,
            format!("var: {}, type: {}", property.name, property.ty),
        );
    }
    for property in &schema.properties {
        if let Some(default) = &property.default_value {
            diagnostics.warn(
                WarningKind::Trace,
                class,
                format!("default: {} = {default:?}", property.name),
            );
        }
    }
    let resets: Vec<&str> = schema.reset_methods.iter().map(|r| r.name.as_str()).collect();
    diagnostics.warn(WarningKind::Trace, class, format!("reset methods: [{}]", resets.join(", ")));
    let retained: Vec<&str> = schema
        .properties
        .iter()
        .filter(|p| p.retained)
        .map(|p| p.name.as_str())
        .collect();
    diagnostics.warn(WarningKind::Trace, class, format!("retained: [{}]", retained.join(", ")));
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::schema::decl::ParamSig;
    use prefsgen_core::ScalarType;

    fn default(value: &str) -> Marker {
        Marker::Default {
            value: value.to_string(),
        }
    }

    fn app_settings() -> Declaration {
        Declaration::new("AppSettings", "com.example")
            .with_member(MemberDecl::reader("unit_id", "String").with_marker(default("unit102")))
            .with_member(MemberDecl::reader("key", "String"))
            .with_member(MemberDecl::reader("extra_in", "i32").with_marker(default("20")))
            .with_member(MemberDecl::action("reset").with_marker(Marker::OnReset))
    }

    #[test]
    fn collects_app_settings() {
        let mut diagnostics = Diagnostics::new();
        let schema = collect(&app_settings(), &mut diagnostics).unwrap();

        let names: Vec<&str> = schema.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["unit_id", "key", "extra_in"]);
        assert_eq!(schema.property("unit_id").unwrap().default_value.as_deref(), Some("unit102"));
        assert_eq!(schema.property("extra_in").unwrap().ty, ScalarType::Int);
        assert_eq!(schema.property("key").unwrap().default_value, None);
        assert_eq!(
            schema.reset_methods,
            vec![ResetMethodDescriptor {
                name: "reset".to_string()
            }]
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn getter_prefix_is_stripped_from_property_names() {
        let declaration = Declaration::new("S", "p").with_member(MemberDecl::reader("getWifiPassword", "String"));
        let schema = collect(&declaration, &mut Diagnostics::new()).unwrap();
        let property = &schema.properties[0];
        assert_eq!(property.name, "wifiPassword");
        assert_eq!(property.reader, "getWifiPassword");
        assert_eq!(property.key_const(), "KEY_WIFI_PASSWORD");
    }

    #[test]
    fn unsupported_type_fails_the_declaration() {
        let declaration = Declaration::new("S", "p").with_member(MemberDecl::reader("items", "Vec<String>"));
        let err = collect(&declaration, &mut Diagnostics::new()).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnsupportedType {
                class: "S".to_string(),
                property: "items".to_string(),
                ty: "Vec<String>".to_string(),
            }
        );
    }

    #[test]
    fn duplicate_spellings_of_one_property_are_rejected() {
        let declaration = Declaration::new("S", "p")
            .with_member(MemberDecl::reader("unit_id", "String"))
            .with_member(MemberDecl::reader("getUnitId", "String"));
        let err = collect(&declaration, &mut Diagnostics::new()).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateProperty { .. }));
    }

    #[test]
    fn sentinel_default_is_treated_as_absent() {
        let declaration =
            Declaration::new("S", "p").with_member(MemberDecl::reader("count", "i32").with_marker(default("[null]")));
        let schema = collect(&declaration, &mut Diagnostics::new()).unwrap();
        assert_eq!(schema.properties[0].default_value, None);
    }

    #[test]
    fn pref_marker_sets_default_and_test_value() {
        let marker = Marker::Pref {
            default_value: "true".to_string(),
            test_value: "false".to_string(),
        };
        let declaration = Declaration::new("S", "p").with_member(MemberDecl::reader("enabled", "bool").with_marker(marker));
        let schema = collect(&declaration, &mut Diagnostics::new()).unwrap();
        assert_eq!(schema.properties[0].default_value.as_deref(), Some("true"));
        assert_eq!(schema.properties[0].test_value.as_deref(), Some("false"));
    }

    #[test]
    fn invalid_default_literal_is_an_error() {
        let declaration =
            Declaration::new("S", "p").with_member(MemberDecl::reader("count", "i32").with_marker(default("many")));
        let err = collect(&declaration, &mut Diagnostics::new()).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidDefault { ref value, .. } if value == "many"));
    }

    #[test]
    fn markers_on_writers_target_their_property() {
        let declaration = Declaration::new("S", "p")
            .with_member(MemberDecl::reader("unit_id", "String"))
            .with_member(
                MemberDecl::writer("set_unit_id", "String")
                    .with_marker(default("u1"))
                    .with_marker(Marker::Retain),
            );
        let mut diagnostics = Diagnostics::new();
        let schema = collect(&declaration, &mut diagnostics).unwrap();
        let property = &schema.properties[0];
        assert_eq!(property.writer.as_deref(), Some("set_unit_id"));
        assert_eq!(property.default_value.as_deref(), Some("u1"));
        assert!(property.retained);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn camel_case_writer_matches_snake_case_reader() {
        let declaration = Declaration::new("S", "p")
            .with_member(MemberDecl::reader("unit_id", "String"))
            .with_member(MemberDecl::writer("setUnitId", "String"));
        let schema = collect(&declaration, &mut Diagnostics::new()).unwrap();
        assert_eq!(schema.properties[0].writer.as_deref(), Some("setUnitId"));
    }

    #[test]
    fn writer_with_wrong_parameter_type_is_rejected() {
        let declaration = Declaration::new("S", "p")
            .with_member(MemberDecl::reader("count", "i32"))
            .with_member(MemberDecl::writer("set_count", "String"));
        let err = collect(&declaration, &mut Diagnostics::new()).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidMember { ref member, .. } if member == "set_count"));
    }

    #[test]
    fn reader_must_borrow_self() {
        let declaration = Declaration::new("S", "p")
            .with_member(MemberDecl::reader("count", "i32").with_receiver(Receiver::RefMut));
        let err = collect(&declaration, &mut Diagnostics::new()).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidMember { .. }));
    }

    #[test]
    fn reset_hook_shape_is_validated() {
        let declaration = Declaration::new("S", "p")
            .with_member(MemberDecl::reader("clear", "bool").with_marker(Marker::OnReset));
        let err = collect(&declaration, &mut Diagnostics::new()).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidMember { ref reason, .. } if reason.contains("return nothing")));

        let declaration = Declaration::new("S", "p")
            .with_member(MemberDecl::action("clear").with_marker(Marker::OnReset).with_receiver(Receiver::Ref));
        assert!(collect(&declaration, &mut Diagnostics::new()).is_err());
    }

    #[test]
    fn ambiguous_markers_are_dropped_with_warnings() {
        let declaration = Declaration::new("S", "p")
            .with_member(MemberDecl::reader("count", "i32"))
            .with_member(
                MemberDecl::action("refresh")
                    .with_marker(default("1"))
                    .with_marker(Marker::Pref {
                        default_value: "[null]".to_string(),
                        test_value: "2".to_string(),
                    })
                    .with_marker(Marker::Retain),
            );
        let mut diagnostics = Diagnostics::new();
        let schema = collect(&declaration, &mut diagnostics).unwrap();

        assert_eq!(schema.properties[0].default_value, None);
        assert!(!schema.properties[0].retained);
        assert_eq!(diagnostics.of_kind(WarningKind::AmbiguousDefault).count(), 1);
        assert_eq!(diagnostics.of_kind(WarningKind::AmbiguousTestValue).count(), 1);
        assert_eq!(diagnostics.of_kind(WarningKind::AmbiguousRetain).count(), 1);
        assert_eq!(diagnostics.of_kind(WarningKind::UnimplementedMember).count(), 1);
    }

    #[test]
    fn multiple_reset_hooks_are_kept_with_a_warning() {
        let declaration = Declaration::new("S", "p")
            .with_member(MemberDecl::reader("count", "i32"))
            .with_member(MemberDecl::action("reset").with_marker(Marker::OnReset))
            .with_member(MemberDecl::action("clear_all").with_marker(Marker::OnReset));
        let mut diagnostics = Diagnostics::new();
        let schema = collect(&declaration, &mut diagnostics).unwrap();
        assert_eq!(schema.reset_methods.len(), 2);
        assert_eq!(diagnostics.of_kind(WarningKind::DuplicateReset).count(), 1);
    }

    #[test]
    fn provided_members_are_left_alone() {
        let mut helper = MemberDecl::reader("describe", "String");
        helper.provided = true;
        let mut params_helper = MemberDecl::action("log");
        params_helper.signature.params.push(ParamSig {
            name: "line".to_string(),
            ty: "String".to_string(),
        });
        params_helper.provided = true;
        let declaration = Declaration::new("S", "p")
            .with_member(MemberDecl::reader("count", "i32"))
            .with_member(helper)
            .with_member(params_helper);
        let mut diagnostics = Diagnostics::new();
        let schema = collect(&declaration, &mut diagnostics).unwrap();
        assert_eq!(schema.properties.len(), 1);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn traces_are_warnings_when_enabled() {
        let mut declaration = app_settings();
        declaration.marker.show_traces = Some(true);
        let mut diagnostics = Diagnostics::new();
        collect(&declaration, &mut diagnostics).unwrap();

        let traces: Vec<&str> = diagnostics
            .of_kind(WarningKind::Trace)
            .map(|w| w.message.as_str())
            .collect();
        assert_eq!(
            traces,
            vec![
                "var: unit_id, type: String",
                "var: key, type: String",
                "var: extra_in, type: Int",
                "default: unit_id = \"unit102\"",
                "default: extra_in = \"20\"",
                "reset methods: [reset]",
                "retained: []",
            ]
        );
    }

    #[test]
    fn options_do_not_leak_between_declarations() {
        let mut first = app_settings();
        first.marker.use_injected_store = Some(true);
        let second = Declaration::new("Other", "p").with_member(MemberDecl::reader("count", "i32"));

        let mut diagnostics = Diagnostics::new();
        assert!(collect(&first, &mut diagnostics).unwrap().options.use_injected_store);
        assert!(!collect(&second, &mut diagnostics).unwrap().options.use_injected_store);
    }
}

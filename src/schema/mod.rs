//! Settings schema: the resolved, immutable description of one declaration.
//!
//! ## Pipeline
//!
//! ```text
//! Declaration tuples → collect (→ resolve per member) → ClassSchema → backend
//! ```
//!
//! ## Modules
//!
//! - `decl` - Declaration tuples produced by frontends
//! - `resolve` - Type and property-name resolution for one member
//! - `literal` - Typed default literals and getter fallbacks
//! - `collect` - The schema collector
//! - `errors` - `SchemaError`

pub mod collect;
pub mod decl;
pub mod errors;
pub mod literal;
pub mod resolve;

use std::fmt;

use prefsgen_core::ScalarType;
use prefsgen_core::markers::SchemaMarker;
use prefsgen_core::naming;

pub use collect::collect;
pub use decl::{AccessorSignature, Declaration, MemberDecl, ParamSig, Receiver};
pub use errors::SchemaError;
pub use literal::ScalarLiteral;

/// Options resolved from a declaration marker. Resolved fresh for every declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub private_property_keys: bool,
    pub private_store_key: bool,
    pub use_injected_store: bool,
    pub show_traces: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            private_property_keys: true,
            private_store_key: false,
            use_injected_store: false,
            show_traces: false,
        }
    }
}

impl GeneratorOptions {
    /// Apply the switches spelled out in `marker` over the defaults.
    pub fn resolve(marker: &SchemaMarker) -> Self {
        let defaults = Self::default();
        Self {
            private_property_keys: marker.private_property_keys.unwrap_or(defaults.private_property_keys),
            private_store_key: marker.private_store_key.unwrap_or(defaults.private_store_key),
            use_injected_store: marker.use_injected_store.unwrap_or(defaults.use_injected_store),
            show_traces: marker.show_traces.unwrap_or(defaults.show_traces),
        }
    }
}

/// One resolved property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub ty: ScalarType,
    /// Validated against `ty` at collection time.
    pub default_value: Option<String>,
    /// Carried through for downstream consumers; never interpreted.
    pub test_value: Option<String>,
    pub retained: bool,
    /// Trait method that reads the property.
    pub reader: String,
    /// Trait method that writes the property, if the trait declares one.
    pub writer: Option<String>,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>, ty: ScalarType) -> Self {
        let name = name.into();
        Self {
            reader: name.clone(),
            name,
            ty,
            default_value: None,
            test_value: None,
            retained: false,
            writer: None,
        }
    }

    /// Storage token shared by every spelling of this property.
    pub fn token(&self) -> String {
        naming::to_storage_token(&self.name)
    }

    /// Name of the generated key constant.
    pub fn key_const(&self) -> String {
        naming::property_key_const(&self.name)
    }
}

/// A reset hook declared on the settings trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetMethodDescriptor {
    pub name: String,
}

/// Resolved description of one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSchema {
    pub class_name: String,
    pub package_name: String,
    /// Unique by name, in declaration order.
    pub properties: Vec<PropertyDescriptor>,
    pub reset_methods: Vec<ResetMethodDescriptor>,
    pub options: GeneratorOptions,
}

impl ClassSchema {
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Fully-qualified storage key of a property.
    pub fn qualified_key(&self, property: &PropertyDescriptor) -> String {
        naming::qualified_key(&self.package_name, &self.class_name, &property.name)
    }

    pub fn store_key_const(&self) -> String {
        naming::store_key_const(&self.class_name)
    }

    pub fn qualified_store_key(&self) -> String {
        naming::qualified_store_key(&self.package_name, &self.class_name)
    }

    pub fn implementation_name(&self) -> String {
        naming::implementation_name(&self.class_name)
    }

    /// Properties a reset hook clears, in property order.
    pub fn reset_targets(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter().filter(|p| !p.retained)
    }
}

/// Human-readable summary used by `prefsgen check` and snapshot tests.
impl fmt::Display for ClassSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.class_name, self.package_name)?;
        let o = &self.options;
        writeln!(
            f,
            "  options: private_property_keys={} private_store_key={} use_injected_store={} show_traces={}",
            o.private_property_keys, o.private_store_key, o.use_injected_store, o.show_traces
        )?;
        writeln!(f, "  store: {} = {:?}", self.store_key_const(), self.qualified_store_key())?;
        for property in &self.properties {
            write!(f, "  property {}: {}", property.name, property.ty)?;
            if let Some(default) = &property.default_value {
                write!(f, " default={default:?}")?;
            }
            if let Some(test) = &property.test_value {
                write!(f, " test={test:?}")?;
            }
            if property.retained {
                write!(f, " retained")?;
            }
            if let Some(writer) = &property.writer {
                write!(f, " writer={writer}")?;
            }
            writeln!(f)?;
            writeln!(f, "    key: {} = {:?}", property.key_const(), self.qualified_key(property))?;
        }
        for reset in &self.reset_methods {
            writeln!(f, "  reset {}", reset.name)?;
        }
        Ok(())
    }
}

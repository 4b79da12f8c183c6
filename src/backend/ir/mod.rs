//! Structured emission model for generated settings classes.
//!
//! The IR sits between a [`ClassSchema`](crate::schema::ClassSchema) and Rust source text:
//!
//! ```text
//! ClassSchema → lower → GeneratedUnit (class → members → statements) → emit (quote!) → prettyplease → source
//! ```
//!
//! Tests compare IR values instead of formatted text. Every node is plain data, so a unit can be inspected,
//! compared and rendered more than once.

pub mod emit;
pub mod errors;
pub mod lower;

pub use emit::{render_unit, unit_tokens};
pub use errors::EmitError;
pub use lower::emit_schema;

use prefsgen_core::ScalarType;

use crate::schema::ScalarLiteral;

/// One generated compilation unit: a single settings class.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedUnit {
    /// Output file name, e.g. `app_settings_prefs.rs`.
    pub file_name: String,
    pub class: GeneratedClass,
}

/// The generated struct with its inherent impl and its trait impl.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedClass {
    /// Generated struct name, e.g. `AppSettingsPrefs`.
    pub name: String,
    /// The settings trait being implemented.
    pub trait_name: String,
    pub store: StoreHandle,
    /// Associated key constants, store-file key first.
    pub constants: Vec<KeyConstant>,
    /// Methods of the inherent impl: constructor, `put_value`, inherent setters.
    pub inherent: Vec<Method>,
    /// Methods of the trait impl: readers, declared writers, reset hooks.
    pub trait_methods: Vec<Method>,
}

impl GeneratedClass {
    pub fn constant(&self, name: &str) -> Option<&KeyConstant> {
        self.constants.iter().find(|c| c.name == name)
    }

    pub fn inherent_method(&self, name: &str) -> Option<&Method> {
        self.inherent.iter().find(|m| m.name == name)
    }

    pub fn trait_method(&self, name: &str) -> Option<&Method> {
        self.trait_methods.iter().find(|m| m.name == name)
    }
}

/// How the generated constructor obtains its store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreHandle {
    /// `new(context: &dyn StoreContext) -> Self`, opening the store named by `key_const`.
    Context { key_const: String },
    /// `new() -> Result<Self, InjectError>`, looking the store up through the injection registry.
    Injected { key_const: String },
}

impl StoreHandle {
    pub fn key_const(&self) -> &str {
        match self {
            StoreHandle::Context { key_const } | StoreHandle::Injected { key_const } => key_const,
        }
    }
}

/// An associated `&'static str` constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyConstant {
    pub name: String,
    pub value: String,
    pub public: bool,
}

/// A generated method.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,
    /// Emit `pub`. Trait impl methods never carry a visibility.
    pub public: bool,
    pub receiver: SelfParam,
    pub params: Vec<Param>,
    pub returns: ReturnType,
    pub body: Vec<IrStmt>,
}

/// Receiver of a generated method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfParam {
    None,
    Ref,
    RefMut,
}

/// A generated parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: ParamType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Scalar(ScalarType),
    /// `&dyn StoreContext`
    StoreContext,
    /// `&str`
    Key,
    /// `PrefValue`
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnType {
    Unit,
    Scalar(ScalarType),
    /// `Self`
    SelfValue,
    /// `Result<Self, InjectError>`
    SelfOrInjectError,
}

/// A statement in a generated method body.
#[derive(Debug, Clone, PartialEq)]
pub enum IrStmt {
    /// Tail expression building `Self` around the acquired store.
    Construct(StoreHandle),
    /// Tail expression `self.store.get_<ty>(Self::<key_const>, <fallback>)`.
    Read {
        key_const: String,
        ty: ScalarType,
        fallback: ScalarLiteral,
    },
    /// `self.put_value(Self::<key_const>, PrefValue::<variant>(<param>));`
    Write {
        key_const: String,
        ty: ScalarType,
        param: String,
    },
    /// `match value { .. }` over the closed value union, one arm per entry.
    Dispatch { arms: Vec<DispatchArm> },
    /// `self.store.remove(Self::<key_const>);`
    Remove { key_const: String },
    /// `self.store.commit();`
    Commit,
}

/// One arm of the value dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchArm {
    /// `PrefValue::Absent => self.store.remove(key)`
    Absent,
    /// `PrefValue::<variant>(value) => self.store.put_<ty>(key, value)`
    Write(ScalarType),
}

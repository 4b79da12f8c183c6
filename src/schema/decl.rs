//! Declaration tuples consumed by the schema collector.
//!
//! A frontend (Rust source, JSON manifest, or a test) turns whatever it reads into a flat list of [`Declaration`]s.
//! The collector only ever sees these values, never the syntax they came from.

use serde::{Deserialize, Serialize};

use prefsgen_core::markers::{Marker, SchemaMarker};

/// One settings declaration: a trait plus its declaration marker and members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Declaration {
    pub name: String,
    /// Qualifies every storage key. Frontends fill it in when the source leaves it empty.
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub marker: SchemaMarker,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            marker: SchemaMarker::default(),
            members: Vec::new(),
        }
    }

    pub fn with_marker(mut self, marker: SchemaMarker) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_member(mut self, member: MemberDecl) -> Self {
        self.members.push(member);
        self
    }
}

/// A member of a declaration together with its markers and accessor signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemberDecl {
    pub name: String,
    #[serde(default)]
    pub markers: Vec<Marker>,
    #[serde(default)]
    pub signature: AccessorSignature,
    /// The member has a default body, so the generated impl does not have to provide it.
    #[serde(default)]
    pub provided: bool,
}

impl MemberDecl {
    /// A `&self` reader returning `return_type`.
    pub fn reader(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            markers: Vec::new(),
            signature: AccessorSignature {
                receiver: Receiver::Ref,
                params: Vec::new(),
                return_type: Some(return_type.into()),
            },
            provided: false,
        }
    }

    /// A `&mut self` writer taking one `value` parameter.
    pub fn writer(name: impl Into<String>, param_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            markers: Vec::new(),
            signature: AccessorSignature {
                receiver: Receiver::RefMut,
                params: vec![ParamSig {
                    name: "value".to_string(),
                    ty: param_type.into(),
                }],
                return_type: None,
            },
            provided: false,
        }
    }

    /// A `&mut self` method taking no parameters and returning nothing.
    pub fn action(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            markers: Vec::new(),
            signature: AccessorSignature {
                receiver: Receiver::RefMut,
                params: Vec::new(),
                return_type: None,
            },
            provided: false,
        }
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn with_receiver(mut self, receiver: Receiver) -> Self {
        self.signature.receiver = receiver;
        self
    }

    pub fn has_marker(&self, predicate: impl Fn(&Marker) -> bool) -> bool {
        self.markers.iter().any(predicate)
    }
}

/// How a member takes `self`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Receiver {
    /// Associated function without `self`.
    None,
    /// `&self`
    #[default]
    Ref,
    /// `&mut self`
    RefMut,
    /// `self`
    Value,
}

impl Receiver {
    pub fn describe(self) -> &'static str {
        match self {
            Receiver::None => "no receiver",
            Receiver::Ref => "`&self`",
            Receiver::RefMut => "`&mut self`",
            Receiver::Value => "`self`",
        }
    }
}

/// A non-receiver parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamSig {
    pub name: String,
    pub ty: String,
}

/// Receiver, parameters and return type of a member, as written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccessorSignature {
    pub receiver: Receiver,
    pub params: Vec<ParamSig>,
    /// `None` means the member returns nothing.
    pub return_type: Option<String>,
}

//! Structural Shapes
//!
//! Values that cross a stage boundary must be built only from primitives,
//! strings, enums, `EqSeq`, and records of those. `Structural` lets a value
//! describe its own shape so a test utility can walk any stage output and
//! reject foreign references (symbol-provider handles, shared pointers to
//! live state).
//!
//! # Architecture
//!
//! ```text
//! stage output ──→ Structural::shape() ──→ Shape tree
//!                                             │
//!                              foreign_paths() ┘──→ ["Wrapper.target"]
//! ```
//!
//! There is no impl for `Vec`, `Box`, `Arc` or `Rc`: a type
//! holding one cannot describe itself, so it cannot be used as a stage
//! output in the first place. Provider handles implement `Structural` by
//! returning [`Shape::Foreign`], which makes them visible to the scan.

use crate::{
    ArtifactId, BuilderKey, BuilderSpec, DeclarationId, EqSeq, GeneratedArtifact, MemberModel,
    Visibility,
};

/// A named field inside a record or enum variant.
pub type Field = (&'static str, Shape);

/// Recursive shape of a value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Numbers, booleans, chars.
    Primitive(&'static str),
    /// Owned or borrowed string data.
    Text,
    /// An enum value with the fields of its active variant.
    Enum {
        name: &'static str,
        variant: &'static str,
        fields: Vec<Field>,
    },
    /// An `EqSeq` and its elements.
    Sequence(Vec<Shape>),
    /// A struct with named fields.
    Record {
        name: &'static str,
        fields: Vec<Field>,
    },
    /// Anything that may reference state outside the value itself.
    Foreign(&'static str),
}

impl Shape {
    /// Record shape helper.
    pub fn record(name: &'static str, fields: Vec<Field>) -> Self {
        Shape::Record { name, fields }
    }

    /// Fieldless enum variant helper.
    pub fn unit_variant(name: &'static str, variant: &'static str) -> Self {
        Shape::Enum {
            name,
            variant,
            fields: Vec::new(),
        }
    }

    /// Paths to every foreign node, e.g. `Wrapper.target` or `EqSeq[3]`.
    ///
    /// Walks iteratively; nesting depth is not bounded by the call stack.
    pub fn foreign_paths(&self) -> Vec<String> {
        let mut found = Vec::new();
        let mut stack: Vec<(String, &Shape)> = vec![(String::new(), self)];

        while let Some((path, shape)) = stack.pop() {
            match shape {
                Shape::Primitive(_) | Shape::Text => {}
                Shape::Foreign(name) => {
                    if path.is_empty() {
                        found.push((*name).to_string());
                    } else {
                        found.push(format!("{path}: {name}"));
                    }
                }
                Shape::Sequence(items) => {
                    for (index, item) in items.iter().enumerate().rev() {
                        stack.push((format!("{path}[{index}]"), item));
                    }
                }
                Shape::Record { name, fields } => {
                    push_fields(&mut stack, &path, name, fields);
                }
                Shape::Enum {
                    name,
                    variant,
                    fields,
                } => {
                    let owner = format!("{name}::{variant}");
                    push_fields(&mut stack, &path, &owner, fields);
                }
            }
        }

        found
    }

    /// Returns `true` if no node of the shape is foreign.
    pub fn is_cache_safe(&self) -> bool {
        self.foreign_paths().is_empty()
    }
}

fn push_fields<'a>(
    stack: &mut Vec<(String, &'a Shape)>,
    path: &str,
    owner: &str,
    fields: &'a [Field],
) {
    let prefix = if path.is_empty() { owner } else { path };
    for (field, shape) in fields.iter().rev() {
        stack.push((format!("{prefix}.{field}"), shape));
    }
}

/// A value that can describe its own shape.
pub trait Structural {
    fn shape(&self) -> Shape;
}

macro_rules! primitive_shapes {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Structural for $ty {
                fn shape(&self) -> Shape {
                    Shape::Primitive(stringify!($ty))
                }
            }
        )*
    };
}

primitive_shapes!(bool, char, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl Structural for str {
    fn shape(&self) -> Shape {
        Shape::Text
    }
}

impl Structural for String {
    fn shape(&self) -> Shape {
        Shape::Text
    }
}

impl<T: Structural> Structural for Option<T> {
    fn shape(&self) -> Shape {
        match self {
            Some(value) => Shape::Enum {
                name: "Option",
                variant: "Some",
                fields: vec![("0", value.shape())],
            },
            None => Shape::unit_variant("Option", "None"),
        }
    }
}

impl<A: Structural, B: Structural> Structural for (A, B) {
    fn shape(&self) -> Shape {
        Shape::record("tuple", vec![("0", self.0.shape()), ("1", self.1.shape())])
    }
}

impl<T: Structural> Structural for EqSeq<T> {
    fn shape(&self) -> Shape {
        Shape::Sequence(self.iter().map(Structural::shape).collect())
    }
}

impl Structural for Visibility {
    fn shape(&self) -> Shape {
        Shape::unit_variant("Visibility", self.variant_name())
    }
}

impl Structural for MemberModel {
    fn shape(&self) -> Shape {
        Shape::record(
            "MemberModel",
            vec![
                ("name", self.name().shape()),
                ("type_name", self.type_name().shape()),
                ("is_collection", self.is_collection().shape()),
                ("has_public_setter", self.has_public_setter().shape()),
                ("visibility", self.visibility().shape()),
            ],
        )
    }
}

impl Structural for BuilderSpec {
    fn shape(&self) -> Shape {
        Shape::record(
            "BuilderSpec",
            vec![
                ("builder_name", self.builder_name().shape()),
                ("builder_namespace", self.builder_namespace().shape()),
                ("target_type_full_name", self.target_type_full_name().shape()),
                ("normal_members", self.normal_members().shape()),
                ("collection_members", self.collection_members().shape()),
            ],
        )
    }
}

impl Structural for BuilderKey {
    fn shape(&self) -> Shape {
        Shape::record(
            "BuilderKey",
            vec![
                ("namespace", self.namespace.shape()),
                ("builder_name", self.builder_name.shape()),
            ],
        )
    }
}

impl Structural for DeclarationId {
    fn shape(&self) -> Shape {
        Shape::record("DeclarationId", vec![("0", self.raw().shape())])
    }
}

impl Structural for ArtifactId {
    fn shape(&self) -> Shape {
        Shape::record("ArtifactId", vec![("0", self.as_str().shape())])
    }
}

impl Structural for GeneratedArtifact {
    fn shape(&self) -> Shape {
        Shape::record(
            "GeneratedArtifact",
            vec![
                ("identifier", self.identifier.shape()),
                ("text", self.text.shape()),
            ],
        )
    }
}

//! Symbol-provider contracts.
//!
//! The semantic front-end that discovers annotated declarations lives outside
//! this crate. It hands the pipeline live symbol objects through these traits.
//! Those objects are owned by the provider, may change between runs, and are
//! never compared for equality: only the extraction stage reads them, and it
//! copies plain data out into `BuilderSpec`.
//!
//! Provider handles implement `Structural` as [`Shape::Foreign`], so a stage
//! output that accidentally keeps one fails the cache-safety scan.

use std::sync::Arc;

use bgen_ir::{DeclarationId, Shape, Structural, Visibility};

/// One builder declaration carrying the builder marker.
///
/// Several declarations may describe the same builder (fragments); they share
/// a namespace and name but have distinct ids.
pub trait DeclarationSymbol: Send + Sync {
    /// Stable identity of this fragment across runs.
    fn id(&self) -> DeclarationId;

    /// Simple name of the builder type.
    fn name(&self) -> &str;

    /// Module path the builder lives in (`a::b`, `A.B`, or empty).
    fn namespace(&self) -> &str;

    /// The marker's target-type argument as the front-end resolved it.
    fn marker_argument(&self) -> MarkerArgument;
}

/// The target-type argument of a builder marker.
#[derive(Clone)]
pub enum MarkerArgument {
    /// Resolved to a type.
    Type(Arc<dyn TypeSymbol>),
    /// The marker has no argument.
    Missing,
    /// The argument did not resolve to a type.
    Malformed(String),
}

/// A type as seen by the front-end.
pub trait TypeSymbol: Send + Sync {
    /// Fully qualified name (`crate::domain::PriceRange`).
    fn full_name(&self) -> String;

    /// Members declared directly on this type.
    fn members(&self) -> Vec<Arc<dyn MemberSymbol>>;

    /// The type this one inherits members from, if any.
    fn base(&self) -> Option<Arc<dyn TypeSymbol>>;
}

/// A data member of a type.
pub trait MemberSymbol: Send + Sync {
    fn name(&self) -> &str;

    /// Type name as written in source.
    fn type_name(&self) -> &str;

    /// Visibility of the setter, `None` if the member is read-only.
    fn setter(&self) -> Option<Visibility>;

    /// Declared visibility of the member itself.
    fn visibility(&self) -> Visibility;

    /// Whether the member's type is an appendable collection.
    fn is_collection_type(&self) -> bool;
}

impl Structural for dyn DeclarationSymbol {
    fn shape(&self) -> Shape {
        Shape::Foreign("DeclarationSymbol")
    }
}

impl Structural for dyn TypeSymbol {
    fn shape(&self) -> Shape {
        Shape::Foreign("TypeSymbol")
    }
}

impl Structural for dyn MemberSymbol {
    fn shape(&self) -> Shape {
        Shape::Foreign("MemberSymbol")
    }
}

impl Structural for MarkerArgument {
    fn shape(&self) -> Shape {
        match self {
            MarkerArgument::Type(ty) => Shape::Enum {
                name: "MarkerArgument",
                variant: "Type",
                fields: vec![("0", ty.shape())],
            },
            MarkerArgument::Missing => Shape::unit_variant("MarkerArgument", "Missing"),
            MarkerArgument::Malformed(text) => Shape::Enum {
                name: "MarkerArgument",
                variant: "Malformed",
                fields: vec![("0", text.shape())],
            },
        }
    }
}

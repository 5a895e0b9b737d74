// <auto-generated>
//     Generated by bgen v1. Changes to this file will be lost when it is regenerated.
// </auto-generated>

/// Marks a hand-written declaration as the builder for `Target`.
///
/// The generator emits the fields and methods of every builder that
/// implements this trait.
pub trait BuilderFor {
    /// The data type the builder produces.
    type Target;
}

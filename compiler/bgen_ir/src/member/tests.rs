use pretty_assertions::assert_eq;

use super::*;

#[test]
fn settable_member_has_public_setter() {
    let member = MemberModel::settable("Name", "String", Visibility::Public);

    assert_eq!(member.name(), "Name");
    assert_eq!(member.type_name(), "String");
    assert!(member.has_public_setter());
    assert!(!member.is_collection());
    assert_eq!(member.visibility(), Visibility::Public);
}

#[test]
fn collection_member_has_no_setter() {
    let member = MemberModel::collection("Tags", "Vec<String>", Visibility::Public);

    assert!(member.is_collection());
    assert!(!member.has_public_setter());
}

#[test]
fn equality_is_field_wise() {
    let a = MemberModel::settable("Id", "u64", Visibility::Public);
    let b = MemberModel::settable("Id", "u64", Visibility::Public);
    let other_type = a.with_type_name("u32");
    let other_visibility = MemberModel::settable("Id", "u64", Visibility::Crate);

    assert_eq!(a, b);
    assert_ne!(a, other_type);
    assert_ne!(a, other_visibility);
    assert_eq!(other_type.name(), "Id");
}

#[test]
fn visibility_renders_rust_qualifier() {
    assert_eq!(Visibility::Public.as_str(), "pub");
    assert_eq!(Visibility::Crate.as_str(), "pub(crate)");
    assert_eq!(Visibility::Super.as_str(), "pub(super)");
    assert_eq!(Visibility::Private.as_str(), "");
    assert_eq!(Visibility::Crate.to_string(), "Crate");
}

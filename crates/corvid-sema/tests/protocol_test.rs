//! Protocol and associated type tests.

mod common;

use common::{codes, Fixture, MockServices};
use corvid_ast::ast::{Attributes, DeclContext, DeclKind};
use corvid_ast::keywords::THIS_TYPE;
use corvid_ast::types::Ty;
use corvid_ast::{ArchetypeId, DeclId};

fn archetype_of(fx: &Fixture, alias: DeclId) -> ArchetypeId {
    match fx.decl_ty(alias) {
        Some(Ty::Archetype(id)) => *id,
        other => panic!("expected an archetype, got {other:?}"),
    }
}

#[test]
fn test_associated_types_become_archetypes() {
    let mut fx = Fixture::new();
    let top = fx.top();
    let comparable = fx.protocol(top, "Comparable", vec![]);
    let container = fx.protocol(top, "Container", vec![]);
    let inside = DeclContext::Type(container);
    let this = fx.alias(inside, "This", None, vec![]);
    let bound = fx.loc("Comparable");
    let element = fx.alias(inside, "Element", None, vec![bound]);

    let mut services = MockServices::new();
    let errors = fx.check(&mut services);
    assert!(errors.is_empty(), "unexpected diagnostics: {errors:?}");

    let this_archetype = &fx.ast.archetypes[archetype_of(&fx, this)];
    assert_eq!(this_archetype.name, THIS_TYPE);
    assert_eq!(this_archetype.index, Some(0));
    assert!(this_archetype.conforms_to.is_empty());

    let element_archetype = &fx.ast.archetypes[archetype_of(&fx, element)];
    assert_eq!(element_archetype.index, None);
    assert_eq!(element_archetype.conforms_to, vec![Ty::Protocol(comparable)]);

    assert_eq!(fx.decl_ty(container), Some(&Ty::Protocol(container)));
}

#[test]
fn test_requirement_sees_this_and_associated_types() {
    let mut fx = Fixture::new();
    let top = fx.top();
    let sequence = fx.protocol(top, "Sequence", vec![]);
    let inside = DeclContext::Type(sequence);
    let this = fx.alias(inside, "This", None, vec![]);
    let item = fx.alias(inside, "Item", None, vec![]);
    let item_ty = fx.ty("Item");
    let first = fx.func(inside, "first", &[], Some(item_ty), Attributes::default());

    let mut services = MockServices::new();
    let errors = fx.check(&mut services);
    assert!(errors.is_empty(), "unexpected diagnostics: {errors:?}");

    let this_ty = Ty::Archetype(archetype_of(&fx, this));
    let item_ty = Ty::Archetype(archetype_of(&fx, item));
    assert_eq!(
        fx.decl_ty(first),
        Some(&Ty::function(this_ty.clone(), Ty::function(Ty::unit(), item_ty)))
    );

    // The requirement's `this` is the protocol's `This`
    let DeclKind::Func { body, .. } = &fx.ast.decl(first).kind else {
        unreachable!();
    };
    let clause = &body.params[0];
    let this_var = clause.bound_vars()[0];
    assert_eq!(clause.ty.as_ref(), Some(&this_ty));
    assert_eq!(fx.decl_ty(this_var), Some(&this_ty));
}

#[test]
fn test_archetypes_survive_rechecking() {
    let mut fx = Fixture::new();
    let top = fx.top();
    let proto = fx.protocol(top, "Stack", vec![]);
    let inside = DeclContext::Type(proto);
    let this = fx.alias(inside, "This", None, vec![]);
    let element = fx.alias(inside, "Element", None, vec![]);

    let mut services = MockServices::new();
    fx.check(&mut services);
    let allocated = fx.ast.archetypes.len();
    let before = (archetype_of(&fx, this), archetype_of(&fx, element));

    fx.check(&mut services);
    assert_eq!(fx.ast.archetypes.len(), allocated);
    assert_eq!((archetype_of(&fx, this), archetype_of(&fx, element)), before);
}

#[test]
fn test_protocol_inheritance() {
    let mut fx = Fixture::new();
    let top = fx.top();
    fx.protocol(top, "Base", vec![]);
    let base = fx.loc("Base");
    let refined = fx.protocol(top, "Refined", vec![base]);
    let int_loc = fx.loc("Int");
    let broken = fx.protocol(top, "Broken", vec![int_loc]);

    let mut services = MockServices::new();
    let errors = fx.check(&mut services);

    assert_eq!(codes(&errors), vec!["E101"]);
    assert_eq!(errors[0].span(), fx.ast.decl(broken).span);
    assert_eq!(fx.decl_ty(refined), Some(&Ty::Protocol(refined)));
    // Protocols are not asked to conform to what they refine
    assert!(services.conformance_calls.is_empty());
}

#[test]
fn test_unresolved_bound_is_dropped_from_archetype() {
    let mut fx = Fixture::new();
    let top = fx.top();
    let proto = fx.protocol(top, "Holder", vec![]);
    let missing = fx.loc("Missing");
    let held = fx.alias(DeclContext::Type(proto), "Held", None, vec![missing]);

    let mut services = MockServices::new();
    let errors = fx.check(&mut services);

    assert!(errors.is_empty());
    let archetype = &fx.ast.archetypes[archetype_of(&fx, held)];
    assert!(archetype.conforms_to.is_empty());
}

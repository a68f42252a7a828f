//! Declaration attribute tests: operators, fixity, assignment and conversion.

mod common;

use common::{codes, Fixture, MockServices};
use corvid_ast::ast::{Associativity, Attributes, DeclContext, DeclKind, InfixData};
use corvid_ast::DeclId;
use corvid_sema::DeclError;

fn infix(fx: &mut Fixture, precedence: u8, assoc: Associativity) -> Attributes {
    Attributes {
        span: fx.span(),
        infix: Some(InfixData::new(precedence, assoc)),
        ..Attributes::default()
    }
}

fn binary_op(fx: &mut Fixture, name: &str, operand: &str, attrs: Attributes) -> DeclId {
    let top = fx.top();
    let (lhs, rhs, result) = (fx.ty(operand), fx.ty(operand), fx.ty(operand));
    fx.func(top, name, &[("a", lhs), ("b", rhs)], Some(result), attrs)
}

fn attrs_of(fx: &Fixture, decl: DeclId) -> Attributes {
    fx.ast.decl(decl).attrs
}

#[test]
fn test_infix_operator_is_accepted() {
    let mut fx = Fixture::new();
    let attrs = infix(&mut fx, 190, Associativity::Left);
    let pow = binary_op(&mut fx, "**", "Int", attrs);

    let mut services = MockServices::new();
    let errors = fx.check(&mut services);

    assert!(errors.is_empty(), "unexpected diagnostics: {errors:?}");
    assert_eq!(attrs_of(&fx, pow).infix, Some(InfixData::new(190, Associativity::Left)));
}

#[test]
fn test_operator_arity() {
    let mut fx = Fixture::new();
    let top = fx.top();
    let attrs = infix(&mut fx, 100, Associativity::None);
    let (a, b, c, r) = (fx.ty("Int"), fx.ty("Int"), fx.ty("Int"), fx.ty("Int"));
    let ternary = fx.func(top, "+++", &[("a", a), ("b", b), ("c", c)], Some(r), attrs);
    let r = fx.ty("Int");
    let nullary = fx.func(top, "~~", &[], Some(r), Attributes::default());

    let mut services = MockServices::new();
    let errors = fx.check(&mut services);

    assert_eq!(codes(&errors), vec!["E111", "E111"]);
    assert_eq!(errors[0].span(), fx.ast.decl(ternary).span);
    assert_eq!(errors[1].span(), fx.ast.decl(nullary).span);
    assert_eq!(attrs_of(&fx, ternary).infix, None);
}

#[test]
fn test_unary_address_of_is_reserved() {
    let mut fx = Fixture::new();
    let top = fx.top();
    let (a, r) = (fx.ty("Int"), fx.ty("Int"));
    fx.func(top, "&", &[("a", a)], Some(r), Attributes::default());

    let mut services = MockServices::new();
    let errors = fx.check(&mut services);

    assert_eq!(codes(&errors), vec!["E112"]);
}

#[test]
fn test_operator_named_variable() {
    let mut fx = Fixture::new();
    let top = fx.top();
    let int_ty = fx.ty("Int");
    let (_, var) = fx.binding(top, "+", Some(int_ty), None);

    let mut services = MockServices::new();
    let errors = fx.check(&mut services);

    assert_eq!(
        errors,
        vec![DeclError::OperatorNotFunc {
            span: fx.ast.decl(var).span,
        }]
    );
}

#[test]
fn test_fixity_attributes_need_operators() {
    let mut fx = Fixture::new();
    let attrs = infix(&mut fx, 100, Associativity::Left);
    let plus = binary_op(&mut fx, "plus", "Int", attrs);

    let top = fx.top();
    let attrs = infix(&mut fx, 100, Associativity::Left);
    let (a, r) = (fx.ty("Int"), fx.ty("Int"));
    let unary = fx.func(top, "**", &[("a", a)], Some(r), attrs);

    let (a, r) = (fx.ty("Int"), fx.ty("Int"));
    let postfix = Attributes {
        postfix: true,
        ..Attributes::default()
    };
    let incr = fx.func(top, "incr", &[("a", a)], Some(r), postfix);

    let mut services = MockServices::new();
    let errors = fx.check(&mut services);

    assert_eq!(codes(&errors), vec!["E113", "E114", "E115"]);
    // Binary fixity on a unary operator points at the attribute
    assert_eq!(errors[1].span(), attrs_of(&fx, unary).span);
    assert_eq!(attrs_of(&fx, plus).infix, None);
    assert_eq!(attrs_of(&fx, unary).infix, None);
    assert!(!attrs_of(&fx, incr).postfix);
}

#[test]
fn test_postfix_arity() {
    let mut fx = Fixture::new();
    let top = fx.top();
    let postfix = Attributes {
        postfix: true,
        ..Attributes::default()
    };
    let (a, r) = (fx.ty("Int"), fx.ty("Int"));
    let good = fx.func(top, "++", &[("a", a)], Some(r), postfix);
    let bad = binary_op(&mut fx, "!!", "Int", postfix);

    let mut services = MockServices::new();
    let errors = fx.check(&mut services);

    assert_eq!(codes(&errors), vec!["E116"]);
    assert_eq!(errors[0].span(), fx.ast.decl(bad).span);
    assert!(attrs_of(&fx, good).postfix);
    assert!(!attrs_of(&fx, bad).postfix);
}

#[test]
fn test_assignment_operators() {
    let mut fx = Fixture::new();
    let top = fx.top();

    let mut attrs = infix(&mut fx, 90, Associativity::Right);
    attrs.assignment = true;
    let (a, b) = (fx.byref_ty("Int"), fx.ty("Int"));
    let good = fx.func(top, "+=", &[("a", a), ("b", b)], None, attrs);

    let (a, b) = (fx.ty("Int"), fx.ty("Int"));
    let by_value = fx.func(top, "-=", &[("a", a), ("b", b)], None, attrs);

    let (a, b, r) = (fx.byref_ty("Int"), fx.ty("Int"), fx.ty("Int"));
    let returning = fx.func(top, "*=", &[("a", a), ("b", b)], Some(r), attrs);

    let assignment = Attributes {
        assignment: true,
        ..Attributes::default()
    };
    let a = fx.byref_ty("Int");
    let named = fx.func(top, "reset", &[("a", a)], None, assignment);

    let mut services = MockServices::new();
    let errors = fx.check(&mut services);

    assert_eq!(codes(&errors), vec!["E118", "E119", "E117"]);
    assert_eq!(errors[0].span(), fx.ast.decl(by_value).span);
    assert_eq!(errors[1].to_string(), "assignment operator result 'Int' is not '()'");
    assert_eq!(
        errors[2],
        DeclError::InvalidDeclAttribute {
            attr: "assignment",
            span: fx.ast.decl(named).span,
        }
    );

    assert!(attrs_of(&fx, good).assignment);
    assert!(!attrs_of(&fx, by_value).assignment);
    // A non-void result is reported but the attribute stays
    assert!(attrs_of(&fx, returning).assignment);
    assert!(!attrs_of(&fx, named).assignment);
}

#[test]
fn test_conversion_functions() {
    let mut fx = Fixture::new();
    let top = fx.top();
    let s = fx.nominal(top, DeclKind::Struct, "S");
    let inside = DeclContext::Type(s);
    let conversion = Attributes {
        conversion: true,
        ..Attributes::default()
    };

    let r = fx.ty("Int");
    let good = fx.func(inside, "toInt", &[], Some(r), conversion);
    let (x, r) = (fx.ty("Int"), fx.ty("Int"));
    let with_args = fx.func(inside, "toIntWith", &[("x", x)], Some(r), conversion);
    let r = fx.ty("Int");
    let on_static = fx.func_with(inside, "make", true, &[], Some(r), conversion);
    let r = fx.ty("Int");
    let free = fx.func(top, "convert", &[], Some(r), conversion);

    let mut services = MockServices::new();
    let errors = fx.check(&mut services);

    assert_eq!(codes(&errors), vec!["E121", "E120", "E120"]);
    assert_eq!(
        errors[0],
        DeclError::ConversionParams {
            name: "toIntWith".to_string(),
            span: fx.ast.decl(with_args).span,
        }
    );
    assert_eq!(errors[1].span(), fx.ast.decl(on_static).span);
    assert_eq!(
        errors[2].to_string(),
        "conversion function 'convert' is not an instance method"
    );

    assert!(attrs_of(&fx, good).conversion);
    assert!(!attrs_of(&fx, with_args).conversion);
    assert!(!attrs_of(&fx, free).conversion);
}

#[test]
fn test_byref_and_auto_closure_are_cleared() {
    let mut fx = Fixture::new();
    let top = fx.top();
    let attrs = Attributes {
        byref: true,
        auto_closure: true,
        ..Attributes::default()
    };
    let r = fx.ty("Int");
    let f = fx.func(top, "f", &[], Some(r), attrs);

    let mut services = MockServices::new();
    let errors = fx.check(&mut services);

    assert_eq!(codes(&errors), vec!["E117", "E117"]);
    assert_eq!(errors[0].to_string(), "'byref' is not valid on this declaration");
    assert_eq!(
        errors[1].to_string(),
        "'auto_closure' is not valid on this declaration"
    );
    assert!(attrs_of(&fx, f).is_empty());
}

#[test]
fn test_binary_operator_takes_fixity_from_same_module() {
    let mut fx = Fixture::new();
    let attrs = infix(&mut fx, 190, Associativity::Right);
    binary_op(&mut fx, "**", "Int", attrs);
    let overload = binary_op(&mut fx, "**", "Double", Attributes::default());

    let mut services = MockServices::new();
    let errors = fx.check(&mut services);

    assert!(errors.is_empty(), "unexpected diagnostics: {errors:?}");
    assert_eq!(
        attrs_of(&fx, overload).infix,
        Some(InfixData::new(190, Associativity::Right))
    );
}

#[test]
fn test_binary_operator_takes_fixity_from_import() {
    let mut fx = Fixture::new();
    let lib = fx.ast.alloc_module("lib");
    let attrs = infix(&mut fx, 100, Associativity::Left);
    let (a, b, r) = (fx.ty("Int"), fx.ty("Int"), fx.ty("Int"));
    fx.func(DeclContext::Module(lib), "^^", &[("a", a), ("b", b)], Some(r), attrs);

    let top = fx.top();
    let path = vec![fx.sym("lib")];
    let import = fx.add(
        top,
        DeclKind::Import {
            path,
            module: Some(lib),
        },
    );
    let local = binary_op(&mut fx, "^^", "Bool", Attributes::default());

    let mut services = MockServices::new();
    let errors = fx.check(&mut services);

    assert!(errors.is_empty(), "unexpected diagnostics: {errors:?}");
    assert_eq!(fx.decl_ty(import), Some(&corvid_ast::types::Ty::Module(lib)));
    assert_eq!(
        attrs_of(&fx, local).infix,
        Some(InfixData::new(100, Associativity::Left))
    );
}

#[test]
fn test_binary_operator_without_fixity() {
    let mut fx = Fixture::new();
    let op = binary_op(&mut fx, "<>", "Int", Attributes::default());

    let mut services = MockServices::new();
    let errors = fx.check(&mut services);

    assert_eq!(
        errors,
        vec![DeclError::BinopsInfixLeft {
            span: fx.ast.decl(op).span,
        }]
    );
    let diagnostic = errors[0].to_diagnostic();
    assert_eq!(diagnostic.code.as_deref(), Some("E122"));
}

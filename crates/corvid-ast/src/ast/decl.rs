//! Declarations.
//!
//! Every declaration lives in [`AstContext::decls`](crate::AstContext::decls)
//! and is referred to by [`DeclId`]. Containers (types, protocols, extensions,
//! modules) list their members by id, and each declaration records the
//! [`DeclContext`] it was declared in.

use super::attr::Attributes;
use super::generics::GenericParamList;
use super::pat::Pattern;
use super::ty::TypeLoc;
use crate::span::{Span, Spanned};
use crate::types::{NominalKind, Ty};
use crate::{DeclId, ExprId, ModuleId};
use corvid_mem::Symbol;

/// A declaration node.
#[derive(Debug, Clone, PartialEq)]
pub struct Decl {
    /// Kind-specific payload
    pub kind: DeclKind,
    /// Enclosing scope
    pub context: DeclContext,
    /// Source location
    pub span: Span,
    /// Semantic type; `None` until checked, [`Ty::Error`] if checking failed
    pub ty: Option<Ty>,
    /// Written attributes
    pub attrs: Attributes,
}

impl Decl {
    /// Creates an unchecked declaration without attributes.
    #[must_use]
    pub fn new(kind: DeclKind, context: DeclContext, span: Span) -> Self {
        Self {
            kind,
            context,
            span,
            ty: None,
            attrs: Attributes::default(),
        }
    }

    /// Replaces the attribute set.
    #[must_use]
    pub fn with_attrs(mut self, attrs: Attributes) -> Self {
        self.attrs = attrs;
        self
    }

    /// Declared name, for kinds that have one.
    #[must_use]
    pub fn name(&self) -> Option<Symbol> {
        match &self.kind {
            DeclKind::TypeAlias { name, .. }
            | DeclKind::Protocol { name, .. }
            | DeclKind::Var { name, .. }
            | DeclKind::Func { name, .. }
            | DeclKind::OneOfElement { name, .. } => Some(*name),
            DeclKind::OneOf(nominal) | DeclKind::Struct(nominal) | DeclKind::Class(nominal) => {
                Some(nominal.name)
            }
            _ => None,
        }
    }

    /// Semantic type, or [`Ty::Error`] if unset.
    #[must_use]
    pub fn ty_or_error(&self) -> Ty {
        self.ty.clone().unwrap_or(Ty::Error)
    }
}

impl Spanned for Decl {
    fn span(&self) -> Span {
        self.span
    }
}

/// Scope a declaration appears in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclContext {
    /// Top level of a module
    Module(ModuleId),
    /// Body of a oneof, struct, class, protocol or extension
    Type(DeclId),
    /// Body of a function, constructor or destructor
    Function(DeclId),
}

impl DeclContext {
    /// Returns `true` for module scope.
    #[must_use]
    pub const fn is_module_scope(self) -> bool {
        matches!(self, DeclContext::Module(_))
    }

    /// Enclosing type declaration, if this is a type context.
    #[must_use]
    pub const fn as_type(self) -> Option<DeclId> {
        match self {
            DeclContext::Type(decl) => Some(decl),
            _ => None,
        }
    }
}

/// Declaration kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclKind {
    /// `import a.b`
    Import {
        /// Dotted path
        path: Vec<Symbol>,
        /// Module the path resolved to
        module: Option<ModuleId>,
    },

    /// `var pattern = init`
    PatternBinding {
        /// Bound pattern
        pattern: Pattern,
        /// Initializer
        init: Option<ExprId>,
    },

    /// `subscript (indices) -> Element { get set }`
    Subscript {
        /// Index parameters
        indices: Pattern,
        /// Element type
        element: TypeLoc,
    },

    /// `typealias Name : Inherited = Underlying`; also generic parameters and associated types
    TypeAlias {
        /// Alias name
        name: Symbol,
        /// Aliased type, empty for generic parameters and associated types
        underlying: TypeLoc,
        /// Written protocol bounds
        inherited: Vec<TypeLoc>,
    },

    /// `oneof Name { ... }`
    OneOf(NominalDecl),

    /// `struct Name { ... }`
    Struct(NominalDecl),

    /// `class Name { ... }`
    Class(NominalDecl),

    /// `protocol Name : Inherited { ... }`
    Protocol {
        /// Protocol name
        name: Symbol,
        /// Refined protocols
        inherited: Vec<TypeLoc>,
        /// Requirements and associated types
        members: Vec<DeclId>,
    },

    /// A variable introduced by a binding pattern or a parameter.
    Var {
        /// Variable name
        name: Symbol,
        /// Has a getter/setter instead of storage
        computed: bool,
        /// Declared `static`
        is_static: bool,
    },

    /// `func name<T>(params) -> Result { body }`
    Func {
        /// Function name, possibly an operator
        name: Symbol,
        /// Declared `static`
        is_static: bool,
        /// Generic parameters
        generic_params: Option<GenericParamList>,
        /// Signature and body
        body: FuncBody,
    },

    /// `case name(Payload)` inside a oneof
    OneOfElement {
        /// Case name
        name: Symbol,
        /// Payload type
        argument: Option<TypeLoc>,
    },

    /// Implicit constructor taking every stored property of a struct.
    MemberwiseInit {
        /// Parameter tuple type, filled in by checking
        argument: Option<TypeLoc>,
    },

    /// `extension Type : Inherited { ... }`
    Extension {
        /// Extended type
        extended: TypeLoc,
        /// Added conformances
        inherited: Vec<TypeLoc>,
        /// Added members
        members: Vec<DeclId>,
    },

    /// Statements at the top of a main unit.
    TopLevelCode {
        /// The code
        body: ExprId,
    },

    /// `constructor<T>(args) { body }`
    Constructor {
        /// Generic parameters
        generic_params: Option<GenericParamList>,
        /// Parameter pattern
        arguments: Pattern,
        /// The implicit `this` variable
        implicit_self: DeclId,
        /// Body
        body: Option<ExprId>,
    },

    /// `destructor { body }`
    Destructor {
        /// The implicit `this` variable
        implicit_self: DeclId,
        /// Body
        body: Option<ExprId>,
    },
}

/// Shared payload of oneof, struct and class declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct NominalDecl {
    /// Type name
    pub name: Symbol,
    /// Written conformances
    pub inherited: Vec<TypeLoc>,
    /// Generic parameters
    pub generic_params: Option<GenericParamList>,
    /// Members in declaration order
    pub members: Vec<DeclId>,
}

impl NominalDecl {
    /// Non-generic nominal with no members.
    #[must_use]
    pub const fn new(name: Symbol) -> Self {
        Self {
            name,
            inherited: Vec::new(),
            generic_params: None,
            members: Vec::new(),
        }
    }
}

/// Signature and body of a function.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncBody {
    /// Curried parameter clauses; an instance method's first clause is `this`
    pub params: Vec<Pattern>,
    /// Written result type, empty for `()`
    pub result: TypeLoc,
    /// Body
    pub body: Option<ExprId>,
}

impl DeclKind {
    /// Short lowercase name of the kind, for logs.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            DeclKind::Import { .. } => "import",
            DeclKind::PatternBinding { .. } => "var binding",
            DeclKind::Subscript { .. } => "subscript",
            DeclKind::TypeAlias { .. } => "typealias",
            DeclKind::OneOf(_) => "oneof",
            DeclKind::Struct(_) => "struct",
            DeclKind::Class(_) => "class",
            DeclKind::Protocol { .. } => "protocol",
            DeclKind::Var { .. } => "var",
            DeclKind::Func { .. } => "func",
            DeclKind::OneOfElement { .. } => "oneof element",
            DeclKind::MemberwiseInit { .. } => "memberwise constructor",
            DeclKind::Extension { .. } => "extension",
            DeclKind::TopLevelCode { .. } => "top-level code",
            DeclKind::Constructor { .. } => "constructor",
            DeclKind::Destructor { .. } => "destructor",
        }
    }

    /// Nominal payload and flavour for oneof, struct and class.
    #[must_use]
    pub const fn as_nominal(&self) -> Option<(NominalKind, &NominalDecl)> {
        match self {
            DeclKind::OneOf(n) => Some((NominalKind::OneOf, n)),
            DeclKind::Struct(n) => Some((NominalKind::Struct, n)),
            DeclKind::Class(n) => Some((NominalKind::Class, n)),
            _ => None,
        }
    }

    /// Mutable nominal payload.
    pub fn as_nominal_mut(&mut self) -> Option<&mut NominalDecl> {
        match self {
            DeclKind::OneOf(n) | DeclKind::Struct(n) | DeclKind::Class(n) => Some(n),
            _ => None,
        }
    }

    /// Members of a container declaration, empty for everything else.
    #[must_use]
    pub fn members(&self) -> &[DeclId] {
        match self {
            DeclKind::OneOf(n) | DeclKind::Struct(n) | DeclKind::Class(n) => &n.members,
            DeclKind::Protocol { members, .. } | DeclKind::Extension { members, .. } => members,
            _ => &[],
        }
    }

    /// Mutable member list of a container declaration.
    pub fn members_mut(&mut self) -> Option<&mut Vec<DeclId>> {
        match self {
            DeclKind::OneOf(n) | DeclKind::Struct(n) | DeclKind::Class(n) => Some(&mut n.members),
            DeclKind::Protocol { members, .. } | DeclKind::Extension { members, .. } => {
                Some(members)
            }
            _ => None,
        }
    }

    /// Written inherited list.
    #[must_use]
    pub fn inherited(&self) -> &[TypeLoc] {
        match self {
            DeclKind::OneOf(n) | DeclKind::Struct(n) | DeclKind::Class(n) => &n.inherited,
            DeclKind::TypeAlias { inherited, .. }
            | DeclKind::Protocol { inherited, .. }
            | DeclKind::Extension { inherited, .. } => inherited,
            _ => &[],
        }
    }

    /// Mutable inherited list.
    pub fn inherited_mut(&mut self) -> Option<&mut Vec<TypeLoc>> {
        match self {
            DeclKind::OneOf(n) | DeclKind::Struct(n) | DeclKind::Class(n) => Some(&mut n.inherited),
            DeclKind::TypeAlias { inherited, .. }
            | DeclKind::Protocol { inherited, .. }
            | DeclKind::Extension { inherited, .. } => Some(inherited),
            _ => None,
        }
    }

    /// Generic parameter list, if the kind can have one and does.
    #[must_use]
    pub const fn generic_params(&self) -> Option<&GenericParamList> {
        match self {
            DeclKind::OneOf(n) | DeclKind::Struct(n) | DeclKind::Class(n) => {
                n.generic_params.as_ref()
            }
            DeclKind::Func { generic_params, .. } | DeclKind::Constructor { generic_params, .. } => {
                generic_params.as_ref()
            }
            _ => None,
        }
    }

    /// Mutable generic parameter list slot.
    pub fn generic_params_mut(&mut self) -> Option<&mut Option<GenericParamList>> {
        match self {
            DeclKind::OneOf(n) | DeclKind::Struct(n) | DeclKind::Class(n) => {
                Some(&mut n.generic_params)
            }
            DeclKind::Func { generic_params, .. } | DeclKind::Constructor { generic_params, .. } => {
                Some(generic_params)
            }
            _ => None,
        }
    }
}

/// A compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// Module name
    pub name: Symbol,
    /// Top-level declarations in source order
    pub decls: Vec<DeclId>,
}

impl Module {
    /// Empty module.
    #[must_use]
    pub const fn new(name: Symbol) -> Self {
        Self {
            name,
            decls: Vec::new(),
        }
    }
}

//! Declaration checking errors.
//!
//! Every problem the declaration checker reports is a [`DeclError`]. Types and
//! names are rendered to strings when the error is created, so an error stays
//! printable after the [`AstContext`](corvid_ast::AstContext) is gone.
//!
//! Each variant has a stable code (`E101`..`E122`) used when converting to a
//! [`Diagnostic`] for the emitter.

use corvid_ast::{Diagnostic, DiagnosticBuilder, DiagnosticLevel, Span};
use std::fmt;

/// Declaration checking errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclError {
    /// A type was listed as inherited but is not a protocol.
    NonProtocolInherit {
        /// The offending type
        ty: String,
        /// Location of the inheriting declaration
        span: Span,
    },

    /// The protocol side of a conformance requirement is not a protocol.
    RequiresConformanceNonProtocol {
        /// Constrained type
        subject: String,
        /// The offending type
        protocol: String,
        /// Location of the `requires` clause
        span: Span,
    },

    /// A bound variable's type cannot be stored.
    VarTypeNotMaterializable {
        /// The variable's type
        ty: String,
        /// Location of the variable
        span: Span,
    },

    /// A variable initializer does not convert to the annotated type.
    WhileConvertingVarInit {
        /// The annotated type
        ty: String,
        /// Location of the binding
        span: Span,
    },

    /// A subscript outside a type.
    SubscriptNotMember {
        /// Location of the subscript
        span: Span,
    },

    /// A oneof case carries a payload that cannot be stored.
    OneOfElementNotMaterializable {
        /// Location of the case
        span: Span,
    },

    /// An extension of something other than a oneof, struct or class.
    NonNominalExtension {
        /// Whether the extended type is a protocol
        is_protocol: bool,
        /// The extended type
        ty: String,
        /// Location of the extension
        span: Span,
    },

    /// A constructor outside a type.
    ConstructorNotMember {
        /// Location of the constructor
        span: Span,
    },

    /// A destructor outside a class.
    DestructorNotMember {
        /// Location of the destructor
        span: Span,
    },

    /// An operator name on something other than a function.
    OperatorNotFunc {
        /// Location of the declaration
        span: Span,
    },

    /// An operator function with zero or more than two arguments.
    InvalidArgCountForOperator {
        /// Location of the declaration
        span: Span,
    },

    /// A unary `&` operator.
    CustomOperatorAddressOf {
        /// Location of the declaration
        span: Span,
    },

    /// `infix` on a non-operator.
    InfixNotAnOperator {
        /// Location of the declaration
        span: Span,
    },

    /// `infix` on an operator without exactly two arguments.
    InvalidInfixInput {
        /// Location of the attribute list
        span: Span,
    },

    /// `postfix` on a non-operator.
    PostfixNotAnOperator {
        /// Location of the declaration
        span: Span,
    },

    /// `postfix` on an operator without exactly one argument.
    InvalidPostfixInput {
        /// Location of the declaration
        span: Span,
    },

    /// An attribute that is not allowed on this declaration.
    InvalidDeclAttribute {
        /// Attribute name
        attr: &'static str,
        /// Location of the declaration
        span: Span,
    },

    /// An `assignment` operator whose first parameter is not `byref`.
    AssignmentWithoutByref {
        /// Location of the declaration
        span: Span,
    },

    /// An `assignment` operator that returns a value.
    AssignmentNonVoid {
        /// The result type
        ty: String,
        /// Location of the declaration
        span: Span,
    },

    /// `conversion` on something other than an instance method.
    ConversionNotInstanceMethod {
        /// Declaration name
        name: String,
        /// Location of the declaration
        span: Span,
    },

    /// A `conversion` method that requires arguments.
    ConversionParams {
        /// Declaration name
        name: String,
        /// Location of the declaration
        span: Span,
    },

    /// A binary operator with no fixity anywhere in scope.
    BinopsInfixLeft {
        /// Location of the declaration
        span: Span,
    },
}

impl DeclError {
    /// Get the span of this error.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            DeclError::NonProtocolInherit { span, .. }
            | DeclError::RequiresConformanceNonProtocol { span, .. }
            | DeclError::VarTypeNotMaterializable { span, .. }
            | DeclError::WhileConvertingVarInit { span, .. }
            | DeclError::SubscriptNotMember { span }
            | DeclError::OneOfElementNotMaterializable { span }
            | DeclError::NonNominalExtension { span, .. }
            | DeclError::ConstructorNotMember { span }
            | DeclError::DestructorNotMember { span }
            | DeclError::OperatorNotFunc { span }
            | DeclError::InvalidArgCountForOperator { span }
            | DeclError::CustomOperatorAddressOf { span }
            | DeclError::InfixNotAnOperator { span }
            | DeclError::InvalidInfixInput { span }
            | DeclError::PostfixNotAnOperator { span }
            | DeclError::InvalidPostfixInput { span }
            | DeclError::InvalidDeclAttribute { span, .. }
            | DeclError::AssignmentWithoutByref { span }
            | DeclError::AssignmentNonVoid { span, .. }
            | DeclError::ConversionNotInstanceMethod { span, .. }
            | DeclError::ConversionParams { span, .. }
            | DeclError::BinopsInfixLeft { span } => *span,
        }
    }

    /// Stable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            DeclError::NonProtocolInherit { .. } => "E101",
            DeclError::RequiresConformanceNonProtocol { .. } => "E102",
            DeclError::VarTypeNotMaterializable { .. } => "E103",
            DeclError::WhileConvertingVarInit { .. } => "E104",
            DeclError::SubscriptNotMember { .. } => "E105",
            DeclError::OneOfElementNotMaterializable { .. } => "E106",
            DeclError::NonNominalExtension { .. } => "E107",
            DeclError::ConstructorNotMember { .. } => "E108",
            DeclError::DestructorNotMember { .. } => "E109",
            DeclError::OperatorNotFunc { .. } => "E110",
            DeclError::InvalidArgCountForOperator { .. } => "E111",
            DeclError::CustomOperatorAddressOf { .. } => "E112",
            DeclError::InfixNotAnOperator { .. } => "E113",
            DeclError::InvalidInfixInput { .. } => "E114",
            DeclError::PostfixNotAnOperator { .. } => "E115",
            DeclError::InvalidPostfixInput { .. } => "E116",
            DeclError::InvalidDeclAttribute { .. } => "E117",
            DeclError::AssignmentWithoutByref { .. } => "E118",
            DeclError::AssignmentNonVoid { .. } => "E119",
            DeclError::ConversionNotInstanceMethod { .. } => "E120",
            DeclError::ConversionParams { .. } => "E121",
            DeclError::BinopsInfixLeft { .. } => "E122",
        }
    }

    /// Get a short description of this error.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            DeclError::NonProtocolInherit { .. } => "inheritance from non-protocol type",
            DeclError::RequiresConformanceNonProtocol { .. } => {
                "conformance requirement on non-protocol type"
            }
            DeclError::VarTypeNotMaterializable { .. } => "variable of non-materializable type",
            DeclError::WhileConvertingVarInit { .. } => "initializer does not match annotation",
            DeclError::SubscriptNotMember { .. } => "subscript outside a type",
            DeclError::OneOfElementNotMaterializable { .. } => "non-materializable oneof payload",
            DeclError::NonNominalExtension { .. } => "extension of non-nominal type",
            DeclError::ConstructorNotMember { .. } => "constructor outside a type",
            DeclError::DestructorNotMember { .. } => "destructor outside a class",
            DeclError::OperatorNotFunc { .. } => "operator is not a function",
            DeclError::InvalidArgCountForOperator { .. } => "wrong operator arity",
            DeclError::CustomOperatorAddressOf { .. } => "unary '&' operator",
            DeclError::InfixNotAnOperator { .. } => "'infix' on non-operator",
            DeclError::InvalidInfixInput { .. } => "'infix' on non-binary operator",
            DeclError::PostfixNotAnOperator { .. } => "'postfix' on non-operator",
            DeclError::InvalidPostfixInput { .. } => "'postfix' on non-unary operator",
            DeclError::InvalidDeclAttribute { .. } => "invalid attribute",
            DeclError::AssignmentWithoutByref { .. } => "'assignment' without byref parameter",
            DeclError::AssignmentNonVoid { .. } => "'assignment' with non-void result",
            DeclError::ConversionNotInstanceMethod { .. } => "'conversion' on non-method",
            DeclError::ConversionParams { .. } => "'conversion' with required parameters",
            DeclError::BinopsInfixLeft { .. } => "binary operator without fixity",
        }
    }

    /// Converts this error into a diagnostic for the emitter.
    #[must_use]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let builder = DiagnosticBuilder::new(DiagnosticLevel::Error, self.to_string(), self.span())
            .code(self.code());

        match self {
            DeclError::NonNominalExtension { is_protocol: true, .. } => builder
                .suggest("protocols cannot be extended; extend a conforming type instead")
                .build(),
            DeclError::BinopsInfixLeft { .. } => builder
                .suggest("add an [infix_left=N] or [infix_right=N] attribute")
                .build(),
            DeclError::AssignmentWithoutByref { .. } => builder
                .suggest("mark the first parameter [byref]")
                .build(),
            _ => builder.build(),
        }
    }
}

impl fmt::Display for DeclError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclError::NonProtocolInherit { ty, .. } => {
                write!(f, "inheritance from non-protocol type '{ty}'")
            }
            DeclError::RequiresConformanceNonProtocol {
                subject, protocol, ..
            } => write!(
                f,
                "type '{subject}' constrained to non-protocol type '{protocol}'"
            ),
            DeclError::VarTypeNotMaterializable { ty, .. } => {
                write!(f, "variable has non-materializable type '{ty}'")
            }
            DeclError::WhileConvertingVarInit { ty, .. } => {
                write!(f, "while converting 'var' initializer to declared type '{ty}'")
            }
            DeclError::SubscriptNotMember { .. } => {
                f.write_str("subscript can only be declared within a type")
            }
            DeclError::OneOfElementNotMaterializable { .. } => {
                f.write_str("oneof element type must be materializable")
            }
            DeclError::NonNominalExtension { is_protocol, ty, .. } => {
                if *is_protocol {
                    write!(f, "protocol '{ty}' cannot be extended")
                } else {
                    write!(f, "non-nominal type '{ty}' cannot be extended")
                }
            }
            DeclError::ConstructorNotMember { .. } => {
                f.write_str("constructor can only be declared within a type")
            }
            DeclError::DestructorNotMember { .. } => {
                f.write_str("destructor can only be declared within a class")
            }
            DeclError::OperatorNotFunc { .. } => f.write_str("operators must be declared with 'func'"),
            DeclError::InvalidArgCountForOperator { .. } => {
                f.write_str("operators must have one or two arguments")
            }
            DeclError::CustomOperatorAddressOf { .. } => {
                f.write_str("cannot declare a custom unary '&' operator")
            }
            DeclError::InfixNotAnOperator { .. } => {
                f.write_str("'infix' requires a function with an operator identifier")
            }
            DeclError::InvalidInfixInput { .. } => {
                f.write_str("'infix' requires a function with two arguments")
            }
            DeclError::PostfixNotAnOperator { .. } => {
                f.write_str("'postfix' requires a function with an operator identifier")
            }
            DeclError::InvalidPostfixInput { .. } => {
                f.write_str("'postfix' requires a function with one argument")
            }
            DeclError::InvalidDeclAttribute { attr, .. } => {
                write!(f, "'{attr}' is not valid on this declaration")
            }
            DeclError::AssignmentWithoutByref { .. } => {
                f.write_str("assignment operator must have an initial byref argument")
            }
            DeclError::AssignmentNonVoid { ty, .. } => {
                write!(f, "assignment operator result '{ty}' is not '()'")
            }
            DeclError::ConversionNotInstanceMethod { name, .. } => {
                write!(f, "conversion function '{name}' is not an instance method")
            }
            DeclError::ConversionParams { name, .. } => {
                write!(f, "conversion function '{name}' has non-defaulted parameters")
            }
            DeclError::BinopsInfixLeft { .. } => {
                f.write_str("binary operator implementation requires an infix declaration")
            }
        }
    }
}

impl std::error::Error for DeclError {}

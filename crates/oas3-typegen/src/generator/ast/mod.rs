mod statements;
mod types;


pub use statements::{InterfaceDecl, NamespaceDecl, Statement, StatementKind, TypeAliasDecl};
pub use types::{IndexSignatureDecl, Keyword, Literal, PropertySignature, TypeMember, TypeNode};

/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The program root and the `Node` trait shared by every node
/// - expressions: Definitions for the expression variants
/// - statements: Definitions for the statement variants and blocks
pub mod ast;
pub mod expressions;
pub mod statements;

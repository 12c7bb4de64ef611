//! Trees generated by the build script.

/// Expression tree with a single leaf and no namespace.
pub mod literal {
    include!(concat!(env!("OUT_DIR"), "/literal.rs"));
    include!(concat!(env!("OUT_DIR"), "/literal_impl.rs"));
}

// `types` and `ast` open their own namespaces.
include!(concat!(env!("OUT_DIR"), "/types.rs"));
include!(concat!(env!("OUT_DIR"), "/types_impl.rs"));

include!(concat!(env!("OUT_DIR"), "/ast.rs"));
include!(concat!(env!("OUT_DIR"), "/ast_impl.rs"));

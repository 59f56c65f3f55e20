//! Scope resolution.
//!
//! Builds one tree of lexically nested scopes for a whole run from the
//! validated phrases of every file. Indentation opens and closes scopes,
//! declarations are recorded in their owning scope and every other
//! identifier is recorded as a usage. Usages are checked against their
//! ancestors once all files are in, so forward references are legal.
//!
//! The tree lives in an arena: scopes refer to each other by [`scope::ScopeId`].

pub mod resolver;
pub mod scope;

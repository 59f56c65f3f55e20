use std::{fmt::Display, rc::Rc};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// Index of a scope inside its [`ScopeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

impl ScopeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl Display for ScopeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Variable,
    Function,
    Label,
    Parameter,
}

impl Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclarationKind::Variable => write!(f, "variable"),
            DeclarationKind::Function => write!(f, "function"),
            DeclarationKind::Label => write!(f, "label"),
            DeclarationKind::Parameter => write!(f, "parameter"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,
    /// Declared with a doubled sigil.
    pub raised: bool,
    pub position: Position,
    /// Dot-path of the compilation unit the declaration comes from.
    pub unit: Rc<String>,
}

impl Declaration {
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.unit, self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Usage {
    pub name: String,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct Scope {
    /// Nesting level; the root is 0 and every child is one deeper.
    pub depth: usize,
    /// Leading whitespace of the phrases that live directly in this scope.
    pub indent: usize,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    pub declarations: Vec<Declaration>,
    pub usages: Vec<Usage>,
}

impl Scope {
    pub fn new(depth: usize, indent: usize, parent: Option<ScopeId>) -> Self {
        Scope {
            depth,
            indent,
            parent,
            children: vec![],
            declarations: vec![],
            usages: vec![],
        }
    }

    /// Adds a declaration. A name the same unit already declared here is
    /// rejected and the first declaration stays. Other units may reuse the
    /// name; their declarations differ by dot-path.
    pub fn declare(&mut self, declaration: Declaration) -> Result<(), Error> {
        if let Some(previous) = self
            .declarations
            .iter()
            .find(|previous| previous.name == declaration.name && previous.unit == declaration.unit)
        {
            return Err(Error::new(
                ErrorImpl::DuplicateDeclaration {
                    name: declaration.name.clone(),
                    previous: previous.position.to_string(),
                },
                declaration.position,
            ));
        }

        self.declarations.push(declaration);
        Ok(())
    }

    pub fn get_declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|declaration| declaration.name == name)
    }

    /// Like [`Scope::get_declaration`], preferring the declaration made by
    /// `unit` when several units declared `name`.
    pub fn get_declaration_for(&self, name: &str, unit: &str) -> Option<&Declaration> {
        self.declarations
            .iter()
            .find(|declaration| declaration.name == name && declaration.unit.as_str() == unit)
            .or_else(|| self.get_declaration(name))
    }

    pub fn add_usage(&mut self, usage: Usage) {
        self.usages.push(usage);
    }
}

/// Every scope of a run. Index 0 is the root, shared by all files.
#[derive(Debug, Clone)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl Default for ScopeTree {
    fn default() -> Self {
        ScopeTree::new()
    }
}

#[allow(clippy::len_without_is_empty)]
impl ScopeTree {
    pub fn new() -> Self {
        ScopeTree {
            scopes: vec![Scope::new(0, 0, None)],
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn get_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.0]
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.get(id).parent
    }

    /// Creates a scope one level below `parent`.
    pub fn add_child(&mut self, parent: ScopeId, indent: usize) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        let depth = self.get(parent).depth + 1;

        self.scopes.push(Scope::new(depth, indent, Some(parent)));
        self.get_mut(parent).children.push(id);
        id
    }

    /// Adds a scope built outside the tree as the last child of `parent`,
    /// keeping its declarations.
    pub fn attach(&mut self, parent: ScopeId, mut scope: Scope) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        scope.depth = self.get(parent).depth + 1;
        scope.parent = Some(parent);

        self.scopes.push(scope);
        self.get_mut(parent).children.push(id);
        id
    }

    pub fn ids(&self) -> impl Iterator<Item = ScopeId> {
        (0..self.scopes.len()).map(ScopeId)
    }

    /// `id` followed by each of its ancestors up to the root.
    pub fn ancestors(&self, id: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(id), move |current| self.parent(*current))
    }

    /// Finds the declaration `name` refers to when `unit` uses it in `from`.
    /// Names are not qualified in source, so a global declared by another
    /// unit resolves too.
    pub fn lookup(&self, from: ScopeId, name: &str, unit: &str) -> Option<(ScopeId, &Declaration)> {
        self.ancestors(from).find_map(|id| {
            self.get(id)
                .get_declaration_for(name, unit)
                .map(|declaration| (id, declaration))
        })
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Renders the tree, one scope per block, children indented below their
    /// parent.
    pub fn dump(&self) -> String {
        self.to_string()
    }

    fn fmt_scope(&self, id: ScopeId, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scope = self.get(id);
        let pad = "  ".repeat(scope.depth);

        writeln!(f, "{}scope {} (depth {}, indent {})", pad, id, scope.depth, scope.indent)?;
        for declaration in &scope.declarations {
            writeln!(
                f,
                "{}  {} {}{} @ {}",
                pad,
                declaration.kind,
                declaration.qualified_name(),
                if declaration.raised { " (raised)" } else { "" },
                declaration.position
            )?;
        }
        for usage in &scope.usages {
            writeln!(f, "{}  use {} @ {}", pad, usage.name, usage.position)?;
        }
        for child in &scope.children {
            self.fmt_scope(*child, f)?;
        }
        Ok(())
    }
}

impl Display for ScopeTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_scope(self.root(), f)
    }
}

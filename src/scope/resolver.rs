use std::rc::Rc;

use log::debug;

use crate::{
    errors::{diagnostics::Diagnostics, errors::ErrorImpl},
    lexer::tokens::{Phrase, Token, TokenKind},
};

use super::scope::{Declaration, DeclarationKind, Scope, ScopeId, ScopeTree, Usage};

/// Walks the phrases of one compilation unit and grows the shared tree.
pub struct ScopeResolver<'a> {
    tree: &'a mut ScopeTree,
    diagnostics: &'a mut Diagnostics,
    unit: Rc<String>,
    current: ScopeId,
    /// Body of the function declared by the previous phrase, holding its
    /// parameters. It joins the tree only if the next phrase is deeper.
    pending_body: Option<Scope>,
}

impl<'a> ScopeResolver<'a> {
    pub fn new(tree: &'a mut ScopeTree, unit: Rc<String>, diagnostics: &'a mut Diagnostics) -> Self {
        let current = tree.root();
        ScopeResolver {
            tree,
            diagnostics,
            unit,
            current,
            pending_body: None,
        }
    }

    pub fn current(&self) -> ScopeId {
        self.current
    }

    pub fn resolve_phrases(&mut self, phrases: &[Phrase]) {
        for phrase in phrases {
            self.enter(phrase.depth);
            self.record(phrase);
        }

        debug!(
            "{}: {} phrases placed, tree has {} scopes",
            self.unit,
            phrases.len(),
            self.tree.len()
        );
    }

    /// Moves the current scope to where a phrase indented by `indent` lives.
    fn enter(&mut self, indent: usize) {
        let pending_body = self.pending_body.take();
        let current_indent = self.tree.get(self.current).indent;

        if indent > current_indent {
            let child = match pending_body {
                Some(mut body) => {
                    body.indent = indent;
                    self.tree.attach(self.current, body)
                }
                None => self.tree.add_child(self.current, indent),
            };
            debug!("push scope {} at indent {}", child, indent);
            self.current = child;
            return;
        }

        while self.tree.get(self.current).indent > indent {
            match self.tree.parent(self.current) {
                Some(parent) => {
                    debug!("pop scope {}", self.current);
                    self.current = parent;
                }
                None => break,
            }
        }

        if self.tree.get(self.current).indent < indent {
            // Dedented to a width no enclosing scope was opened at.
            debug!(
                "inconsistent dedent to {} in {}, opening a new scope",
                indent, self.unit
            );
            self.current = self.tree.add_child(self.current, indent);
        }
    }

    fn record(&mut self, phrase: &Phrase) {
        let tokens = &phrase.tokens;
        let function = tokens
            .iter()
            .position(|token| matches!(token.kind, TokenKind::Function | TokenKind::FunctionRaised));
        let mut parameters = vec![];

        let mut index = 0;
        while index < tokens.len() {
            let token = &tokens[index];

            if token.kind.is_declaration() {
                if let Some(target) = tokens.get(index + 1).filter(|next| next.kind == TokenKind::Identifier) {
                    let kind = match token.kind {
                        TokenKind::Function | TokenKind::FunctionRaised => DeclarationKind::Function,
                        TokenKind::Label => DeclarationKind::Label,
                        _ if function.is_some_and(|at| index < at) => DeclarationKind::Parameter,
                        _ => DeclarationKind::Variable,
                    };
                    let declaration = self.declaration(target, kind, token.kind.is_raised());

                    if kind == DeclarationKind::Parameter {
                        parameters.push(declaration);
                    } else {
                        self.declare(declaration);
                    }
                    index += 2;
                    continue;
                }
            } else if token.kind == TokenKind::Identifier && !Self::is_member(tokens, index) {
                self.tree.get_mut(self.current).add_usage(Usage {
                    name: token.value_or_empty().to_string(),
                    position: token.position.clone(),
                });
            }

            index += 1;
        }

        if function.is_some() {
            let current = self.tree.get(self.current);
            let mut body = Scope::new(current.depth + 1, current.indent, Some(self.current));
            for parameter in parameters {
                debug!("declare parameter {} of a pending body", parameter.name);
                if let Err(error) = body.declare(parameter) {
                    self.diagnostics.push_error(error);
                }
            }
            self.pending_body = Some(body);
        }
    }

    fn is_member(tokens: &[Token], index: usize) -> bool {
        index > 0 && tokens[index - 1].kind == TokenKind::Dot
    }

    fn declaration(&self, target: &Token, kind: DeclarationKind, raised: bool) -> Declaration {
        Declaration {
            name: target.value_or_empty().to_string(),
            kind,
            raised,
            position: target.position.clone(),
            unit: Rc::clone(&self.unit),
        }
    }

    /// Raised declarations belong to the parent of the current scope, or to
    /// the root when there is none.
    fn declare(&mut self, declaration: Declaration) {
        let owner = if declaration.raised {
            self.tree.parent(self.current).unwrap_or(self.current)
        } else {
            self.current
        };
        self.declare_in(owner, declaration);
    }

    fn declare_in(&mut self, owner: ScopeId, declaration: Declaration) {
        debug!("declare {} {} in {}", declaration.kind, declaration.name, owner);
        if let Err(error) = self.tree.get_mut(owner).declare(declaration) {
            self.diagnostics.push_error(error);
        }
    }
}

/// Places the phrases of one unit into `tree`, starting from the root.
pub fn build(tree: &mut ScopeTree, unit: Rc<String>, phrases: &[Phrase], diagnostics: &mut Diagnostics) {
    ScopeResolver::new(tree, unit, diagnostics).resolve_phrases(phrases);
}

/// Checks every recorded usage against its scope and the scope's ancestors.
/// Returns the number of names that did not resolve.
pub fn resolve(tree: &ScopeTree, diagnostics: &mut Diagnostics) -> usize {
    let mut unresolved = 0;

    for id in tree.ids() {
        for usage in &tree.get(id).usages {
            if tree.lookup(id, &usage.name, usage.position.file.as_str()).is_none() {
                diagnostics.push(
                    ErrorImpl::UndeclaredIdentifier {
                        name: usage.name.clone(),
                    },
                    usage.position.clone(),
                );
                unresolved += 1;
            }
        }
    }

    debug!("resolved usages, {} undeclared", unresolved);
    unresolved
}

//! Run driver for a whole compilation.

use std::{fs, path::Path, rc::Rc, time::Instant};

use log::{debug, info};

use crate::{
    errors::{diagnostics::Diagnostics, errors::ErrorImpl},
    lexer::{lexer::tokenize, tokens::Phrase},
    scope::{
        resolver::{build, resolve},
        scope::ScopeTree,
    },
    syntax::validator::validate,
    Position,
};

pub const SOURCE_EXTENSION: &str = ".scandi";

/// Configuration for a compilation run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Dump the scope tree after every file.
    pub debug: bool,
}

/// One source file after lexing: its dot-path and its phrases.
#[derive(Debug, Clone)]
pub struct CompilationUnit {
    pub name: Rc<String>,
    pub phrases: Vec<Phrase>,
}

/// Code generation backend. Given one unit and the finished scope tree it
/// returns the unit's target instructions in order.
pub trait Emitter {
    fn emit(&mut self, unit: &CompilationUnit, tree: &ScopeTree) -> Vec<String>;
}

/// Derives a compilation-unit name from a source path: separators become
/// dots, the source extension is dropped and so are leading dots.
///
/// `./app/main.scandi` becomes `app.main`.
pub fn dot_path(path: &str) -> String {
    let dotted = path.replace(['/', '\\'], ".");
    let dotted = dotted.strip_suffix(SOURCE_EXTENSION).unwrap_or(&dotted);
    dotted.trim_start_matches('.').to_string()
}

/// Drives the front end over any number of files, sharing one scope tree and
/// one diagnostics list between them.
pub struct Compiler {
    pub options: Options,
    pub tree: ScopeTree,
    pub diagnostics: Diagnostics,
    pub units: Vec<CompilationUnit>,
    resolved: bool,
}

impl Compiler {
    pub fn new(options: Options) -> Self {
        Compiler {
            options,
            tree: ScopeTree::new(),
            diagnostics: Diagnostics::new(),
            units: vec![],
            resolved: false,
        }
    }

    /// Reads and compiles one file. An unreadable file is reported and
    /// skipped so later files still run.
    pub fn compile_file(&mut self, path: &Path) -> bool {
        let display = path.to_string_lossy().to_string();

        match fs::read_to_string(path) {
            Ok(source) => self.compile_source(&dot_path(&display), &source),
            Err(error) => {
                self.diagnostics.push(
                    ErrorImpl::UnreadableSource {
                        path: display.clone(),
                        reason: error.to_string(),
                    },
                    Position::new(Rc::new(dot_path(&display)), 0, 0),
                );
                false
            }
        }
    }

    /// Compiles source text under the unit name `name`. Returns whether the
    /// file lexed and validated without errors; only then is it added to the
    /// scope tree.
    pub fn compile_source(&mut self, name: &str, source: &str) -> bool {
        let start = Instant::now();
        let name = Rc::new(name.to_string());
        let errors_before = self.diagnostics.error_count();

        let phrases = tokenize(Rc::clone(&name), source.lines(), &mut self.diagnostics);
        info!("{}: tokenized in {:?}", name, start.elapsed());

        let validate_start = Instant::now();
        let mut valid = true;
        for phrase in &phrases {
            valid &= validate(phrase, &mut self.diagnostics);
        }
        info!("{}: validated in {:?}", name, validate_start.elapsed());

        let clean = valid && self.diagnostics.error_count() == errors_before;
        if clean {
            let scope_start = Instant::now();
            build(&mut self.tree, Rc::clone(&name), &phrases, &mut self.diagnostics);
            info!("{}: scoped in {:?}", name, scope_start.elapsed());

            if self.options.debug {
                debug!("SCOPES OK\n{}", self.tree.dump());
            }
        } else {
            debug!("{}: skipping scopes, the file has errors", name);
        }

        self.units.push(CompilationUnit { name, phrases });
        self.resolved = false;
        clean
    }

    /// Checks every usage in the tree. Calling it again after more files
    /// were compiled replaces the undeclared identifiers reported before.
    pub fn resolve(&mut self) {
        if self.resolved {
            return;
        }

        let start = Instant::now();
        self.diagnostics
            .retain(|error| !matches!(error.get_impl(), ErrorImpl::UndeclaredIdentifier { .. }));
        resolve(&self.tree, &mut self.diagnostics);
        self.resolved = true;
        info!("resolved usages in {:?}", start.elapsed());
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// Resolves usages and, if the run is free of errors, emits every unit in
    /// order. Returns `None` when any error was recorded.
    pub fn finish(&mut self, emitter: &mut dyn Emitter) -> Option<Vec<String>> {
        self.resolve();

        if self.has_errors() {
            info!(
                "{} errors, {} warnings: nothing emitted",
                self.diagnostics.error_count(),
                self.diagnostics.warning_count()
            );
            return None;
        }

        let mut listing = vec![];
        for unit in &self.units {
            listing.extend(emitter.emit(unit, &self.tree));
        }
        Some(listing)
    }
}

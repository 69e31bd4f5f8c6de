use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::{
    runtime::{
        error::{ErrorKind, RaisedError, RtResult},
        interpreter::{BUILTINS_MODULE, CachedModule, Interpreter, Scope},
        object::{FunctionDef, Object, ObjectId},
    },
    syntax::{expression::Definition, parse_module},
};

/// File extension of module sources on the search path.
pub const MODULE_EXTENSION: &str = "emb";

pub fn hash_bytes(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let result = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&result);
    out
}

fn import_error(message: impl Into<String>) -> RaisedError {
    RaisedError::new(ErrorKind::ImportError, message)
}

fn is_module_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        }
        _ => false,
    }
}

impl Interpreter {
    /// Imports `name`, returning a new reference to the module.
    ///
    /// A cached module is reused while its source digest is unchanged and
    /// reloaded once the file on disk differs.
    pub(crate) fn import_module(&mut self, name: &str) -> RtResult<ObjectId> {
        if name == BUILTINS_MODULE {
            return Ok(self.builtins);
        }
        if !is_module_name(name) {
            return Err(import_error(format!("invalid module name '{}'", name)));
        }

        let (path, source) = match self.locate_module(name) {
            Ok(found) => found,
            Err(err) => match self.cached_module(name) {
                Some(id) => return Ok(id),
                None => return Err(err),
            },
        };
        let digest = hash_bytes(source.as_bytes());

        if let Some(cached) = self.modules.get(name) {
            if cached.digest == digest {
                let id = cached.id;
                self.heap.incref(id);
                debug!(module = name, "module cache hit");
                return Ok(id);
            }
            debug!(module = name, "module source changed, reloading");
        }
        if let Some(stale) = self.modules.remove(name) {
            self.heap.decref(stale.id);
        }

        self.load_module(name, &path, &source, digest)
    }

    fn cached_module(&mut self, name: &str) -> Option<ObjectId> {
        let id = self.modules.get(name)?.id;
        self.heap.incref(id);
        Some(id)
    }

    fn locate_module(&self, name: &str) -> RtResult<(PathBuf, String)> {
        let file_name = format!("{}.{}", name, MODULE_EXTENSION);
        for entry in &self.search_path {
            let dir = if entry.is_empty() {
                Path::new(".")
            } else {
                Path::new(entry)
            };
            let path = dir.join(&file_name);
            if !path.is_file() {
                continue;
            }
            let source = fs::read_to_string(&path).map_err(|err| {
                import_error(format!("cannot read {}: {}", path.display(), err))
            })?;
            return Ok((path, source));
        }
        Err(import_error(format!("no module named '{}'", name)))
    }

    fn load_module(
        &mut self,
        name: &str,
        path: &Path,
        source: &str,
        digest: [u8; 32],
    ) -> RtResult<ObjectId> {
        let definitions = parse_module(source).map_err(|err| {
            RaisedError::new(
                ErrorKind::SyntaxError,
                format!("{}:{}", path.display(), err),
            )
        })?;

        let module_name: Rc<str> = Rc::from(name);
        let module = self.heap.alloc(Object::Module {
            name: Rc::clone(&module_name),
            namespace: BTreeMap::new(),
        })?;
        // Registered before the bodies run so bindings can call functions
        // defined earlier in the same file.
        self.modules
            .insert(name.to_string(), CachedModule { id: module, digest });

        for definition in &definitions {
            if let Err(err) = self.define(module, &module_name, definition) {
                self.modules.remove(name);
                self.heap.decref(module);
                return Err(err);
            }
        }

        self.heap.incref(module);
        debug!(
            module = name,
            path = %path.display(),
            definitions = definitions.len(),
            "module loaded"
        );
        Ok(module)
    }

    fn define(
        &mut self,
        module: ObjectId,
        module_name: &Rc<str>,
        definition: &Definition,
    ) -> RtResult<()> {
        let value = match definition {
            Definition::Function {
                name, params, body, ..
            } => self.heap.alloc(Object::Function(Rc::new(FunctionDef {
                name: name.clone(),
                params: params.clone(),
                body: body.clone(),
                module: Rc::clone(module_name),
            })))?,
            Definition::Binding { value, line, .. } => {
                let scope = Scope {
                    globals: Some(module),
                    locals: None,
                };
                self.eval(value, scope).map_err(|err| {
                    RaisedError::new(
                        err.kind,
                        format!("{} (in module '{}', line {})", err.message, module_name, line),
                    )
                })?
            }
        };
        self.store_name(module, definition.name(), value)
    }
}

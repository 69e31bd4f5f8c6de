use std::{collections::BTreeMap, rc::Rc};

use tracing::debug;

use crate::{
    runtime::{
        builtins::BuiltinFunction,
        error::{ErrorKind, RaisedError, RtResult},
        interpreter::{Interpreter, MAX_CALL_DEPTH, MAX_EVAL_DEPTH, Scope},
        object::{FunctionDef, Object, ObjectId, ObjectKind},
        operators::{self, CompareOp, Computed},
    },
    syntax::{
        expression::{Expression, InfixOperator, PrefixOperator},
        parse_snippet,
    },
};

enum Callable {
    Builtin(&'static BuiltinFunction),
    Function(Rc<FunctionDef>),
}

enum Indexed {
    Existing(ObjectId),
    Char(String),
}

impl Interpreter {
    pub(crate) fn evaluate_snippet(
        &mut self,
        snippet: &str,
        globals: ObjectId,
        locals: ObjectId,
    ) -> RtResult<ObjectId> {
        for (label, id) in [("globals", globals), ("locals", locals)] {
            let kind = self.heap.kind(id);
            if kind != ObjectKind::Dict {
                return Err(RaisedError::type_error(format!(
                    "{} must be a dict, not '{}'",
                    label, kind
                )));
            }
        }

        let expression = parse_snippet(snippet)
            .map_err(|err| RaisedError::new(ErrorKind::SyntaxError, err.to_string()))?;
        debug!(snippet, "evaluating snippet");

        self.eval(
            &expression,
            Scope {
                globals: Some(globals),
                locals: Some(locals),
            },
        )
    }

    /// Evaluates `expression`; the returned id carries a new reference.
    pub(crate) fn eval(&mut self, expression: &Expression, scope: Scope) -> RtResult<ObjectId> {
        if self.nesting >= MAX_EVAL_DEPTH {
            return Err(RaisedError::new(
                ErrorKind::RecursionError,
                format!("maximum expression nesting of {} exceeded", MAX_EVAL_DEPTH),
            ));
        }
        self.nesting += 1;
        let result = self.eval_expression(expression, scope);
        self.nesting -= 1;
        result
    }

    fn eval_expression(&mut self, expression: &Expression, scope: Scope) -> RtResult<ObjectId> {
        match expression {
            Expression::Integer { value, .. } => self.heap.alloc(Object::Int(*value)),
            Expression::String { value, .. } => {
                self.heap.alloc(Object::Str(Rc::from(value.as_str())))
            }
            Expression::Boolean { value, .. } => Ok(self.bool_obj(*value)),
            Expression::None { .. } => Ok(self.none()),
            Expression::Identifier { name, .. } => self.lookup_name(name, scope),
            Expression::List { elements, .. } => {
                let items = self.eval_all(elements, scope)?;
                self.heap
                    .alloc(Object::List(items.into_iter().map(Some).collect()))
            }
            Expression::Prefix {
                operator, right, ..
            } => {
                let operand = self.eval(right, scope)?;
                let result = match operator {
                    PrefixOperator::Negate => operators::negate(&self.heap, operand)
                        .and_then(|computed| self.materialize(computed)),
                    PrefixOperator::Not => Ok(self.bool_obj(!self.is_true(operand))),
                };
                self.heap.decref(operand);
                result
            }
            Expression::Infix {
                left,
                operator: operator @ (InfixOperator::And | InfixOperator::Or),
                right,
                ..
            } => {
                let lhs = self.eval(left, scope)?;
                // `a or b` keeps a truthy `a`; `a and b` keeps a falsy one.
                if self.is_true(lhs) == (*operator == InfixOperator::Or) {
                    return Ok(lhs);
                }
                self.heap.decref(lhs);
                self.eval(right, scope)
            }
            Expression::Infix {
                left,
                operator,
                right,
                ..
            } => {
                let lhs = self.eval(left, scope)?;
                let rhs = match self.eval(right, scope) {
                    Ok(rhs) => rhs,
                    Err(err) => {
                        self.heap.decref(lhs);
                        return Err(err);
                    }
                };
                let result = self.binary_operation(*operator, lhs, rhs);
                self.heap.decref(lhs);
                self.heap.decref(rhs);
                result
            }
            Expression::Call {
                function,
                arguments,
                ..
            } => {
                let callee = self.eval(function, scope)?;
                let args = match self.eval_all(arguments, scope) {
                    Ok(args) => args,
                    Err(err) => {
                        self.heap.decref(callee);
                        return Err(err);
                    }
                };
                let result = self.call_object(callee, &args);
                self.release_all(&args);
                self.heap.decref(callee);
                result
            }
            Expression::Attribute { object, name, .. } => {
                let target = self.eval(object, scope)?;
                let result = self.get_attribute(target, name);
                self.heap.decref(target);
                result
            }
            Expression::Index { left, index, .. } => {
                let container = self.eval(left, scope)?;
                let key = match self.eval(index, scope) {
                    Ok(key) => key,
                    Err(err) => {
                        self.heap.decref(container);
                        return Err(err);
                    }
                };
                let result = self.index_object(container, key);
                self.heap.decref(container);
                self.heap.decref(key);
                result
            }
        }
    }

    fn eval_all(&mut self, expressions: &[Expression], scope: Scope) -> RtResult<Vec<ObjectId>> {
        let mut values = Vec::with_capacity(expressions.len());
        for expression in expressions {
            match self.eval(expression, scope) {
                Ok(value) => values.push(value),
                Err(err) => {
                    self.release_all(&values);
                    return Err(err);
                }
            }
        }
        Ok(values)
    }

    fn release_all(&mut self, ids: &[ObjectId]) {
        for id in ids {
            self.heap.decref(*id);
        }
    }

    fn lookup_name(&mut self, name: &str, scope: Scope) -> RtResult<ObjectId> {
        let tables = [scope.locals, scope.globals, Some(self.builtins)];
        for table in tables.into_iter().flatten() {
            let found = self
                .heap
                .get(table)
                .namespace()
                .and_then(|namespace| namespace.get(name))
                .copied();
            if let Some(id) = found {
                self.heap.incref(id);
                return Ok(id);
            }
        }
        Err(RaisedError::new(
            ErrorKind::NameError,
            format!("name '{}' is not defined", name),
        ))
    }

    fn binary_operation(
        &mut self,
        operator: InfixOperator,
        lhs: ObjectId,
        rhs: ObjectId,
    ) -> RtResult<ObjectId> {
        if let Some(op) = CompareOp::from_infix(operator) {
            let value = operators::compare(&self.heap, op, lhs, rhs)?;
            return Ok(self.bool_obj(value));
        }
        let computed = operators::arithmetic(&self.heap, operator, lhs, rhs)?;
        self.materialize(computed)
    }

    /// Places an operator result on the heap.
    pub(crate) fn materialize(&mut self, computed: Computed) -> RtResult<ObjectId> {
        match computed {
            Computed::Int(value) => self.heap.alloc(Object::Int(value)),
            Computed::Str(value) => self.heap.alloc(Object::Str(Rc::from(value))),
            Computed::List(items) => {
                for item in items.iter().flatten() {
                    self.heap.incref(*item);
                }
                self.heap.alloc(Object::List(items))
            }
        }
    }

    pub(crate) fn call_object(&mut self, callee: ObjectId, args: &[ObjectId]) -> RtResult<ObjectId> {
        let callable = match self.heap.get(callee) {
            Object::Builtin(builtin) => Callable::Builtin(*builtin),
            Object::Function(def) => Callable::Function(Rc::clone(def)),
            other => {
                return Err(RaisedError::type_error(format!(
                    "'{}' object is not callable",
                    other.kind()
                )));
            }
        };

        match callable {
            Callable::Builtin(builtin) => (builtin.func)(self, args),
            Callable::Function(def) => self.call_function(&def, args),
        }
    }

    fn call_function(&mut self, def: &FunctionDef, args: &[ObjectId]) -> RtResult<ObjectId> {
        if args.len() != def.params.len() {
            return Err(RaisedError::type_error(format!(
                "{}() takes {} argument(s) but {} were given",
                def.name,
                def.params.len(),
                args.len()
            )));
        }
        if self.depth >= MAX_CALL_DEPTH {
            return Err(RaisedError::new(
                ErrorKind::RecursionError,
                format!("maximum call depth of {} exceeded", MAX_CALL_DEPTH),
            ));
        }
        let globals = self
            .modules
            .get(&*def.module)
            .map(|module| module.id)
            .ok_or_else(|| {
                RaisedError::new(
                    ErrorKind::NameError,
                    format!("module '{}' is no longer loaded", def.module),
                )
            })?;

        let mut frame = BTreeMap::new();
        for (param, arg) in def.params.iter().zip(args) {
            self.heap.incref(*arg);
            frame.insert(param.clone(), *arg);
        }
        let locals = self.heap.alloc(Object::Dict(frame))?;
        self.heap.incref(globals);

        self.depth += 1;
        let result = self.eval(
            &def.body,
            Scope {
                globals: Some(globals),
                locals: Some(locals),
            },
        );
        self.depth -= 1;

        self.heap.decref(locals);
        self.heap.decref(globals);
        result
    }

    pub(crate) fn get_attribute(&mut self, target: ObjectId, name: &str) -> RtResult<ObjectId> {
        let found = match self.heap.get(target) {
            Object::Module {
                name: module,
                namespace,
            } => namespace.get(name).copied().ok_or_else(|| {
                RaisedError::new(
                    ErrorKind::AttributeError,
                    format!("module '{}' has no attribute '{}'", module, name),
                )
            })?,
            other => {
                return Err(RaisedError::new(
                    ErrorKind::AttributeError,
                    format!("'{}' object has no attribute '{}'", other.kind(), name),
                ));
            }
        };
        self.heap.incref(found);
        Ok(found)
    }

    fn index_object(&mut self, container: ObjectId, key: ObjectId) -> RtResult<ObjectId> {
        let indexed = match (self.heap.get(container), self.heap.get(key)) {
            (Object::List(items), Object::Int(index)) => {
                let slot = normalize_index(*index, items.len()).ok_or_else(|| {
                    RaisedError::index_error(format!("list index {} out of range", index))
                })?;
                let item = items[slot].ok_or_else(|| {
                    RaisedError::value_error(format!("list slot {} is unset", slot))
                })?;
                Indexed::Existing(item)
            }
            (Object::Str(value), Object::Int(index)) => {
                let chars: Vec<char> = value.chars().collect();
                let slot = normalize_index(*index, chars.len()).ok_or_else(|| {
                    RaisedError::index_error(format!("string index {} out of range", index))
                })?;
                Indexed::Char(chars[slot].to_string())
            }
            (Object::Dict(entries), Object::Str(name)) => {
                let item = entries.get(&**name).copied().ok_or_else(|| {
                    RaisedError::new(ErrorKind::KeyError, format!("'{}'", name))
                })?;
                Indexed::Existing(item)
            }
            (Object::List(_) | Object::Str(_), other) => {
                return Err(RaisedError::type_error(format!(
                    "indices must be integers, not '{}'",
                    other.kind()
                )));
            }
            (Object::Dict(_), other) => {
                return Err(RaisedError::type_error(format!(
                    "dict keys must be strings, not '{}'",
                    other.kind()
                )));
            }
            (other, _) => {
                return Err(RaisedError::type_error(format!(
                    "'{}' object is not subscriptable",
                    other.kind()
                )));
            }
        };

        match indexed {
            Indexed::Existing(id) => {
                self.heap.incref(id);
                Ok(id)
            }
            Indexed::Char(value) => self.heap.alloc(Object::Str(Rc::from(value))),
        }
    }
}

/// Resolves a possibly negative index against `len`.
fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let index = if index < 0 { index + len } else { index };
    if (0..len).contains(&index) {
        usize::try_from(index).ok()
    } else {
        None
    }
}

pub mod emitter;
pub mod generics;
pub mod literal;
pub mod naming;
pub mod node;
pub mod walker;

use crate::codegen::literal::{DeclarationLiterals, LiteralRenderer};
use crate::codegen::naming::{first_lower, simple_name, UniqueNameGenerator};
use crate::codegen::walker::GraphWalker;
use crate::error::AccessError;
use crate::model::introspect::Introspector;
use crate::model::value::Value;
use crate::settings::GenCodeRequest;

/// Produces the declaration-style fragment for one root value.
///
/// A generator is single-use state holder for one run: the walker's node
/// pool and name allocator live only for the duration of `gen_code`.
pub struct ObjectCodeGenerator<'a> {
    root: &'a Value,
    types: &'a dyn Introspector,
    literals: &'a dyn LiteralRenderer,
    request: &'a GenCodeRequest,
}

impl<'a> ObjectCodeGenerator<'a> {
    pub fn new(root: &'a Value, types: &'a dyn Introspector, request: &'a GenCodeRequest) -> Self {
        ObjectCodeGenerator {
            root,
            types,
            literals: &DeclarationLiterals,
            request,
        }
    }

    /// Swap in a different literal renderer.
    pub fn with_literals(mut self, literals: &'a dyn LiteralRenderer) -> Self {
        self.literals = literals;
        self
    }

    pub fn gen_code(&self) -> Result<String, AccessError> {
        let settings = &self.request.settings;
        let root_name = self.request.variable_name.as_deref().unwrap_or("root");
        let mut walker = GraphWalker::new(self.types, self.literals, settings, root_name);
        let root_code = walker.visit(
            self.root,
            0,
            self.request.root_type_hint(),
            self.request.variable_name.as_deref(),
        )?;

        let out = emitter::emit(walker.into_nodes(), settings.use_base_classes);
        if !out.is_empty() {
            return Ok(out);
        }

        let type_name = match self.root {
            Value::Null => "Object".to_string(),
            Value::Scalar(s) => s.type_name(),
            Value::Ref(id) => simple_name(&self.types.type_name(*id)),
        };
        let variable_name = match &self.request.variable_name {
            Some(name) => name.clone(),
            None => UniqueNameGenerator::new().create_unique_name(&first_lower(&type_name)),
        };
        Ok(format!("{} {} = {};", type_name, variable_name, root_code))
    }
}

//! Immutable name-to-binding registry built at start-up.

use crate::tool_registry::{
    domain::{ToolDescriptor, ToolName, ToolRegistryError, ToolRegistryResult, ToolSide},
    ports::{ToolBinding, ToolDeclaration, ToolModule},
};
use serde_json::Value;
use std::collections::HashMap;

/// Registered tools in registration order.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDeclaration>,
    index: HashMap<ToolName, usize>,
}

impl ToolRegistry {
    /// Builds the registry from tool modules, in module order.
    ///
    /// The same module set always yields the same descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRegistryError::DuplicateToolName`] when two declarations
    /// share a name, and validation errors for bad endpoints or mismatched
    /// bindings.
    pub fn discover(modules: &[&dyn ToolModule]) -> ToolRegistryResult<Self> {
        let mut registry = Self::default();
        for module in modules {
            let declarations = module.tools()?;
            tracing::debug!(
                module = module.module_name(),
                count = declarations.len(),
                "registering tools"
            );
            for declaration in declarations {
                registry.register(declaration)?;
            }
        }
        tracing::info!(tools = registry.len(), "tool registry built");
        Ok(registry)
    }

    fn register(&mut self, declaration: ToolDeclaration) -> ToolRegistryResult<()> {
        let descriptor = declaration.descriptor();
        descriptor.validate()?;
        let side_matches = matches!(
            (declaration.binding(), descriptor.side()),
            (ToolBinding::Bridge, ToolSide::Server) | (ToolBinding::Local(_), ToolSide::Client)
        );
        if !side_matches {
            return Err(ToolRegistryError::BindingMismatch(descriptor.name().clone()));
        }
        let name = descriptor.name().clone();
        if self.index.contains_key(&name) {
            return Err(ToolRegistryError::DuplicateToolName(name));
        }
        self.index.insert(name, self.tools.len());
        self.tools.push(declaration);
        Ok(())
    }

    /// Returns all descriptors in registration order.
    #[must_use]
    pub fn list(&self) -> Vec<&ToolDescriptor> {
        self.tools.iter().map(ToolDeclaration::descriptor).collect()
    }

    /// Returns the descriptors of tools running on `side`.
    #[must_use]
    pub fn list_by_side(&self, side: ToolSide) -> Vec<&ToolDescriptor> {
        self.tools
            .iter()
            .map(ToolDeclaration::descriptor)
            .filter(|descriptor| descriptor.side() == side)
            .collect()
    }

    /// Looks up a tool by name.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRegistryError::ToolNotFound`] when nothing is registered
    /// under `name`.
    pub fn resolve(&self, name: &str) -> ToolRegistryResult<&ToolDeclaration> {
        let not_found = || ToolRegistryError::ToolNotFound(name.to_owned());
        let tool_name = ToolName::new(name).map_err(|_| not_found())?;
        self.index
            .get(&tool_name)
            .and_then(|position| self.tools.get(*position))
            .ok_or_else(not_found)
    }

    /// Describes every tool for agent listings.
    #[must_use]
    pub fn describe(&self) -> Vec<Value> {
        self.list().into_iter().map(ToolDescriptor::to_json).collect()
    }

    /// Returns the number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns whether no tools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

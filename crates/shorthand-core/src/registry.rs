//! The ordered set of templates an interpreter resolves against.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::template::CommandTemplate;
use crate::{Error, Result};

/// Identity of a template: its position in the [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TemplateId(usize);

impl TemplateId {
    /// Position in registration order.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Templates in registration order.
///
/// Built once before any input is resolved, then shared read-only.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    templates: Vec<CommandTemplate>,
    paths: HashSet<String>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from templates, rejecting duplicate paths.
    pub fn from_templates(templates: impl IntoIterator<Item = CommandTemplate>) -> Result<Self> {
        let mut registry = Self::new();
        for template in templates {
            registry.add(template)?;
        }
        Ok(registry)
    }

    /// Register a template and return its identity.
    pub fn add(&mut self, template: CommandTemplate) -> Result<TemplateId> {
        if !self.paths.insert(template.path().to_string()) {
            return Err(Error::DuplicateName {
                kind: "command",
                name: template.path().to_string(),
                path: template.path().to_string(),
            });
        }
        let id = TemplateId(self.templates.len());
        self.templates.push(template);
        Ok(id)
    }

    /// Look up a template by identity.
    pub fn get(&self, id: TemplateId) -> Option<&CommandTemplate> {
        self.templates.get(id.0)
    }

    /// Iterate templates with their identities, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (TemplateId, &CommandTemplate)> {
        self.templates
            .iter()
            .enumerate()
            .map(|(index, template)| (TemplateId(index), template))
    }

    /// Identities of every template.
    pub fn ids(&self) -> impl Iterator<Item = TemplateId> + '_ {
        (0..self.templates.len()).map(TemplateId)
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether no template is registered.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn template(path: &str) -> CommandTemplate {
        CommandTemplate::builder(path).build().unwrap()
    }

    #[test]
    fn test_ids_follow_registration_order() {
        let mut registry = Registry::new();
        let first = registry.add(template("prompt")).unwrap();
        let second = registry.add(template("exit")).unwrap();

        assert_eq!(first.index(), 0);
        assert_eq!(second.index(), 1);
        assert_eq!(registry.get(second).unwrap().path(), "exit");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec![first, second]);
    }

    #[test]
    fn test_duplicate_paths_are_rejected() {
        // Given: two templates whose paths differ only in spacing
        let result = Registry::from_templates([template("user  list"), template("user list")]);

        // Then: the second is a duplicate
        assert!(matches!(
            result,
            Err(Error::DuplicateName { kind: "command", .. })
        ));
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert!(registry.get(TemplateId(0)).is_none());
        assert_eq!(registry.iter().count(), 0);
    }
}

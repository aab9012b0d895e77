//! Named bundles of default formatting and the registry that holds them.

use crate::error::OptionsError;
use crate::format::{
    ColumnFormat, GroupingFormat, HeadingFormat, PageFormat, TableFormat, TextFormat,
};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Default settings for the six option categories.
///
/// A template is frozen once registered: the registry hands out
/// `Arc<Template>` and resolution only ever clones out of it.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Template {
    #[serde(skip)]
    name: String,
    pub page: PageFormat,
    pub text: TextFormat,
    pub table: TableFormat,
    pub column: ColumnFormat,
    pub heading: HeadingFormat,
    pub grouping: GroupingFormat,
}

impl Template {
    /// An empty, unregistered template.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Builds a template with `configure` and registers it globally.
    ///
    /// ```ignore
    /// Template::create("landscape", |t| {
    ///     t.page.layout = Some(Orientation::Landscape);
    /// })?;
    /// ```
    pub fn create<F>(name: impl Into<String>, configure: F) -> Result<Arc<Template>, OptionsError>
    where
        F: FnOnce(&mut Template),
    {
        let mut template = Template::new(name);
        configure(&mut template);
        TemplateRegistry::global().register(template)
    }

    /// Parses a template from an option tree such as
    /// `{"page": {"size": "LETTER"}, "table": {"show_headings": false}}`.
    pub fn from_json(name: impl Into<String>, value: serde_json::Value) -> Result<Template, OptionsError> {
        let mut template: Template = serde_json::from_value(value)?;
        template.name = name.into();
        Ok(template)
    }

    /// Looks a template up in the global registry.
    pub fn find(name: &str) -> Result<Arc<Template>, OptionsError> {
        TemplateRegistry::global()
            .get(name)?
            .ok_or_else(|| OptionsError::UnknownTemplate(name.to_string()))
    }
}

static GLOBAL_REGISTRY: Lazy<TemplateRegistry> = Lazy::new(TemplateRegistry::new);

/// A write-once-per-name store of templates.
///
/// Most callers use [`TemplateRegistry::global`]; separate instances are
/// useful for isolated resolution.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: RwLock<HashMap<String, Arc<Template>>>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self {
            templates: RwLock::new(HashMap::new()),
        }
    }

    pub fn global() -> &'static TemplateRegistry {
        &GLOBAL_REGISTRY
    }

    /// Registers `template` under its own name.
    ///
    /// # Errors
    ///
    /// Returns `OptionsError::DuplicateTemplate` if the name is taken.
    pub fn register(&self, template: Template) -> Result<Arc<Template>, OptionsError> {
        let mut templates = self
            .templates
            .write()
            .map_err(|_| OptionsError::RegistryPoisoned)?;
        if templates.contains_key(template.name()) {
            return Err(OptionsError::DuplicateTemplate(template.name().to_string()));
        }
        let name = template.name().to_string();
        let template = Arc::new(template);
        templates.insert(name.clone(), Arc::clone(&template));
        log::debug!("Registered template '{}'", name);
        Ok(template)
    }

    pub fn get(&self, name: &str) -> Result<Option<Arc<Template>>, OptionsError> {
        let templates = self
            .templates
            .read()
            .map_err(|_| OptionsError::RegistryPoisoned)?;
        Ok(templates.get(name).cloned())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates
            .read()
            .map(|t| t.contains_key(name))
            .unwrap_or(false)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .templates
            .read()
            .map(|t| t.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tally_style::{Justification, Orientation, PageSize};

    #[test]
    fn test_register_and_get() {
        let registry = TemplateRegistry::new();
        let mut template = Template::new("plain");
        template.table.show_headings = Some(false);
        registry.register(template).unwrap();

        let found = registry.get("plain").unwrap().unwrap();
        assert_eq!(found.table.show_headings, Some(false));
        assert!(registry.contains("plain"));
        assert!(registry.get("other").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let registry = TemplateRegistry::new();
        registry.register(Template::new("dup")).unwrap();
        let err = registry.register(Template::new("dup")).unwrap_err();
        assert!(matches!(err, OptionsError::DuplicateTemplate(name) if name == "dup"));
    }

    #[test]
    fn test_create_registers_globally() {
        let template = Template::create("template-unit-create", |t| {
            t.page.layout = Some(Orientation::Landscape);
        })
        .unwrap();
        assert_eq!(template.name(), "template-unit-create");
        let found = Template::find("template-unit-create").unwrap();
        assert_eq!(found.page.layout, Some(Orientation::Landscape));
        assert!(TemplateRegistry::global()
            .names()
            .contains(&"template-unit-create".to_string()));
    }

    #[test]
    fn test_find_unknown() {
        assert!(matches!(
            Template::find("template-unit-missing"),
            Err(OptionsError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn test_from_json() {
        let template = Template::from_json(
            "json",
            serde_json::json!({
                "page": { "size": "LETTER", "layout": "landscape" },
                "column": { "alignment": "center", "width": 50 },
                "heading": { "alignment": "right", "bold": false, "title": "Test" },
                "grouping": { "style": "separated" }
            }),
        )
        .unwrap();
        assert_eq!(template.name(), "json");
        assert_eq!(template.page.size, Some(PageSize::Letter));
        assert_eq!(template.column.alignment, Some(Justification::Center));
        assert_eq!(template.column.width, Some(50.0));
        assert_eq!(template.heading.title.as_deref(), Some("Test"));
        assert_eq!(template.grouping.style.as_deref(), Some("separated"));
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        let result = Template::from_json("bad", serde_json::json!({ "page": { "size": "huge" } }));
        assert!(matches!(result, Err(OptionsError::Json(_))));
    }
}

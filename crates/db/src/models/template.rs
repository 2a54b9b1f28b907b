//! Card type template catalog model.

use serde::{Deserialize, Serialize};
use worldweaver_core::field_schema::FieldSchema;
use worldweaver_core::schema_builder::CardTypeDraft;
use worldweaver_core::types::EntityId;

/// Category shown for templates that do not set one.
pub const DEFAULT_TEMPLATE_CATEGORY: &str = "General";

/// A row from the `card_type_templates` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardTypeTemplate {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    pub color: String,
    pub category: Option<String>,
    pub schema: Vec<FieldSchema>,
}

impl CardTypeTemplate {
    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_TEMPLATE_CATEGORY)
    }
}

impl From<CardTypeTemplate> for CardTypeDraft {
    fn from(template: CardTypeTemplate) -> Self {
        Self {
            name: template.name,
            description: template.description,
            icon: template.icon,
            color: template.color,
            schema: template.schema,
        }
    }
}

/// Templates grouped by category, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateGroup {
    pub category: String,
    pub templates: Vec<CardTypeTemplate>,
}

/// Group an ordered template list by category, keeping first-seen order.
pub fn group_by_category(templates: Vec<CardTypeTemplate>) -> Vec<TemplateGroup> {
    let mut groups: Vec<TemplateGroup> = Vec::new();
    for template in templates {
        let category = template.category().to_string();
        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.templates.push(template),
            None => groups.push(TemplateGroup {
                category,
                templates: vec![template],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn template(name: &str, category: Option<&str>) -> CardTypeTemplate {
        CardTypeTemplate {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            icon: "user".into(),
            color: "#3B82F6".into(),
            category: category.map(str::to_string),
            schema: vec![],
        }
    }

    #[test]
    fn groups_keep_catalog_order() {
        let groups = group_by_category(vec![
            template("Character", Some("People")),
            template("Item", None),
            template("Faction", Some("People")),
        ]);
        let summary: Vec<(&str, usize)> = groups
            .iter()
            .map(|g| (g.category.as_str(), g.templates.len()))
            .collect();
        assert_eq!(summary, [("People", 2), ("General", 1)]);
    }
}

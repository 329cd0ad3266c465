//! Sidebar navigation model.
//!
//! Items are an explicit tagged union: a `leaf` links somewhere directly, a
//! `group` is a titled collapsible list of links. The shape is fixed when the
//! configuration is parsed, so rendering never inspects optional fields.

mod breadcrumb;
mod sidebar;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub use breadcrumb::{Breadcrumb, DASHBOARD_ROOT, breadcrumbs};
pub use sidebar::{Sidebar, SidebarEntry};

fn default_group_url() -> String {
    "#".to_string()
}

/// Directly linked menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLeaf {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Link inside a group. Accepts `name` as a spelling of `title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    #[serde(alias = "name")]
    pub title: String,
    pub url: String,
}

/// Collapsible group of links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavGroup {
    pub title: String,
    #[serde(default = "default_group_url")]
    pub url: String,
    #[serde(default)]
    pub icon: Option<String>,
    /// Whether the group starts expanded.
    #[serde(default, alias = "is_active")]
    pub default_open: bool,
    #[serde(default)]
    pub items: Vec<NavLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NavItem {
    Leaf(NavLeaf),
    Group(NavGroup),
}

impl NavItem {
    pub fn label(&self) -> &str {
        match self {
            NavItem::Leaf(leaf) => &leaf.name,
            NavItem::Group(group) => &group.title,
        }
    }

    pub fn icon(&self) -> Option<&str> {
        match self {
            NavItem::Leaf(leaf) => leaf.icon.as_deref(),
            NavItem::Group(group) => group.icon.as_deref(),
        }
    }
}

/// How a section renders its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NavVariant {
    /// Flat list of leaves.
    Menu,
    /// Groups only.
    #[serde(alias = "collaps")]
    Collapsible,
    /// Leaves and groups mixed.
    #[default]
    Compact,
}

impl NavVariant {
    pub fn name(&self) -> &'static str {
        match self {
            NavVariant::Menu => "menu",
            NavVariant::Collapsible => "collapsible",
            NavVariant::Compact => "compact",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavSection {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub variant: NavVariant,
    #[serde(default)]
    pub items: Vec<NavItem>,
}

impl NavSection {
    /// Checks items against the section variant.
    ///
    /// `menu` sections take leaves only and `collapsible` sections groups only.
    /// In `compact` sections a group without links renders as nothing, so it
    /// is dropped here.
    pub fn normalize(&mut self) -> Result<(), String> {
        let section = self.label.clone().unwrap_or_default();
        match self.variant {
            NavVariant::Menu => {
                if let Some(item) = self.items.iter().find(|i| matches!(i, NavItem::Group(_))) {
                    return Err(format!(
                        "section '{}': menu variant cannot hold group '{}'",
                        section,
                        item.label()
                    ));
                }
            }
            NavVariant::Collapsible => {
                if let Some(item) = self.items.iter().find(|i| matches!(i, NavItem::Leaf(_))) {
                    return Err(format!(
                        "section '{}': collapsible variant cannot hold leaf '{}'",
                        section,
                        item.label()
                    ));
                }
            }
            NavVariant::Compact => {
                self.items.retain(|item| match item {
                    NavItem::Group(group) if group.items.is_empty() => {
                        warn!(
                            section = section.as_str(),
                            "dropping empty group '{}' from compact section", group.title
                        );
                        false
                    }
                    _ => true,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Doc {
        sections: Vec<NavSection>,
    }

    fn parse(src: &str) -> Vec<NavSection> {
        toml::from_str::<Doc>(src).unwrap().sections
    }

    #[test]
    fn items_are_discriminated_by_kind() {
        let sections = parse(
            r##"
            [[sections]]
            label = "Side Menu"
            variant = "compact"

            [[sections.items]]
            kind = "leaf"
            name = "Dashboard"
            url = "/dashboard"
            icon = "home"

            [[sections.items]]
            kind = "group"
            title = "Data Master"
            is_active = true
            items = [
                { name = "Categories", url = "/dashboard/categories" },
                { title = "Users", url = "/dashboard/users" },
            ]
            "##,
        );

        let items = &sections[0].items;
        assert!(matches!(&items[0], NavItem::Leaf(l) if l.url == "/dashboard"));
        match &items[1] {
            NavItem::Group(g) => {
                assert!(g.default_open);
                assert_eq!(g.url, "#");
                assert_eq!(g.items[0].title, "Categories");
            }
            other => panic!("expected group, got {:?}", other),
        }
    }

    #[test]
    fn collaps_is_accepted_as_variant_spelling() {
        let sections = parse(
            r#"
            [[sections]]
            variant = "collaps"
            "#,
        );
        assert_eq!(sections[0].variant, NavVariant::Collapsible);
    }

    #[test]
    fn normalize_enforces_variant_shapes() {
        let leaf = NavItem::Leaf(NavLeaf {
            name: "Home".into(),
            url: "/dashboard".into(),
            icon: None,
        });
        let empty_group = NavItem::Group(NavGroup {
            title: "Empty".into(),
            url: "#".into(),
            icon: None,
            default_open: false,
            items: Vec::new(),
        });

        let mut menu = NavSection {
            label: Some("Menu".into()),
            variant: NavVariant::Menu,
            items: vec![leaf.clone(), empty_group.clone()],
        };
        assert!(menu.normalize().is_err());

        let mut collapsible = NavSection {
            label: None,
            variant: NavVariant::Collapsible,
            items: vec![leaf.clone()],
        };
        assert!(collapsible.normalize().is_err());

        let mut compact = NavSection {
            label: None,
            variant: NavVariant::Compact,
            items: vec![leaf.clone(), empty_group],
        };
        compact.normalize().unwrap();
        assert_eq!(compact.items, vec![leaf]);
    }
}

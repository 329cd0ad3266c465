//! Sidebar state: which groups are open, the cursor, and icon-only mode.

use std::collections::HashSet;

use tracing::debug;

use super::{NavItem, NavSection};

/// One visible row of the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarEntry {
    /// Section heading. Not selectable.
    Label { section: usize },
    Leaf { section: usize, item: usize },
    Group { section: usize, item: usize, open: bool },
    /// Link inside an open group.
    Link { section: usize, item: usize, link: usize },
}

impl SidebarEntry {
    pub fn is_selectable(&self) -> bool {
        !matches!(self, SidebarEntry::Label { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Sidebar {
    sections: Vec<NavSection>,
    /// (section, item) of expanded groups.
    open: HashSet<(usize, usize)>,
    /// Index into the selectable entries.
    cursor: usize,
    /// Icon-only mode: no labels, no group links.
    collapsed: bool,
}

impl Sidebar {
    /// Groups start open according to their `default_open` flag.
    pub fn new(sections: Vec<NavSection>) -> Self {
        let open = sections
            .iter()
            .enumerate()
            .flat_map(|(s, section)| {
                section
                    .items
                    .iter()
                    .enumerate()
                    .filter_map(move |(i, item)| match item {
                        NavItem::Group(g) if g.default_open => Some((s, i)),
                        _ => None,
                    })
            })
            .collect();
        Self {
            sections,
            open,
            cursor: 0,
            collapsed: false,
        }
    }

    pub fn sections(&self) -> &[NavSection] {
        &self.sections
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
        self.clamp_cursor();
    }

    pub fn is_open(&self, section: usize, item: usize) -> bool {
        self.open.contains(&(section, item))
    }

    /// Visible entries in display order.
    pub fn entries(&self) -> Vec<SidebarEntry> {
        let mut entries = Vec::new();
        for (s, section) in self.sections.iter().enumerate() {
            if !self.collapsed && section.label.is_some() {
                entries.push(SidebarEntry::Label { section: s });
            }
            for (i, item) in section.items.iter().enumerate() {
                match item {
                    NavItem::Leaf(_) => entries.push(SidebarEntry::Leaf { section: s, item: i }),
                    NavItem::Group(group) => {
                        let open = self.is_open(s, i);
                        entries.push(SidebarEntry::Group {
                            section: s,
                            item: i,
                            open,
                        });
                        if open && !self.collapsed {
                            entries.extend((0..group.items.len()).map(|link| {
                                SidebarEntry::Link {
                                    section: s,
                                    item: i,
                                    link,
                                }
                            }));
                        }
                    }
                }
            }
        }
        entries
    }

    fn selectable(&self) -> Vec<SidebarEntry> {
        self.entries()
            .into_iter()
            .filter(SidebarEntry::is_selectable)
            .collect()
    }

    pub fn cursor_entry(&self) -> Option<SidebarEntry> {
        self.selectable().get(self.cursor).copied()
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        self.cursor = self.cursor.saturating_add(1);
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let len = self.selectable().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Display text and icon name of an entry.
    pub fn entry_text(&self, entry: SidebarEntry) -> (Option<&str>, &str) {
        match entry {
            SidebarEntry::Label { section } => {
                (None, self.sections[section].label.as_deref().unwrap_or(""))
            }
            SidebarEntry::Leaf { section, item } | SidebarEntry::Group { section, item, .. } => {
                let nav = &self.sections[section].items[item];
                (nav.icon(), nav.label())
            }
            SidebarEntry::Link {
                section,
                item,
                link,
            } => match &self.sections[section].items[item] {
                NavItem::Group(group) => (None, group.items[link].title.as_str()),
                NavItem::Leaf(leaf) => (None, leaf.name.as_str()),
            },
        }
    }

    /// Route an entry points to. Groups have none.
    pub fn entry_url(&self, entry: SidebarEntry) -> Option<&str> {
        match entry {
            SidebarEntry::Leaf { section, item } => match &self.sections[section].items[item] {
                NavItem::Leaf(leaf) => Some(leaf.url.as_str()),
                NavItem::Group(_) => None,
            },
            SidebarEntry::Link {
                section,
                item,
                link,
            } => match &self.sections[section].items[item] {
                NavItem::Group(group) => group.items.get(link).map(|l| l.url.as_str()),
                NavItem::Leaf(_) => None,
            },
            _ => None,
        }
    }

    /// Activates the entry under the cursor.
    ///
    /// Leaves and links return their route. Groups toggle open; in icon-only
    /// mode a group first expands the sidebar and opens itself.
    pub fn activate(&mut self) -> Option<String> {
        let entry = self.cursor_entry()?;
        if let SidebarEntry::Group { section, item, open } = entry {
            if self.collapsed {
                self.collapsed = false;
                self.open.insert((section, item));
            } else if open {
                self.open.remove(&(section, item));
            } else {
                self.open.insert((section, item));
            }
            debug!(section, item, "sidebar group toggled");
            self.clamp_cursor();
            return None;
        }
        self.entry_url(entry).map(str::to_string)
    }

    /// Moves the cursor to the entry linking to `url`, opening its group when
    /// needed. Returns false if nothing links there.
    pub fn reveal(&mut self, url: &str) -> bool {
        let target = self.sections.iter().enumerate().find_map(|(s, section)| {
            section.items.iter().enumerate().find_map(|(i, item)| match item {
                NavItem::Leaf(leaf) if leaf.url == url => Some((s, i, None)),
                NavItem::Group(group) => group
                    .items
                    .iter()
                    .position(|l| l.url == url)
                    .map(|link| (s, i, Some(link))),
                _ => None,
            })
        });
        let Some((section, item, link)) = target else {
            return false;
        };

        let wanted = match link {
            Some(link) => {
                self.open.insert((section, item));
                SidebarEntry::Link {
                    section,
                    item,
                    link,
                }
            }
            None => SidebarEntry::Leaf { section, item },
        };
        match self.selectable().iter().position(|e| *e == wanted) {
            Some(pos) => {
                self.cursor = pos;
                true
            }
            // Links are hidden in icon-only mode.
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::{NavGroup, NavLeaf, NavLink, NavVariant};

    fn leaf(name: &str, url: &str) -> NavItem {
        NavItem::Leaf(NavLeaf {
            name: name.into(),
            url: url.into(),
            icon: Some("home".into()),
        })
    }

    fn group(title: &str, open: bool, links: &[(&str, &str)]) -> NavItem {
        NavItem::Group(NavGroup {
            title: title.into(),
            url: "#".into(),
            icon: None,
            default_open: open,
            items: links
                .iter()
                .map(|(t, u)| NavLink {
                    title: t.to_string(),
                    url: u.to_string(),
                })
                .collect(),
        })
    }

    fn sidebar() -> Sidebar {
        Sidebar::new(vec![
            NavSection {
                label: Some("Menus".into()),
                variant: NavVariant::Menu,
                items: vec![
                    leaf("Dashboard", "/dashboard"),
                    leaf("Settings", "/dashboard/settings"),
                ],
            },
            NavSection {
                label: Some("Master Data".into()),
                variant: NavVariant::Collapsible,
                items: vec![
                    group(
                        "Post",
                        false,
                        &[
                            ("List Post", "/dashboard/posts"),
                            ("Create Post", "/dashboard/posts/create"),
                        ],
                    ),
                    group(
                        "Data Master",
                        true,
                        &[
                            ("Categories", "/dashboard/categories"),
                            ("Users", "/dashboard/users"),
                        ],
                    ),
                ],
            },
        ])
    }

    #[test]
    fn default_open_groups_show_their_links() {
        let bar = sidebar();
        let entries = bar.entries();
        assert_eq!(entries.len(), 2 + 2 + 2 + 2);
        assert!(entries.contains(&SidebarEntry::Link { section: 1, item: 1, link: 1 }));
        assert!(!entries.iter().any(|e| matches!(e, SidebarEntry::Link { item: 0, .. })));
    }

    #[test]
    fn labels_are_skipped_by_cursor() {
        let mut bar = sidebar();
        assert_eq!(bar.cursor_entry(), Some(SidebarEntry::Leaf { section: 0, item: 0 }));
        assert_eq!(bar.activate().as_deref(), Some("/dashboard"));

        bar.cursor_down();
        bar.cursor_down();
        assert_eq!(
            bar.cursor_entry(),
            Some(SidebarEntry::Group { section: 1, item: 0, open: false })
        );
    }

    #[test]
    fn activating_group_toggles_it() {
        let mut bar = sidebar();
        bar.cursor_down();
        bar.cursor_down();
        assert_eq!(bar.activate(), None);
        assert!(bar.is_open(1, 0));
        bar.cursor_down();
        assert_eq!(bar.activate().as_deref(), Some("/dashboard/posts"));

        bar.cursor_up();
        bar.activate();
        assert!(!bar.is_open(1, 0));
    }

    #[test]
    fn icon_mode_hides_labels_and_links() {
        let mut bar = sidebar();
        bar.toggle_collapsed();
        let entries = bar.entries();
        assert_eq!(entries.len(), 4);
        assert!(entries.iter().all(SidebarEntry::is_selectable));

        bar.cursor_down();
        bar.cursor_down();
        assert_eq!(bar.activate(), None);
        assert!(!bar.is_collapsed());
        assert!(bar.is_open(1, 0));
    }

    #[test]
    fn reveal_opens_group_and_moves_cursor() {
        let mut bar = sidebar();
        assert!(bar.reveal("/dashboard/posts/create"));
        assert!(bar.is_open(1, 0));
        assert_eq!(bar.activate().as_deref(), Some("/dashboard/posts/create"));
        assert!(!bar.reveal("/nowhere"));
    }
}

//! Sample data sets shown by the dashboard pages.
//!
//! Each record type implements [`Dataset`], which tells the shell how to
//! build its grid, what the detail popup shows and how the edit form maps
//! back onto the record.

use crate::form::{Field, FieldValue, FormValues, SelectOption};
use crate::grid::{ActionSet, ColumnDef, GridRow, SortKey};

/// A record type the shell can host in a grid page.
pub trait Dataset: GridRow + Send + Sync + 'static {
    /// Page title.
    const TITLE: &'static str;
    /// Row actions wired for this page.
    const ACTIONS: ActionSet;
    /// Whether the page offers bulk delete.
    const BULK_DELETE: bool;

    /// Row id for the `n`th record, counting from 1.
    fn row_id(n: usize) -> String;

    fn columns() -> Vec<ColumnDef<Self>>;

    /// Column ids the quick filter writes to.
    fn search_target() -> &'static [&'static str];

    /// Label/value pairs for the detail popup.
    fn detail(&self) -> Vec<(String, String)>;

    /// Edit form fields prefilled from the record.
    fn form_fields(&self) -> Vec<Field>;

    fn apply_form(&mut self, values: &FormValues);

    /// Builds a new record from a create form. Types without a create form
    /// return `None`.
    fn from_form(_id: String, _values: &FormValues) -> Option<Self> {
        None
    }
}

fn text(values: &FormValues, name: &str) -> Option<String> {
    values.text(name).map(|s| s.trim().to_string())
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
}

impl GridRow for User {
    fn id(&self) -> &str {
        &self.id
    }
}

pub const ROLES: [&str; 3] = ["Admin", "Editor", "Viewer"];

fn role_options() -> Vec<SelectOption> {
    ROLES.iter().map(|r| SelectOption::new(*r, *r)).collect()
}

impl Dataset for User {
    const TITLE: &'static str = "Users";
    const ACTIONS: ActionSet = ActionSet {
        view: true,
        edit: true,
        delete: true,
    };
    const BULK_DELETE: bool = true;

    fn row_id(n: usize) -> String {
        format!("usr-{:03}", n)
    }

    fn columns() -> Vec<ColumnDef<Self>> {
        vec![
            ColumnDef::new("name", |u: &User| u.name.clone())
                .header("Name")
                .width(20),
            ColumnDef::new("email", |u: &User| u.email.clone())
                .header("Email")
                .width(28),
            ColumnDef::new("phone", |u: &User| u.phone.clone())
                .header("Phone")
                .width(16),
            ColumnDef::new("role", |u: &User| u.role.clone())
                .header("Role")
                .width(8),
        ]
    }

    fn search_target() -> &'static [&'static str] {
        &["name", "email"]
    }

    fn detail(&self) -> Vec<(String, String)> {
        vec![
            ("ID".to_string(), self.id.clone()),
            ("Name".to_string(), self.name.clone()),
            ("Email".to_string(), self.email.clone()),
            ("Phone".to_string(), self.phone.clone()),
            ("Role".to_string(), self.role.clone()),
        ]
    }

    fn form_fields(&self) -> Vec<Field> {
        vec![
            Field::input("name").default_text(&self.name),
            Field::input("email").default_text(&self.email),
            Field::input("phone").default_text(&self.phone),
            Field::select("role", role_options()).default_text(&self.role),
        ]
    }

    fn apply_form(&mut self, values: &FormValues) {
        if let Some(name) = text(values, "name") {
            self.name = name;
        }
        if let Some(email) = text(values, "email") {
            self.email = email;
        }
        if let Some(phone) = text(values, "phone") {
            self.phone = phone;
        }
        if let Some(role) = text(values, "role").filter(|r| !r.is_empty()) {
            self.role = role;
        }
    }
}

const FIRST_NAMES: [&str; 8] = [
    "Olivia", "Liam", "Emma", "Noah", "Ava", "Mateo", "Sofia", "Hiro",
];
const LAST_NAMES: [&str; 3] = ["Martin", "Nguyen", "Okafor"];

pub fn users() -> Vec<User> {
    LAST_NAMES
        .iter()
        .flat_map(|last| FIRST_NAMES.iter().map(move |first| (*first, *last)))
        .enumerate()
        .map(|(i, (first, last))| User {
            id: User::row_id(i + 1),
            name: format!("{} {}", first, last),
            email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
            phone: format!("+1 555-01{:02}", (i * 7) % 100),
            role: ROLES[i % ROLES.len()].to_string(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
}

impl GridRow for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

const CATEGORY_NAMES: [(&str, &str); 6] = [
    ("Technology", "Gadgets, software and the web"),
    ("Design", "Interfaces, type and color"),
    ("Business", "Companies and markets"),
    ("Health", "Fitness and wellbeing"),
    ("Travel", "Places worth a visit"),
    ("Food", "Recipes and restaurants"),
];

fn category_options() -> Vec<SelectOption> {
    CATEGORY_NAMES
        .iter()
        .map(|(name, _)| SelectOption::new(*name, *name))
        .collect()
}

impl Dataset for Category {
    const TITLE: &'static str = "Categories";
    const ACTIONS: ActionSet = ActionSet {
        view: true,
        edit: false,
        delete: true,
    };
    const BULK_DELETE: bool = false;

    fn row_id(n: usize) -> String {
        format!("cat-{:02}", n)
    }

    fn columns() -> Vec<ColumnDef<Self>> {
        vec![
            ColumnDef::new("name", |c: &Category| c.name.clone())
                .header("Name")
                .width(14),
            ColumnDef::new("slug", |c: &Category| c.slug.clone())
                .header("Slug")
                .width(14)
                .sortable(false),
            ColumnDef::new("description", |c: &Category| c.description.clone())
                .header("Description")
                .width(32)
                .sortable(false),
        ]
    }

    fn search_target() -> &'static [&'static str] {
        &["name"]
    }

    fn detail(&self) -> Vec<(String, String)> {
        vec![
            ("ID".to_string(), self.id.clone()),
            ("Name".to_string(), self.name.clone()),
            ("Slug".to_string(), self.slug.clone()),
            ("Description".to_string(), self.description.clone()),
        ]
    }

    fn form_fields(&self) -> Vec<Field> {
        vec![
            Field::input("name").default_text(&self.name),
            Field::input("slug").default_text(&self.slug).disabled(true),
            Field::textarea("description").default_text(&self.description),
        ]
    }

    fn apply_form(&mut self, values: &FormValues) {
        if let Some(name) = text(values, "name") {
            self.name = name;
        }
        if let Some(description) = text(values, "description") {
            self.description = description;
        }
    }
}

pub fn categories() -> Vec<Category> {
    CATEGORY_NAMES
        .iter()
        .enumerate()
        .map(|(i, (name, description))| Category {
            id: Category::row_id(i + 1),
            name: name.to_string(),
            slug: name.to_lowercase(),
            description: description.to_string(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub category: String,
    pub author: String,
    pub published: bool,
    pub views: u32,
    pub body: String,
}

impl GridRow for Post {
    fn id(&self) -> &str {
        &self.id
    }
}

fn status_label(published: bool) -> &'static str {
    if published { "Published" } else { "Draft" }
}

/// Fields of the create-post form.
pub fn post_form_fields() -> Vec<Field> {
    vec![
        Field::input("title"),
        Field::select("category", category_options()),
        Field::input("author"),
        Field::switch("published").default_on(true),
        Field::textarea("body"),
    ]
}

impl Dataset for Post {
    const TITLE: &'static str = "Posts";
    const ACTIONS: ActionSet = ActionSet {
        view: true,
        edit: true,
        delete: true,
    };
    const BULK_DELETE: bool = true;

    fn row_id(n: usize) -> String {
        format!("post-{:03}", n)
    }

    fn columns() -> Vec<ColumnDef<Self>> {
        vec![
            ColumnDef::new("title", |p: &Post| p.title.clone())
                .header("Title")
                .width(30),
            ColumnDef::new("category", |p: &Post| p.category.clone())
                .header("Category")
                .width(12),
            ColumnDef::new("author", |p: &Post| p.author.clone())
                .header("Author")
                .width(18),
            ColumnDef::new("status", |p: &Post| status_label(p.published).to_string())
                .header("Status")
                .width(10),
            ColumnDef::new("views", |p: &Post| p.views.to_string())
                .header("Views")
                .width(7)
                .sort_by(|p: &Post| SortKey::Integer(i64::from(p.views))),
        ]
    }

    fn search_target() -> &'static [&'static str] {
        &["title"]
    }

    fn detail(&self) -> Vec<(String, String)> {
        vec![
            ("ID".to_string(), self.id.clone()),
            ("Title".to_string(), self.title.clone()),
            ("Category".to_string(), self.category.clone()),
            ("Author".to_string(), self.author.clone()),
            ("Status".to_string(), status_label(self.published).to_string()),
            ("Views".to_string(), self.views.to_string()),
            ("Body".to_string(), self.body.clone()),
        ]
    }

    fn form_fields(&self) -> Vec<Field> {
        vec![
            Field::input("title").default_text(&self.title),
            Field::select("category", category_options()).default_text(&self.category),
            Field::input("author").default_text(&self.author),
            Field::switch("published").default_on(self.published),
            Field::textarea("body").default_text(&self.body),
        ]
    }

    fn apply_form(&mut self, values: &FormValues) {
        if let Some(title) = text(values, "title") {
            self.title = title;
        }
        if let Some(category) = text(values, "category").filter(|c| !c.is_empty()) {
            self.category = category;
        }
        if let Some(author) = text(values, "author") {
            self.author = author;
        }
        if let Some(published) = values.get("published").and_then(FieldValue::as_bool) {
            self.published = published;
        }
        if let Some(body) = values.text("body") {
            self.body = body.to_string();
        }
    }

    fn from_form(id: String, values: &FormValues) -> Option<Self> {
        let mut post = Post {
            id,
            title: String::new(),
            category: String::new(),
            author: String::new(),
            published: false,
            views: 0,
            body: String::new(),
        };
        post.apply_form(values);
        Some(post)
    }
}

const POST_TITLES: [&str; 15] = [
    "Getting started with the dashboard",
    "Ten tips for cleaner tables",
    "Why pagination still matters",
    "A tour of keyboard shortcuts",
    "Designing with a grid",
    "Quarterly business review",
    "Morning routines that stick",
    "Weekend in Lisbon",
    "Sourdough for beginners",
    "Choosing a color palette",
    "Writing release notes",
    "Remote teams and time zones",
    "Street food in Bangkok",
    "Stretching after a long day",
    "What we learned shipping v2",
];

pub fn posts() -> Vec<Post> {
    let authors = users();
    POST_TITLES
        .iter()
        .enumerate()
        .map(|(i, title)| Post {
            id: Post::row_id(i + 1),
            title: title.to_string(),
            category: CATEGORY_NAMES[i % CATEGORY_NAMES.len()].0.to_string(),
            author: authors[(i * 5) % authors.len()].name.clone(),
            published: i % 4 != 3,
            views: ((i as u32 * 379) % 1000) + 12,
            body: format!("{}.", title),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sample_ids_are_unique() {
        let ids: HashSet<String> = users().into_iter().map(|u| u.id).collect();
        assert_eq!(ids.len(), 24);
        let ids: HashSet<String> = posts().into_iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), POST_TITLES.len());
    }

    #[test]
    fn edit_form_round_trips_through_record() {
        let mut user = users().remove(0);
        let mut form = crate::form::FormState::new(
            "Edit",
            user.form_fields(),
            crate::form::FormLayout::Grid1,
        );
        form.set_value("role", FieldValue::Text("Viewer".into()));
        form.set_value("name", FieldValue::Text("  Olive Martin ".into()));
        let values = form.submit().unwrap();
        user.apply_form(&values);
        assert_eq!(user.name, "Olive Martin");
        assert_eq!(user.role, "Viewer");
        assert!(user.email.ends_with("@example.com"));
    }

    #[test]
    fn post_from_create_form() {
        let mut form = crate::form::FormState::new(
            "Post",
            post_form_fields(),
            crate::form::FormLayout::Grid2,
        );
        form.set_value("title", FieldValue::Text("Hello".into()));
        form.set_value("author", FieldValue::Text("Ava".into()));
        form.set_value("body", FieldValue::Text("Body".into()));
        let values = form.submit().unwrap();
        let post = Post::from_form("post-100".into(), &values).unwrap();
        assert_eq!(post.title, "Hello");
        assert!(post.published);
        assert_eq!(post.category, "");
        assert_eq!(Category::from_form("x".into(), &values), None);
    }
}

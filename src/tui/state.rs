//! Application state management.

use tracing::{debug, info};

use crate::config::{Config, UserProfile};
use crate::form::{Field, FormLayout, FormState, SelectOption};
use crate::grid::GridError;
use crate::nav::{DASHBOARD_ROOT, Sidebar};
use crate::sample::{self, Category, Post, User};

use super::pages::{DatasetPage, GridPane, PaneEvent};

/// Pages reachable by route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Overview,
    Users,
    Posts,
    Categories,
    CreatePost,
    Settings,
    NotFound,
}

impl Page {
    pub fn from_path(path: &str) -> Page {
        let path = path.trim_end_matches('/');
        match path {
            "" | DASHBOARD_ROOT => Page::Overview,
            "/dashboard/users" => Page::Users,
            "/dashboard/posts" => Page::Posts,
            "/dashboard/categories" => Page::Categories,
            "/dashboard/posts/create" => Page::CreatePost,
            "/dashboard/settings" => Page::Settings,
            _ => Page::NotFound,
        }
    }

    /// Returns the display name of the page.
    pub fn name(&self) -> &'static str {
        match self {
            Page::Overview => "Dashboard",
            Page::Users => "Users",
            Page::Posts => "Posts",
            Page::Categories => "Categories",
            Page::CreatePost => "Create Post",
            Page::Settings => "Settings",
            Page::NotFound => "Not Found",
        }
    }

    pub fn is_form(&self) -> bool {
        matches!(self, Page::CreatePost | Page::Settings)
    }
}

/// Pane receiving keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Sidebar,
    Content,
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the grid quick filter.
    Filter,
    /// Editing the form on a form page.
    Form,
}

/// Entries of the header user menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserMenuItem {
    Profile,
    Settings,
    Notification,
    SignOut,
}

impl UserMenuItem {
    pub fn all() -> &'static [UserMenuItem] {
        &[
            UserMenuItem::Profile,
            UserMenuItem::Settings,
            UserMenuItem::Notification,
            UserMenuItem::SignOut,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserMenuItem::Profile => "Profile",
            UserMenuItem::Settings => "Settings",
            UserMenuItem::Notification => "Notification",
            UserMenuItem::SignOut => "Sign out",
        }
    }
}

/// Active popup state. Only one popup can be open at a time.
#[derive(Debug, Clone, Default)]
pub enum PopupState {
    /// No popup is open.
    #[default]
    None,
    /// Help popup with scroll offset.
    Help { scroll: usize },
    /// Quit confirmation dialog.
    QuitConfirm,
    UserMenu { cursor: usize },
    /// Read-only record view opened from a grid.
    Detail {
        title: String,
        lines: Vec<(String, String)>,
        scroll: usize,
    },
    /// Edit dialog for one grid row.
    EditForm {
        page: Page,
        row_id: String,
        form: FormState,
    },
}

impl PopupState {
    /// Returns true if any popup is open (excluding None).
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }
}

fn settings_form(user: &UserProfile) -> FormState {
    FormState::new(
        "Settings",
        vec![
            Field::input("username").default_text(&user.name),
            Field::input("email").default_text(&user.email),
            Field::password("password"),
            Field::select(
                "role",
                sample::ROLES
                    .iter()
                    .map(|r| SelectOption::new(*r, *r))
                    .collect(),
            )
            .default_text(&user.role)
            .disabled(true),
            Field::switch("email_notifications").default_on(true),
            Field::textarea("bio").default_text("Dashboard administrator."),
        ],
        FormLayout::Grid2,
    )
}

/// Main application state.
pub struct AppState {
    /// Current route path.
    pub route: String,
    pub page: Page,
    pub sidebar: Sidebar,
    pub focus: Focus,
    pub input_mode: InputMode,
    /// Quick filter text while in filter mode.
    pub filter_input: String,
    pub popup: PopupState,
    pub users: DatasetPage<User>,
    pub posts: DatasetPage<Post>,
    pub categories: DatasetPage<Category>,
    pub create_post: FormState,
    pub settings: FormState,
    pub user: UserProfile,
    /// One-shot message shown in the footer.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, GridError> {
        let page_size = config.grid.page_size;
        let mut state = Self {
            route: DASHBOARD_ROOT.to_string(),
            page: Page::Overview,
            sidebar: Sidebar::new(config.sections.clone()),
            focus: Focus::Sidebar,
            input_mode: InputMode::Normal,
            filter_input: String::new(),
            popup: PopupState::None,
            users: DatasetPage::new(sample::users(), page_size)?,
            posts: DatasetPage::new(sample::posts(), page_size)?,
            categories: DatasetPage::new(sample::categories(), page_size)?,
            create_post: FormState::new("Post", sample::post_form_fields(), FormLayout::Grid2),
            settings: settings_form(&config.user),
            user: config.user.clone(),
            status_message: None,
        };
        state.sidebar.reveal(DASHBOARD_ROOT);
        Ok(state)
    }

    /// Switches to the page at `path`. Unknown paths show the not-found page.
    pub fn navigate(&mut self, path: &str) {
        self.route = path.to_string();
        self.page = Page::from_path(path);
        self.sidebar.reveal(path);
        self.filter_input.clear();
        self.input_mode = InputMode::Normal;
        if self.focus == Focus::Content && self.page.is_form() {
            self.input_mode = InputMode::Form;
        }
        info!(route = path, page = self.page.name(), "navigated");
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.input_mode = if focus == Focus::Content && self.page.is_form() {
            InputMode::Form
        } else {
            InputMode::Normal
        };
    }

    pub fn toggle_focus(&mut self) {
        let next = match self.focus {
            Focus::Sidebar => Focus::Content,
            Focus::Content => Focus::Sidebar,
        };
        self.set_focus(next);
    }

    pub fn grid_pane(&self) -> Option<&dyn GridPane> {
        self.pane_for(self.page)
    }

    fn pane_for(&self, page: Page) -> Option<&dyn GridPane> {
        match page {
            Page::Users => Some(&self.users),
            Page::Posts => Some(&self.posts),
            Page::Categories => Some(&self.categories),
            _ => None,
        }
    }

    pub fn grid_pane_mut(&mut self) -> Option<&mut dyn GridPane> {
        self.pane_for_mut(self.page)
    }

    fn pane_for_mut(&mut self, page: Page) -> Option<&mut dyn GridPane> {
        match page {
            Page::Users => Some(&mut self.users),
            Page::Posts => Some(&mut self.posts),
            Page::Categories => Some(&mut self.categories),
            _ => None,
        }
    }

    pub fn page_form(&self) -> Option<&FormState> {
        match self.page {
            Page::CreatePost => Some(&self.create_post),
            Page::Settings => Some(&self.settings),
            _ => None,
        }
    }

    pub fn page_form_mut(&mut self) -> Option<&mut FormState> {
        match self.page {
            Page::CreatePost => Some(&mut self.create_post),
            Page::Settings => Some(&mut self.settings),
            _ => None,
        }
    }

    /// Turns queued grid commands into popups and notices.
    pub fn drain_grid_events(&mut self) {
        for page in [Page::Users, Page::Posts, Page::Categories] {
            let events = match self.pane_for_mut(page) {
                Some(pane) => pane.drain(),
                None => continue,
            };
            for event in events {
                match event {
                    PaneEvent::ShowDetail { title, lines } => {
                        self.popup = PopupState::Detail {
                            title,
                            lines,
                            scroll: 0,
                        };
                    }
                    PaneEvent::EditRow {
                        row_id,
                        title,
                        fields,
                    } => {
                        self.popup = PopupState::EditForm {
                            page,
                            row_id,
                            form: FormState::new(title, fields, FormLayout::Grid1),
                        };
                    }
                    PaneEvent::Notice(msg) => self.status_message = Some(msg),
                }
            }
        }
    }

    /// Submits the edit dialog. It stays open while fields are invalid.
    pub fn submit_edit_form(&mut self) {
        let PopupState::EditForm { page, row_id, form } = &mut self.popup else {
            return;
        };
        let Ok(values) = form.submit() else {
            return;
        };
        let (page, row_id) = (*page, row_id.clone());
        let saved = self
            .pane_for_mut(page)
            .is_some_and(|pane| pane.submit_edit(&row_id, &values));
        if saved {
            self.status_message = Some(format!("Saved {}.", row_id));
        }
        self.popup = PopupState::None;
    }

    /// Submits the form of the current form page.
    pub fn submit_page_form(&mut self) {
        match self.page {
            Page::CreatePost => {
                let Ok(values) = self.create_post.submit() else {
                    self.status_message = Some(invalid_notice(&self.create_post));
                    return;
                };
                if let Some(id) = self.posts.create(&values) {
                    self.status_message = Some(format!("Created {}.", id));
                }
                self.create_post.cancel();
                self.navigate("/dashboard/posts");
            }
            Page::Settings => {
                let Ok(values) = self.settings.submit() else {
                    self.status_message = Some(invalid_notice(&self.settings));
                    return;
                };
                if let Some(name) = values.text("username") {
                    self.user.name = name.trim().to_string();
                }
                if let Some(email) = values.text("email") {
                    self.user.email = email.trim().to_string();
                }
                debug!(user = self.user.name.as_str(), "profile updated");
                self.status_message = Some("Settings saved.".to_string());
            }
            _ => {}
        }
    }

    /// Resets the current page form.
    pub fn cancel_page_form(&mut self) {
        if let Some(form) = self.page_form_mut() {
            form.cancel();
        }
    }

    pub fn activate_user_menu(&mut self, item: UserMenuItem) {
        self.popup = PopupState::None;
        match item {
            UserMenuItem::Profile | UserMenuItem::Settings => {
                self.navigate("/dashboard/settings");
                self.set_focus(Focus::Content);
            }
            UserMenuItem::Notification => {
                self.status_message = Some("No new notifications.".to_string());
            }
            UserMenuItem::SignOut => self.popup = PopupState::QuitConfirm,
        }
    }

    /// Row counts for the overview page.
    pub fn overview(&self) -> Vec<(&'static str, usize)> {
        [Page::Users, Page::Posts, Page::Categories]
            .into_iter()
            .filter_map(|p| self.pane_for(p).map(|pane| (p.name(), pane.row_count())))
            .collect()
    }
}

fn invalid_notice(form: &FormState) -> String {
    format!("{} field(s) need attention.", form.errors().len())
}

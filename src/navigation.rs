//! Page selection and role-gated view dispatch.
//!
//! [`Navigator`] holds the current page and the material pre-selected for the
//! borrow form. [`Navigator::view`] resolves the page against the signed-in
//! user once, so views never branch on the role themselves.

use std::fmt;
use std::str::FromStr;

use crate::auth::{Role, User};
use crate::error::Error;

/// Every page of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Login,
    Dashboard,
    LabDataForm,
    Inventory,
    InventoryAdd,
    InventoryBorrow,
    InventoryAdmin,
    TankerArrival,
    TankerDispatch,
    TankerHistory,
    Reports,
    Analytics,
}

impl Page {
    pub const ALL: [Page; 12] = [
        Page::Login,
        Page::Dashboard,
        Page::LabDataForm,
        Page::Inventory,
        Page::InventoryAdd,
        Page::InventoryBorrow,
        Page::InventoryAdmin,
        Page::TankerArrival,
        Page::TankerDispatch,
        Page::TankerHistory,
        Page::Reports,
        Page::Analytics,
    ];

    /// Stable page identifier
    pub fn id(self) -> &'static str {
        match self {
            Page::Login => "login",
            Page::Dashboard => "dashboard",
            Page::LabDataForm => "labdata-form",
            Page::Inventory => "inventory",
            Page::InventoryAdd => "inventory-add",
            Page::InventoryBorrow => "inventory-borrow",
            Page::InventoryAdmin => "inventory-admin",
            Page::TankerArrival => "tanker-arrival",
            Page::TankerDispatch => "tanker-dispatch",
            Page::TankerHistory => "tanker-history",
            Page::Reports => "reports",
            Page::Analytics => "analytics",
        }
    }

    /// Header title; pages outside the menu show "Dashboard"
    pub fn title(self) -> &'static str {
        MENU.iter()
            .find(|(page, _)| *page == self)
            .map(|(_, label)| *label)
            .unwrap_or("Dashboard")
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Page {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.id() == s)
            .ok_or_else(|| Error::general(format!("Unknown page: {}", s)))
    }
}

/// Sidebar entries in display order
pub const MENU: &[(Page, &str)] = &[
    (Page::Dashboard, "Dashboard"),
    (Page::LabDataForm, "Lab Data Entry"),
    (Page::Inventory, "Inventory"),
    (Page::TankerArrival, "Tanker Arrival"),
    (Page::TankerDispatch, "Tanker Dispatch"),
    (Page::TankerHistory, "Tanker History"),
    (Page::Reports, "Reports"),
    (Page::Analytics, "Analytics"),
];

/// How the inventory screens present themselves for a role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryMode {
    /// Add stock and borrow actions
    Employee,
    /// Approval management
    Admin,
}

impl InventoryMode {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::CentralAdmin => InventoryMode::Admin,
            Role::PlantEmployee => InventoryMode::Employee,
        }
    }

    /// Pages reachable from the inventory screen
    pub fn actions(self) -> &'static [Page] {
        match self {
            InventoryMode::Employee => &[Page::InventoryAdd, Page::InventoryBorrow],
            InventoryMode::Admin => &[Page::InventoryAdmin],
        }
    }
}

/// The view to render, already resolved against the user's role
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard,
    LabDataForm,
    Inventory(InventoryMode),
    InventoryAdd,
    InventoryBorrow { material: String },
    InventoryAdmin,
    TankerArrival,
    TankerDispatch,
    TankerHistory,
    Reports,
    Analytics,
}

/// Current page plus the borrow form's pre-selected material
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    current: Page,
    selected_material: String,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Start on the login page
    pub fn new() -> Self {
        Self {
            current: Page::Login,
            selected_material: String::new(),
        }
    }

    /// Start on the dashboard when a session was restored
    pub fn for_session(user: Option<&User>) -> Self {
        let mut navigator = Self::new();
        if user.is_some() {
            navigator.current = Page::Dashboard;
        }
        navigator
    }

    pub fn current(&self) -> Page {
        self.current
    }

    pub fn selected_material(&self) -> &str {
        &self.selected_material
    }

    pub fn on_login(&mut self) {
        self.current = Page::Dashboard;
    }

    pub fn on_logout(&mut self) {
        self.current = Page::Login;
        self.selected_material.clear();
    }

    /// Switch to `page`.
    ///
    /// Admins asking for the add-stock page land on the approvals panel. A
    /// non-empty `material` on the borrow page replaces the selection; an
    /// empty one keeps it.
    pub fn navigate(&mut self, user: Option<&User>, page: Page, material: Option<&str>) -> Page {
        if page == Page::InventoryAdd && user.map_or(false, |u| u.role.is_admin()) {
            self.current = Page::InventoryAdmin;
            return self.current;
        }
        if page == Page::InventoryBorrow {
            if let Some(material) = material.filter(|m| !m.is_empty()) {
                self.selected_material = material.to_string();
            }
        }
        self.current = page;
        self.current
    }

    /// Resolve the current page for `user`
    pub fn view(&self, user: Option<&User>) -> View {
        let user = match user {
            Some(user) if self.current != Page::Login => user,
            _ => return View::Login,
        };

        match self.current {
            Page::Login => View::Login,
            Page::Dashboard => View::Dashboard,
            Page::LabDataForm => View::LabDataForm,
            Page::Inventory => View::Inventory(InventoryMode::for_role(user.role)),
            Page::InventoryAdd if user.role.is_employee() => View::InventoryAdd,
            Page::InventoryAdd => View::InventoryAdmin,
            Page::InventoryBorrow => View::InventoryBorrow {
                material: self.selected_material.clone(),
            },
            Page::InventoryAdmin => View::InventoryAdmin,
            Page::TankerArrival => View::TankerArrival,
            Page::TankerDispatch => View::TankerDispatch,
            Page::TankerHistory => View::TankerHistory,
            Page::Reports => View::Reports,
            Page::Analytics => View::Analytics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Lab;

    fn user(role: Role) -> User {
        User {
            username: "u1".to_string(),
            role,
            lab: Lab::Plant(1),
            token: "t".to_string(),
        }
    }

    #[test]
    fn admin_is_redirected_from_add_stock() {
        let admin = user(Role::CentralAdmin);
        let mut nav = Navigator::for_session(Some(&admin));

        assert_eq!(
            nav.navigate(Some(&admin), Page::InventoryAdd, None),
            Page::InventoryAdmin
        );
        assert_eq!(nav.view(Some(&admin)), View::InventoryAdmin);
    }

    #[test]
    fn employee_reaches_add_stock() {
        let employee = user(Role::PlantEmployee);
        let mut nav = Navigator::for_session(Some(&employee));
        nav.navigate(Some(&employee), Page::InventoryAdd, None);
        assert_eq!(nav.view(Some(&employee)), View::InventoryAdd);
    }

    #[test]
    fn borrow_payload_sets_the_selected_material() {
        let employee = user(Role::PlantEmployee);
        let mut nav = Navigator::for_session(Some(&employee));

        nav.navigate(Some(&employee), Page::InventoryBorrow, Some("Ammonia"));
        assert_eq!(
            nav.view(Some(&employee)),
            View::InventoryBorrow {
                material: "Ammonia".to_string()
            }
        );

        nav.navigate(Some(&employee), Page::Inventory, None);
        nav.navigate(Some(&employee), Page::InventoryBorrow, Some(""));
        assert_eq!(nav.selected_material(), "Ammonia");
    }

    #[test]
    fn no_user_means_login() {
        let mut nav = Navigator::new();
        nav.navigate(None, Page::Reports, None);
        assert_eq!(nav.view(None), View::Login);

        let employee = user(Role::PlantEmployee);
        nav.on_logout();
        assert_eq!(nav.view(Some(&employee)), View::Login);
    }

    #[test]
    fn inventory_view_is_tagged_by_role() {
        let admin = user(Role::CentralAdmin);
        let mut nav = Navigator::for_session(Some(&admin));
        nav.navigate(Some(&admin), Page::Inventory, None);
        assert_eq!(nav.view(Some(&admin)), View::Inventory(InventoryMode::Admin));
        assert_eq!(InventoryMode::Admin.actions(), &[Page::InventoryAdmin]);
    }

    #[test]
    fn page_ids_round_trip() {
        for page in Page::ALL {
            assert_eq!(page.id().parse::<Page>().unwrap(), page);
        }
        assert_eq!(Page::InventoryAdmin.title(), "Dashboard");
        assert_eq!(Page::LabDataForm.title(), "Lab Data Entry");
    }
}

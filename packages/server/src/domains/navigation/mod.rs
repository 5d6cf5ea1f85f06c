//! Navigation domain - data behind the sidebar
//!
//! Rendering happens in the web client; this only decides which entries exist
//! and which one is active for a path.

use serde::Serialize;

use crate::domains::users::UserRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub url: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem {
        url: "/",
        name: "Dashboard",
        icon: "/assets/icons/dashboard.svg",
    },
    NavItem {
        url: "/documents",
        name: "Documents",
        icon: "/assets/icons/documents.svg",
    },
    NavItem {
        url: "/images",
        name: "Images",
        icon: "/assets/icons/images.svg",
    },
    NavItem {
        url: "/media",
        name: "Media",
        icon: "/assets/icons/video.svg",
    },
    NavItem {
        url: "/others",
        name: "Others",
        icon: "/assets/icons/others.svg",
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarUser {
    pub full_name: String,
    pub avatar: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarItem {
    pub url: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sidebar {
    pub user: SidebarUser,
    pub items: Vec<SidebarItem>,
}

/// Sidebar for `user` on `pathname`. An entry is active only on an exact path
/// match, so `/documents/123` highlights nothing.
pub fn sidebar(user: &UserRecord, pathname: &str) -> Sidebar {
    let items = NAV_ITEMS
        .iter()
        .map(|item| SidebarItem {
            url: item.url,
            name: item.name,
            icon: item.icon,
            active: item.url == pathname,
        })
        .collect();

    Sidebar {
        user: SidebarUser {
            full_name: user.full_name.clone(),
            avatar: user.avatar.clone(),
            email: user.email.clone(),
        },
        items,
    }
}

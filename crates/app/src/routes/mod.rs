pub mod cases;
pub mod clients;
pub mod dashboard;
pub mod login;
pub mod meetings;
pub mod not_found;
pub mod updates;
pub mod users;

use crate::auth::use_auth;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdBriefcase, LdCalendar, LdLayoutDashboard, LdLogOut, LdMoon, LdFileText, LdSun, LdUser,
    LdUsers,
};
use dioxus_free_icons::Icon;
use shared_ui::theme::{ThemeMode, ThemeState};
use shared_ui::Navbar;

use cases::{CaseDetail, CaseList};
use clients::{ClientCases, ClientCreate, ClientDetail, ClientEdit, ClientList};
use dashboard::Dashboard;
use login::{Login, Logout};
use meetings::{MeetingCreate, MeetingDetail, MeetingEdit, MeetingList};
use not_found::NotFound;
use updates::Updates;
use users::{UserDetail, UserEdit};

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/login")]
    Login {},
    #[route("/logout")]
    Logout {},
    #[layout(AuthGuard)]
    #[layout(AppLayout)]
    #[redirect("/", || Route::Dashboard {})]
    #[route("/dashboard")]
    Dashboard {},
    // ── Clients ──
    #[route("/clients")]
    ClientList {},
    #[route("/clients/new")]
    ClientCreate {},
    #[route("/clients/:id")]
    ClientDetail { id: i64 },
    #[route("/clients/:id/edit")]
    ClientEdit { id: i64 },
    #[route("/clients/:id/cases")]
    ClientCases { id: i64 },
    // ── Legal cases ──
    #[route("/cases")]
    CaseList {},
    #[route("/cases/:id")]
    CaseDetail { id: i64 },
    #[route("/cases/:id/meetings/new")]
    MeetingCreate { id: i64 },
    // ── Meetings ──
    #[route("/meetings")]
    MeetingList {},
    #[route("/meetings/:id")]
    MeetingDetail { id: i64 },
    #[route("/meetings/:id/edit")]
    MeetingEdit { id: i64 },
    // ── Users ──
    #[route("/users/:id")]
    UserDetail { id: i64 },
    #[route("/users/:id/edit")]
    UserEdit { id: i64 },
    #[route("/updates")]
    Updates {},
    #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Redirects to /login unless the session cookie resolves to a user.
///
/// Uses `use_server_future` with `?` so SSR suspends until the check
/// completes and hydration reuses the embedded result.
#[component]
fn AuthGuard() -> Element {
    let mut auth = use_auth();

    let resource = use_server_future(move || async move { server::api::get_current_user().await })?;
    let result = resource.read().as_ref().cloned();

    match result {
        Some(Ok(Some(user))) => {
            if !auth.is_authenticated() {
                auth.set_user(user);
            }
            rsx! { Outlet::<Route> {} }
        }
        Some(Ok(None)) | Some(Err(_)) => {
            auth.clear_auth();
            navigator().push(Route::Login {});
            rsx! {
                div { class: "auth-guard-loading",
                    p { "Redirecting to login..." }
                }
            }
        }
        None => rsx! {
            div { class: "auth-guard-loading",
                p { "Loading..." }
            }
        },
    }
}

/// Section a route belongs to, for highlighting the navbar link.
fn section(route: &Route) -> &'static str {
    match route {
        Route::Dashboard {} => "dashboard",
        Route::ClientList {}
        | Route::ClientCreate {}
        | Route::ClientDetail { .. }
        | Route::ClientEdit { .. }
        | Route::ClientCases { .. } => "clients",
        Route::CaseList {} | Route::CaseDetail { .. } | Route::MeetingCreate { .. } => "cases",
        Route::MeetingList {} | Route::MeetingDetail { .. } | Route::MeetingEdit { .. } => {
            "meetings"
        }
        Route::Updates {} => "updates",
        Route::UserDetail { .. } | Route::UserEdit { .. } => "profile",
        Route::Login {} | Route::Logout {} | Route::NotFound { .. } => "",
    }
}

fn nav_class(current: &str, target: &str) -> &'static str {
    if current == target {
        "nav-link nav-link-active"
    } else {
        "nav-link"
    }
}

/// Signed-in layout: top navbar plus the routed page.
#[component]
fn AppLayout() -> Element {
    let route: Route = use_route();
    let auth = use_auth();
    let mut theme: ThemeState = use_context();

    let current = section(&route);
    let user = auth.current_user.read().clone();
    let dark = *theme.mode.read() == ThemeMode::Dark;

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./layout.css") }

        div { class: "app-shell",
            Navbar {
                brand: "Casebook",
                end: rsx! {
                    button {
                        class: "nav-icon-button",
                        r#type: "button",
                        title: theme.mode.read().toggle_label(),
                        onclick: move |_| theme.toggle(),
                        if dark {
                            Icon::<LdSun> { icon: LdSun, width: 16, height: 16 }
                        } else {
                            Icon::<LdMoon> { icon: LdMoon, width: 16, height: 16 }
                        }
                    }
                    if let Some(u) = user {
                        Link {
                            class: nav_class(current, "profile"),
                            to: Route::UserDetail { id: u.id },
                            Icon::<LdUser> { icon: LdUser, width: 16, height: 16 }
                            span { "{u.display_name()}" }
                        }
                    }
                    Link { class: "nav-link", to: Route::Logout {},
                        Icon::<LdLogOut> { icon: LdLogOut, width: 16, height: 16 }
                        span { "Sign out" }
                    }
                },
                Link { class: nav_class(current, "dashboard"), to: Route::Dashboard {},
                    Icon::<LdLayoutDashboard> { icon: LdLayoutDashboard, width: 16, height: 16 }
                    span { "Dashboard" }
                }
                Link { class: nav_class(current, "clients"), to: Route::ClientList {},
                    Icon::<LdUsers> { icon: LdUsers, width: 16, height: 16 }
                    span { "Clients" }
                }
                Link { class: nav_class(current, "cases"), to: Route::CaseList {},
                    Icon::<LdBriefcase> { icon: LdBriefcase, width: 16, height: 16 }
                    span { "Cases" }
                }
                Link { class: nav_class(current, "meetings"), to: Route::MeetingList {},
                    Icon::<LdCalendar> { icon: LdCalendar, width: 16, height: 16 }
                    span { "Meetings" }
                }
                Link { class: nav_class(current, "updates"), to: Route::Updates {},
                    Icon::<LdFileText> { icon: LdFileText, width: 16, height: 16 }
                    span { "Updates" }
                }
            }

            main { class: "app-main",
                Outlet::<Route> {}
            }
        }
    }
}

use pretty_assertions::assert_eq;

use session::{NavigationCatalog, NavigationMenu};
use shared_types::Role;

use crate::common::{login_as, standard_policy, test_store};

fn live_menu() -> (
    session::SessionStore<session::MemoryStorage, session::MockAuthBackend>,
    NavigationMenu,
) {
    let store = test_store();
    let menu = NavigationMenu::new(
        NavigationCatalog::standard(),
        standard_policy(),
        store.subscribe(),
    );
    (store, menu)
}

#[tokio::test]
async fn anonymous_menu_is_empty() {
    let (_store, menu) = live_menu();
    assert!(menu.entries().is_empty());
}

#[tokio::test]
async fn admin_menu_lists_admin_surface_in_order() {
    let (store, menu) = live_menu();
    login_as(&store, Role::Admin).await;

    let labels: Vec<String> = menu.entries().into_iter().map(|e| e.label).collect();
    assert_eq!(
        labels,
        vec![
            "Home",
            "Dashboard",
            "Classes",
            "Teachers",
            "Students",
            "Payments",
            "Advertisements",
            "Account",
        ]
    );
}

#[tokio::test]
async fn menu_recomputes_on_session_change() {
    let (store, menu) = live_menu();

    login_as(&store, Role::Teacher).await;
    let teacher_labels: Vec<String> = menu.entries().into_iter().map(|e| e.label).collect();
    assert_eq!(
        teacher_labels,
        vec!["Home", "My Classes", "Schedule", "Students", "Account"]
    );

    login_as(&store, Role::Parent).await;
    let parent_labels: Vec<String> = menu.entries().into_iter().map(|e| e.label).collect();
    assert_eq!(parent_labels, vec!["Home", "Children", "Payments", "Account"]);

    store.logout().await;
    assert!(menu.entries().is_empty());
}

#[tokio::test]
async fn menu_paths_are_all_reachable_for_the_role() {
    let (store, menu) = live_menu();
    let policy = standard_policy();

    for role in Role::ALL {
        login_as(&store, role).await;
        for entry in menu.entries() {
            assert!(
                policy.is_allowed(role, &entry.path),
                "{:?} menu lists unreachable {}",
                role,
                entry.path
            );
        }
    }
}

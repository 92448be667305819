//! Process-wide UI settings: the colour theme and the signed-in user.
//!
//! Each value is observable. A subscriber is called once with the current value
//! when it subscribes and again after every change.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, RwLock};
use strum::{Display, EnumString};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

impl User {
    /// Display name is the part of the address before `@`; the avatar is a generated
    /// initials badge.
    pub fn from_email(email: &str) -> Self {
        let name = email.split('@').next().unwrap_or_default().to_string();
        let initials: String = email.chars().take(2).collect();
        Self {
            name,
            email: email.to_string(),
            avatar: Some(format!(
                "https://ui-avatars.com/api/?name={}&background=10b981&color=fff",
                initials
            )),
        }
    }
}

/// Handle returned by `subscribe_*`, used to unsubscribe.
pub type SubscriptionId = Uuid;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Observable<T> {
    value: RwLock<T>,
    subscribers: RwLock<Vec<(SubscriptionId, Callback<T>)>>,
    // Held across a write and its notification so subscribers see changes in write order.
    updating: Mutex<()>,
}

impl<T: Clone> Observable<T> {
    fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
            subscribers: RwLock::new(Vec::new()),
            updating: Mutex::new(()),
        }
    }

    fn get(&self) -> T {
        self.value.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Applies `f` under the write lock, then notifies with the new value.
    ///
    /// Updates are serialised until their subscribers have run, so a callback must
    /// not change the same value it observes.
    fn update(&self, f: impl FnOnce(&T) -> T) -> T {
        let _updating = self.updating.lock().unwrap_or_else(|e| e.into_inner());
        let next = {
            let mut guard = self.value.write().unwrap_or_else(|e| e.into_inner());
            let next = f(&guard);
            *guard = next.clone();
            next
        };
        self.notify(&next);
        next
    }

    fn set(&self, value: T) {
        self.update(|_| value);
    }

    // Callbacks run outside the value and subscriber locks so they may read or subscribe again.
    fn notify(&self, value: &T) {
        let callbacks: Vec<Callback<T>> = self
            .subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        for cb in callbacks {
            cb(value);
        }
    }

    fn subscribe(&self, callback: Callback<T>) -> SubscriptionId {
        let id = Uuid::new_v4();
        self.subscribers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push((id, Arc::clone(&callback)));
        callback(&self.get());
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.subscribers.write().unwrap_or_else(|e| e.into_inner());
        let before = subs.len();
        subs.retain(|(sub_id, _)| *sub_id != id);
        subs.len() != before
    }
}

pub struct SettingsStore {
    theme: Observable<Theme>,
    user: Observable<Option<User>>,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(Theme::default(), None)
    }
}

impl SettingsStore {
    /// Starts from previously persisted values (the host owns persistence).
    pub fn new(theme: Theme, user: Option<User>) -> Self {
        Self {
            theme: Observable::new(theme),
            user: Observable::new(user),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn set_theme(&self, theme: Theme) {
        tracing::debug!(%theme, "theme changed");
        self.theme.set(theme);
    }

    /// Switches between light and dark and returns the new theme.
    pub fn toggle_theme(&self) -> Theme {
        let theme = self.theme.update(|t| t.toggled());
        tracing::debug!(%theme, "theme toggled");
        theme
    }

    pub fn subscribe_theme(&self, callback: impl Fn(&Theme) + Send + Sync + 'static) -> SubscriptionId {
        self.theme.subscribe(Arc::new(callback))
    }

    pub fn current_user(&self) -> Option<User> {
        self.user.get()
    }

    pub fn login(&self, email: &str) -> User {
        let user = User::from_email(email);
        tracing::debug!(user = %user.name, "signed in");
        self.user.set(Some(user.clone()));
        user
    }

    pub fn logout(&self) {
        tracing::debug!("signed out");
        self.user.set(None);
    }

    pub fn is_guest(&self) -> bool {
        self.current_user().is_none()
    }

    pub fn subscribe_user(&self, callback: impl Fn(&Option<User>) + Send + Sync + 'static) -> SubscriptionId {
        self.user.subscribe(Arc::new(callback))
    }

    /// Removes a theme or user subscription. Returns false for an unknown id.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.theme.unsubscribe(id) || self.user.unsubscribe(id)
    }
}

static SETTINGS: Lazy<SettingsStore> = Lazy::new(SettingsStore::default);

/// The shared store for the whole process, created on first use.
pub fn global() -> &'static SettingsStore {
    &SETTINGS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_subscriber_sees_current_value_then_changes() {
        let store = SettingsStore::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.subscribe_theme(move |t| sink.lock().unwrap().push(*t));

        assert_eq!(store.toggle_theme(), Theme::Dark);
        store.set_theme(Theme::Light);

        assert_eq!(*seen.lock().unwrap(), vec![Theme::Light, Theme::Dark, Theme::Light]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = SettingsStore::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let id = store.subscribe_user(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.login("someone@example.com");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_login_and_logout() {
        let store = SettingsStore::default();
        assert!(store.is_guest());

        let user = store.login("aisyah@example.com");
        assert_eq!(user.name, "aisyah");
        assert_eq!(
            user.avatar.as_deref(),
            Some("https://ui-avatars.com/api/?name=ai&background=10b981&color=fff")
        );
        assert!(!store.is_guest());

        store.logout();
        assert!(store.is_guest());
    }

    #[test]
    fn test_theme_wire_format() {
        assert_eq!(Theme::Dark.to_string(), "dark");
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), r#""dark""#);
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(global(), global()));
    }

    #[test]
    fn test_concurrent_toggles_notify_in_write_order() {
        let store = SettingsStore::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.subscribe_theme(move |t| sink.lock().unwrap().push(*t));

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..50 {
                        store.toggle_theme();
                    }
                });
            }
        });

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1 + 8 * 50);
        assert!(seen.windows(2).all(|w| w[1] == w[0].toggled()));
        assert_eq!(seen.last().copied(), Some(store.theme()));
    }
}

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use folio_contact::{ContactDialog, Delivery};
use tokio::{sync::Mutex, time::Instant};

use crate::routes::AppState;

pub const SESSION_COOKIE: &str = "folio_sid";

/// Dialogs untouched for this long are forgotten on the next prune.
pub const IDLE_TTL: Duration = Duration::from_secs(30 * 60);

/// Upper bound on dialogs held at once; the least recently touched is evicted.
pub const MAX_DIALOGS: usize = 256;

struct Entry {
    dialog: ContactDialog,
    touched: Instant,
}

/// Contact dialogs of the visitors currently talking to the site, keyed by
/// the opaque id of their session cookie. Nothing outlives the process.
#[derive(Clone)]
pub struct Sessions {
    delivery: Arc<Delivery>,
    dialogs: Arc<Mutex<HashMap<String, Entry>>>,
}

impl Sessions {
    pub fn new(delivery: Arc<Delivery>) -> Self {
        Self {
            delivery,
            dialogs: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn delivery(&self) -> &Delivery {
        &self.delivery
    }

    pub async fn get(&self, id: &str) -> Option<ContactDialog> {
        let mut dialogs = self.dialogs.lock().await;
        let entry = dialogs.get_mut(id)?;
        entry.touched = Instant::now();

        Some(entry.dialog.clone())
    }

    pub async fn get_or_create(&self, id: &str) -> ContactDialog {
        let mut dialogs = self.dialogs.lock().await;

        if let Some(entry) = dialogs.get_mut(id) {
            entry.touched = Instant::now();
            return entry.dialog.clone();
        }

        if dialogs.len() >= MAX_DIALOGS {
            let oldest = dialogs
                .iter()
                .min_by_key(|(_, entry)| entry.touched)
                .map(|(id, _)| id.to_owned());

            if let Some(evicted) = oldest.and_then(|oldest| dialogs.remove(&oldest)) {
                evicted.dialog.close().await;
                tracing::debug!(limit = MAX_DIALOGS, "least recently used contact dialog evicted");
            }
        }

        let dialog = ContactDialog::new(self.delivery.clone());
        dialogs.insert(
            id.to_owned(),
            Entry {
                dialog: dialog.clone(),
                touched: Instant::now(),
            },
        );

        dialog
    }

    /// Forgets every dialog that is closed or idle for longer than [`IDLE_TTL`].
    pub async fn prune(&self) {
        let candidates = self
            .dialogs
            .lock()
            .await
            .iter()
            .map(|(id, entry)| (id.to_owned(), entry.dialog.clone(), entry.touched))
            .collect::<Vec<_>>();

        let mut stale = Vec::new();
        for (id, dialog, touched) in candidates {
            if touched.elapsed() >= IDLE_TTL || !dialog.is_open().await {
                stale.push((id, touched));
            }
        }

        if stale.is_empty() {
            return;
        }

        let mut dialogs = self.dialogs.lock().await;
        let mut pruned = 0;
        for (id, touched) in &stale {
            let untouched = dialogs
                .get(id)
                .is_some_and(|entry| entry.touched == *touched);

            if let Some(entry) = untouched.then(|| dialogs.remove(id)).flatten() {
                entry.dialog.close().await;
                pruned += 1;
            }
        }

        tracing::debug!(pruned, remaining = dialogs.len(), "contact dialogs pruned");
    }

    pub async fn count(&self) -> usize {
        self.dialogs.lock().await.len()
    }
}

/// The visitor's session id, when the browser already carries one.
pub struct Visitor(pub Option<String>);

impl Visitor {
    /// Returns the session id, issuing a fresh one into `jar` if needed.
    pub fn ensure(self, jar: CookieJar) -> (CookieJar, String) {
        match self.0 {
            Some(id) => (jar, id),
            None => {
                let id = ulid::Ulid::new().to_string();
                let cookie = Cookie::build((SESSION_COOKIE, id.to_owned()))
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax)
                    .build();

                (jar.add(cookie), id)
            }
        }
    }
}

impl FromRequestParts<AppState> for Visitor {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        Ok(Visitor(
            jar.get(SESSION_COOKIE)
                .map(|cookie| cookie.value().to_owned())
                .filter(|id| !id.is_empty()),
        ))
    }
}

//! In-memory display-name registry.
//!
//! Single source of truth for which display names are currently in use and by
//! which connection. Owned by [`crate::state::AppState`] and injected into the
//! WebSocket handlers; all access goes through [`NameRegistry::claim`] and
//! [`NameRegistry::release`], guarded by one mutex so concurrent claims can
//! never both win the same candidate name.

use rand::Rng;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// Registry mapping assigned display name -> connection id.
///
/// Invariant: at most one entry per name; a name is present iff some live
/// connection currently holds it. Delivery attribution uses whatever the client
/// puts in its stroke payloads, so the connection id here exists for bookkeeping
/// and logging, not for cross-checking.
pub struct NameRegistry {
    names: Mutex<HashMap<String, Uuid>>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self {
            names: Mutex::new(HashMap::new()),
        }
    }

    /// Claim a display name for a connection.
    ///
    /// The requested name is treated as untrusted input: markup and control
    /// characters are stripped, and a whitespace-only or empty result falls
    /// back to a generated `User_<n>` id. If the candidate is already taken,
    /// `_1`, `_2`, ... is appended until a free name is found (smallest unused
    /// suffix wins). The returned name is non-empty and unique at the instant
    /// of return.
    pub fn claim(&self, requested: &str, conn_id: Uuid) -> String {
        let sanitized = sanitize_name(requested);
        let base = if sanitized.is_empty() {
            generate_small_id()
        } else {
            sanitized
        };

        let mut names = self.names.lock().expect("name registry lock");
        let mut assigned = base.clone();
        let mut counter = 1;
        while names.contains_key(&assigned) {
            assigned = format!("{}_{}", base, counter);
            counter += 1;
        }
        names.insert(assigned.clone(), conn_id);
        assigned
    }

    /// Release a previously assigned name. No-op if the name is unknown, so
    /// callers may release unconditionally on teardown.
    pub fn release(&self, assigned: &str) {
        let mut names = self.names.lock().expect("name registry lock");
        names.remove(assigned);
    }

    /// Whether a name is currently assigned to some connection.
    pub fn is_claimed(&self, name: &str) -> bool {
        let names = self.names.lock().expect("name registry lock");
        names.contains_key(name)
    }

    /// Number of currently assigned names.
    pub fn len(&self) -> usize {
        let names = self.names.lock().expect("name registry lock");
        names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for NameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Fallback id for clients that submit no usable name.
fn generate_small_id() -> String {
    format!("User_{}", rand::rng().random_range(0..1000))
}

/// Strip markup and control characters from a requested name.
///
/// `<script>` and `<style>` elements are discarded together with their content;
/// any other tag is removed but its text is kept. Control characters are
/// dropped and surrounding whitespace trimmed.
fn sanitize_name(raw: &str) -> String {
    let stripped = strip_markup(raw);
    let cleaned: String = stripped.chars().filter(|c| !c.is_control()).collect();
    cleaned.trim().to_string()
}

fn strip_markup(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        let Some(end) = tail.find('>') else {
            // Unterminated tag: discard the remainder.
            return out;
        };

        let tag_name: String = tail[1..end]
            .trim_start_matches('/')
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        if tag_name == "script" || tag_name == "style" {
            // Drop the element content through its matching close tag.
            let after = &tail[end + 1..];
            let close = format!("</{}", tag_name);
            match after.to_ascii_lowercase().find(&close) {
                Some(close_start) => {
                    let after_close = &after[close_start..];
                    match after_close.find('>') {
                        Some(close_end) => {
                            rest = &after_close[close_end + 1..];
                        }
                        None => return out,
                    }
                }
                None => return out,
            }
        } else {
            rest = &tail[end + 1..];
        }
    }

    out.push_str(rest);
    out
}

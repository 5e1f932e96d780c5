//! Builtin grammars for the tinct engine.
//!
//! Each grammar lives in its own module behind a `lang-*` cargo feature
//! (all on by default) and is built once into a shared static. The
//! [`registry`] function exposes them all through one lazily-constructed
//! [`Registry`].

use std::sync::{Arc, LazyLock};

use tinct_lib::{Grammar, Registry};

#[cfg(feature = "lang-html")]
mod html;
#[cfg(feature = "lang-ini")]
mod ini;
#[cfg(feature = "lang-jinja")]
mod jinja;
#[cfg(feature = "lang-json")]
mod json;
#[cfg(feature = "lang-nginx")]
mod nginx;
#[cfg(feature = "lang-shell")]
mod shell;

#[cfg(feature = "lang-html")]
pub use html::grammar as html;
#[cfg(feature = "lang-ini")]
pub use ini::grammar as ini;
#[cfg(feature = "lang-jinja")]
pub use jinja::grammar as jinja;
#[cfg(feature = "lang-json")]
pub use json::grammar as json;
#[cfg(feature = "lang-nginx")]
pub use nginx::grammar as nginx;
#[cfg(feature = "lang-shell")]
pub use shell::grammar as shell;

/// The fallback grammar, always available.
pub fn plaintext() -> Arc<Grammar> {
    tinct_lib::plain_text()
}

/// The registry of all enabled builtin grammars.
pub fn registry() -> &'static Registry {
    static REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
        let mut registry = Registry::new();
        registry.register(plaintext());
        #[cfg(feature = "lang-html")]
        registry.register(html());
        #[cfg(feature = "lang-ini")]
        registry.register(ini());
        #[cfg(feature = "lang-jinja")]
        registry.register(jinja());
        #[cfg(feature = "lang-json")]
        registry.register(json());
        #[cfg(feature = "lang-nginx")]
        registry.register(nginx());
        #[cfg(feature = "lang-shell")]
        registry.register(shell());
        registry
    });
    &REGISTRY
}

/// All enabled builtin grammars, in registration order.
pub fn all() -> Vec<Arc<Grammar>> {
    registry().all().map(Arc::clone).collect()
}

/// Find a builtin grammar by tag or alias, ignoring ASCII case.
pub fn find(name: &str) -> Option<Arc<Grammar>> {
    registry().find(name)
}

#[cfg(test)]
mod lib_tests;

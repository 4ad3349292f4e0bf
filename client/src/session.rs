use std::cell::RefCell;
use std::rc::Rc;

/// Where the bearer token of the signed-in admin lives.
///
/// Login starts a session with [`TokenStore::set_token`]; logout ends it with
/// [`TokenStore::clear_token`]. The HTTP client reads the token for every
/// request.
pub trait TokenStore {
    fn get_token(&self) -> Option<String>;
    fn set_token(&self, token: &str);
    fn clear_token(&self);

    fn has_session(&self) -> bool {
        self.get_token().is_some()
    }
}

/// In-memory token store; clones share the same session
#[derive(Debug, Clone, Default)]
pub struct SessionTokens {
    token: Rc<RefCell<Option<String>>>,
}

impl SessionTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let tokens = Self::new();
        tokens.set_token(&token.into());
        tokens
    }
}

impl TokenStore for SessionTokens {
    fn get_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn set_token(&self, token: &str) {
        let token = token.trim();
        *self.token.borrow_mut() = (!token.is_empty()).then(|| token.to_string());
    }

    fn clear_token(&self) {
        self.token.borrow_mut().take();
    }
}

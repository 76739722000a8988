//! In-memory collaborators for flow tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use api::{
    AuthClient, AuthError, ImageFile, RedirectFragment, Session, UploadClient, UploadError,
    UserInfo,
};

use crate::notify::{Notification, NotificationSink, NotificationVariant};

#[derive(Clone, Default)]
pub struct RecordingSink {
    seen: Rc<RefCell<Vec<Notification>>>,
}

impl RecordingSink {
    pub fn all(&self) -> Vec<Notification> {
        self.seen.borrow().clone()
    }

    pub fn count(&self, variant: NotificationVariant) -> usize {
        self.seen.borrow().iter().filter(|n| n.variant == variant).count()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        self.seen.borrow_mut().push(notification);
    }
}

pub enum UserLookup {
    Found,
    Provider(&'static str),
    Broken,
    Panics,
}

/// Scriptable auth client. Records every call it receives.
#[derive(Clone)]
pub struct FakeAuth {
    lookup: Rc<RefCell<UserLookup>>,
    session: Rc<RefCell<Option<Session>>>,
    reset_error: Rc<RefCell<Option<&'static str>>>,
    update_error: Rc<RefCell<Option<&'static str>>>,
    pub lookups: Rc<Cell<usize>>,
    pub reset_requests: Rc<RefCell<Vec<(String, String)>>>,
    pub updated_passwords: Rc<RefCell<Vec<String>>>,
}

impl FakeAuth {
    pub fn new(lookup: UserLookup) -> Self {
        Self {
            lookup: Rc::new(RefCell::new(lookup)),
            session: Rc::new(RefCell::new(None)),
            reset_error: Rc::default(),
            update_error: Rc::default(),
            lookups: Rc::default(),
            reset_requests: Rc::default(),
            updated_passwords: Rc::default(),
        }
    }

    pub fn signed_in() -> Self {
        let auth = Self::new(UserLookup::Found);
        *auth.session.borrow_mut() = Some(Session::bearer("tok"));
        auth
    }

    pub fn failing_reset(self, message: &'static str) -> Self {
        *self.reset_error.borrow_mut() = Some(message);
        self
    }

    pub fn failing_update(self, message: &'static str) -> Self {
        *self.update_error.borrow_mut() = Some(message);
        self
    }
}

pub fn user() -> UserInfo {
    UserInfo {
        id: "u-1".to_string(),
        email: "ana@example.com".to_string(),
        name: Some("Ana".to_string()),
        avatar_url: None,
        provider: "google".to_string(),
    }
}

fn provider(message: &str) -> AuthError {
    AuthError::Provider {
        status: 400,
        message: message.to_string(),
    }
}

impl AuthClient for FakeAuth {
    fn receive_redirect(&self, fragment: &RedirectFragment) {
        if let Some(session) = fragment.session() {
            *self.session.borrow_mut() = Some(session);
        }
    }

    async fn get_current_user(&self) -> Result<UserInfo, AuthError> {
        self.lookups.set(self.lookups.get() + 1);
        match &*self.lookup.borrow() {
            UserLookup::Found => Ok(user()),
            UserLookup::Provider(message) => Err(provider(message)),
            UserLookup::Broken => Err(AuthError::Decode("expected value at line 1".to_string())),
            UserLookup::Panics => panic!("client bug"),
        }
    }

    fn get_session(&self) -> Option<Session> {
        let mut session = self.session.borrow_mut();
        if session.as_ref().is_some_and(Session::is_expired) {
            *session = None;
        }
        session.clone()
    }

    async fn request_password_reset(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), AuthError> {
        self.reset_requests
            .borrow_mut()
            .push((email.to_string(), redirect_to.to_string()));
        match *self.reset_error.borrow() {
            Some(message) => Err(provider(message)),
            None => Ok(()),
        }
    }

    async fn update_credentials(&self, password: &str) -> Result<(), AuthError> {
        self.updated_passwords.borrow_mut().push(password.to_string());
        match *self.update_error.borrow() {
            Some(message) => Err(provider(message)),
            None => Ok(()),
        }
    }
}

/// Upload client that answers from a fixed script.
#[derive(Clone)]
pub struct FakeUploads {
    pub url: Option<&'static str>,
    pub calls: Rc<Cell<usize>>,
}

impl UploadClient for FakeUploads {
    async fn upload(&self, _file: &ImageFile) -> Result<String, UploadError> {
        self.calls.set(self.calls.get() + 1);
        match self.url {
            Some(url) => Ok(url.to_string()),
            None => Err(UploadError::MissingUrl),
        }
    }
}

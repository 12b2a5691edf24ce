use std::sync::Arc;

use crate::application::ports::{auth::AuthProvider, time::Clock};

pub struct UserQueryService {
    pub(super) auth: Arc<dyn AuthProvider>,
    pub(super) clock: Arc<dyn Clock>,
}

impl UserQueryService {
    pub fn new(auth: Arc<dyn AuthProvider>, clock: Arc<dyn Clock>) -> Self {
        Self { auth, clock }
    }
}

use crate::relay::NotificationRelay;
use axum::extract::FromRef;
use derive_getters::Getters;
use duplicate::duplicate_item;
use std::sync::Arc;

#[derive(Debug, Clone, Getters)]
pub struct AppState {
    relay: Arc<NotificationRelay>,
}

impl AppState {
    pub fn create(relay: NotificationRelay) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }
}

#[duplicate_item(
    service_type          field;
    [ NotificationRelay ] [ relay ];
)]
impl FromRef<AppState> for Arc<service_type> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.field.clone()
    }
}

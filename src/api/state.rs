use std::sync::Arc;

use crate::fetch::JudgeClient;

#[derive(Clone)]
pub struct AppState {
    pub judge: Arc<dyn JudgeClient>,
}

use inference::SubmitRelay;
use shared::protocol::DemoLayout;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) layout: DemoLayout,
    pub(crate) relay: SubmitRelay,
    pub(crate) example_dir: String,
    pub(crate) body_limit: usize,
}

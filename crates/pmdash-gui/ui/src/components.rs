mod empty_state;
mod modal_frame;
mod project_select;
mod status_badge;
mod toast_list;

pub use empty_state::EmptyState;
pub use modal_frame::ModalFrame;
pub use project_select::ProjectSelect;
pub use status_badge::StatusBadge;
pub use toast_list::ToastList;

//! Reusable UI components

pub mod add_edit_modal;
pub mod confirm_dialog;
pub mod form_field;
pub mod meal_preview;
pub mod overview_cards;
pub mod plan_details;
pub mod record_preview;
pub mod sidebar;
pub mod status_display;
pub mod topbar;
pub mod trainee_info;
pub mod workout_list;

pub use add_edit_modal::{AddEditModal, ModalOutcome};
pub use confirm_dialog::{ConfirmDialog, DialogVariant};
pub use form_field::{Form, FormField};
pub use meal_preview::MealPreview;
pub use plan_details::PlanDetails;
pub use record_preview::RecordPreview;
pub use sidebar::Sidebar;
pub use status_display::StatusDisplay;
pub use topbar::{SearchEvent, Topbar};
pub use trainee_info::TraineeInfo;
pub use workout_list::WorkoutList;

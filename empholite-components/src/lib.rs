//! Reusable UI components for the empholite client
//!
//! Components implement the `Component<A>` trait. Values live in
//! application state and arrive through props; edits come back as actions
//! built by the `on_change`/`on_submit` callbacks in those props.
//!
//! - [`TextInput`] - single-line input, optionally masked
//! - [`TextArea`] - multi-line editor
//! - [`render_modal`] - titled overlay that clears what is underneath
//!
//! # Example
//!
//! ```ignore
//! use empholite_components::{TextArea, TextAreaProps};
//!
//! let mut editor = TextArea::new();
//! editor.render(frame, area, TextAreaProps {
//!     value: &state.dialog.draft,
//!     label: "Response JSON",
//!     is_focused: true,
//!     error: state.dialog.error.as_deref(),
//!     on_change: Action::DialogDraftUpdate,
//! });
//! ```

mod edit;
mod modal;
mod text_area;
mod text_input;

pub use modal::{centered_rect, render_modal, ModalStyle};
pub use text_area::{TextArea, TextAreaProps};
pub use text_input::{TextInput, TextInputProps};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        centered_rect, render_modal, ModalStyle, TextArea, TextAreaProps, TextInput,
        TextInputProps,
    };
}

//! UI Components
//!
//! The page shell. Rows themselves are rendered by the virtual list widget.

mod auto_move_form;
mod category_column;

pub use auto_move_form::AutoMoveForm;
pub use category_column::CategoryColumn;

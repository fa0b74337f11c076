mod store;
mod tab_order;

pub use store::NoteStore;
pub use tab_order::{TabOrder, TabOrderConfig};

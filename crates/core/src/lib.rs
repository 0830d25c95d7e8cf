pub mod document;
pub mod fields;
pub mod nationality;

pub use document::DocumentKind;
pub use fields::DocumentFields;
pub use nationality::{nationality_name, nationality_or_sentinel, UNRECOGNIZED_NATIONALITY};

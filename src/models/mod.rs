pub mod commit;
pub mod layout;
pub mod repository;

pub use commit::*;
pub use layout::*;
pub use repository::*;

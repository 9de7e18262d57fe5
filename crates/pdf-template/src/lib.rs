mod template;
mod textops;
mod types;

pub use template::Template;
pub use types::*;

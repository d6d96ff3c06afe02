mod description;
mod value;

pub use description::{Description, TemplateRef};
pub use value::Value;

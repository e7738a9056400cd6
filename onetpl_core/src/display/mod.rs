mod template;
mod utils;

pub use template::TemplateTable;

mod path_ext;

pub use path_ext::{PathExt, best_effort_path_display};

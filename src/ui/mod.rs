pub mod todo_viewer;

pub use todo_viewer::run;

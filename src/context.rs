use std::path::PathBuf;

/// Context passed throughout the application containing global configuration
#[derive(Clone)]
pub struct Context {
    /// Print every archive entry as it is added
    pub verbose: bool,

    /// Directory the tool was started from
    pub current_dir: PathBuf,
}

impl Context {
    pub fn new(current_dir: PathBuf, verbose: bool) -> Self {
        Self {
            verbose,
            current_dir,
        }
    }
}

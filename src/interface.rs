/// Where command output and error messages are written.
pub trait UserInterface {
    /// Write a line of regular output.
    fn print(&self, message: String);

    /// Write a line of error output.
    fn print_error(&self, message: String);
}

/// Writes output to stdout, and errors to stderr.
#[derive(Debug, Default)]
pub struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, message: String) {
        eprintln!("{message}");
    }
}

//! Startup banner.
//!
//! Printed to stderr before anything else so it can never leak into the JSON
//! stream a front end reads from stdout.

/// Renders the startup banner.
pub(crate) fn banner() -> String {
    format!(
        r"
  ____  _____ _____ _
 |  _ \| ____| ____| |
 | |_) |  _| |  _| | |
 |  _ <| |___| |___| |___
 |_| \_\_____|_____|_____|

   Reel Media Engine v{}
   -----------------------------
   [+] initializing reel-engine...
",
        env!("CARGO_PKG_VERSION")
    )
}

/// Prints the banner to stderr.
pub fn print_banner() {
    eprintln!("{}", banner());
}
